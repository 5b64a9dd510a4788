use crate::{
    config::{ExecutorConfig, OrderScope},
    error::GraphError,
    executor::Executor,
    graph::Graph,
    optimize::closure,
    selection::Selection,
    toposort::{toposort, toposort_with},
};
use tracing::debug;

impl<'g, V: Clone> Executor<'g, V> {
    /// Prepare an executor with the default [`ExecutorConfig`].
    ///
    /// # Errors
    /// See [`Executor::setup_with`].
    pub fn setup(graph: &'g Graph<V>, selection: impl Into<Selection>) -> Result<Self, GraphError> {
        Self::setup_with(graph, selection, ExecutorConfig::default())
    }

    /// Prepare an executor by:
    /// - Checking that every requested key is in the graph,
    /// - Ordering the keys to evaluate so dependencies come first.
    ///
    /// Nothing is evaluated here.
    ///
    /// # Errors
    /// [`GraphError::MissingKey`] naming the first requested key absent from
    /// the graph, and [`GraphError::Cycle`] if the keys to evaluate contain a
    /// cycle.
    pub fn setup_with(
        graph: &'g Graph<V>,
        selection: impl Into<Selection>,
        config: ExecutorConfig,
    ) -> Result<Self, GraphError> {
        let selection = selection.into();

        // Phase 1: Validate the request. Nested lists are flattened; every leaf
        // must name a key of the graph.
        if let Some(missing) = selection.flatten().find(|key| !graph.contains_key(*key)) {
            return Err(GraphError::MissingKey(missing.clone()));
        }

        // Phase 2: Order the keys to evaluate.
        // - FullGraph: every key, as the reference behavior does.
        // - Closure: only the requested keys and their transitive dependencies.
        //   The relative order of those keys is the same walk restricted to a
        //   smaller map, so results do not change.
        let order = match config.scope {
            OrderScope::FullGraph => toposort(graph, None)?,
            OrderScope::Closure => {
                let dependencies = closure(graph, &selection)?;
                toposort_with(&dependencies, None)?
            }
        };
        debug!(
            keys = graph.len(),
            ordered = order.len(),
            scope = ?config.scope,
            "executor setup complete"
        );

        Ok(Self {
            graph,
            selection,
            order,
        })
    }
}
