use crate::{
    config::ExecutorConfig,
    error::GraphError,
    executor::{Cache, Executor},
    graph::Graph,
    selection::Selection,
    value::Value,
};

/// Something that computes requested keys of a graph.
///
/// Implementations may evaluate in any order and on any number of workers,
/// but must call each key's task at most once per run and return results
/// shaped like `selection`.
pub trait Scheduler<V> {
    /// Compute `selection`, recording every computed key into `cache`.
    ///
    /// # Errors
    /// Whatever the implementation reports; see [`GraphError`].
    fn compute(
        &self,
        graph: &Graph<V>,
        selection: &Selection,
        cache: &mut Cache<V>,
    ) -> Result<Value<V>, GraphError>;
}

/// In-thread scheduler backed by [`Executor`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SyncScheduler {
    config: ExecutorConfig,
}

impl SyncScheduler {
    /// A scheduler using `config` for every run.
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Options applied to every run.
    #[must_use]
    pub fn config(&self) -> ExecutorConfig {
        self.config
    }
}

impl<V: Clone> Scheduler<V> for SyncScheduler {
    fn compute(
        &self,
        graph: &Graph<V>,
        selection: &Selection,
        cache: &mut Cache<V>,
    ) -> Result<Value<V>, GraphError> {
        Executor::setup_with(graph, selection.clone(), self.config)?.execute(cache)
    }
}
