mod execute;
mod setup;

use crate::{
    error::GraphError,
    graph::Graph,
    key::Key,
    selection::Selection,
    types::IndexMap,
    value::Value,
};
use derive_more::{Debug, Deref};
use tracing::trace;

/// Results computed during one execution, by key.
///
/// Entries are only ever added: a key is evaluated at most once per run and
/// its result stays put. A cache may be seeded before a run; seeded keys are
/// not recomputed.
#[derive(Debug, Clone, Deref)]
pub struct Cache<V>(IndexMap<Key, Value<V>>);

impl<V> Cache<V> {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::default())
    }

    /// Consume the cache, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<Key, Value<V>> {
        self.0
    }

    fn record(&mut self, key: Key, value: Value<V>) {
        let previous = self.0.insert(key, value);
        assert!(previous.is_none(), "Cache::record: [1]");
    }
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: Into<Key>> FromIterator<(K, Value<V>)> for Cache<V> {
    fn from_iter<I: IntoIterator<Item = (K, Value<V>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Synchronous graph executor.
///
/// `setup` validates the requested keys and computes an evaluation order up
/// front; `execute` then walks that order once, evaluating each key against
/// the cache:
/// - Lists evaluate item by item.
/// - Tasks evaluate their arguments depth-first, left to right, then call
///   the head exactly once.
/// - References read the cache; dependencies always precede their
///   dependents in the order, so the entry is present.
/// - Literals and maps are returned as they are.
///
/// Errors raised by a task abort the run; keys finished before it stay in
/// the cache.
#[must_use]
#[derive(Debug)]
pub struct Executor<'g, V> {
    #[debug(skip)]
    graph: &'g Graph<V>,
    selection: Selection,
    order: Vec<Key>,
}

impl<'g, V: Clone> Executor<'g, V> {
    /// Evaluation order computed by `setup`.
    #[must_use]
    pub fn order(&self) -> &[Key] {
        &self.order
    }

    /// Keys requested at setup.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Evaluate the ordered keys into `cache` and return the requested
    /// result.
    ///
    /// A single requested key yields its value; a list-shaped request yields
    /// [`Value::Tuple`]s nested the same way as the request.
    ///
    /// # Errors
    /// [`GraphError::Task`] if a callable fails, and
    /// [`GraphError::MissingDependency`] if a task references a key that has
    /// no value.
    pub fn execute(&self, cache: &mut Cache<V>) -> Result<Value<V>, GraphError> {
        let Self {
            graph,
            selection,
            order,
        } = self;
        for key in order {
            if cache.contains_key(key) {
                trace!(%key, "using cached result");
                continue;
            }
            let expr = graph.get(key).ok_or_else(|| GraphError::MissingKey(key.clone()))?;
            trace!(%key, "evaluating");
            let value = execute::evaluate(expr, cache, key)?;
            cache.record(key.clone(), value);
        }
        execute::collect(selection, cache)
    }
}

/// Compute `selection` from `graph` synchronously.
///
/// `cache` collects every computed key; pass `None` to use a throwaway one.
///
/// # Errors
/// [`GraphError::MissingKey`] before any evaluation if a requested key is
/// not in the graph, [`GraphError::Cycle`] if the graph is cyclic, and any
/// error raised while evaluating (see [`Executor::execute`]).
pub fn get<V: Clone>(
    graph: &Graph<V>,
    selection: impl Into<Selection>,
    cache: Option<&mut Cache<V>>,
) -> Result<Value<V>, GraphError> {
    let mut scratch = Cache::new();
    let cache = cache.unwrap_or(&mut scratch);
    Executor::setup(graph, selection)?.execute(cache)
}
