/// Which part of the graph the executor orders and evaluates.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum OrderScope {
    /// Order and evaluate every key of the graph.
    #[default]
    FullGraph,
    /// Cull the graph to the requested keys and their transitive
    /// dependencies first. Results are identical; unrelated keys are never
    /// evaluated.
    Closure,
}

/// Options for [`Executor::setup_with`](crate::executor::Executor::setup_with).
///
/// `Executor::setup` uses `ExecutorConfig::default()`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExecutorConfig {
    /// Portion of the graph to order and evaluate.
    pub scope: OrderScope,
}

impl ExecutorConfig {
    /// Set the ordering scope.
    #[must_use]
    pub fn with_scope(mut self, scope: OrderScope) -> Self {
        self.scope = scope;
        self
    }
}
