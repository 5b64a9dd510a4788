use crate::{key::Key, types::BoxError};
use thiserror::Error;

/// Errors raised by graph analysis and execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// A requested key is not present in the graph.
    #[error("missing key `{0}`")]
    MissingKey(Key),
    /// A task referenced a key that has no value at evaluation time.
    #[error("key `{key}` references missing key `{dependency}`")]
    MissingDependency {
        /// Key whose task holds the reference.
        key: Key,
        /// The unresolved reference.
        dependency: Key,
    },
    /// The graph is not acyclic.
    #[error("cycle detected between the following keys: {}", join_cycle(.0))]
    Cycle(Vec<Key>),
    /// A task's callable failed.
    #[error("task `{key}` failed: {source}")]
    Task {
        /// Key being computed.
        key: Key,
        /// Error returned by the callable.
        #[source]
        source: BoxError,
    },
    /// Dependencies were requested with both or neither of a key and a task.
    #[error("provide exactly one of a key or a task")]
    ExclusiveArguments,
}

impl GraphError {
    /// Keys forming the cycle, if this is a cycle error.
    #[must_use]
    pub fn cycle(&self) -> Option<&[Key]> {
        match self {
            Self::Cycle(keys) => Some(keys),
            _ => None,
        }
    }
}

fn join_cycle(keys: &[Key]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("->")
}
