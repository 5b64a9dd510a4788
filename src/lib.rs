//! Keyed task-graph execution engine.
//!
//! A [`Graph`] maps keys to values describing a deferred computation. Each
//! value is one of:
//! - a literal, returned as-is,
//! - a reference to another key, replaced by that key's result,
//! - a task: a callable followed by argument slots, each of which is again a
//!   literal, a reference, a task, or a list of those.
//!
//! This crate consumes such graphs. It:
//! - Extracts direct dependencies and their transpose.
//! - Orders keys topologically with an explicit-stack walk and reports
//!   cycles.
//! - Substitutes values for key references, and inlines or culls graphs.
//! - Executes a graph synchronously against a cache, evaluating each key at
//!   most once.
//!
//! Key modules:
//! - `task`: `Expr`, `Task`, and the callables in task head position.
//! - `graph`: the graph container and dependency analysis.
//! - `toposort`: ordering and cycle detection.
//! - `subs` / `literal`: substitution and quoting.
//! - `executor`: validation, ordering, and cached evaluation.
//!
//! Quick start:
//! 1. Build a [`Graph`] with [`Expr::literal`], [`Expr::key`] and
//!    [`Expr::task`] values.
//! 2. Call [`get`] with the keys you want, or set up an [`Executor`] to
//!    inspect the evaluation order first.
//!
//! ```
//! use dgraph::{Expr, Func, Graph, Value, get};
//!
//! let inc = Func::new("inc", |args: Vec<Value<i64>>| match args.as_slice() {
//!     [Value::Data(x)] => Ok(Value::Data(x + 1)),
//!     _ => Err("inc expects one number".into()),
//! });
//! let mut graph = Graph::new();
//! graph.insert("x", Expr::literal(1));
//! graph.insert("y", Expr::task(inc, [Expr::key("x")]));
//! assert_eq!(get(&graph, "y", None).unwrap(), Value::Data(2));
//! ```

/// Tri-state equality used where a plain `==` is not trustworthy.
pub mod compare;
/// Executor options.
pub mod config;
/// Errors raised by analysis and execution.
pub mod error;
/// The synchronous executor and its result cache.
///
/// Validates requested keys, orders the graph, and evaluates each key
/// against the cache so no task runs twice.
pub mod executor;
/// Graph container and dependency analysis.
pub mod graph;
/// Graph keys.
pub mod key;
/// The literal wrapper and quoting.
pub mod literal;
/// Graph rewrites: culling and inlining.
pub mod optimize;
/// The scheduler contract and its synchronous implementation.
pub mod scheduler;
/// Output-key requests.
pub mod selection;
/// Key substitution.
pub mod subs;
/// Graph values and task heads.
pub mod task;
/// Topological ordering and cycle detection.
///
/// Uses an explicit stack, so very deep graphs are safe.
pub mod toposort;
/// Common aliases.
pub mod types;
/// Evaluated results.
pub mod value;

pub use crate::{
    compare::{Compare, Comparison},
    config::{ExecutorConfig, OrderScope},
    error::GraphError,
    executor::{Cache, Executor, get},
    graph::{
        Dependencies, Graph, dependency_map, get_dependencies, get_dependencies_list, get_deps,
        has_tasks, preorder_traversal, reverse_dict,
    },
    key::{Key, KeyIndex},
    literal::{Literal, quote},
    optimize::{cull, inline},
    scheduler::{Scheduler, SyncScheduler},
    selection::{Selection, flatten},
    subs::subs,
    task::{Callable, Expr, Func, Task, is_task},
    toposort::{getcycle, isdag, toposort, toposort_with},
    types::BoxError,
    value::Value,
};
