use crate::{
    task::{Callable, Expr, Task},
    value::Value,
};
use core::{any, fmt};
use std::sync::Arc;

/// Zero-argument callable that returns its payload unevaluated.
///
/// Wrapping a task or list in a `Literal` stops the executor from running or
/// descending into it; see [`quote`].
#[derive(Debug, Clone, PartialEq)]
pub struct Literal<V> {
    data: Arc<Expr<V>>,
}

impl<V> Literal<V> {
    /// Wrap `data`.
    pub fn new(data: Expr<V>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// The wrapped payload.
    #[must_use]
    pub fn data(&self) -> &Expr<V> {
        &self.data
    }

    /// Constructor and arguments that rebuild this wrapper.
    pub fn reduce(&self) -> (fn(Expr<V>) -> Self, (Expr<V>,))
    where
        V: Clone,
    {
        (Self::new, (Expr::clone(&self.data),))
    }
}

impl<V: Clone> Literal<V> {
    /// Return the payload.
    ///
    /// Plain data comes back as [`Value::Data`]; anything structured comes
    /// back as [`Value::Quoted`] so it is never interpreted.
    #[must_use]
    pub fn call(&self) -> Value<V> {
        match &*self.data {
            Expr::Literal(value) => Value::Data(value.clone()),
            other => Value::Quoted(other.clone()),
        }
    }
}

impl<V> fmt::Display for Literal<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = match &*self.data {
            Expr::Literal(_) => short_type_name::<V>(),
            Expr::Key(_) => "Key",
            Expr::Task(_) => "Task",
            Expr::List(_) => "List",
            Expr::Map(_) => "Map",
        };
        write!(f, "literal<type={type_name}>")
    }
}

fn short_type_name<T>() -> &'static str {
    let full = any::type_name::<T>();
    // Generic arguments may themselves contain paths.
    let base = full.split('<').next().unwrap_or(full);
    match base.rsplit("::").next() {
        Some(short) if base.len() == full.len() => short,
        _ => full,
    }
}

/// Protect a task or list from being evaluated.
///
/// Tasks and lists come back wrapped as a zero-argument task whose head is a
/// [`Literal`]; evaluating it yields the original structure verbatim. Every
/// other expression is returned unchanged.
pub fn quote<V>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::Task(_) | Expr::List(_) => {
            Expr::Task(Task::new(Callable::Literal(Literal::new(expr)), []))
        }
        other => other,
    }
}
