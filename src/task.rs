use crate::{
    key::Key,
    literal::Literal,
    types::{BoxError, IndexMap},
    value::Value,
};
use core::fmt;
use std::sync::Arc;

/// Signature of a task body: evaluated arguments in, one value out.
pub type TaskFn<V> = dyn Fn(Vec<Value<V>>) -> Result<Value<V>, BoxError> + Send + Sync;

/// A named, shareable task function.
///
/// Two `Func`s are equal only if they share the same underlying closure,
/// mirroring identity comparison of functions.
pub struct Func<V> {
    name: Arc<str>,
    body: Arc<TaskFn<V>>,
}

impl<V> Func<V> {
    /// Wrap a closure under a display name.
    pub fn new(
        name: impl Into<Arc<str>>,
        body: impl Fn(Vec<Value<V>>) -> Result<Value<V>, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// Display name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    ///
    /// # Errors
    /// Whatever the wrapped closure returns.
    pub fn call(&self, args: Vec<Value<V>>) -> Result<Value<V>, BoxError> {
        (self.body)(args)
    }
}

impl<V> Clone for Func<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: self.body.clone(),
        }
    }
}

impl<V> fmt::Debug for Func<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl<V> PartialEq for Func<V> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

/// Head of a task: something that can be called.
#[derive(Debug, Clone, PartialEq)]
pub enum Callable<V> {
    /// A user function.
    Function(Func<V>),
    /// A zero-argument wrapper returning its payload unevaluated.
    Literal(Literal<V>),
}

impl<V: Clone> Callable<V> {
    /// Invoke the callable with already-evaluated arguments.
    ///
    /// # Errors
    /// Errors of the wrapped function, or an arity error when a literal is
    /// called with arguments.
    pub fn call(&self, args: Vec<Value<V>>) -> Result<Value<V>, BoxError> {
        match self {
            Self::Function(func) => func.call(args),
            Self::Literal(literal) if args.is_empty() => Ok(literal.call()),
            Self::Literal(literal) => {
                Err(format!("{literal} takes no arguments ({} given)", args.len()).into())
            }
        }
    }
}

impl<V> fmt::Display for Callable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(func) => f.write_str(func.name()),
            Self::Literal(literal) => fmt::Display::fmt(literal, f),
        }
    }
}

impl<V> From<Func<V>> for Callable<V> {
    fn from(func: Func<V>) -> Self {
        Self::Function(func)
    }
}

impl<V> From<Literal<V>> for Callable<V> {
    fn from(literal: Literal<V>) -> Self {
        Self::Literal(literal)
    }
}

/// One deferred call: a callable head followed by argument slots.
///
/// The head is always present, so a task has arity of at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct Task<V> {
    head: Callable<V>,
    args: Vec<Expr<V>>,
}

impl<V> Task<V> {
    /// Build a task from a callable and its argument slots.
    pub fn new(head: impl Into<Callable<V>>, args: impl IntoIterator<Item = Expr<V>>) -> Self {
        Self {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }

    /// The callable in head position.
    #[must_use]
    pub fn head(&self) -> &Callable<V> {
        &self.head
    }

    /// Argument slots, excluding the head.
    #[must_use]
    pub fn args(&self) -> &[Expr<V>] {
        &self.args
    }

    /// Number of elements including the head.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len() + 1
    }
}

impl<V: Clone> Task<V> {
    pub(crate) fn with_args(&self, args: Vec<Expr<V>>) -> Self {
        Self {
            head: self.head.clone(),
            args,
        }
    }
}

/// A value stored in a graph, or nested inside one.
///
/// The variant is fixed when the value is built, so whether something is
/// data, a reference, or an instruction never has to be guessed later.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<V> {
    /// Plain data, returned as-is.
    Literal(V),
    /// Reference to another graph key.
    Key(Key),
    /// A deferred call.
    Task(Task<V>),
    /// Positional collection; evaluates to a list of its evaluated items.
    List(Vec<Expr<V>>),
    /// Named collection. Walked for dependencies, returned verbatim on
    /// evaluation.
    Map(IndexMap<Arc<str>, Expr<V>>),
}

impl<V> Expr<V> {
    /// Plain data.
    pub fn literal(value: V) -> Self {
        Self::Literal(value)
    }

    /// A key reference.
    pub fn key(key: impl Into<Key>) -> Self {
        Self::Key(key.into())
    }

    /// A task calling `head` with `args`.
    pub fn task(head: impl Into<Callable<V>>, args: impl IntoIterator<Item = Expr<V>>) -> Self {
        Self::Task(Task::new(head, args))
    }

    /// A list of expressions.
    pub fn list(items: impl IntoIterator<Item = Expr<V>>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// A map of named expressions.
    pub fn map<K: Into<Arc<str>>>(entries: impl IntoIterator<Item = (K, Expr<V>)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// See [`is_task`].
    #[must_use]
    #[inline]
    pub fn is_task(&self) -> bool {
        is_task(self)
    }

    /// The task, if this is one.
    #[must_use]
    pub fn as_task(&self) -> Option<&Task<V>> {
        match self {
            Self::Task(task) => Some(task),
            _ => None,
        }
    }
}

impl<V> From<Key> for Expr<V> {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl<V> From<Task<V>> for Expr<V> {
    fn from(task: Task<V>) -> Self {
        Self::Task(task)
    }
}

/// Whether `expr` is a runnable task rather than data or a reference.
///
/// Every component decides "instruction or data" through this one check.
#[must_use]
#[inline]
pub fn is_task<V>(expr: &Expr<V>) -> bool {
    matches!(expr, Expr::Task(_))
}
