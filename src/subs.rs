use crate::{
    compare::{Compare, Comparison},
    key::Key,
    task::Expr,
};

/// Replace every reference to `key` inside `expr` with `val`.
///
/// The input is left untouched and a new expression is returned. Task
/// arguments and list items are rewritten recursively; the head of a task,
/// maps, and payloads hidden behind a [`Literal`](crate::literal::Literal)
/// are left alone.
pub fn subs<V: Clone>(expr: &Expr<V>, key: &Key, val: &Expr<V>) -> Expr<V> {
    match expr {
        Expr::Task(task) => {
            let args = task.args().iter().map(|arg| subs(arg, key, val)).collect();
            Expr::Task(task.with_args(args))
        }
        Expr::List(items) => Expr::List(items.iter().map(|item| subs(item, key, val)).collect()),
        Expr::Key(candidate) => match candidate.compare(key) {
            Comparison::Equal => val.clone(),
            // A reference that cannot be compared with `key` is never a match.
            Comparison::NotEqual | Comparison::Incomparable => expr.clone(),
        },
        Expr::Literal(_) | Expr::Map(_) => expr.clone(),
    }
}
