use crate::{
    error::GraphError,
    executor::Cache,
    key::Key,
    selection::Selection,
    task::Expr,
    value::Value,
};

/// Evaluate one graph value against the cache.
///
/// `owner` is the key whose value is being computed; it names the failure
/// in errors.
pub(super) fn evaluate<V: Clone>(
    expr: &Expr<V>,
    cache: &Cache<V>,
    owner: &Key,
) -> Result<Value<V>, GraphError> {
    match expr {
        Expr::List(items) => items
            .iter()
            .map(|item| evaluate(item, cache, owner))
            .collect::<Result<_, _>>()
            .map(Value::List),
        Expr::Task(task) => {
            let args = task
                .args()
                .iter()
                .map(|arg| evaluate(arg, cache, owner))
                .collect::<Result<Vec<_>, _>>()?;
            task.head().call(args).map_err(|source| GraphError::Task {
                key: owner.clone(),
                source,
            })
        }
        Expr::Key(key) => {
            cache
                .get(key)
                .cloned()
                .ok_or_else(|| GraphError::MissingDependency {
                    key: owner.clone(),
                    dependency: key.clone(),
                })
        }
        Expr::Literal(value) => Ok(Value::Data(value.clone())),
        Expr::Map(_) => Ok(Value::Quoted(expr.clone())),
    }
}

/// Read the requested keys out of a fully populated cache, shaping list
/// requests into nested tuples.
pub(super) fn collect<V: Clone>(
    selection: &Selection,
    cache: &Cache<V>,
) -> Result<Value<V>, GraphError> {
    match selection {
        Selection::Key(key) => cache
            .get(key)
            .cloned()
            .ok_or_else(|| GraphError::MissingKey(key.clone())),
        Selection::List(items) => items
            .iter()
            .map(|item| collect(item, cache))
            .collect::<Result<_, _>>()
            .map(Value::Tuple),
    }
}
