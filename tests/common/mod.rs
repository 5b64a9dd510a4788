#![allow(dead_code)]

use dgraph::{BoxError, Func, Graph, Key, Value};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn number(value: &Value<i64>) -> Result<i64, BoxError> {
    match value {
        Value::Data(x) => Ok(*x),
        Value::List(items) => items.iter().try_fold(0i64, |acc, item| Ok(acc.wrapping_add(number(item)?))),
        other => Err(format!("expected a number, got {other:?}").into()),
    }
}

/// `x + 1`.
pub fn inc() -> Func<i64> {
    Func::new("inc", |args: Vec<Value<i64>>| match args.as_slice() {
        [x] => Ok(Value::Data(number(x)? + 1)),
        _ => Err(format!("inc takes one argument ({} given)", args.len()).into()),
    })
}

/// Sum of all arguments; list arguments contribute the sum of their items.
pub fn add() -> Func<i64> {
    Func::new("add", |args: Vec<Value<i64>>| {
        let mut total = 0i64;
        for arg in &args {
            total = total.wrapping_add(number(arg)?);
        }
        Ok(Value::Data(total))
    })
}

/// Returns its arguments as a list, unchanged.
pub fn identity_list() -> Func<i64> {
    Func::new("identity_list", |args: Vec<Value<i64>>| Ok(Value::List(args)))
}

/// Always fails.
pub fn boom() -> Func<i64> {
    Func::new("boom", |_args: Vec<Value<i64>>| Err("boom".into()))
}

/// Wraps `func`, counting how often it is called.
pub fn counted(func: Func<i64>, calls: Arc<AtomicUsize>) -> Func<i64> {
    let name = format!("counted_{}", func.name());
    Func::new(name, move |args: Vec<Value<i64>>| {
        calls.fetch_add(1, Ordering::Relaxed);
        func.call(args)
    })
}

/// Check that `cycle` is a closed walk along dependency edges of `graph`
/// that visits each of its keys once.
pub fn assert_cycle<V>(graph: &Graph<V>, cycle: &[Key]) {
    assert!(cycle.len() >= 2, "too short for a cycle: {cycle:?}");
    assert_eq!(cycle.first(), cycle.last(), "not closed: {cycle:?}");
    for pair in cycle.windows(2) {
        let deps = graph.dependencies(&pair[0]).unwrap();
        assert!(
            deps.contains(&pair[1]),
            "`{}` does not depend on `{}` in {cycle:?}",
            pair[0],
            pair[1]
        );
    }
    let inner = &cycle[1..];
    for (n, key) in inner.iter().enumerate() {
        assert!(!inner[n + 1..].contains(key), "`{key}` repeats in {cycle:?}");
    }
}
