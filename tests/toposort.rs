#![allow(missing_docs)]

mod common;

use common::{add, assert_cycle, inc};
use dgraph::{
    Expr, Graph, GraphError, Key, dependency_map, get_deps, getcycle, isdag, toposort,
    toposort_with,
};
use pretty_assertions::assert_eq;

fn position(order: &[Key], key: &str) -> usize {
    order
        .iter()
        .position(|k| *k == Key::from(key))
        .unwrap_or_else(|| panic!("{key} missing from order"))
}

fn cyclic() -> Graph<i64> {
    let f = inc();
    let mut graph = Graph::new();
    graph.insert("x", Expr::task(f.clone(), [Expr::key("z")]));
    graph.insert("y", Expr::task(f.clone(), [Expr::key("x")]));
    graph.insert("z", Expr::task(f, [Expr::key("y")]));
    graph
}

#[test]
fn order_respects_dependencies() {
    // Graph:
    //   a     b
    //    \   /
    //      c
    //      |
    //      d
    // Intentionally insert dependents first.
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("d", Expr::task(inc(), [Expr::key("c")]));
    graph.insert("c", Expr::task(add(), [Expr::key("a"), Expr::key("b")]));
    graph.insert("b", Expr::literal(2));
    graph.insert("a", Expr::literal(1));

    let order = toposort(&graph, None).unwrap();
    assert_eq!(order.len(), 4);
    assert!(position(&order, "a") < position(&order, "c"));
    assert!(position(&order, "b") < position(&order, "c"));
    assert!(position(&order, "c") < position(&order, "d"));
    // Deterministic for a given graph.
    assert_eq!(order, toposort(&graph, None).unwrap());
}

#[test]
fn order_from_selected_roots_only_covers_their_closure() {
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("a", Expr::literal(1));
    graph.insert("b", Expr::task(inc(), [Expr::key("a")]));
    graph.insert("unrelated", Expr::literal(5));

    let order = toposort(&graph, Some(&[Key::from("b")][..])).unwrap();
    assert_eq!(order, vec![Key::from("a"), Key::from("b")]);
}

#[test]
fn precomputed_dependencies_give_the_same_order() {
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("a", Expr::literal(1));
    graph.insert("b", Expr::task(inc(), [Expr::key("a")]));
    graph.insert("c", Expr::task(add(), [Expr::key("b"), Expr::key("a")]));

    let (dependencies, _) = get_deps(&graph);
    assert_eq!(
        toposort_with(&dependencies, None).unwrap(),
        toposort(&graph, None).unwrap()
    );
    assert_eq!(dependency_map(&graph), dependencies);
}

#[test]
fn getcycle_reports_the_loop() {
    let graph = cyclic();
    let cycle = getcycle(&graph, Some(&[Key::from("x")][..])).unwrap();
    assert_eq!(cycle.first(), Some(&Key::from("x")));
    assert_eq!(cycle.last(), Some(&Key::from("x")));
    assert!(cycle.contains(&Key::from("y")));
    assert!(cycle.contains(&Key::from("z")));
    assert_eq!(cycle.len(), 4);
    assert_cycle(&graph, &cycle);
    assert!(!isdag(&graph, None).unwrap());
}

#[test]
fn cycle_skips_pending_siblings() {
    // Graph:
    //   a -> b (literal)
    //   a -> c -> a
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("a", Expr::task(add(), [Expr::key("b"), Expr::key("c")]));
    graph.insert("b", Expr::literal(1));
    graph.insert("c", Expr::task(inc(), [Expr::key("a")]));

    let cycle = getcycle(&graph, None).unwrap();
    assert_eq!(cycle, vec![Key::from("a"), Key::from("c"), Key::from("a")]);
    assert_cycle(&graph, &cycle);

    let err = toposort(&graph, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cycle detected between the following keys: a->c->a"
    );
}

#[test]
fn cycle_skips_stale_stack_entries() {
    // `x` is pushed twice: once as a pending dependency of `d`, and again
    // from `y`, where it is actually visited.
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("d", Expr::task(add(), [Expr::key("x"), Expr::key("y")]));
    graph.insert("x", Expr::task(inc(), [Expr::key("d")]));
    graph.insert("y", Expr::task(inc(), [Expr::key("x")]));

    let cycle = getcycle(&graph, Some(&[Key::from("d")][..])).unwrap();
    assert_eq!(
        cycle,
        vec![Key::from("d"), Key::from("y"), Key::from("x"), Key::from("d")]
    );
    assert_cycle(&graph, &cycle);
}

#[test]
fn toposort_refuses_cycles() {
    let err = toposort(&cyclic(), None).unwrap_err();
    let GraphError::Cycle(keys) = &err else {
        panic!("expected a cycle error, got {err:?}");
    };
    assert_eq!(
        keys,
        &vec![
            Key::from("x"),
            Key::from("z"),
            Key::from("y"),
            Key::from("x")
        ]
    );
    assert_eq!(
        err.to_string(),
        "cycle detected between the following keys: x->z->y->x"
    );
    assert_eq!(err.cycle(), Some(keys.as_slice()));
}

#[test]
fn self_reference_is_a_cycle() {
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("a", Expr::task(inc(), [Expr::key("a")]));
    assert_eq!(
        getcycle(&graph, None).unwrap(),
        vec![Key::from("a"), Key::from("a")]
    );
}

#[test]
fn acyclic_graph_has_no_cycle() {
    let mut graph: Graph<i64> = Graph::new();
    graph.insert("a", Expr::literal(1));
    graph.insert("b", Expr::task(add(), [Expr::key("a"), Expr::key("a")]));
    assert!(getcycle(&graph, None).unwrap().is_empty());
    assert!(isdag(&graph, Some(&[Key::from("b")][..])).unwrap());
}

#[test]
fn cycle_outside_the_roots_is_not_reached() {
    let mut graph = cyclic();
    graph.insert("free", Expr::literal(0));
    assert!(isdag(&graph, Some(&[Key::from("free")][..])).unwrap());
}

#[test]
fn missing_root_is_reported() {
    let graph: Graph<i64> = Graph::new();
    assert!(matches!(
        toposort(&graph, Some(&[Key::from("x")][..])),
        Err(GraphError::MissingKey(key)) if key == Key::from("x")
    ));
}

#[test]
fn long_chains_do_not_overflow_the_stack() {
    const LEN: u64 = 200_000;
    let f = inc();
    let mut graph: Graph<i64> = Graph::new();
    graph.insert(("k", 0), Expr::literal(0));
    for i in 1..LEN {
        graph.insert(("k", i), Expr::task(f.clone(), [Expr::key(("k", i - 1))]));
    }
    let order = toposort(&graph, Some(&[Key::from(("k", LEN - 1))][..])).unwrap();
    assert_eq!(order.len(), usize::try_from(LEN).unwrap());
    assert_eq!(order[0], Key::from(("k", 0)));
    assert_eq!(order[order.len() - 1], Key::from(("k", LEN - 1)));
}
