#![allow(missing_docs)]

mod common;

use common::{add, assert_cycle, counted};
use dgraph::{
    Cache, Expr, Graph, GraphError, Key, Selection, Value, get, get_dependencies, get_deps,
    getcycle, isdag, toposort,
    types::IndexSet,
};
use proptest::{prelude::*, sample::Index};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// A random DAG: node `i` may only depend on nodes `j < i`, so it is acyclic
/// by construction. `order` is the insertion order of the nodes.
#[derive(Debug, Clone)]
struct Dag {
    deps: Vec<Vec<usize>>,
    as_list: Vec<bool>,
    order: Vec<usize>,
}

fn node_key(i: usize) -> Key {
    Key::chunk("n", [u64::try_from(i).unwrap()])
}

fn dag() -> impl Strategy<Value = Dag> {
    (1usize..24)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), n),
                prop::collection::vec(any::<bool>(), n),
                Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            )
        })
        .prop_map(|(picks, as_list, order)| {
            let deps = picks
                .into_iter()
                .enumerate()
                .map(|(i, picks)| {
                    if i == 0 {
                        Vec::new()
                    } else {
                        picks.into_iter().map(|pick| pick.index(i)).collect()
                    }
                })
                .collect();
            Dag {
                deps,
                as_list,
                order,
            }
        })
}

/// Add one edge `lo -> hi` where `lo` is reachable from `hi`, closing a cycle.
fn with_back_edge(mut dag: Dag, from: Index, to: Index) -> Dag {
    let n = dag.deps.len();
    let hi = from.index(n);
    let mut reach = vec![false; n];
    let mut work = vec![hi];
    while let Some(i) = work.pop() {
        if !std::mem::replace(&mut reach[i], true) {
            work.extend(dag.deps[i].iter().copied());
        }
    }
    let reachable: Vec<usize> = (0..n).filter(|&i| reach[i]).collect();
    let lo = reachable[to.index(reachable.len())];
    dag.deps[lo].push(hi);
    dag
}

impl Dag {
    fn build(&self, counts: Option<&[Arc<AtomicUsize>]>) -> Graph<i64> {
        let mut graph = Graph::new();
        for &i in &self.order {
            let refs = self.deps[i].iter().map(|&j| Expr::key(node_key(j)));
            let seed = Expr::literal(i64::try_from(i).unwrap());
            let func = match counts {
                Some(counts) => counted(add(), counts[i].clone()),
                None => add(),
            };
            let expr = if self.as_list[i] {
                Expr::task(func, [seed, Expr::list(refs)])
            } else {
                Expr::task(func, std::iter::once(seed).chain(refs))
            };
            graph.insert(node_key(i), expr);
        }
        graph
    }

    /// Direct recomputation of every node's value, without the engine.
    fn expected(&self) -> Vec<i64> {
        let mut values: Vec<i64> = Vec::with_capacity(self.deps.len());
        for (i, deps) in self.deps.iter().enumerate() {
            let value = deps
                .iter()
                .fold(i64::try_from(i).unwrap(), |acc, &j| acc.wrapping_add(values[j]));
            values.push(value);
        }
        values
    }
}

proptest! {
    #[test]
    fn dependencies_are_the_referenced_keys(dag in dag()) {
        let graph = dag.build(None);
        for (i, deps) in dag.deps.iter().enumerate() {
            let expected: IndexSet<Key> = deps.iter().map(|&j| node_key(j)).collect();
            let key = node_key(i);
            prop_assert_eq!(get_dependencies(&graph, Some(&key), None).unwrap(), expected);
        }
    }

    #[test]
    fn dependents_transpose_dependencies(dag in dag()) {
        let graph = dag.build(None);
        let (dependencies, dependents) = get_deps(&graph);
        prop_assert_eq!(dependencies.len(), graph.len());
        prop_assert_eq!(dependents.len(), graph.len());
        for (k1, deps) in &dependencies {
            for k2 in graph.keys() {
                prop_assert_eq!(
                    dependents[k1].contains(k2),
                    dependencies[k2].contains(k1)
                );
            }
            for dep in deps {
                prop_assert!(dependents[dep].contains(k1));
            }
        }
    }

    #[test]
    fn toposort_is_a_valid_permutation(dag in dag()) {
        let graph = dag.build(None);
        let order = toposort(&graph, None).unwrap();
        prop_assert_eq!(order.len(), graph.len());
        let position: std::collections::HashMap<&Key, usize> =
            order.iter().enumerate().map(|(n, key)| (key, n)).collect();
        prop_assert_eq!(position.len(), graph.len());
        for key in graph.keys() {
            for dep in graph.dependencies(key).unwrap() {
                prop_assert!(position[&dep] < position[key]);
            }
        }
    }

    #[test]
    fn acyclic_graphs_report_no_cycle(dag in dag()) {
        let graph = dag.build(None);
        prop_assert!(getcycle(&graph, None).unwrap().is_empty());
        prop_assert!(isdag(&graph, None).unwrap());
    }

    #[test]
    fn back_edge_yields_a_real_cycle(
        dag in dag(),
        from in any::<Index>(),
        to in any::<Index>(),
    ) {
        let graph = with_back_edge(dag, from, to).build(None);
        let cycle = getcycle(&graph, None).unwrap();
        assert_cycle(&graph, &cycle);

        let err = toposort(&graph, None).unwrap_err();
        let GraphError::Cycle(keys) = &err else {
            panic!("expected a cycle error, got {err:?}");
        };
        assert_cycle(&graph, keys);
    }

    #[test]
    fn execution_matches_direct_evaluation(dag in dag()) {
        let counts: Vec<Arc<AtomicUsize>> =
            (0..dag.deps.len()).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        let graph = dag.build(Some(&counts));
        let expected = dag.expected();

        let request: Vec<Key> = (0..dag.deps.len()).rev().map(node_key).collect();
        let mut cache = Cache::new();
        let out = get(&graph, Selection::from(request), Some(&mut cache)).unwrap();
        let expected_out: Vec<Value<i64>> =
            expected.iter().rev().map(|&v| Value::Data(v)).collect();
        prop_assert_eq!(out, Value::Tuple(expected_out));
        prop_assert_eq!(cache.len(), graph.len());
        for count in &counts {
            prop_assert_eq!(count.load(Ordering::Relaxed), 1);
        }
    }
}
