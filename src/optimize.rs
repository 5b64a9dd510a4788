use crate::{
    error::GraphError,
    graph::{Dependencies, Graph, dependency_map},
    key::Key,
    selection::Selection,
    subs::subs,
    task::Expr,
    toposort::toposort_with,
    types::{HashMap, IndexSet},
};
use tracing::debug;

/// Dependency map of the requested keys and everything they transitively
/// depend on, in discovery order.
pub(crate) fn closure<V>(graph: &Graph<V>, keys: &Selection) -> Result<Dependencies, GraphError> {
    let mut seen: IndexSet<&Key> = IndexSet::default();
    let mut work: Vec<&Key> = keys.flatten().filter(|key| seen.insert(*key)).collect();
    let mut dependencies = Dependencies::default();

    while !work.is_empty() {
        let mut next = Vec::new();
        for key in work {
            let deps = graph.dependencies(key)?;
            for dep in &deps {
                if let Some((dep, _)) = graph.get_key_value(dep) {
                    if seen.insert(dep) {
                        next.push(dep);
                    }
                }
            }
            dependencies.insert(key.clone(), deps);
        }
        work = next;
    }
    Ok(dependencies)
}

/// Keep only the requested keys and everything they transitively depend on.
///
/// Returns the culled graph together with its dependency map, which covers
/// exactly the culled keys.
///
/// # Errors
/// [`GraphError::MissingKey`] if a requested key is not in the graph.
pub fn cull<V: Clone>(
    graph: &Graph<V>,
    keys: &Selection,
) -> Result<(Graph<V>, Dependencies), GraphError> {
    let dependencies = closure(graph, keys)?;
    let out: Graph<V> = dependencies
        .keys()
        .map(|key| (key.clone(), graph[key].clone()))
        .collect();
    debug!(kept = out.len(), total = graph.len(), "culled graph");
    Ok((out, dependencies))
}

/// Substitute the bodies of `keys` into every value that references them.
///
/// With `inline_constants`, keys holding plain data or a bare reference to
/// another key are inlined as well. Inlined keys stay in the returned graph;
/// they are merely no longer referenced, so a later [`cull`] drops them.
///
/// # Errors
/// [`GraphError::Cycle`] if the keys to inline depend on each other
/// cyclically.
pub fn inline<V: Clone>(
    graph: &Graph<V>,
    keys: &[Key],
    inline_constants: bool,
) -> Result<Graph<V>, GraphError> {
    if keys.is_empty() && !inline_constants {
        return Ok(graph.clone());
    }
    let dependencies = dependency_map(graph);

    let mut inlined: IndexSet<Key> = keys
        .iter()
        .filter(|key| graph.contains_key(*key))
        .cloned()
        .collect();
    if inline_constants {
        inlined.extend(graph.iter().filter_map(|(key, expr)| {
            let is_alias = matches!(expr, Expr::Key(target) if graph.contains_key(target));
            let is_constant = !expr.is_task() && dependencies[key].is_empty();
            (is_alias || is_constant).then(|| key.clone())
        }));
    }

    // Inlined keys may reference each other, so rewrite them dependencies-first.
    let roots: Vec<Key> = inlined.iter().cloned().collect();
    let order = toposort_with(&dependencies, Some(roots.as_slice()))?;

    let mut replacements: HashMap<&Key, Expr<V>> = HashMap::default();
    for key in order.iter().filter(|key| inlined.contains(*key)) {
        let mut val = graph[key].clone();
        for dep in dependencies[key].iter().filter(|dep| inlined.contains(*dep)) {
            let replace = replacements.get(dep).unwrap_or(&graph[dep]);
            val = subs(&val, dep, replace);
        }
        replacements.insert(key, val);
    }

    let mut out = Graph::new();
    for (key, expr) in graph {
        let val = match replacements.get(key) {
            Some(val) => val.clone(),
            None => dependencies[key]
                .iter()
                .filter(|dep| inlined.contains(*dep))
                .fold(expr.clone(), |val, dep| subs(&val, dep, &replacements[dep])),
        };
        out.insert(key.clone(), val);
    }
    debug!(inlined = inlined.len(), "inlined keys");
    Ok(out)
}
