use crate::{
    error::GraphError,
    graph::{Dependencies, Graph, dependency_map},
    key::Key,
    types::HashSet,
};
use tracing::debug;

/// Depth-first ordering over `dependencies` starting at `roots`.
///
/// The traversal keeps its own stack instead of recursing, so graphs with
/// long dependency chains cannot exhaust the call stack.
///
/// - `completed`: keys already placed in the order.
/// - `seen`: keys on the active path, visited but with dependencies still
///   being resolved.
/// - `nodes`: the explicit traversal stack for the current root.
///
/// A node stays on the stack until all of its dependencies are completed, so
/// it is revisited after them. Completed keys are appended to `ordered` when
/// a sink is given. Meeting a `seen` dependency means the active path leads
/// back to it, and the cycle along that path is returned.
fn walk<'a>(
    dependencies: &'a Dependencies,
    roots: impl IntoIterator<Item = &'a Key>,
    mut ordered: Option<&mut Vec<Key>>,
) -> Result<Option<Vec<Key>>, GraphError> {
    let mut completed: HashSet<&'a Key> = HashSet::default();
    let mut seen: HashSet<&'a Key> = HashSet::default();
    let mut nodes: Vec<&'a Key> = Vec::new();
    let mut next_nodes: Vec<&'a Key> = Vec::new();

    for root in roots {
        // Requested keys must be present.
        let Some((root, _)) = dependencies.get_key_value(root) else {
            return Err(GraphError::MissingKey(root.clone()));
        };
        if completed.contains(root) {
            continue;
        }
        nodes.push(root);
        while let Some(&cur) = nodes.last() {
            if completed.contains(cur) {
                nodes.pop();
                continue;
            }
            seen.insert(cur);
            let deps = dependencies
                .get(cur)
                .ok_or_else(|| GraphError::MissingKey(cur.clone()))?;
            next_nodes.clear();
            for dep in deps {
                if completed.contains(dep) {
                    continue;
                }
                if seen.contains(dep) {
                    let cycle = unwind_cycle(&mut nodes, &seen, dep);
                    debug!(length = cycle.len() - 1, start = %dep, "cycle detected");
                    return Ok(Some(cycle));
                }
                next_nodes.push(dep);
            }
            if next_nodes.is_empty() {
                if let Some(ordered) = ordered.as_deref_mut() {
                    ordered.push(cur.clone());
                }
                completed.insert(cur);
                seen.remove(cur);
                nodes.pop();
            } else {
                nodes.extend(next_nodes.iter().copied());
            }
        }
    }

    Ok(None)
}

/// Recover the cycle closing at `dep` from the traversal stack.
///
/// Besides the active path the stack holds pending siblings and stale copies
/// of keys that were revisited higher up. Only the topmost occurrence of each
/// `seen` key lies on the path.
fn unwind_cycle<'a>(nodes: &mut Vec<&'a Key>, seen: &HashSet<&'a Key>, dep: &Key) -> Vec<Key> {
    let mut on_path: HashSet<&'a Key> = HashSet::default();
    let mut cycle = vec![dep.clone()];
    while let Some(top) = nodes.pop() {
        if top == dep {
            cycle.push(top.clone());
            break;
        }
        if seen.contains(top) && on_path.insert(top) {
            cycle.push(top.clone());
        }
    }
    cycle.reverse();
    cycle
}

/// Order keys so that each one comes after all of its dependencies.
///
/// `keys` defaults to every key of the graph; pass a one-element slice to
/// order a single key's closure. Dependencies are explored in the order the
/// extractor reports them, so the result is deterministic for a given graph.
///
/// # Errors
/// [`GraphError::Cycle`] naming the cycle if one is reachable, and
/// [`GraphError::MissingKey`] for a requested key absent from the graph.
pub fn toposort<V>(graph: &Graph<V>, keys: Option<&[Key]>) -> Result<Vec<Key>, GraphError> {
    let dependencies = dependency_map(graph);
    toposort_with(&dependencies, keys)
}

/// [`toposort`] over a precomputed dependency map.
///
/// # Errors
/// Same as [`toposort`].
pub fn toposort_with(
    dependencies: &Dependencies,
    keys: Option<&[Key]>,
) -> Result<Vec<Key>, GraphError> {
    let mut ordered = Vec::with_capacity(dependencies.len());
    let cycle = match keys {
        Some(keys) => walk(dependencies, keys, Some(&mut ordered))?,
        None => walk(dependencies, dependencies.keys(), Some(&mut ordered))?,
    };
    match cycle {
        Some(cycle) => Err(GraphError::Cycle(cycle)),
        None => Ok(ordered),
    }
}

/// A cycle reachable from `keys`, or an empty list if there is none.
///
/// The returned path starts and ends with the same key.
///
/// # Errors
/// [`GraphError::MissingKey`] for a requested key absent from the graph.
pub fn getcycle<V>(graph: &Graph<V>, keys: Option<&[Key]>) -> Result<Vec<Key>, GraphError> {
    let dependencies = dependency_map(graph);
    let cycle = match keys {
        Some(keys) => walk(&dependencies, keys, None)?,
        None => walk(&dependencies, dependencies.keys(), None)?,
    };
    Ok(cycle.unwrap_or_default())
}

/// Whether no cycle is reachable from `keys`.
///
/// # Errors
/// [`GraphError::MissingKey`] for a requested key absent from the graph.
pub fn isdag<V>(graph: &Graph<V>, keys: Option<&[Key]>) -> Result<bool, GraphError> {
    Ok(getcycle(graph, keys)?.is_empty())
}
