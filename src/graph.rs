use crate::{
    error::GraphError,
    key::Key,
    task::Expr,
    types::{IndexMap, IndexSet},
};
use derive_more::{Deref, DerefMut};

/// Mapping from each key to the keys it directly references.
pub type Dependencies = IndexMap<Key, IndexSet<Key>>;

/// A deferred computation: keys mapped to literals, references and tasks.
///
/// Iteration follows insertion order, which makes every analysis over the
/// graph deterministic.
#[derive(Debug, Clone, Deref, DerefMut)]
pub struct Graph<V>(IndexMap<Key, Expr<V>>);

impl<V> Graph<V> {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::default())
    }

    /// Insert or replace the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<Key>, expr: impl Into<Expr<V>>) -> Option<Expr<V>> {
        self.0.insert(key.into(), expr.into())
    }

    /// Direct dependencies of the value stored under `key`.
    ///
    /// # Errors
    /// [`GraphError::MissingKey`] if `key` is not in the graph.
    pub fn dependencies(&self, key: &Key) -> Result<IndexSet<Key>, GraphError> {
        get_dependencies(self, Some(key), None)
    }

    /// Consume the graph, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<Key, Expr<V>> {
        self.0
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: Into<Key>> FromIterator<(K, Expr<V>)> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = (K, Expr<V>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V> From<IndexMap<Key, Expr<V>>> for Graph<V> {
    fn from(map: IndexMap<Key, Expr<V>>) -> Self {
        Self(map)
    }
}

impl<V> IntoIterator for Graph<V> {
    type Item = (Key, Expr<V>);
    type IntoIter = indexmap::map::IntoIter<Key, Expr<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Graph<V> {
    type Item = (&'a Key, &'a Expr<V>);
    type IntoIter = indexmap::map::Iter<'a, Key, Expr<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Walk `root` level by level and report every key reference that names an
/// entry of `graph`.
///
/// Only tasks (argument slots, not the head), lists and maps are descended;
/// references to keys absent from the graph are not dependencies.
fn walk_references<'a, V>(graph: &Graph<V>, root: &'a Expr<V>, mut visit: impl FnMut(&'a Key)) {
    let mut work = vec![root];
    while !work.is_empty() {
        let mut next = Vec::new();
        for expr in work {
            match expr {
                Expr::Task(task) => next.extend(task.args()),
                Expr::List(items) => next.extend(items),
                Expr::Map(entries) => next.extend(entries.values()),
                Expr::Key(key) if graph.contains_key(key) => visit(key),
                Expr::Key(_) | Expr::Literal(_) => {}
            }
        }
        work = next;
    }
}

fn resolve<'a, V>(
    graph: &'a Graph<V>,
    key: Option<&Key>,
    task: Option<&'a Expr<V>>,
) -> Result<&'a Expr<V>, GraphError> {
    match (key, task) {
        (Some(key), None) => graph
            .get(key)
            .ok_or_else(|| GraphError::MissingKey(key.clone())),
        (None, Some(task)) => Ok(task),
        (Some(_), Some(_)) | (None, None) => Err(GraphError::ExclusiveArguments),
    }
}

/// Keys directly referenced by a graph value.
///
/// Pass `key` to look the value up in `graph`, or `task` to analyze a value
/// directly. Exactly one of them must be given. Dependencies are not expanded
/// transitively. The set preserves first-seen order.
///
/// # Errors
/// [`GraphError::ExclusiveArguments`] unless exactly one is given, and
/// [`GraphError::MissingKey`] when `key` is not in the graph.
pub fn get_dependencies<V>(
    graph: &Graph<V>,
    key: Option<&Key>,
    task: Option<&Expr<V>>,
) -> Result<IndexSet<Key>, GraphError> {
    let root = resolve(graph, key, task)?;
    let mut out = IndexSet::default();
    walk_references(graph, root, |dep| {
        out.insert(dep.clone());
    });
    Ok(out)
}

/// Like [`get_dependencies`], but every reference is reported in walk order,
/// repeats included.
///
/// # Errors
/// Same as [`get_dependencies`].
pub fn get_dependencies_list<V>(
    graph: &Graph<V>,
    key: Option<&Key>,
    task: Option<&Expr<V>>,
) -> Result<Vec<Key>, GraphError> {
    let root = resolve(graph, key, task)?;
    let mut out = Vec::new();
    walk_references(graph, root, |dep| out.push(dep.clone()));
    Ok(out)
}

/// Direct dependencies of every key in the graph.
pub fn dependency_map<V>(graph: &Graph<V>) -> Dependencies {
    graph
        .iter()
        .map(|(key, expr)| {
            let mut deps = IndexSet::default();
            walk_references(graph, expr, |dep| {
                deps.insert(dep.clone());
            });
            (key.clone(), deps)
        })
        .collect()
}

/// Dependencies and dependents of every key in the graph.
///
/// Both maps cover every key of the graph plus every key that only appears
/// as a dependency, with an empty set where there is nothing to record.
pub fn get_deps<V>(graph: &Graph<V>) -> (Dependencies, Dependencies) {
    let dependencies = dependency_map(graph);
    let dependents = reverse_dict(&dependencies);
    let mut dependencies = dependencies;
    for key in dependents.keys() {
        dependencies.entry(key.clone()).or_default();
    }
    (dependencies, dependents)
}

/// Transpose a relation: `b ∈ out[a]` iff `a ∈ relation[b]`.
///
/// Every key and every member of every set appears in the result.
pub fn reverse_dict(relation: &Dependencies) -> Dependencies {
    let mut out = Dependencies::default();
    for (key, members) in relation {
        out.entry(key.clone()).or_default();
        for member in members {
            out.entry(member.clone()).or_default();
        }
    }
    for (key, members) in relation {
        for member in members {
            out.get_mut(member)
                .expect("reverse_dict: [1]")
                .insert(key.clone());
        }
    }
    out
}

/// Whether `expr` is a task, a reference to a key of `graph`, or a list
/// containing either.
pub fn has_tasks<V>(graph: &Graph<V>, expr: &Expr<V>) -> bool {
    match expr {
        Expr::Task(_) => true,
        Expr::Key(key) => graph.contains_key(key),
        Expr::List(items) => items.iter().any(|item| has_tasks(graph, item)),
        Expr::Literal(_) | Expr::Map(_) => false,
    }
}

/// Pre-order walk over an expression tree, visiting a node before the
/// arguments or items it contains.
pub fn preorder_traversal<V>(expr: &Expr<V>) -> PreorderTraversal<'_, V> {
    PreorderTraversal { stack: vec![expr] }
}

/// Iterator returned by [`preorder_traversal`].
#[derive(Debug)]
pub struct PreorderTraversal<'a, V> {
    stack: Vec<&'a Expr<V>>,
}

impl<'a, V> Iterator for PreorderTraversal<'a, V> {
    type Item = &'a Expr<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.stack.pop()?;
        match expr {
            Expr::Task(task) => self.stack.extend(task.args().iter().rev()),
            Expr::List(items) => self.stack.extend(items.iter().rev()),
            Expr::Map(entries) => self.stack.extend(entries.values().rev()),
            Expr::Literal(_) | Expr::Key(_) => {}
        }
        Some(expr)
    }
}
