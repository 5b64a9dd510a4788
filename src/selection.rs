use crate::key::Key;

/// Keys requested from an execution: one key or an arbitrarily nested list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    /// A single key; the result is that key's value.
    Key(Key),
    /// A list of selections; the result is a tuple of the same shape.
    List(Vec<Selection>),
}

impl Selection {
    /// Leaf keys in left-to-right order.
    pub fn flatten(&self) -> Flatten<'_> {
        flatten(self)
    }

    /// Whether the request is list-shaped.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// Walk a nested selection, yielding every non-list leaf.
pub fn flatten(selection: &Selection) -> Flatten<'_> {
    Flatten {
        stack: vec![core::slice::from_ref(selection).iter()],
    }
}

/// Iterator returned by [`flatten`].
#[derive(Debug)]
pub struct Flatten<'a> {
    stack: Vec<core::slice::Iter<'a, Selection>>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Selection::Key(key)) => return Some(key),
                Some(Selection::List(items)) => self.stack.push(items.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl From<Key> for Selection {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<&Key> for Selection {
    fn from(key: &Key) -> Self {
        Self::Key(key.clone())
    }
}

impl From<&str> for Selection {
    fn from(name: &str) -> Self {
        Self::Key(name.into())
    }
}

impl From<String> for Selection {
    fn from(name: String) -> Self {
        Self::Key(name.into())
    }
}

impl From<(&str, u64)> for Selection {
    fn from(key: (&str, u64)) -> Self {
        Self::Key(key.into())
    }
}

impl From<(&str, u64, u64)> for Selection {
    fn from(key: (&str, u64, u64)) -> Self {
        Self::Key(key.into())
    }
}

impl<T: Into<Selection>> From<Vec<T>> for Selection {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Selection>, const N: usize> From<[T; N]> for Selection {
    fn from(items: [T; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
