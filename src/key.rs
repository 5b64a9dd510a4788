use crate::compare::{Compare, Comparison};
use core::fmt;
use std::sync::Arc;

/// Hashable identifier of a graph entry.
///
/// Either a plain name, or a chunk address: a name followed by integer
/// positions or index tuples, as produced by collection layers that split
/// one logical object into many keyed pieces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A plain named key, e.g. `x`.
    Name(Arc<str>),
    /// A chunk key, e.g. `('x', 0, 1)`.
    Chunk {
        /// Name of the collection the chunk belongs to.
        name: Arc<str>,
        /// Position of the chunk.
        index: Vec<KeyIndex>,
    },
}

/// One element of a chunk key's position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyIndex {
    /// A non-negative integer position.
    Int(u64),
    /// A nested index tuple.
    Tuple(Vec<u64>),
}

impl Key {
    /// Construct a plain named key.
    pub fn name(name: impl Into<Arc<str>>) -> Self {
        Self::Name(name.into())
    }

    /// Construct a chunk key from a name and integer positions.
    pub fn chunk(name: impl Into<Arc<str>>, index: impl IntoIterator<Item = u64>) -> Self {
        Self::Chunk {
            name: name.into(),
            index: index.into_iter().map(KeyIndex::Int).collect(),
        }
    }

    /// Name of the key, ignoring any chunk position.
    #[must_use]
    pub fn key_name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Chunk { name, .. } => name,
        }
    }
}

impl Compare for KeyIndex {
    fn compare(&self, other: &Self) -> Comparison {
        match (self, other) {
            (Self::Int(lhs), Self::Int(rhs)) => lhs.compare(rhs),
            (Self::Tuple(lhs), Self::Tuple(rhs)) => lhs.as_slice().compare(rhs.as_slice()),
            // Elements are matched by kind before value.
            _ => Comparison::NotEqual,
        }
    }
}

impl Compare for Key {
    fn compare(&self, other: &Self) -> Comparison {
        match (self, other) {
            (Self::Name(lhs), Self::Name(rhs)) => lhs.compare(rhs),
            (
                Self::Chunk {
                    name: lhs_name,
                    index: lhs_index,
                },
                Self::Chunk {
                    name: rhs_name,
                    index: rhs_index,
                },
            ) => match lhs_name.compare(rhs_name) {
                Comparison::Equal => lhs_index.as_slice().compare(rhs_index.as_slice()),
                other => other,
            },
            _ => Comparison::Incomparable,
        }
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (n, item) in items.iter().enumerate() {
                    if n > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Chunk { name, index } => {
                write!(f, "('{name}'")?;
                for item in index {
                    write!(f, ", {item}")?;
                }
                if index.is_empty() {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::name(name)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<(&str, u64)> for Key {
    fn from((name, i): (&str, u64)) -> Self {
        Self::chunk(name, [i])
    }
}

impl From<(&str, u64, u64)> for Key {
    fn from((name, i, j): (&str, u64, u64)) -> Self {
        Self::chunk(name, [i, j])
    }
}

impl From<(&str, u64, u64, u64)> for Key {
    fn from((name, i, j, k): (&str, u64, u64, u64)) -> Self {
        Self::chunk(name, [i, j, k])
    }
}
