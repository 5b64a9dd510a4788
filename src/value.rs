use crate::task::Expr;

/// Result of evaluating an [`Expr`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value<V> {
    /// Computed data.
    Data(V),
    /// Evaluated items of a list argument.
    List(Vec<Value<V>>),
    /// Results of a list-shaped output request, mirroring its nesting.
    Tuple(Vec<Value<V>>),
    /// A structure handed back without evaluation.
    Quoted(Expr<V>),
}

impl<V> Value<V> {
    /// The data, if this is [`Value::Data`].
    #[must_use]
    pub fn data(&self) -> Option<&V> {
        match self {
            Self::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Take the data, if this is [`Value::Data`].
    #[must_use]
    pub fn into_data(self) -> Option<V> {
        match self {
            Self::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Items of a [`Value::List`] or [`Value::Tuple`].
    #[must_use]
    pub fn items(&self) -> Option<&[Value<V>]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl<V> From<V> for Value<V> {
    fn from(value: V) -> Self {
        Self::Data(value)
    }
}
