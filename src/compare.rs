/// Outcome of a fallible equality test.
///
/// Graph values are not guaranteed to have a total, boolean-valued equality.
/// `Incomparable` is returned when the two sides are of different shapes and
/// a plain comparison would be meaningless; callers decide how to treat it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Both sides are the same shape and hold the same value.
    Equal,
    /// Both sides are the same shape and differ.
    NotEqual,
    /// The sides cannot be compared.
    Incomparable,
}

impl Comparison {
    /// Collapse to a boolean, treating `Incomparable` as "not equal".
    #[must_use]
    #[inline]
    pub fn is_equal(self) -> bool {
        matches!(self, Self::Equal)
    }

    pub(crate) fn from_bool(eq: bool) -> Self {
        if eq { Self::Equal } else { Self::NotEqual }
    }
}

/// Tri-state equality used by substitution.
pub trait Compare {
    /// Compare `self` against `other`.
    fn compare(&self, other: &Self) -> Comparison;
}

impl<T: Compare> Compare for [T] {
    /// Sized sequences of equal length are compared pairwise; any
    /// non-`Equal` element decides the result. Different lengths are
    /// `NotEqual`.
    fn compare(&self, other: &Self) -> Comparison {
        if self.len() != other.len() {
            return Comparison::NotEqual;
        }
        for (lhs, rhs) in self.iter().zip(other) {
            match lhs.compare(rhs) {
                Comparison::Equal => {}
                Comparison::NotEqual | Comparison::Incomparable => return Comparison::NotEqual,
            }
        }
        Comparison::Equal
    }
}

impl Compare for u64 {
    fn compare(&self, other: &Self) -> Comparison {
        Comparison::from_bool(self == other)
    }
}

impl Compare for str {
    fn compare(&self, other: &Self) -> Comparison {
        Comparison::from_bool(self == other)
    }
}
