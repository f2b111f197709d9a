use std::fmt;

/// The length of a sequence.
///
/// A derived sequence does not always know how many entries it will produce
/// without visiting them (a filter, say). Once a length is known it never
/// changes, and a finite sequence never reports `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    Known(usize),
    Unknown,
    Infinite,
}

impl Length {
    #[inline]
    pub fn is_known(self) -> bool {
        matches!(self, Length::Known(_))
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, Length::Infinite)
    }

    /// The exact length, if known.
    #[inline]
    pub fn known(self) -> Option<usize> {
        match self {
            Length::Known(n) => Some(n),
            _ => None,
        }
    }

    /// Sum of two lengths; unknown dominates infinite. A sum too large to
    /// count is unknown.
    pub(crate) fn sum(self, other: Length) -> Length {
        match (self, other) {
            (Length::Unknown, _) | (_, Length::Unknown) => Length::Unknown,
            (Length::Infinite, _) | (_, Length::Infinite) => Length::Infinite,
            (Length::Known(a), Length::Known(b)) => {
                a.checked_add(b).map_or(Length::Unknown, Length::Known)
            }
        }
    }

    /// At most `amount` entries of this length.
    pub(crate) fn min(self, amount: usize) -> Length {
        match self {
            Length::Known(n) => Length::Known(n.min(amount)),
            Length::Infinite => Length::Known(amount),
            Length::Unknown => Length::Unknown,
        }
    }

    /// This length with `amount` leading entries removed.
    pub(crate) fn saturating_sub(self, amount: usize) -> Length {
        match self {
            Length::Known(n) => Length::Known(n.saturating_sub(amount)),
            other => other,
        }
    }
}

impl From<usize> for Length {
    fn from(n: usize) -> Self {
        Length::Known(n)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Known(n) => write!(f, "{}", n),
            Length::Unknown => f.write_str("unknown"),
            Length::Infinite => f.write_str("infinite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_unknown_dominates() {
        assert_eq!(Length::Infinite.sum(Length::Unknown), Length::Unknown);
        assert_eq!(Length::Known(2).sum(Length::Infinite), Length::Infinite);
        assert_eq!(Length::Known(2).sum(Length::Known(3)), Length::Known(5));
    }

    #[test]
    fn test_sum_too_large_to_count() {
        assert_eq!(Length::Known(usize::MAX).sum(Length::Known(1)), Length::Unknown);
    }

    #[test]
    fn test_take_from_infinite_is_known() {
        assert_eq!(Length::Infinite.min(4), Length::Known(4));
        assert_eq!(Length::Known(2).min(4), Length::Known(2));
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(Length::Known(2).saturating_sub(5), Length::Known(0));
        assert_eq!(Length::Infinite.saturating_sub(5), Length::Infinite);
    }
}
