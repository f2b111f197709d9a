use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;

/// Resolve a slice bound against a length.
///
/// Negative indices count from the end. Against an infinite length a
/// negative index lies infinitely far out, given as `usize::MAX`. `None`
/// means the bound can only be resolved once the length is counted.
pub(crate) fn resolve_index(index: i64, length: Length) -> Option<usize> {
    let offset = index.unsigned_abs().try_into().unwrap_or(usize::MAX);
    match (index < 0, length) {
        (false, Length::Known(n)) => Some(offset.min(n)),
        (false, _) => Some(offset),
        (true, Length::Known(n)) => Some(n.saturating_sub(offset)),
        (true, Length::Infinite) => Some(usize::MAX),
        (true, Length::Unknown) => None,
    }
}

/// The entries from `begin` up to `end`, exclusive.
///
/// Bounds are kept as given and resolved when traversed, counting the
/// parent first if a negative bound meets an unknown length.
pub(crate) struct Sliced {
    parent: Seq,
    begin: i64,
    end: Option<i64>,
}

impl Sliced {
    pub(crate) fn new(parent: Seq, begin: i64, end: Option<i64>) -> Self {
        Sliced { parent, begin, end }
    }

    /// The length of a slice, when known from the parent's length.
    pub(crate) fn length_of(begin: i64, end: Option<i64>, parent: Length) -> Length {
        let (Some(begin), Some(end)) = (
            resolve_index(begin, parent),
            end.map_or(Some(usize::MAX), |end| resolve_index(end, parent)),
        ) else {
            return Length::Unknown;
        };
        match parent {
            Length::Known(n) => Length::Known(end.min(n).saturating_sub(begin)),
            Length::Infinite if begin == usize::MAX => Length::Known(0),
            Length::Infinite if end == usize::MAX => Length::Infinite,
            Length::Infinite => Length::Known(end.saturating_sub(begin)),
            Length::Unknown => Length::Unknown,
        }
    }

    fn bounds(&self) -> (usize, usize) {
        let mut length = self.parent.length();
        let deferred = self.begin < 0 || self.end.is_some_and(|end| end < 0);
        if deferred && length == Length::Unknown {
            log::debug!("counting the parent of a slice to resolve negative bounds");
            length = Length::Known(self.parent.count_entries());
        }
        let begin = resolve_index(self.begin, length).unwrap_or(0);
        let end = self
            .end
            .map_or(Some(usize::MAX), |end| resolve_index(end, length))
            .unwrap_or(usize::MAX);
        (begin, end)
    }
}

impl SourceCore for Sliced {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        // cut points depend on forward order
        if reverse {
            return this.replay_materialized(visit, reverse, flip);
        }
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let (begin, end) = self.bounds();
        if begin >= end {
            return 0;
        }
        let renumber = this.is_indexed();
        let mut seen = 0;
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, key| {
                seen += 1;
                if seen <= begin {
                    return true;
                }
                let key = if renumber {
                    orientation.position(visited)
                } else {
                    key.clone()
                };
                visited += 1;
                visit(value, &key) && seen < end
            },
            false,
        );
        visited
    }
}
