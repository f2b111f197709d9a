use crate::length::Length;

use super::core::{Seq, Visit};

/// The core traversal interface: every source a sequence node can hold
/// implements this.
///
/// A source never sees the node's cache; `Seq::traverse` replays the cache
/// itself and only asks the source when nothing is memoized. `this` is the
/// node owning the source, so a source can read the node's kind, length and
/// mirrored flag, or fall back to materializing it.
pub(crate) trait SourceCore {
    /// Visit entries as `Seq::traverse` describes, returning how many were
    /// offered to `visit`.
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize;

    /// The length, when it follows from the parents' lengths.
    ///
    /// This is consulted only while the node's own length is unknown.
    fn length(&self) -> Length {
        Length::Unknown
    }
}
