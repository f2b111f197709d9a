/// Errors raised by the sequence engine.
///
/// The engine has exactly one failure mode: asking for a full
/// materialization of a sequence that never ends. Absent keys are not
/// errors; lookups return `Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Infinite sequence.
    ///
    /// The operation has to visit every entry, which cannot be done for a
    /// sequence of infinite length.
    #[error("cannot perform this action with an infinite sequence")]
    InfiniteSequence,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Abort the current operation on a violated precondition.
///
/// Used where materialization is implied by a traversal rather than
/// requested explicitly, so there is no `Result` to report through.
#[track_caller]
pub(crate) fn fatal(error: Error) -> ! {
    panic!("{}", error)
}
