/// A sequence is a lazy mapping from keys to values, either keyed or
/// indexed by dense positions. Transformations build new nodes over their
/// parents; nothing is traversed until a terminal operation asks for it.
mod compare;
mod conversion;
mod core;
mod creation;
mod display;
mod factory;
mod indexed;
mod ops;
mod sort;
mod traits;
mod transform;
mod variant;

pub(crate) use self::core::Entries;
pub use self::core::{Kind, Seq};
pub use conversion::{FromSequence, Map, OrderedMap, Set, Vector};
