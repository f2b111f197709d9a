mod array;
mod concatenated;
mod filtered;
mod flattened;
mod mapping;
mod object;
mod pulled;
mod range;
mod repeat;
mod reversed;
mod skipped;
mod sliced;
mod taken;
mod values;

pub(crate) use array::Array;
pub(crate) use concatenated::Concatenated;
pub(crate) use filtered::Filtered;
pub(crate) use flattened::Flattened;
pub(crate) use mapping::{Flipped, KeyMapping, Mapping};
pub(crate) use object::Object;
pub(crate) use pulled::Pulled;
pub(crate) use range::Range;
pub(crate) use repeat::Repeat;
pub(crate) use reversed::Reversed;
pub(crate) use skipped::{Skipped, SkippedWhile};
pub(crate) use sliced::Sliced;
pub(crate) use taken::{Taken, TakenWhile};
pub(crate) use values::{FromEntries, KeyedIndexed, Values};
