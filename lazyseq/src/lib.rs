//! Lazy, composable sequences over keyed and indexed collections.
//!
//! A [`Seq`] is a cheap handle to a node in a chain of transformations.
//! Nothing is computed until a consumer such as [`Seq::for_each`] or
//! [`Seq::to_vec`] walks the chain; [`Seq::cache_result`] memoizes one full
//! traversal so later traversals replay it.
//!
//! ```
//! use lazyseq::{seq, Value};
//!
//! let seq = seq![1, 2, 3, 4, 5];
//! let result = seq.skip(1).take(2).to_vec().unwrap();
//! assert_eq!(result, vec![Value::from(2), Value::from(3)]);
//! ```
pub mod error;
mod hash;
mod iter;
mod length;
mod macros;
mod sequence;
mod value;

pub use hash::{hash, HASH_MAX_VAL};
pub use iter::{EntryPart, Iter, Mapped};
pub use length::Length;
pub use sequence::{FromSequence, Kind, Map, OrderedMap, Seq, Set, Vector};
pub use value::{Record, Value};
