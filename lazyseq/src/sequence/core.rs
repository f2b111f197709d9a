// The sequence handle and the traversal primitive everything else is built
// on. Every source kind lives in variant/; dispatch over them is an explicit
// match so each inner traversal stays statically dispatched.

// creation.rs contains the constructors
// transform.rs contains the lazy transformations
// ops.rs contains the terminal operations

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use crate::error::{self, Error};
use crate::length::Length;
use crate::value::Value;

use super::traits::SourceCore;
use super::variant::{
    Array, Concatenated, Filtered, Flattened, Flipped, FromEntries, KeyMapping, KeyedIndexed,
    Mapping, Object, Pulled, Range, Repeat, Reversed, Skipped, SkippedWhile, Sliced, Taken,
    TakenWhile, Values,
};

/// Memoized `(key, value)` entries of a fully traversed sequence.
pub(crate) type Entries = Rc<[(Value, Value)]>;

/// The visitor handed to a traversal: called with `(value, key)`, it returns
/// `false` to stop the traversal.
pub(crate) type Visit<'a> = &'a mut dyn FnMut(&Value, &Value) -> bool;

pub(crate) type Mapper = Rc<dyn Fn(&Value, &Value) -> Value>;
pub(crate) type Predicate = Rc<dyn Fn(&Value, &Value) -> bool>;

/// Whether a sequence has arbitrary keys or dense positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Keys are arbitrary values.
    Keyed,
    /// Keys are exactly the positions `0..length`.
    Indexed,
}

/// A lazy sequence of `(key, value)` entries.
///
/// Cloning a `Seq` is cheap: it shares the node, including any cached
/// traversal.
#[derive(Clone)]
pub struct Seq(Rc<Node>);

// a static assertion to ensure that Seq stays a single pointer
#[cfg(target_arch = "x86_64")]
static_assertions::assert_eq_size!(Seq, [u8; 8]);

pub(crate) struct Node {
    kind: Kind,
    // reported positions count from the end in a forward traversal
    mirrored: bool,
    length: Cell<Length>,
    cache: OnceCell<Entries>,
    hash: Cell<Option<u32>>,
    source: Source,
}

pub(crate) enum Source {
    Array(Array),
    Object(Object),
    Range(Range),
    Repeat(Repeat),
    Pulled(Pulled),
    Mapping(Mapping),
    KeyMapping(KeyMapping),
    Flipped(Flipped),
    Reversed(Reversed),
    Concatenated(Concatenated),
    Sliced(Sliced),
    Taken(Taken),
    TakenWhile(TakenWhile),
    Skipped(Skipped),
    SkippedWhile(SkippedWhile),
    Filtered(Filtered),
    Values(Values),
    FromEntries(FromEntries),
    KeyedIndexed(KeyedIndexed),
    Flattened(Flattened),
}

macro_rules! source_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Source {
                fn from(inner: $variant) -> Self {
                    Source::$variant(inner)
                }
            }
        )*
    };
}

source_from!(
    Array,
    Object,
    Range,
    Repeat,
    Pulled,
    Mapping,
    KeyMapping,
    Flipped,
    Reversed,
    Concatenated,
    Sliced,
    Taken,
    TakenWhile,
    Skipped,
    SkippedWhile,
    Filtered,
    Values,
    FromEntries,
    KeyedIndexed,
    Flattened,
);

impl Source {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        match self {
            Source::Array(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Object(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Range(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Repeat(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Pulled(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Mapping(inner) => inner.traverse(this, visit, reverse, flip),
            Source::KeyMapping(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Flipped(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Reversed(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Concatenated(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Sliced(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Taken(inner) => inner.traverse(this, visit, reverse, flip),
            Source::TakenWhile(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Skipped(inner) => inner.traverse(this, visit, reverse, flip),
            Source::SkippedWhile(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Filtered(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Values(inner) => inner.traverse(this, visit, reverse, flip),
            Source::FromEntries(inner) => inner.traverse(this, visit, reverse, flip),
            Source::KeyedIndexed(inner) => inner.traverse(this, visit, reverse, flip),
            Source::Flattened(inner) => inner.traverse(this, visit, reverse, flip),
        }
    }

    fn length(&self) -> Length {
        match self {
            Source::Array(inner) => inner.length(),
            Source::Object(inner) => inner.length(),
            Source::Range(inner) => inner.length(),
            Source::Repeat(inner) => inner.length(),
            Source::Pulled(inner) => inner.length(),
            Source::Mapping(inner) => inner.length(),
            Source::KeyMapping(inner) => inner.length(),
            Source::Flipped(inner) => inner.length(),
            Source::Reversed(inner) => inner.length(),
            Source::Concatenated(inner) => inner.length(),
            Source::Sliced(inner) => inner.length(),
            Source::Taken(inner) => inner.length(),
            Source::TakenWhile(inner) => inner.length(),
            Source::Skipped(inner) => inner.length(),
            Source::SkippedWhile(inner) => inner.length(),
            Source::Filtered(inner) => inner.length(),
            Source::Values(inner) => inner.length(),
            Source::FromEntries(inner) => inner.length(),
            Source::KeyedIndexed(inner) => inner.length(),
            Source::Flattened(inner) => inner.length(),
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(
            self,
            Source::Array(_)
                | Source::Object(_)
                | Source::Range(_)
                | Source::Repeat(_)
                | Source::Pulled(_)
        )
    }
}

/// How a node reports the positions of the entries it visits.
///
/// An indexed node reports its natural keys (the ones a forward traversal
/// without flipped indices sees) when `reverse == flip`, and mirrors them
/// against the last index otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Natural,
    Mirrored(usize),
}

impl Orientation {
    /// The orientation for a traversal over `length` entries.
    pub(crate) fn of(kind: Kind, reverse: bool, flip: bool, length: Length) -> Option<Self> {
        if kind == Kind::Keyed || reverse == flip {
            return Some(Orientation::Natural);
        }
        length
            .known()
            .map(|n| Orientation::Mirrored(n.saturating_sub(1)))
    }

    /// Report a key the parent gave in natural orientation.
    #[inline]
    pub(crate) fn key(self, natural: &Value) -> Value {
        match self {
            Orientation::Natural => natural.clone(),
            Orientation::Mirrored(max) => Value::index(max.saturating_sub(natural.position())),
        }
    }

    /// Report the entry at `position` in traversal order.
    #[inline]
    pub(crate) fn position(self, position: usize) -> Value {
        match self {
            Orientation::Natural => Value::index(position),
            Orientation::Mirrored(max) => Value::index(max.saturating_sub(position)),
        }
    }
}

impl Seq {
    pub(crate) fn new(
        kind: Kind,
        mirrored: bool,
        length: Length,
        source: impl Into<Source>,
    ) -> Self {
        Seq(Rc::new(Node {
            kind,
            mirrored: mirrored && kind == Kind::Indexed,
            length: Cell::new(length),
            cache: OnceCell::new(),
            hash: Cell::new(None),
            source: source.into(),
        }))
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.0.kind == Kind::Indexed
    }

    #[inline]
    pub fn is_keyed(&self) -> bool {
        self.0.kind == Kind::Keyed
    }

    /// Whether positions are reported mirrored, counted from the end.
    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.0.mirrored
    }

    /// The length of the sequence, as far as it is known without traversing.
    pub fn length(&self) -> Length {
        let length = self.0.length.get();
        if length != Length::Unknown {
            return length;
        }
        let length = self.0.source.length();
        if length.is_known() {
            self.0.length.set(length);
        }
        length
    }

    /// Record a length learned by traversal. A known length is never
    /// overwritten.
    pub(crate) fn settle_length(&self, n: usize) {
        if !self.0.length.get().is_known() {
            self.0.length.set(Length::Known(n));
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &Source {
        &self.0.source
    }

    #[inline]
    pub(crate) fn cached(&self) -> Option<&Entries> {
        self.0.cache.get()
    }

    /// Whether a traversal has been memoized for this sequence.
    pub fn is_cached(&self) -> bool {
        self.0.cache.get().is_some()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.0.source.is_leaf()
    }

    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Seq) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn memoized_hash(&self) -> Option<u32> {
        self.0.hash.get()
    }

    #[inline]
    pub(crate) fn memoize_hash(&self, hash: u32) {
        self.0.hash.set(Some(hash))
    }

    /// The traversal primitive.
    ///
    /// Calls `visit(value, key)` for each entry in forward or reverse order,
    /// stopping as soon as `visit` returns `false`. With `flip_indices` an
    /// indexed sequence reports position `p` as `length - 1 - p`; traversal
    /// order is unaffected. Returns the number of entries offered to
    /// `visit`, or the full length when replaying a cache.
    ///
    /// # Panics
    ///
    /// Traversals that need every entry first (reverse traversal of a cut
    /// sequence, reverse traversal of an infinite range) panic with
    /// [`Error::InfiniteSequence`] on an infinite sequence.
    pub fn traverse(
        &self,
        visit: &mut dyn FnMut(&Value, &Value) -> bool,
        reverse: bool,
        flip_indices: bool,
    ) -> usize {
        match self.0.cache.get() {
            Some(entries) => self.replay(entries, visit, reverse, flip_indices),
            None => self.0.source.traverse(self, visit, reverse, flip_indices),
        }
    }

    /// Traverse reporting natural keys in either direction.
    #[inline]
    pub(crate) fn traverse_natural(&self, visit: Visit, reverse: bool) -> usize {
        self.traverse(visit, reverse, reverse)
    }

    fn replay(&self, entries: &Entries, visit: Visit, reverse: bool, flip: bool) -> usize {
        let orientation = Orientation::of(self.kind(), reverse, flip, entries.len().into())
            .unwrap_or(Orientation::Natural);
        let mut offer = |(key, value): &(Value, Value)| visit(value, &orientation.key(key));
        if reverse {
            for entry in entries.iter().rev() {
                if !offer(entry) {
                    break;
                }
            }
        } else {
            for entry in entries.iter() {
                if !offer(entry) {
                    break;
                }
            }
        }
        entries.len()
    }

    /// The orientation a pass-through node reports keys in, if the length it
    /// needs is known.
    #[inline]
    pub(crate) fn orientation(&self, reverse: bool, flip: bool) -> Option<Orientation> {
        Orientation::of(self.kind(), reverse, flip, self.length())
    }

    /// The orientation a renumbering node counts positions in: traversal
    /// order counts from the front of the traversal, so only flipped
    /// indices mirror.
    #[inline]
    pub(crate) fn counting(&self, flip: bool) -> Option<Orientation> {
        Orientation::of(self.kind(), false, flip, self.length())
    }

    /// Materialize and replay, for traversals a node cannot do lazily.
    pub(crate) fn replay_materialized(&self, visit: Visit, reverse: bool, flip: bool) -> usize {
        let entries = self.materialize();
        self.replay(&entries, visit, reverse, flip)
    }

    /// All entries in forward order. Derived sequences keep the result as
    /// their cache; leaves hand out fresh entries.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::InfiniteSequence`] on an infinite sequence.
    pub(crate) fn materialize(&self) -> Entries {
        if let Some(entries) = self.0.cache.get() {
            return entries.clone();
        }
        self.assert_finite();
        let mut entries = Vec::new();
        self.0.source.traverse(
            self,
            &mut |value, key| {
                entries.push((key.clone(), value.clone()));
                true
            },
            false,
            false,
        );
        let entries: Entries = entries.into();
        if !self.is_leaf() {
            log::trace!("caching {} entries of a derived sequence", entries.len());
            self.settle_length(entries.len());
            // a traversal cannot cache its own node, so the cell is empty
            let _ = self.0.cache.set(entries.clone());
        }
        entries
    }

    /// Memoize one full traversal so later traversals replay it.
    ///
    /// A leaf over in-memory data is left alone. Fails with
    /// [`Error::InfiniteSequence`] on an infinite sequence.
    pub fn cache_result(&self) -> error::Result<&Self> {
        self.ensure_finite()?;
        if !self.is_leaf() || !self.length().is_known() {
            self.materialize();
        }
        Ok(self)
    }

    #[track_caller]
    pub(crate) fn assert_finite(&self) {
        if self.length().is_infinite() {
            error::fatal(Error::InfiniteSequence)
        }
    }

    pub(crate) fn ensure_finite(&self) -> error::Result<()> {
        if self.length().is_infinite() {
            Err(Error::InfiniteSequence)
        } else {
            Ok(())
        }
    }

    /// The entry at `index` of a leaf, pulled without traversing.
    pub(crate) fn leaf_entry(&self, index: usize) -> Option<(Value, Value)> {
        match self.source() {
            Source::Array(inner) => inner
                .get(index)
                .map(|value| (Value::index(index), value.clone())),
            Source::Object(inner) => inner.entry(index),
            Source::Range(inner) => inner.get(index).map(|value| (Value::index(index), value)),
            Source::Repeat(inner) => inner.get(index).map(|value| (Value::index(index), value)),
            Source::Pulled(inner) => inner
                .pull(self, index)
                .map(|value| (Value::index(index), value)),
            _ => None,
        }
    }
}
