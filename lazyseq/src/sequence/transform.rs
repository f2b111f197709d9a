// The lazy transformations. Each one allocates a single node over its
// parent and traverses nothing.
use std::rc::Rc;

use crate::length::Length;
use crate::value::Value;

use super::core::{Seq, Source};
use super::factory::{self, make_indexed, make_keyed, make_sequence, unknown_unless_infinite};
use super::variant::{
    Concatenated, Flattened, Flipped, FromEntries, KeyMapping, KeyedIndexed, Mapping, Reversed,
    Skipped, SkippedWhile, Sliced, Taken, TakenWhile, Values,
};

fn is_whole_slice(begin: i64, end: Option<i64>, length: Length) -> bool {
    let known = length.known();
    let from_start =
        begin == 0 || (begin < 0 && known.is_some_and(|n| begin.unsigned_abs() >= n as u64));
    let to_end = match end {
        None => true,
        Some(end) => end >= 0 && known.is_some_and(|n| end as u64 >= n as u64),
    };
    from_start && to_end
}

/// Whether an in-memory sequence holds an infinite sequence as a value.
/// Derived parents are not inspected, since that would run their chain.
fn holds_infinite(seq: &Seq) -> bool {
    let in_memory = seq.is_cached() || matches!(seq.source(), Source::Array(_) | Source::Object(_));
    in_memory
        && seq.iter().any(|(_, value)| {
            value
                .as_seq()
                .is_some_and(|inner| inner.length().is_infinite())
        })
}

impl Seq {
    /// Replace each value by `mapper(value, key)`. Keys are unchanged.
    pub fn map<F>(&self, mapper: F) -> Seq
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        make_sequence(self, Mapping::new(self.clone(), Rc::new(mapper)))
    }

    /// Replace each key by `mapper(key, value)`. The result is keyed.
    pub fn map_keys<F>(&self, mapper: F) -> Seq
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        make_keyed(self.length(), KeyMapping::new(self.clone(), Rc::new(mapper)))
    }

    /// The entries `predicate(value, key)` accepts.
    ///
    /// A keyed sequence keeps its keys; an indexed one is renumbered.
    pub fn filter<F>(&self, predicate: F) -> Seq
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        factory::filter_factory(self, Rc::new(predicate), self.is_keyed())
    }

    /// The entries `predicate(value, key)` rejects.
    pub fn filter_not<F>(&self, predicate: F) -> Seq
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        self.filter(move |value, key| !predicate(value, key))
    }

    /// Swap keys and values. The result is keyed.
    pub fn flip(&self) -> Seq {
        if let Source::Flipped(flipped) = self.source() {
            return flipped.parent().clone();
        }
        make_keyed(self.length(), Flipped::new(self.clone()))
    }

    /// This sequence followed by `others`.
    ///
    /// An indexed concatenation takes the values of keyed operands and
    /// numbers positions across all operands.
    pub fn concat<I>(&self, others: I) -> Seq
    where
        I: IntoIterator<Item = Seq>,
    {
        let mut parts = vec![self.clone()];
        parts.extend(others.into_iter().map(|part| {
            if self.is_indexed() && part.is_keyed() {
                part.values()
            } else {
                part
            }
        }));
        if parts.len() == 1 {
            return self.clone();
        }
        let length = Concatenated::total_length(&parts);
        Seq::new(self.kind(), false, length, Concatenated::new(parts))
    }

    /// Traverse back to front, numbering positions from the new front.
    pub fn reverse(&self) -> Seq {
        self.reverse_with(false)
    }

    /// Traverse back to front.
    ///
    /// With `maintain_indices` every entry keeps its position, so the
    /// result's positions are mirrored; otherwise positions are numbered
    /// from the new front. Reversing a reversal made the same way gives
    /// back the original sequence.
    pub fn reverse_with(&self, maintain_indices: bool) -> Seq {
        if let Source::Reversed(reversed) = self.source() {
            if reversed.maintains_indices() == maintain_indices || self.is_keyed() {
                return reversed.parent().clone();
            }
        }
        let mirrored = maintain_indices && !self.is_mirrored();
        Seq::new(
            self.kind(),
            mirrored,
            self.length(),
            Reversed::new(self.clone(), maintain_indices),
        )
    }

    /// The entries from `begin` up to `end`, exclusive.
    ///
    /// Negative bounds count from the end; without an end the slice runs to
    /// the end. If a negative bound meets an unknown length, the bound is
    /// resolved by counting when the slice is traversed.
    pub fn slice(&self, begin: i64, end: Option<i64>) -> Seq {
        let length = self.length();
        if is_whole_slice(begin, end, length) {
            return self.clone();
        }
        Seq::new(
            self.kind(),
            false,
            Sliced::length_of(begin, end, length),
            Sliced::new(self.clone(), begin, end),
        )
    }

    /// Everything but the first entry.
    pub fn rest(&self) -> Seq {
        self.slice(1, None)
    }

    /// Everything but the last entry.
    pub fn butlast(&self) -> Seq {
        self.slice(0, Some(-1))
    }

    /// The first `amount` entries.
    pub fn take(&self, amount: usize) -> Seq {
        Seq::new(
            self.kind(),
            false,
            self.length().min(amount),
            Taken::new(self.clone(), amount),
        )
    }

    /// Leading entries while `predicate(value, key)` holds.
    pub fn take_while<F>(&self, predicate: F) -> Seq
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        Seq::new(
            self.kind(),
            false,
            Length::Unknown,
            TakenWhile::new(self.clone(), Rc::new(predicate)),
        )
    }

    /// Leading entries until `predicate(value, key)` first holds.
    pub fn take_until<F>(&self, predicate: F) -> Seq
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        self.take_while(move |value, key| !predicate(value, key))
    }

    /// The last `amount` entries.
    pub fn take_last(&self, amount: usize) -> Seq {
        self.reverse().take(amount).reverse()
    }

    /// Everything after the first `amount` entries.
    pub fn skip(&self, amount: usize) -> Seq {
        if amount == 0 {
            return self.clone();
        }
        Seq::new(
            self.kind(),
            false,
            self.length().saturating_sub(amount),
            Skipped::new(self.clone(), amount),
        )
    }

    /// Everything from the first entry `predicate(value, key)` rejects.
    pub fn skip_while<F>(&self, predicate: F) -> Seq
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        Seq::new(
            self.kind(),
            false,
            unknown_unless_infinite(self),
            SkippedWhile::new(self.clone(), Rc::new(predicate)),
        )
    }

    /// Everything from the first entry `predicate(value, key)` accepts.
    pub fn skip_until<F>(&self, predicate: F) -> Seq
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        self.skip_while(move |value, key| !predicate(value, key))
    }

    /// Everything but the last `amount` entries.
    pub fn skip_last(&self, amount: usize) -> Seq {
        self.reverse().skip(amount).reverse()
    }

    /// The keys, as an indexed sequence.
    pub fn keys(&self) -> Seq {
        self.flip().values()
    }

    /// The values, as an indexed sequence numbered from 0.
    pub fn values(&self) -> Seq {
        if self.is_indexed() && !self.is_mirrored() {
            return self.clone();
        }
        make_indexed(self.length(), Values::new(self.clone()))
    }

    /// The `[key, value]` entries, as an indexed sequence.
    pub fn entry_seq(&self) -> Seq {
        if let Some(entries) = self.cached() {
            return Seq::from(
                entries
                    .iter()
                    .map(|(key, value)| Value::entry(key.clone(), value.clone()))
                    .collect::<Vec<_>>(),
            );
        }
        self.map(|value, key| Value::entry(key.clone(), value.clone()))
            .values()
    }

    /// A keyed sequence read from `[key, value]` entry values.
    ///
    /// Missing parts of a malformed entry read as `Null`.
    pub fn from_entry_seq(&self) -> Seq {
        make_keyed(self.length(), FromEntries::new(self.clone()))
    }

    /// An indexed sequence as a keyed one keyed by position.
    pub fn to_keyed_seq(&self) -> Seq {
        if self.is_keyed() {
            return self.clone();
        }
        make_keyed(self.length(), KeyedIndexed::new(self.clone()))
    }

    /// Traverse sequence-like values in place, one level deep.
    ///
    /// Lists, records and sequences contribute their entries; other values
    /// remain single entries. An indexed result is numbered afresh, a keyed
    /// one reports the inner keys.
    ///
    /// The length is infinite when the parent is, or when an in-memory
    /// parent holds an infinite sequence. Values computed by a derived parent are
    /// not inspected, so flattening those into an infinite sequence leaves
    /// the length unknown.
    pub fn flatten(&self) -> Seq {
        let length = if holds_infinite(self) {
            Length::Infinite
        } else {
            unknown_unless_infinite(self)
        };
        Seq::new(self.kind(), false, length, Flattened::new(self.clone()))
    }

    /// Map each entry, then flatten the results.
    pub fn flat_map<F>(&self, mapper: F) -> Seq
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        self.map(mapper).flatten()
    }
}
