use std::iter::FusedIterator;

use crate::length::Length;
use crate::sequence::{Entries, Seq};
use crate::value::Value;

/// A pull iterator over the `(key, value)` entries of a sequence.
///
/// Leaves are read one entry at a time and a cached sequence is replayed.
/// Any other sequence is traversed in windows: each refill walks the
/// sequence from the front, skips what was already yielded and collects
/// the next window, which doubles in size. Nothing is materialized, so an
/// infinite chain stays lazy, at the price of re-running the chain over
/// the prefix on every refill.
pub struct Iter {
    seq: Seq,
    cursor: Cursor,
    position: usize,
}

enum Cursor {
    Leaf,
    Cached(Entries),
    Window {
        offset: usize,
        entries: Vec<(Value, Value)>,
        exhausted: bool,
    },
}

const FIRST_WINDOW: usize = 8;

impl Iter {
    pub(crate) fn new(seq: Seq) -> Self {
        let cursor = match seq.cached() {
            Some(entries) => Cursor::Cached(entries.clone()),
            None if seq.is_leaf() => Cursor::Leaf,
            None => Cursor::Window {
                offset: 0,
                entries: Vec::new(),
                exhausted: false,
            },
        };
        Iter {
            seq,
            cursor,
            position: 0,
        }
    }
}

/// The entries at `start..start + amount` of a forward traversal, and
/// whether the traversal ran out before filling them.
fn window(seq: &Seq, start: usize, amount: usize) -> (Vec<(Value, Value)>, bool) {
    let mut entries = Vec::with_capacity(amount);
    let mut seen = 0;
    seq.traverse(
        &mut |value, key| {
            seen += 1;
            if seen > start {
                entries.push((key.clone(), value.clone()));
            }
            entries.len() < amount
        },
        false,
        false,
    );
    let exhausted = entries.len() < amount;
    (entries, exhausted)
}

impl Iterator for Iter {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.position;
        let entry = match &mut self.cursor {
            Cursor::Leaf => self.seq.leaf_entry(position),
            Cursor::Cached(entries) => entries.get(position).cloned(),
            Cursor::Window {
                offset,
                entries,
                exhausted,
            } => {
                if position >= *offset + entries.len() && !*exhausted {
                    let (next, done) = window(&self.seq, position, position.max(FIRST_WINDOW));
                    log::trace!("pulled a window of {} entries at {}", next.len(), position);
                    *offset = position;
                    *entries = next;
                    *exhausted = done;
                }
                position
                    .checked_sub(*offset)
                    .and_then(|index| entries.get(index))
                    .cloned()
            }
        }?;
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let length = match &self.cursor {
            Cursor::Cached(entries) => Length::Known(entries.len()),
            Cursor::Window {
                offset,
                entries,
                exhausted: true,
            } => Length::Known(offset + entries.len()),
            _ => self.seq.length(),
        };
        match length {
            Length::Known(n) => {
                let remaining = n.saturating_sub(self.position);
                (remaining, Some(remaining))
            }
            Length::Infinite => (usize::MAX, None),
            Length::Unknown => (0, None),
        }
    }
}

/// Passes each item of an inner iterator through `f`.
///
/// Once the inner iterator is done it is dropped, and `Mapped` keeps
/// returning `None`.
pub struct Mapped<I, F> {
    iter: Option<I>,
    f: F,
}

impl<I, F> Mapped<I, F> {
    pub fn new(iter: I, f: F) -> Self {
        Mapped {
            iter: Some(iter),
            f,
        }
    }
}

impl<I, F, T> Iterator for Mapped<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.iter.as_mut()?.next() {
            Some(item) => Some((self.f)(item)),
            None => {
                self.iter = None;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter
            .as_ref()
            .map_or((0, Some(0)), |iter| iter.size_hint())
    }
}

impl<I, F, T> FusedIterator for Mapped<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
{
}

/// Picks the key or the value out of an entry.
pub type EntryPart = fn((Value, Value)) -> Value;

fn entry_key((key, _): (Value, Value)) -> Value {
    key
}

fn entry_value((_, value): (Value, Value)) -> Value {
    value
}

impl Seq {
    /// A pull iterator over the `(key, value)` entries.
    pub fn iter(&self) -> Iter {
        Iter::new(self.clone())
    }

    /// A pull iterator over the keys.
    pub fn keys_iter(&self) -> Mapped<Iter, EntryPart> {
        Mapped::new(self.iter(), entry_key as EntryPart)
    }

    /// A pull iterator over the values.
    pub fn values_iter(&self) -> Mapped<Iter, EntryPart> {
        Mapped::new(self.iter(), entry_value as EntryPart)
    }
}

impl IntoIterator for &Seq {
    type Item = (Value, Value);
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{record, seq};

    #[test]
    fn test_infinite_range_stays_lazy() {
        let values: Vec<_> = Seq::range(0, None, 5).values_iter().take(3).collect();
        assert_eq!(values, vec![Value::from(0), Value::from(5), Value::from(10)]);
    }

    #[test]
    fn test_derived_sequence_is_not_cached() {
        let seq = seq![1, 2].map(|value, _| value.clone());
        let keys: Vec<_> = seq.keys_iter().collect();
        assert_eq!(keys, vec![Value::from(0), Value::from(1)]);
        assert!(!seq.is_cached());
    }

    #[test]
    fn test_infinite_derived_sequence_stays_lazy() {
        let seq = Seq::range(0, None, 1).map(|value, _| Value::from(value.as_i64().unwrap_or(0) * 2));
        let values: Vec<_> = seq.values_iter().take(3).collect();
        assert_eq!(values, vec![Value::from(0), Value::from(2), Value::from(4)]);
        assert_eq!(seq.values_iter().size_hint(), (usize::MAX, None));
    }

    #[test]
    fn test_first_item_runs_only_the_first_window() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let seq = Seq::range(0, Some(1000), 1).map(move |value, _| {
            counter.set(counter.get() + 1);
            value.clone()
        });
        assert_eq!(seq.values_iter().next(), Some(Value::from(0)));
        assert!(calls.get() <= 8);
    }

    #[test]
    fn test_windows_cover_every_entry_in_order() {
        let seq = Seq::range(0, Some(100), 1)
            .filter(|value, _| value.as_i64().is_some_and(|i| i % 3 == 0));
        let entries: Vec<_> = seq.iter().collect();
        assert_eq!(entries.len(), 34);
        assert_eq!(entries[20], (Value::from(20), Value::from(60)));
        let mut iter = seq.iter();
        assert_eq!(iter.by_ref().count(), 34);
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_cached_sequence_is_replayed() {
        let seq = seq![1, 2].map(|value, _| value.clone());
        seq.cache_result().unwrap();
        let values: Vec<_> = seq.values_iter().collect();
        assert_eq!(values, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_record_entries() {
        let seq = Seq::from(record! { "a" => 1 });
        let entries: Vec<_> = (&seq).into_iter().collect();
        assert_eq!(entries, vec![(Value::from("a"), Value::from(1))]);
    }

    #[test]
    fn test_mapped_stays_done() {
        let mut mapped = Mapped::new(vec![1, 2].into_iter(), |i| i * 10);
        assert_eq!(mapped.next(), Some(10));
        assert_eq!(mapped.next(), Some(20));
        assert_eq!(mapped.next(), None);
        assert_eq!(mapped.next(), None);
        assert_eq!(mapped.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_size_hint() {
        let mut iter = seq![1, 2, 3].iter();
        iter.next();
        assert_eq!(iter.size_hint(), (2, Some(2)));
    }
}
