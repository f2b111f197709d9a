// Constructors: leaves over in-memory data, ranges, repeats and foreign
// iterators.
use std::rc::Rc;

use crate::length::Length;
use crate::value::{Record, Value};

use super::core::{Kind, Seq};
use super::factory;
use super::traits::SourceCore;
use super::variant::{Array, Object, Pulled, Range, Repeat};

impl Seq {
    /// An empty indexed sequence.
    pub fn empty() -> Seq {
        Seq::from(Rc::<[Value]>::from([]))
    }

    /// View a value as a sequence.
    ///
    /// A sequence is returned as is, native lists and records are wrapped,
    /// and any other value becomes a sequence of one.
    pub fn from_value(value: Value) -> Seq {
        match value {
            Value::Seq(seq) => seq,
            Value::List(items) => Seq::from(items),
            Value::Record(record) => Seq::from(record),
            scalar => Seq::from(vec![scalar]),
        }
    }

    /// A keyed sequence of `(key, value)` pairs, in order.
    pub fn from_entries<I>(entries: I) -> Seq
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        Seq::from(
            entries
                .into_iter()
                .map(|(key, value)| Value::entry(key, value))
                .collect::<Vec<_>>(),
        )
        .from_entry_seq()
    }

    /// The integers from `start` towards `end` (exclusive) by `step`.
    ///
    /// The step's sign follows the direction of the bounds. Without an end
    /// the range counts up forever.
    pub fn range(start: i64, end: Option<i64>, step: i64) -> Seq {
        let range = Range::new(start, end, step);
        factory::make_indexed(range.length(), range)
    }

    /// `value` repeated `times` times, or forever.
    pub fn repeat(value: Value, times: Option<usize>) -> Seq {
        let length = match times {
            Some(times) => Length::Known(times),
            None => Length::Infinite,
        };
        factory::make_indexed(length, Repeat::new(value, times))
    }

    /// An indexed sequence pulling values from a foreign iterator on demand.
    ///
    /// Pulled values are buffered, so the sequence can be traversed more
    /// than once. The length is known once the iterator is exhausted, or up
    /// front if its size hint is exact.
    pub fn from_iterator<I>(iter: I) -> Seq
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        let (pulled, length) = Pulled::new(Box::new(iter.into_iter()));
        factory::make_indexed(length, pulled)
    }
}

impl From<Rc<[Value]>> for Seq {
    fn from(items: Rc<[Value]>) -> Self {
        Seq::new(
            Kind::Indexed,
            false,
            Length::Known(items.len()),
            Array::new(items),
        )
    }
}

impl<T: Into<Value>> From<Vec<T>> for Seq {
    fn from(items: Vec<T>) -> Self {
        Seq::from(items.into_iter().map(Into::into).collect::<Rc<[Value]>>())
    }
}

impl From<Rc<Record>> for Seq {
    fn from(record: Rc<Record>) -> Self {
        Seq::new(
            Kind::Keyed,
            false,
            Length::Known(record.len()),
            Object::new(record),
        )
    }
}

impl From<Record> for Seq {
    fn from(record: Record) -> Self {
        Seq::from(Rc::new(record))
    }
}

impl From<Value> for Seq {
    fn from(value: Value) -> Self {
        Seq::from_value(value)
    }
}

impl FromIterator<Value> for Seq {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Seq::from(iter.into_iter().collect::<Rc<[Value]>>())
    }
}

impl Default for Seq {
    fn default() -> Self {
        Seq::empty()
    }
}
