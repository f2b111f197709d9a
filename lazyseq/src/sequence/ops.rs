// Terminal operations: each one drives a traversal and returns a result.
use crate::error::{self, Error};
use crate::length::Length;
use crate::value::Value;

use super::core::{Seq, Source};

impl Seq {
    /// Call `f(value, key)` for each entry until it returns `false`.
    ///
    /// Returns the number of entries visited.
    pub fn for_each<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.traverse(&mut f, false, false)
    }

    /// Fold the entries front to back.
    ///
    /// Without an initial value the first value starts the fold. `None` is
    /// returned only for an empty sequence without an initial value.
    pub fn reduce<F>(&self, mut reducer: F, initial: Option<Value>) -> Option<Value>
    where
        F: FnMut(Value, &Value, &Value) -> Value,
    {
        let mut accumulator = initial;
        self.traverse(
            &mut |value, key| {
                accumulator = Some(match accumulator.take() {
                    Some(accumulator) => reducer(accumulator, value, key),
                    None => value.clone(),
                });
                true
            },
            false,
            false,
        );
        accumulator
    }

    /// Fold the entries back to front. Keys are the entries' own positions.
    pub fn reduce_right<F>(&self, reducer: F, initial: Option<Value>) -> Option<Value>
    where
        F: FnMut(Value, &Value, &Value) -> Value,
    {
        self.reverse_with(true).reduce(reducer, initial)
    }

    /// Whether `predicate` holds for every entry. Stops at the first
    /// failure.
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        let mut holds = true;
        self.traverse(
            &mut |value, key| {
                holds = predicate(value, key);
                holds
            },
            false,
            false,
        );
        holds
    }

    /// Whether `predicate` holds for some entry. Stops at the first match.
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        !self.every(|value, key| !predicate(value, key))
    }

    /// The first `(key, value)` entry `predicate` accepts.
    pub fn find_entry<F>(&self, mut predicate: F) -> Option<(Value, Value)>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        let mut found = None;
        self.traverse(
            &mut |value, key| {
                if predicate(value, key) {
                    found = Some((key.clone(), value.clone()));
                    false
                } else {
                    true
                }
            },
            false,
            false,
        );
        found
    }

    /// The first value `predicate` accepts.
    pub fn find<F>(&self, predicate: F) -> Option<Value>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.find_entry(predicate).map(|(_, value)| value)
    }

    /// The key of the first entry `predicate` accepts.
    pub fn find_key<F>(&self, predicate: F) -> Option<Value>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.find_entry(predicate).map(|(key, _)| key)
    }

    /// The last value `predicate` accepts.
    pub fn find_last<F>(&self, predicate: F) -> Option<Value>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.reverse_with(true).find(predicate)
    }

    /// The key of the last entry `predicate` accepts.
    pub fn find_last_key<F>(&self, predicate: F) -> Option<Value>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.reverse_with(true).find_key(predicate)
    }

    pub fn first(&self) -> Option<Value> {
        self.find(|_, _| true)
    }

    /// # Panics
    ///
    /// Panics with [`Error::InfiniteSequence`] on an infinite sequence.
    pub fn last(&self) -> Option<Value> {
        let mut last = None;
        self.traverse(
            &mut |value, _| {
                last = Some(value.clone());
                false
            },
            true,
            true,
        );
        last
    }

    /// The value stored under `key`.
    ///
    /// Keys compare by [`Value::is`]. On an indexed sequence a negative
    /// position counts from the end, which needs a known length.
    pub fn get<K: Into<Value>>(&self, key: K) -> Option<Value> {
        let mut key = key.into();
        if self.is_indexed() {
            let index = self.wrap_index(key.as_i64()?)?;
            key = Value::index(index);
            if self.cached().is_none() {
                match self.source() {
                    Source::Array(inner) => return inner.get(index).cloned(),
                    Source::Range(inner) => return inner.get(index),
                    Source::Repeat(inner) => return inner.get(index),
                    _ => {}
                }
            }
        } else if let (None, Source::Object(inner)) = (self.cached(), self.source()) {
            return inner.get(key.as_str()?).cloned();
        }
        self.find(|_, k| k.is(&key))
    }

    /// The value stored under `key`, or `default`.
    pub fn get_or<K, D>(&self, key: K, default: D) -> Value
    where
        K: Into<Value>,
        D: Into<Value>,
    {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Whether anything is stored under `key`, even `Null`.
    pub fn has<K: Into<Value>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Whether some value is identical to `value`.
    pub fn contains<V: Into<Value>>(&self, value: V) -> bool {
        let value = value.into();
        self.some(|v, _| v.is(&value))
    }

    /// Follow a path of keys through nested sequences, lists and records.
    ///
    /// `None` as soon as a segment is absent or leads into a scalar.
    pub fn get_in<I, K>(&self, path: I) -> Option<Value>
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        let mut current = Value::Seq(self.clone());
        for segment in path {
            current = current.to_seq()?.get(segment)?;
        }
        Some(current)
    }

    pub fn get_in_or<I, K, D>(&self, path: I, default: D) -> Value
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
        D: Into<Value>,
    {
        self.get_in(path).unwrap_or_else(|| default.into())
    }

    /// The number of entries. Counting an unknown length traverses once and
    /// settles it.
    pub fn count(&self) -> error::Result<usize> {
        match self.length() {
            Length::Infinite => Err(Error::InfiniteSequence),
            _ => Ok(self.count_entries()),
        }
    }

    /// The number of entries `predicate` accepts.
    pub fn count_where<F>(&self, mut predicate: F) -> error::Result<usize>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.ensure_finite()?;
        let mut count = 0;
        self.traverse(
            &mut |value, key| {
                if predicate(value, key) {
                    count += 1;
                }
                true
            },
            false,
            false,
        );
        Ok(count)
    }

    pub(crate) fn count_entries(&self) -> usize {
        if let Some(n) = self.length().known() {
            return n;
        }
        let mut n = 0;
        self.traverse(
            &mut |_, _| {
                n += 1;
                true
            },
            false,
            false,
        );
        self.settle_length(n);
        n
    }

    /// Join the values' display forms with `separator`. `Null` joins as an
    /// empty string.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::InfiniteSequence`] on an infinite sequence.
    pub fn join(&self, separator: &str) -> String {
        self.assert_finite();
        let mut joined = String::new();
        let mut first = true;
        self.traverse(
            &mut |value, _| {
                if !first {
                    joined.push_str(separator);
                }
                first = false;
                if !value.is_null() {
                    joined.push_str(&value.to_string());
                }
                true
            },
            false,
            false,
        );
        joined
    }

    pub fn is_empty(&self) -> bool {
        match self.length() {
            Length::Known(n) => n == 0,
            Length::Infinite => false,
            Length::Unknown => !self.some(|_, _| true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, seq};

    #[test]
    fn test_reduce_without_initial() {
        let sum = seq![1, 2, 3].reduce(
            |acc, value, _| Value::from(acc.as_i64().unwrap_or(0) + value.as_i64().unwrap_or(0)),
            None,
        );
        assert_eq!(sum, Some(Value::from(6)));
        assert_eq!(Seq::empty().reduce(|acc, _, _| acc, None), None);
    }

    #[test]
    fn test_reduce_right_sees_positions() {
        let keys = seq!["a", "b", "c"].reduce_right(
            |acc, _, key| Value::from(format!("{}{}", acc, key)),
            Some(Value::from("")),
        );
        assert_eq!(keys, Some(Value::from("210")));
    }

    #[test]
    fn test_every_short_circuits() {
        let mut visited = 0;
        let all = seq![1, 2, 3].every(|value, _| {
            visited += 1;
            value.as_i64() == Some(5)
        });
        assert!(!all);
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_every_and_some_on_empty() {
        assert!(Seq::empty().every(|_, _| false));
        assert!(!Seq::empty().some(|_, _| true));
    }

    #[test]
    fn test_find_last_key() {
        let seq = seq![1, 2, 1, 2];
        assert_eq!(seq.find_last_key(|value, _| value.as_i64() == Some(1)), Some(Value::from(2)));
        assert_eq!(seq.find_last(|value, _| value.as_i64() == Some(1)), Some(Value::from(1)));
    }

    #[test]
    fn test_get_negative_index() {
        let seq = seq![1, 2, 3];
        assert_eq!(seq.get(-1), Some(Value::from(3)));
        assert_eq!(seq.get(-4), None);
        assert_eq!(seq.get(3), None);
        assert_eq!(seq.get("a"), None);
    }

    #[test]
    fn test_get_or() {
        let seq = Seq::from(record! { "a" => 1 });
        assert_eq!(seq.get_or("b", 0), Value::from(0));
        assert_eq!(seq.get_or("a", 0), Value::from(1));
    }

    #[test]
    fn test_get_in() {
        let seq = Seq::from(record! { "a" => vec![Value::from(record! { "b" => 5 })] });
        assert_eq!(seq.get_in([Value::from("a"), Value::from(0), Value::from("b")]), Some(Value::from(5)));
        assert_eq!(seq.get_in(["a", "x"]), None);
        assert_eq!(seq.get_in_or(["a", "x"], -1), Value::from(-1));
    }

    #[test]
    fn test_count_unknown_settles_length() {
        let seq = seq![1, 2, 3].filter(|value, _| value.as_i64() != Some(2));
        assert_eq!(seq.length(), Length::Unknown);
        assert_eq!(seq.count(), Ok(2));
        assert_eq!(seq.length(), Length::Known(2));
    }

    #[test]
    fn test_count_where() {
        assert_eq!(seq![1, 2, 3].count_where(|value, _| value.as_i64() > Some(1)), Ok(2));
        assert!(Seq::repeat(Value::Null, None).count_where(|_, _| true).is_err());
    }

    #[test]
    fn test_join() {
        assert_eq!(seq![1, "a", Value::Null].join(","), "1,a,");
    }

    #[test]
    fn test_contains() {
        assert!(seq![1, 2.5].contains(2.5));
        assert!(!seq![1, 2.5].contains("1"));
    }

    #[test]
    fn test_is_empty_unknown_length() {
        assert!(seq![1].filter(|_, _| false).is_empty());
        assert!(!Seq::range(0, None, 1).is_empty());
    }
}
