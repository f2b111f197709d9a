// Position-aware operations. A keyed sequence takes part through its
// values.
use crate::length::Length;
use crate::value::Value;

use super::core::Seq;

impl Seq {
    /// Resolve a position, counting negative ones from the end.
    pub(crate) fn wrap_index(&self, index: i64) -> Option<usize> {
        if index >= 0 {
            return usize::try_from(index).ok();
        }
        match self.length() {
            Length::Known(n) => usize::try_from(index.unsigned_abs())
                .ok()
                .and_then(|offset| n.checked_sub(offset)),
            _ => None,
        }
    }

    fn as_indexed(&self) -> Seq {
        if self.is_keyed() {
            self.values()
        } else {
            self.clone()
        }
    }

    /// The position of the first value identical to `value`.
    pub fn index_of<V: Into<Value>>(&self, value: V) -> Option<usize> {
        let value = value.into();
        self.find_index(move |v, _| v.is(&value))
    }

    /// The position of the last value identical to `value`.
    pub fn last_index_of<V: Into<Value>>(&self, value: V) -> Option<usize> {
        let value = value.into();
        self.find_last_index(move |v, _| v.is(&value))
    }

    /// The position of the first entry `predicate` accepts.
    pub fn find_index<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.as_indexed()
            .find_key(predicate)
            .map(|key| key.position())
    }

    /// The position of the last entry `predicate` accepts.
    pub fn find_last_index<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        self.as_indexed()
            .reverse_with(true)
            .find_key(predicate)
            .map(|key| key.position())
    }

    /// Remove `remove` values at `index` and insert `values` there.
    ///
    /// This is `slice(0, index)`, then `values`, then the rest after the
    /// removed values. A negative `index` counts from the end. Nothing to
    /// remove or insert gives back this sequence.
    pub fn splice<I>(&self, index: i64, remove: usize, values: I) -> Seq
    where
        I: IntoIterator<Item = Value>,
    {
        let values: Vec<Value> = values.into_iter().collect();
        if remove == 0 && values.is_empty() {
            return self.clone();
        }
        let seq = self.as_indexed();
        let resume = index.saturating_add(i64::try_from(remove).unwrap_or(i64::MAX));
        // a removal running past the end leaves no tail
        let tail = if index < 0 && resume >= 0 {
            Seq::empty()
        } else {
            seq.slice(resume, None)
        };
        seq.slice(0, Some(index)).concat([Seq::from(values), tail])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, seq};

    #[test]
    fn test_index_of() {
        let seq = seq![1, 2, 1];
        assert_eq!(seq.index_of(1), Some(0));
        assert_eq!(seq.last_index_of(1), Some(2));
        assert_eq!(seq.index_of(9), None);
    }

    #[test]
    fn test_find_index_of_reversed() {
        let seq = seq![1, 2, 3].reverse();
        assert_eq!(seq.find_index(|value, _| value.as_i64() == Some(3)), Some(0));
        assert_eq!(seq.find_last_index(|value, _| value.as_i64() == Some(3)), Some(0));
    }

    #[test]
    fn test_index_of_keyed_uses_values() {
        let seq = Seq::from(record! { "a" => 1, "b" => 2 });
        assert_eq!(seq.index_of(2), Some(1));
    }

    #[test]
    fn test_splice() {
        let seq = seq![1, 2, 3, 4];
        assert_eq!(
            seq.splice(1, 2, [Value::from("x")]).to_vec().unwrap(),
            vec![Value::from(1), Value::from("x"), Value::from(4)]
        );
        assert_eq!(
            seq.splice(-1, 1, [Value::from(5)]).to_vec().unwrap(),
            vec![Value::from(1), Value::from(2), Value::from(3), Value::from(5)]
        );
        assert!(seq.splice(2, 0, []).ptr_eq(&seq));
    }

    #[test]
    fn test_wrap_index() {
        let seq = seq![1, 2];
        assert_eq!(seq.wrap_index(-2), Some(0));
        assert_eq!(seq.wrap_index(-3), None);
        assert_eq!(seq.filter(|_, _| true).wrap_index(-1), None);
    }
}
