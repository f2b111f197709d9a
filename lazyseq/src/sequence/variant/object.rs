use std::rc::Rc;

use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::{Record, Value};

/// A record, keyed by its string keys in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Object {
    record: Rc<Record>,
}

impl Object {
    pub(crate) fn new(record: Rc<Record>) -> Self {
        Object { record }
    }

    /// Look up a key. Presence is structural: a key mapped to `Null` is
    /// present.
    #[inline]
    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub(crate) fn entry(&self, index: usize) -> Option<(Value, Value)> {
        self.record
            .get_index(index)
            .map(|(key, value)| (Value::Str(key.clone()), value.clone()))
    }
}

impl SourceCore for Object {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, _flip: bool) -> usize {
        let mut offer = |(key, value): (&Rc<str>, &Value)| visit(value, &Value::Str(key.clone()));
        let mut visited = 0;
        if reverse {
            for entry in self.record.iter().rev() {
                visited += 1;
                if !offer(entry) {
                    break;
                }
            }
        } else {
            for entry in self.record.iter() {
                visited += 1;
                if !offer(entry) {
                    break;
                }
            }
        }
        visited
    }

    fn length(&self) -> Length {
        Length::Known(self.record.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::{record, Seq, Value};

    #[test]
    fn test_reverse_keeps_keys() {
        let seq = Seq::from(record! { "a" => 1, "b" => 2 });
        let mut keys = Vec::new();
        seq.traverse(
            &mut |_, key| {
                keys.push(key.clone());
                true
            },
            true,
            false,
        );
        assert_eq!(keys, vec![Value::from("b"), Value::from("a")]);
    }

    #[test]
    fn test_null_value_is_present() {
        let seq = Seq::from(record! { "a" => Value::Null });
        assert_eq!(seq.get("a"), Some(Value::Null));
        assert_eq!(seq.get("b"), None);
    }
}
