// Conversions into native values and ecosystem collections. Each one
// traverses the whole sequence, so each first checks it is finite.
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error;
use crate::value::{Record, Value};

use super::core::Seq;

/// A collection that can be built by draining a sequence in order.
pub trait FromSequence: Sized {
    fn from_sequence(seq: &Seq) -> Self;
}

/// The values, in order.
pub type Vector = Vec<Value>;
/// Keys to values; a repeated key keeps its last value.
pub type Map = ahash::HashMap<Value, Value>;
/// Keys to values in order of first appearance.
pub type OrderedMap = IndexMap<Value, Value, ahash::RandomState>;
/// The distinct values.
pub type Set = ahash::HashSet<Value>;

impl FromSequence for Vector {
    fn from_sequence(seq: &Seq) -> Self {
        let mut values = Vec::new();
        seq.for_each(|value, _| {
            values.push(value.clone());
            true
        });
        values
    }
}

impl FromSequence for Map {
    fn from_sequence(seq: &Seq) -> Self {
        let mut map = Map::default();
        seq.for_each(|value, key| {
            map.insert(key.clone(), value.clone());
            true
        });
        map
    }
}

impl FromSequence for OrderedMap {
    fn from_sequence(seq: &Seq) -> Self {
        let mut map = OrderedMap::default();
        seq.for_each(|value, key| {
            map.insert(key.clone(), value.clone());
            true
        });
        map
    }
}

impl FromSequence for Set {
    fn from_sequence(seq: &Seq) -> Self {
        let mut set = Set::default();
        seq.for_each(|value, _| {
            set.insert(value.clone());
            true
        });
        set
    }
}

impl Seq {
    /// Drain the sequence into any [`FromSequence`] collection.
    pub fn collect_into<C: FromSequence>(&self) -> error::Result<C> {
        self.ensure_finite()?;
        Ok(C::from_sequence(self))
    }

    pub fn to_vector(&self) -> error::Result<Vector> {
        self.collect_into()
    }

    pub fn to_map(&self) -> error::Result<Map> {
        self.collect_into()
    }

    pub fn to_ordered_map(&self) -> error::Result<OrderedMap> {
        self.collect_into()
    }

    pub fn to_set(&self) -> error::Result<Set> {
        self.collect_into()
    }

    /// The values, in order. A completed traversal settles an unknown
    /// length.
    pub fn to_vec(&self) -> error::Result<Vec<Value>> {
        self.ensure_finite()?;
        let values = Vector::from_sequence(self);
        self.settle_length(values.len());
        Ok(values)
    }

    /// A record of the entries, keys rendered with their display form.
    pub fn to_object(&self) -> error::Result<Record> {
        self.ensure_finite()?;
        let mut record = Record::default();
        self.for_each(|value, key| {
            record.insert(Rc::from(key.to_string()), value.clone());
            true
        });
        Ok(record)
    }

    /// Deeply convert to native values: an indexed sequence becomes a list
    /// and a keyed one a record, nested sequences included.
    pub fn to_js(&self) -> error::Result<Value> {
        self.ensure_finite()?;
        let mut entries = Vec::new();
        self.for_each(|value, key| {
            entries.push((key.clone(), value.clone()));
            true
        });
        if self.is_indexed() {
            let items = entries
                .into_iter()
                .map(|(_, value)| value.to_js())
                .collect::<error::Result<Vec<_>>>()?;
            Ok(Value::from(items))
        } else {
            let record = entries
                .into_iter()
                .map(|(key, value)| -> error::Result<(Rc<str>, Value)> {
                    Ok((Rc::from(key.to_string()), value.to_js()?))
                })
                .collect::<error::Result<Record>>()?;
            Ok(Value::from(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::{record, seq};

    #[test]
    fn test_to_object_renders_keys() {
        let record = seq!["a", "b"].to_object().unwrap();
        assert_eq!(record.get("1"), Some(&Value::from("b")));
    }

    #[test]
    fn test_to_js_is_deep() {
        let seq = Seq::from(record! { "a" => Value::Seq(seq![1, 2]) });
        assert_eq!(
            seq.to_js().unwrap(),
            Value::from(record! { "a" => vec![1, 2] })
        );
    }

    #[test]
    fn test_to_js_fails_on_nested_infinite() {
        let seq = seq![Value::Seq(Seq::repeat(Value::Null, None))];
        assert_eq!(seq.to_js(), Err(Error::InfiniteSequence));
    }

    #[test]
    fn test_to_map_last_value_wins() {
        let seq = Seq::from_entries([
            (Value::from("a"), Value::from(1)),
            (Value::from("a"), Value::from(2)),
        ]);
        let map = seq.to_map().unwrap();
        assert_eq!(map.get(&Value::from("a")), Some(&Value::from(2)));
    }

    #[test]
    fn test_to_ordered_map_keeps_order() {
        let map = seq!["x", "y"].flip().to_ordered_map().unwrap();
        assert_eq!(
            map.keys().cloned().collect::<Vec<_>>(),
            vec![Value::from("x"), Value::from("y")]
        );
    }

    #[test]
    fn test_to_set_dedups_identical_numbers() {
        let set = seq![1, 1.0, 2].to_set().unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_conversions_fail_on_infinite() {
        let seq = Seq::range(0, None, 1);
        assert_eq!(seq.to_vec(), Err(Error::InfiniteSequence));
        assert!(seq.to_vector().is_err());
        assert!(seq.to_object().is_err());
    }
}
