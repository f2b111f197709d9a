use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::error;
use crate::hash;
use crate::sequence::Seq;

/// A native ordered record: string keys in insertion order.
pub type Record = IndexMap<Rc<str>, Value, ahash::RandomState>;

/// A value carried by a sequence, either as an entry value or as a key.
///
/// Keys and values share one type so that a sequence can be flipped. An
/// indexed sequence uses `Value::Int` positions as its keys.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(Rc<str>),
    /// A native ordered list, as produced by `to_js`.
    List(Rc<[Value]>),
    /// A native record, as produced by `to_js`.
    Record(Rc<Record>),
    /// A nested lazy sequence.
    Seq(Seq),
}

// a static assertion to ensure that Value never grows in size
#[cfg(target_arch = "x86_64")]
static_assertions::assert_eq_size!(Value, [u8; 24]);

impl Value {
    #[inline]
    pub(crate) fn index(position: usize) -> Self {
        Value::Int(position as i64)
    }

    /// Build a `[key, value]` entry pair.
    pub fn entry(key: Value, value: Value) -> Self {
        Value::List(Rc::from([key, value]))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as an integer; integral floats qualify.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => hash::integral(f.into_inner()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(f.into_inner()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Seq> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// A position key reported by an indexed traversal.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        match self {
            Value::Int(i) if *i >= 0 => *i as usize,
            _ => 0,
        }
    }

    /// View a sequence-like value as a sequence.
    ///
    /// Native lists and records are wrapped without copying. Scalars are not
    /// sequence-like and give `None`.
    pub fn to_seq(&self) -> Option<Seq> {
        match self {
            Value::Seq(seq) => Some(seq.clone()),
            Value::List(items) => Some(Seq::from(items.clone())),
            Value::Record(record) => Some(Seq::from(record.clone())),
            _ => None,
        }
    }

    /// Split an entry pair into key and value.
    ///
    /// Missing parts of a malformed entry are `Null`.
    pub(crate) fn to_entry(&self) -> (Value, Value) {
        match self {
            Value::List(items) => (
                items.first().cloned().unwrap_or(Value::Null),
                items.get(1).cloned().unwrap_or(Value::Null),
            ),
            Value::Seq(seq) => (
                seq.get(0).unwrap_or(Value::Null),
                seq.get(1).unwrap_or(Value::Null),
            ),
            _ => (Value::Null, Value::Null),
        }
    }

    /// Identity equality.
    ///
    /// Numbers compare by value (so `1` is `1.0`), `NaN` is `NaN` and `0.0`
    /// is not `-0.0`. Native lists and records compare element-wise,
    /// sequences compare with `Seq::equals`.
    pub fn is(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_is(a.into_inner(), b.into_inner()),
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                // the float must be exactly the integer, not its nearest double
                let b = b.into_inner();
                hash::integral(b) == Some(*a) && float_is(*a as f64, b)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| a.is(b))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value.is(other)))
            }
            (Value::Seq(a), Value::Seq(b)) => a.equals(b),
            _ => false,
        }
    }

    /// The default comparator used by `sort`.
    ///
    /// Values of different types order by type: null, booleans, numbers,
    /// strings, lists, then everything else, which is unordered.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(a, b)| a.compare(b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => OrderedFloat(a).cmp(&OrderedFloat(b)),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Str(_) => 3,
            Value::List(_) => 4,
            Value::Record(_) | Value::Seq(_) => 5,
        }
    }

    /// Deeply convert nested sequences into native lists and records.
    pub fn to_js(&self) -> error::Result<Value> {
        match self {
            Value::Seq(seq) => seq.to_js(),
            Value::List(items) => Ok(Value::List(
                items
                    .iter()
                    .map(|item| item.to_js())
                    .collect::<error::Result<Vec<_>>>()?
                    .into(),
            )),
            Value::Record(record) => Ok(Value::Record(Rc::new(
                record
                    .iter()
                    .map(|(key, item)| -> error::Result<(Rc<str>, Value)> {
                        Ok((key.clone(), item.to_js()?))
                    })
                    .collect::<error::Result<Record>>()?,
            ))),
            scalar => Ok(scalar.clone()),
        }
    }

    /// Write the value with strings quoted, as sequences display entries.
    pub(crate) fn fmt_quoted(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

fn float_is(a: f64, b: f64) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b && (a != 0.0 || a.is_sign_negative() == b.is_sign_negative())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(hash::hash(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                if items.is_empty() {
                    return f.write_str("[]");
                }
                f.write_str("[ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_quoted(f)?;
                }
                f.write_str(" ]")
            }
            Value::Record(record) => {
                if record.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, item)) in record.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: ", key)?;
                    item.fmt_quoted(f)?;
                }
                f.write_str(" }")
            }
            Value::Seq(seq) => fmt::Display::fmt(seq, f),
        }
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::index(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(Rc::new(record))
    }
}

impl From<Seq> for Value {
    fn from(seq: Seq) -> Self {
        Value::Seq(seq)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{Error, SerializeMap, SerializeSeq};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(f.into_inner()),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, item) in record.iter() {
                    map.serialize_entry(key.as_ref(), item)?;
                }
                map.end()
            }
            Value::Seq(seq) => seq.to_js().map_err(S::Error::custom)?.serialize(serializer),
        }
    }
}
