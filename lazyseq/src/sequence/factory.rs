// Node allocation shared by the transformations, plus the filter and group
// factories.
use indexmap::IndexMap;

use crate::length::Length;
use crate::value::Value;

use super::core::{Kind, Predicate, Seq, Source};
use super::variant::Filtered;

/// A node of the parent's kind, length and mirrored flag.
pub(crate) fn make_sequence(parent: &Seq, source: impl Into<Source>) -> Seq {
    Seq::new(
        parent.kind(),
        parent.is_mirrored(),
        parent.length(),
        source,
    )
}

pub(crate) fn make_keyed(length: Length, source: impl Into<Source>) -> Seq {
    Seq::new(Kind::Keyed, false, length, source)
}

pub(crate) fn make_indexed(length: Length, source: impl Into<Source>) -> Seq {
    Seq::new(Kind::Indexed, false, length, source)
}

/// A length that cannot be told before traversal, unless the parent never
/// ends.
pub(crate) fn unknown_unless_infinite(parent: &Seq) -> Length {
    if parent.length().is_infinite() {
        Length::Infinite
    } else {
        Length::Unknown
    }
}

/// Keep the entries `predicate` accepts.
///
/// With `use_keys` the result is keyed by the parent's keys; otherwise it is
/// indexed with positions counted afresh.
pub(crate) fn filter_factory(seq: &Seq, predicate: Predicate, use_keys: bool) -> Seq {
    let length = unknown_unless_infinite(seq);
    let source = Filtered::new(seq.clone(), predicate, use_keys);
    if use_keys {
        make_keyed(length, source)
    } else {
        make_indexed(length, source)
    }
}

/// Bucket entries by `mapper(value, key)`, in order of first appearance.
///
/// The result is keyed by group. With `use_keys` each group keeps the
/// entries' keys; otherwise each group is indexed afresh.
///
/// # Panics
///
/// Panics with [`Error::InfiniteSequence`](crate::error::Error) on an
/// infinite sequence.
pub(crate) fn group_by_factory<F>(seq: &Seq, mapper: F, use_keys: bool) -> Seq
where
    F: Fn(&Value, &Value) -> Value,
{
    seq.assert_finite();
    let mut groups: IndexMap<Value, Vec<(Value, Value)>, ahash::RandomState> =
        IndexMap::default();
    seq.traverse(
        &mut |value, key| {
            groups
                .entry(mapper(value, key))
                .or_default()
                .push((key.clone(), value.clone()));
            true
        },
        false,
        false,
    );
    Seq::from_entries(groups.into_iter().map(|(group, members)| {
        let members = if use_keys {
            Seq::from_entries(members)
        } else {
            Seq::from(
                members
                    .into_iter()
                    .map(|(_, value)| value)
                    .collect::<Vec<_>>(),
            )
        };
        (group, Value::Seq(members))
    }))
}
