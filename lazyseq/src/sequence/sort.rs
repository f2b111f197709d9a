// Eager operations: sorting and grouping enumerate every entry when called
// and return a sequence over the result.
use std::cmp::Ordering;

use crate::value::Value;

use super::core::Seq;
use super::factory;

impl Seq {
    /// Sort values with [`Value::compare`].
    ///
    /// # Panics
    ///
    /// Panics with [`Error::InfiniteSequence`](crate::error::Error) on an
    /// infinite sequence, as do the other sorting and grouping methods.
    pub fn sort(&self) -> Seq {
        self.sort_with(Value::compare)
    }

    /// Sort values with a comparator.
    pub fn sort_with<C>(&self, comparator: C) -> Seq
    where
        C: Fn(&Value, &Value) -> Ordering,
    {
        self.sort_by_with(|value, _| value.clone(), comparator)
    }

    /// Sort by the key `mapper(value, key)` computes, with
    /// [`Value::compare`].
    pub fn sort_by<M>(&self, mapper: M) -> Seq
    where
        M: Fn(&Value, &Value) -> Value,
    {
        self.sort_by_with(mapper, Value::compare)
    }

    /// Sort by a computed key and a comparator.
    ///
    /// The sort is stable: entries comparing equal keep their order. An
    /// indexed result is numbered afresh; a keyed one keeps its keys.
    pub fn sort_by_with<M, C>(&self, mapper: M, comparator: C) -> Seq
    where
        M: Fn(&Value, &Value) -> Value,
        C: Fn(&Value, &Value) -> Ordering,
    {
        self.assert_finite();
        let mut entries = Vec::new();
        self.traverse(
            &mut |value, key| {
                entries.push((mapper(value, key), key.clone(), value.clone()));
                true
            },
            false,
            false,
        );
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| comparator(&entries[a].0, &entries[b].0).then(a.cmp(&b)));
        if self.is_indexed() {
            Seq::from(
                order
                    .into_iter()
                    .map(|i| entries[i].2.clone())
                    .collect::<Vec<_>>(),
            )
        } else {
            Seq::from_entries(
                order
                    .into_iter()
                    .map(|i| (entries[i].1.clone(), entries[i].2.clone())),
            )
        }
    }

    /// Group entries by `mapper(value, key)`, in order of first appearance.
    ///
    /// The result is keyed by group. Groups of a keyed sequence keep their
    /// keys; groups of an indexed one are numbered afresh.
    pub fn group_by<M>(&self, mapper: M) -> Seq
    where
        M: Fn(&Value, &Value) -> Value,
    {
        factory::group_by_factory(self, mapper, self.is_keyed())
    }

    /// Count entries by `mapper(value, key)`, in order of first appearance.
    pub fn count_by<M>(&self, mapper: M) -> Seq
    where
        M: Fn(&Value, &Value) -> Value,
    {
        let groups = self.group_by(mapper);
        Seq::from_entries(groups.iter().map(|(group, members)| {
            let count = members
                .as_seq()
                .and_then(|members| members.length().known())
                .unwrap_or(0);
            (group, Value::from(count))
        }))
    }
}
