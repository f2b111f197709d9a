use crate::error::{self, Error};
use crate::hash::{self, HASH_MAX_VAL};
use crate::length::Length;

use super::core::Seq;

impl Seq {
    /// Value equality: the same entries, key for key and value for value,
    /// in the same order.
    ///
    /// This sequence is cached to compare against. A finite sequence never
    /// equals an infinite one.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::InfiniteSequence`] when both sequences are
    /// infinite and not the same sequence.
    pub fn equals(&self, other: &Seq) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.length(), other.length()) {
            (Length::Infinite, Length::Infinite) => error::fatal(Error::InfiniteSequence),
            (Length::Infinite, _) | (_, Length::Infinite) => return false,
            (Length::Known(a), Length::Known(b)) if a != b => return false,
            _ => {}
        }
        if let (Some(a), Some(b)) = (self.memoized_hash(), other.memoized_hash()) {
            if a != b {
                return false;
            }
        }
        let entries = self.materialize();
        let mut index = 0;
        let mut matched = true;
        other.traverse(
            &mut |value, key| {
                matched = entries
                    .get(index)
                    .is_some_and(|(k, v)| key.is(k) && value.is(v));
                index += 1;
                matched
            },
            false,
            false,
        );
        matched && index == entries.len()
    }

    /// A hash code consistent with [`Seq::equals`], memoized.
    ///
    /// An infinite sequence hashes to 0.
    pub fn hash_code(&self) -> u32 {
        if let Some(hash) = self.memoized_hash() {
            return hash;
        }
        let hash = if self.length().is_infinite() {
            0
        } else {
            let mut h = 0u32;
            self.traverse(
                &mut |value, key| {
                    // an entry whose key is its value contributes its value alone
                    let key_hash = if value.is(key) { 0 } else { hash::hash(key) };
                    h = h.wrapping_add(hash::hash(value) ^ key_hash) & HASH_MAX_VAL;
                    true
                },
                false,
                false,
            );
            h
        };
        self.memoize_hash(hash);
        hash
    }
}

impl PartialEq for Seq {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

#[cfg(test)]
mod tests {
    use crate::{record, seq, Seq, Value};

    #[test]
    fn test_equals_across_sources() {
        let a = seq![1, 2, 3];
        let b = Seq::range(1, Some(4), 1);
        assert!(a.equals(&b));
        assert!(b.equals(&a));
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_equals_caches_self() {
        let a = seq![1, 2].map(|value, _| value.clone());
        assert!(a.equals(&seq![1, 2]));
        assert!(a.is_cached());
    }

    #[test]
    fn test_different_lengths_differ() {
        let a = seq![1, 2].filter(|_, _| true);
        assert!(!a.equals(&seq![1, 2, 3]));
        assert!(!seq![1, 2, 3].equals(&a));
    }

    #[test]
    fn test_order_matters() {
        assert!(!seq![1, 2].equals(&seq![2, 1]));
    }

    #[test]
    fn test_keys_matter() {
        let a = Seq::from(record! { "a" => 1 });
        let b = Seq::from(record! { "b" => 1 });
        assert!(!a.equals(&b));
        assert_ne!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_finite_never_equals_infinite() {
        assert!(!seq![1].equals(&Seq::repeat(Value::from(1), None)));
        assert_eq!(Seq::repeat(Value::from(1), None).hash_code(), 0);
    }

    #[test]
    fn test_nested_sequences_compare_by_value() {
        let a = seq![Value::Seq(seq![1])];
        let b = seq![Value::Seq(Seq::range(1, Some(2), 1))];
        assert!(a.equals(&b));
    }
}
