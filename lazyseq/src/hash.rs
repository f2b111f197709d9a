// Scalar hashing. Values that are identity-equal (see `Value::is`) hash to
// the same code; sequences hash through their memoized `hash_code`.
use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;

use crate::value::Value;

/// Hash codes are kept within the positive 31 bit range.
pub const HASH_MAX_VAL: u32 = 0x7FFF_FFFF;

// fixed seeds so a hash code stays the same between runs
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

fn hasher() -> impl Hasher {
    RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]).build_hasher()
}

/// Hash a value into the positive 31 bit range.
pub fn hash(value: &Value) -> u32 {
    match value {
        Value::Seq(seq) => seq.hash_code(),
        Value::List(items) => items.iter().fold(1u32, |h, item| {
            h.wrapping_mul(31).wrapping_add(hash(item)) & HASH_MAX_VAL
        }),
        // records are unordered under equality, so entries are summed
        Value::Record(record) => record.iter().fold(0u32, |h, (key, item)| {
            h.wrapping_add(hash_str(key) ^ hash(item)) & HASH_MAX_VAL
        }),
        Value::Str(s) => hash_str(s),
        scalar => hash_scalar(scalar),
    }
}

fn hash_str(s: &str) -> u32 {
    let mut state = hasher();
    3u8.hash(&mut state);
    s.hash(&mut state);
    smear(state.finish())
}

fn hash_scalar(value: &Value) -> u32 {
    let mut state = hasher();
    match value {
        Value::Null => 0u8.hash(&mut state),
        Value::Bool(b) => {
            1u8.hash(&mut state);
            b.hash(&mut state);
        }
        Value::Int(i) => {
            2u8.hash(&mut state);
            i.hash(&mut state);
        }
        Value::Float(f) => match integral(f.into_inner()) {
            // integral floats are identical to the matching integer
            Some(i) => {
                2u8.hash(&mut state);
                i.hash(&mut state);
            }
            None => {
                4u8.hash(&mut state);
                // OrderedFloat hashes all NaNs alike
                f.hash(&mut state);
            }
        },
        Value::Str(_) | Value::List(_) | Value::Record(_) | Value::Seq(_) => {
            unreachable!("compound values are hashed structurally")
        }
    }
    smear(state.finish())
}

pub(crate) fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn smear(h: u64) -> u32 {
    ((h >> 32) as u32 ^ h as u32) & HASH_MAX_VAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(hash(&Value::from("foo")), hash(&Value::from("foo")));
        assert_ne!(hash(&Value::from("foo")), hash(&Value::from("bar")));
    }

    #[test]
    fn test_integral_float_hashes_like_integer() {
        assert_eq!(hash(&Value::from(2.0)), hash(&Value::from(2)));
        assert_ne!(hash(&Value::from(2.5)), hash(&Value::from(2)));
    }

    #[test]
    fn test_hash_within_range() {
        for value in [Value::Null, Value::from(true), Value::from(-7), Value::from(1.25)] {
            assert!(hash(&value) <= HASH_MAX_VAL);
        }
    }
}
