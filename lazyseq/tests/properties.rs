use proptest::prelude::*;

use lazyseq::{Seq, Value};

fn to_seq(xs: &[i64]) -> Seq {
    Seq::from(xs.iter().map(|&x| Value::from(x)).collect::<Vec<_>>())
}

fn to_values(xs: &[i64]) -> Vec<Value> {
    xs.iter().map(|&x| Value::from(x)).collect()
}

// the same bound resolution slices use
fn resolve(index: i64, len: usize) -> usize {
    if index < 0 {
        (len as i64 + index).max(0) as usize
    } else {
        (index as usize).min(len)
    }
}

proptest! {
    #[test]
    fn to_vec_length_matches_count(xs in prop::collection::vec(any::<i64>(), 0..32)) {
        let seq = to_seq(&xs).filter(|value, _| value.as_i64().is_some_and(|x| x % 2 == 0));
        let first = seq.to_vec().unwrap();
        prop_assert_eq!(first.len(), seq.count().unwrap());
        prop_assert_eq!(first, seq.to_vec().unwrap());
    }

    #[test]
    fn double_reverse_is_identity(xs in prop::collection::vec(any::<i64>(), 0..32)) {
        let seq = to_seq(&xs).map(|value, _| value.clone());
        prop_assert_eq!(seq.reverse().reverse().to_vec().unwrap(), to_values(&xs));
        let mut reversed = to_values(&xs);
        reversed.reverse();
        prop_assert_eq!(seq.reverse().to_vec().unwrap(), reversed);
    }

    #[test]
    fn map_fuses(xs in prop::collection::vec(-1000i64..1000, 0..32)) {
        let seq = to_seq(&xs);
        let twice = seq
            .map(|value, _| Value::from(value.as_i64().unwrap_or(0) + 1))
            .map(|value, _| Value::from(value.as_i64().unwrap_or(0) * 3));
        let once = seq.map(|value, _| Value::from((value.as_i64().unwrap_or(0) + 1) * 3));
        prop_assert_eq!(twice.to_vec().unwrap(), once.to_vec().unwrap());
    }

    #[test]
    fn filter_partitions(xs in prop::collection::vec(any::<i64>(), 0..32)) {
        let seq = to_seq(&xs);
        let even = |value: &Value, _: &Value| value.as_i64().is_some_and(|x| x % 2 == 0);
        let kept = seq.filter(even).count().unwrap();
        let rejected = seq.filter_not(even).count().unwrap();
        prop_assert_eq!(kept + rejected, xs.len());
    }

    #[test]
    fn slice_matches_vec_slice(
        xs in prop::collection::vec(any::<i64>(), 0..32),
        begin in -40i64..40,
        end in prop::option::of(-40i64..40),
    ) {
        let b = resolve(begin, xs.len());
        let e = end.map_or(xs.len(), |end| resolve(end, xs.len()));
        let expected = if b < e { to_values(&xs[b..e]) } else { Vec::new() };
        let seq = to_seq(&xs);
        prop_assert_eq!(seq.slice(begin, end).to_vec().unwrap(), expected.clone());
        let unknown = seq.filter(|_, _| true);
        prop_assert_eq!(unknown.slice(begin, end).to_vec().unwrap(), expected);
    }

    #[test]
    fn equals_is_reflexive_and_symmetric(
        xs in prop::collection::vec(any::<i64>(), 0..32),
        ys in prop::collection::vec(any::<i64>(), 0..32),
    ) {
        let a = to_seq(&xs).map(|value, _| value.clone());
        let b = to_seq(&ys);
        prop_assert!(a.equals(&a));
        prop_assert_eq!(a.equals(&b), b.equals(&a));
        prop_assert_eq!(a.equals(&b), xs == ys);
        if a.equals(&b) {
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
    }
}
