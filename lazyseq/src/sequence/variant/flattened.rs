use std::cell::Cell;

use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::Value;

/// Sequence-like values traversed in place, one level deep. Other values
/// pass through as single entries.
pub(crate) struct Flattened {
    parent: Seq,
}

impl Flattened {
    pub(crate) fn new(parent: Seq) -> Self {
        Flattened { parent }
    }
}

impl SourceCore for Flattened {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let renumber = this.is_indexed();
        let mut visited = 0;
        let stopped = Cell::new(false);
        let mut offer = |value: &Value, key: &Value| {
            let key = if renumber {
                orientation.position(visited)
            } else {
                key.clone()
            };
            visited += 1;
            stopped.set(!visit(value, &key));
            !stopped.get()
        };
        self.parent.traverse_natural(
            &mut |value, key| match value.to_seq() {
                Some(inner) => {
                    inner.traverse_natural(&mut offer, reverse);
                    !stopped.get()
                }
                None => offer(value, key),
            },
            reverse,
        );
        visited
    }
}

#[cfg(test)]
mod tests {
    use crate::{record, seq, Seq, Value};

    #[test]
    fn test_flatten_one_level() {
        let seq = seq![vec![1, 2], vec![3]].flatten();
        assert_eq!(
            seq.to_vec().unwrap(),
            vec![Value::from(1), Value::from(2), Value::from(3)]
        );
        assert_eq!(seq.reverse().get(0), Some(Value::from(3)));
    }

    #[test]
    fn test_scalars_pass_through() {
        let seq = seq![1, vec![2, 3], 4].flatten();
        assert_eq!(seq.get(3), Some(Value::from(4)));
    }

    #[test]
    fn test_keyed_flatten_keeps_inner_keys() {
        let inner = Seq::from(record! { "x" => 1 });
        let seq = Seq::from(record! { "a" => Value::Seq(inner), "b" => 2 }).flatten();
        assert_eq!(seq.get("x"), Some(Value::from(1)));
        assert_eq!(seq.get("b"), Some(Value::from(2)));
    }

    #[test]
    fn test_flatten_stops_inside_inner_sequence() {
        let seq = seq![vec![1, 2], vec![3]].flatten();
        assert_eq!(seq.first(), Some(Value::from(1)));
        assert_eq!(seq.take(2).to_vec().unwrap().len(), 2);
    }

    #[test]
    fn test_infinite_inner_sequence_makes_infinite() {
        let seq = seq![Value::from(vec![1]), Value::from(Seq::repeat(Value::from(2), None))].flatten();
        assert_eq!(seq.length(), crate::Length::Infinite);
        assert_eq!(seq.to_vec(), Err(crate::error::Error::InfiniteSequence));
        assert_eq!(
            seq.take(3).to_vec().unwrap(),
            vec![Value::from(1), Value::from(2), Value::from(2)]
        );
    }
}
