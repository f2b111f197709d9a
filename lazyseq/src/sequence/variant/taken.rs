use crate::length::Length;
use crate::sequence::core::{Predicate, Seq, Visit};
use crate::sequence::traits::SourceCore;

/// The first `amount` entries.
pub(crate) struct Taken {
    parent: Seq,
    amount: usize,
}

impl Taken {
    pub(crate) fn new(parent: Seq, amount: usize) -> Self {
        Taken { parent, amount }
    }
}

impl SourceCore for Taken {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        if reverse {
            return this.replay_materialized(visit, reverse, flip);
        }
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        if self.amount == 0 {
            return 0;
        }
        let renumber = this.is_indexed();
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, key| {
                let key = if renumber {
                    orientation.position(visited)
                } else {
                    key.clone()
                };
                visited += 1;
                visit(value, &key) && visited < self.amount
            },
            false,
        );
        visited
    }

    fn length(&self) -> Length {
        self.parent.length().min(self.amount)
    }
}

/// Leading entries, for as long as the predicate holds.
pub(crate) struct TakenWhile {
    parent: Seq,
    predicate: Predicate,
}

impl TakenWhile {
    pub(crate) fn new(parent: Seq, predicate: Predicate) -> Self {
        TakenWhile { parent, predicate }
    }
}

impl SourceCore for TakenWhile {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        if reverse {
            return this.replay_materialized(visit, reverse, flip);
        }
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let renumber = this.is_indexed();
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, key| {
                if !(self.predicate)(value, key) {
                    return false;
                }
                let key = if renumber {
                    orientation.position(visited)
                } else {
                    key.clone()
                };
                visited += 1;
                visit(value, &key)
            },
            false,
        );
        visited
    }
}

#[cfg(test)]
mod tests {
    use crate::{record, seq, Length, Seq, Value};

    #[test]
    fn test_take_from_infinite() {
        let seq = Seq::range(10, None, 1).take(3);
        assert_eq!(seq.length(), Length::Known(3));
        assert_eq!(
            seq.to_vec().unwrap(),
            vec![Value::from(10), Value::from(11), Value::from(12)]
        );
    }

    #[test]
    fn test_take_while_stops_at_first_failure() {
        let seq = seq![1, 2, 5, 1].take_while(|value, _| value.as_i64() < Some(3));
        assert_eq!(seq.to_vec().unwrap(), vec![Value::from(1), Value::from(2)]);
        assert_eq!(seq.length(), Length::Known(2));
    }

    #[test]
    fn test_keyed_take_keeps_keys() {
        let seq = Seq::from(record! { "a" => 1, "b" => 2, "c" => 3 }).take(2);
        assert_eq!(seq.last(), Some(Value::from(2)));
        assert_eq!(seq.get("b"), Some(Value::from(2)));
        assert!(!seq.has("c"));
    }
}
