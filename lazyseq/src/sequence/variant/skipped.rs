use crate::length::Length;
use crate::sequence::core::{Predicate, Seq, Visit};
use crate::sequence::traits::SourceCore;

/// Everything after the first `amount` entries.
pub(crate) struct Skipped {
    parent: Seq,
    amount: usize,
}

impl Skipped {
    pub(crate) fn new(parent: Seq, amount: usize) -> Self {
        Skipped { parent, amount }
    }
}

impl SourceCore for Skipped {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        if reverse {
            return this.replay_materialized(visit, reverse, flip);
        }
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let renumber = this.is_indexed();
        let mut seen = 0;
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, key| {
                seen += 1;
                if seen <= self.amount {
                    return true;
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

    fn length(&self) -> Length {
        self.parent.length().saturating_sub(self.amount)
    }
}

/// Everything from the first entry the predicate rejects.
pub(crate) struct SkippedWhile {
    parent: Seq,
    predicate: Predicate,
}

impl SkippedWhile {
    pub(crate) fn new(parent: Seq, predicate: Predicate) -> Self {
        SkippedWhile { parent, predicate }
    }
}

impl SourceCore for SkippedWhile {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        if reverse {
            return this.replay_materialized(visit, reverse, flip);
        }
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let renumber = this.is_indexed();
        let mut skipping = true;
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, key| {
                if skipping && (self.predicate)(value, key) {
                    return true;
                }
                skipping = false;
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
    use crate::{seq, Length, Value};

    #[test]
    fn test_skip_renumbers() {
        let seq = seq![1, 2, 3].skip(1);
        assert_eq!(seq.length(), Length::Known(2));
        assert_eq!(seq.get(0), Some(Value::from(2)));
    }

    #[test]
    fn test_skip_while_keeps_later_matches() {
        let seq = seq![1, 2, 5, 1].skip_while(|value, _| value.as_i64() < Some(3));
        assert_eq!(seq.to_vec().unwrap(), vec![Value::from(5), Value::from(1)]);
    }

    #[test]
    fn test_skip_reversed_falls_back_to_cache() {
        let seq = seq![1, 2, 3, 4].skip(1).reverse();
        assert_eq!(
            seq.to_vec().unwrap(),
            vec![Value::from(4), Value::from(3), Value::from(2)]
        );
        assert_eq!(seq.get(0), Some(Value::from(4)));
    }
}
