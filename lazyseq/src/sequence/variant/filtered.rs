use crate::sequence::core::{Predicate, Seq, Visit};
use crate::sequence::traits::SourceCore;

/// Entries the predicate accepts.
///
/// With `use_keys` the parent's keys are kept; otherwise positions are
/// counted afresh.
pub(crate) struct Filtered {
    parent: Seq,
    predicate: Predicate,
    use_keys: bool,
}

impl Filtered {
    pub(crate) fn new(parent: Seq, predicate: Predicate, use_keys: bool) -> Self {
        Filtered {
            parent,
            predicate,
            use_keys,
        }
    }
}

impl SourceCore for Filtered {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, key| {
                if !(self.predicate)(value, key) {
                    return true;
                }
                let key = if self.use_keys {
                    key.clone()
                } else {
                    orientation.position(visited)
                };
                visited += 1;
                visit(value, &key)
            },
            reverse,
        );
        visited
    }
}
