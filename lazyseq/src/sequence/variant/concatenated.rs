use std::cell::Cell;

use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::Value;

/// Parts traversed one after another.
///
/// An indexed concatenation counts positions across part boundaries; a
/// keyed one reports each part's own keys.
pub(crate) struct Concatenated {
    parts: Vec<Seq>,
}

impl Concatenated {
    pub(crate) fn new(parts: Vec<Seq>) -> Self {
        Concatenated { parts }
    }

    pub(crate) fn total_length(parts: &[Seq]) -> Length {
        parts
            .iter()
            .fold(Length::Known(0), |total, part| total.sum(part.length()))
    }
}

impl SourceCore for Concatenated {
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
        let parts: Box<dyn Iterator<Item = &Seq>> = if reverse {
            Box::new(self.parts.iter().rev())
        } else {
            Box::new(self.parts.iter())
        };
        for part in parts {
            part.traverse_natural(&mut offer, reverse);
            if stopped.get() {
                break;
            }
        }
        visited
    }

    fn length(&self) -> Length {
        Concatenated::total_length(&self.parts)
    }
}
