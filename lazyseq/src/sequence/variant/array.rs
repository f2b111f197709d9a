use std::rc::Rc;

use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::Value;

/// An ordered list of values, keyed by position.
#[derive(Debug, Clone)]
pub(crate) struct Array {
    items: Rc<[Value]>,
}

impl Array {
    pub(crate) fn new(items: Rc<[Value]>) -> Self {
        Array { items }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }
}

impl SourceCore for Array {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let max = self.items.len().saturating_sub(1);
        for position in 0..self.items.len() {
            let index = if reverse { max - position } else { position };
            let key = if flip { max - position } else { position };
            if !visit(&self.items[index], &Value::index(key)) {
                return position + 1;
            }
        }
        self.items.len()
    }

    fn length(&self) -> Length {
        Length::Known(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq;

    fn entries(seq: &Seq, reverse: bool, flip: bool) -> Vec<(i64, i64)> {
        let mut entries = Vec::new();
        seq.traverse(
            &mut |value, key| {
                entries.push((key.position() as i64, value.as_i64().unwrap()));
                true
            },
            reverse,
            flip,
        );
        entries
    }

    #[test]
    fn test_reverse_counts_from_traversal_start() {
        let seq = seq![10, 20, 30];
        assert_eq!(entries(&seq, true, false), vec![(0, 30), (1, 20), (2, 10)]);
    }

    #[test]
    fn test_reverse_flipped_reports_natural_positions() {
        let seq = seq![10, 20, 30];
        assert_eq!(entries(&seq, true, true), vec![(2, 30), (1, 20), (0, 10)]);
    }
}
