use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;

/// The parent traversed back to front.
///
/// A plain reversal renumbers positions from its own front. With
/// `maintain_indices` every entry keeps its parent position, so the node's
/// positions come out mirrored.
pub(crate) struct Reversed {
    parent: Seq,
    maintain_indices: bool,
}

impl Reversed {
    pub(crate) fn new(parent: Seq, maintain_indices: bool) -> Self {
        Reversed {
            parent,
            maintain_indices,
        }
    }

    pub(crate) fn parent(&self) -> &Seq {
        &self.parent
    }

    pub(crate) fn maintains_indices(&self) -> bool {
        self.maintain_indices
    }
}

impl SourceCore for Reversed {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let flip = if self.maintain_indices {
            !flip
        } else {
            flip ^ self.parent.is_mirrored()
        };
        self.parent.traverse(visit, !reverse, flip)
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}

#[cfg(test)]
mod tests {
    use crate::{seq, Value};

    #[test]
    fn test_plain_reverse_renumbers() {
        let seq = seq![1, 2, 3].reverse();
        assert_eq!(seq.get(0), Some(Value::from(3)));
        assert_eq!(seq.get(2), Some(Value::from(1)));
    }

    #[test]
    fn test_maintained_reverse_keeps_positions() {
        let seq = seq![1, 2, 3].reverse_with(true);
        assert!(seq.is_mirrored());
        assert_eq!(seq.first(), Some(Value::from(3)));
        assert_eq!(seq.get(0), Some(Value::from(1)));
        assert_eq!(seq.find_key(|value, _| value.as_i64() == Some(3)), Some(Value::from(2)));
    }

    #[test]
    fn test_reverse_of_maintained_reverse() {
        let seq = seq![1, 2, 3].reverse_with(true).reverse();
        assert_eq!(seq.to_vec().unwrap(), seq![1, 2, 3].to_vec().unwrap());
        assert_eq!(seq.get(0), Some(Value::from(1)));
    }
}
