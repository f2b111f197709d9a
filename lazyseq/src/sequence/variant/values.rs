// Nodes that re-key their parent without touching its order.
use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;

/// The parent's values, at fresh positions.
pub(crate) struct Values {
    parent: Seq,
}

impl Values {
    pub(crate) fn new(parent: Seq) -> Self {
        Values { parent }
    }
}

impl SourceCore for Values {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let Some(orientation) = this.counting(flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        let mut visited = 0;
        self.parent.traverse_natural(
            &mut |value, _| {
                let key = orientation.position(visited);
                visited += 1;
                visit(value, &key)
            },
            reverse,
        );
        visited
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}

/// A keyed sequence read from `[key, value]` entry values.
pub(crate) struct FromEntries {
    parent: Seq,
}

impl FromEntries {
    pub(crate) fn new(parent: Seq) -> Self {
        FromEntries { parent }
    }
}

impl SourceCore for FromEntries {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, _flip: bool) -> usize {
        self.parent.traverse_natural(
            &mut |entry, _| {
                let (key, value) = entry.to_entry();
                visit(&value, &key)
            },
            reverse,
        )
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}

/// An indexed sequence seen as keyed, its positions becoming keys.
pub(crate) struct KeyedIndexed {
    parent: Seq,
}

impl KeyedIndexed {
    pub(crate) fn new(parent: Seq) -> Self {
        KeyedIndexed { parent }
    }
}

impl SourceCore for KeyedIndexed {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, _flip: bool) -> usize {
        self.parent.traverse_natural(visit, reverse)
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}

#[cfg(test)]
mod tests {
    use crate::{record, seq, Kind, Seq, Value};

    #[test]
    fn test_values_of_keyed() {
        let seq = Seq::from(record! { "a" => 1, "b" => 2 }).values();
        assert_eq!(seq.kind(), Kind::Indexed);
        assert_eq!(seq.get(1), Some(Value::from(2)));
    }

    #[test]
    fn test_from_entry_seq() {
        let seq = seq![vec![Value::from("a"), Value::from(1)]].from_entry_seq();
        assert_eq!(seq.get("a"), Some(Value::from(1)));
    }

    #[test]
    fn test_keyed_view_of_reversed() {
        let seq = seq![1, 2, 3].reverse().to_keyed_seq();
        assert_eq!(seq.kind(), Kind::Keyed);
        assert_eq!(seq.get(0), Some(Value::from(3)));
        assert_eq!(seq.reverse().first(), Some(Value::from(1)));
    }
}
