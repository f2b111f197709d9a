// Nodes that keep their parent's entries one for one, changing values or
// keys as they pass.
use crate::length::Length;
use crate::sequence::core::{Mapper, Seq, Visit};
use crate::sequence::traits::SourceCore;

/// Values replaced by `mapper(value, key)`.
pub(crate) struct Mapping {
    parent: Seq,
    mapper: Mapper,
}

impl Mapping {
    pub(crate) fn new(parent: Seq, mapper: Mapper) -> Self {
        Mapping { parent, mapper }
    }
}

impl SourceCore for Mapping {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let Some(orientation) = this.orientation(reverse, flip) else {
            return this.replay_materialized(visit, reverse, flip);
        };
        // the mapper always sees natural keys
        let mapper = &self.mapper;
        self.parent.traverse_natural(
            &mut |value, key| visit(&mapper(value, key), &orientation.key(key)),
            reverse,
        )
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}

/// Keys replaced by `mapper(key, value)`.
pub(crate) struct KeyMapping {
    parent: Seq,
    mapper: Mapper,
}

impl KeyMapping {
    pub(crate) fn new(parent: Seq, mapper: Mapper) -> Self {
        KeyMapping { parent, mapper }
    }
}

impl SourceCore for KeyMapping {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, _flip: bool) -> usize {
        let mapper = &self.mapper;
        self.parent.traverse_natural(
            &mut |value, key| visit(value, &mapper(key, value)),
            reverse,
        )
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}

/// Keys and values swapped.
pub(crate) struct Flipped {
    parent: Seq,
}

impl Flipped {
    pub(crate) fn new(parent: Seq) -> Self {
        Flipped { parent }
    }

    pub(crate) fn parent(&self) -> &Seq {
        &self.parent
    }
}

impl SourceCore for Flipped {
    fn traverse(&self, _this: &Seq, visit: Visit, reverse: bool, _flip: bool) -> usize {
        self.parent
            .traverse_natural(&mut |value, key| visit(key, value), reverse)
    }

    fn length(&self) -> Length {
        self.parent.length()
    }
}
