use std::cell::RefCell;

use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::Value;

/// A foreign iterator, pulled on demand.
///
/// Pulled values are buffered so the sequence can be traversed again. The
/// node's length settles once the iterator is exhausted.
pub(crate) struct Pulled {
    state: RefCell<PullState>,
}

struct PullState {
    iter: Option<Box<dyn Iterator<Item = Value>>>,
    buffer: Vec<Value>,
}

impl Pulled {
    /// The source and the length its size hint promises: exact, or infinite
    /// for an unbounded hint of `usize::MAX`.
    pub(crate) fn new(iter: Box<dyn Iterator<Item = Value>>) -> (Self, Length) {
        let length = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Length::Known(lower),
            // the hint std gives for iterators that never end
            (usize::MAX, None) => Length::Infinite,
            _ => Length::Unknown,
        };
        let pulled = Pulled {
            state: RefCell::new(PullState {
                iter: Some(iter),
                buffer: Vec::new(),
            }),
        };
        (pulled, length)
    }

    /// The value at `index`, pulling the iterator as far as needed.
    ///
    /// The buffer is never borrowed while a visitor runs.
    pub(crate) fn pull(&self, this: &Seq, index: usize) -> Option<Value> {
        let mut state = self.state.borrow_mut();
        while state.buffer.len() <= index {
            let next = state.iter.as_mut().and_then(|iter| iter.next());
            match next {
                Some(value) => state.buffer.push(value),
                None => {
                    state.iter = None;
                    this.settle_length(state.buffer.len());
                    return None;
                }
            }
        }
        Some(state.buffer[index].clone())
    }

    fn drain(&self, this: &Seq) -> usize {
        let mut index = self.state.borrow().buffer.len();
        while self.pull(this, index).is_some() {
            index += 1;
        }
        index
    }
}

impl SourceCore for Pulled {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        if !reverse && !flip {
            let mut position = 0;
            while let Some(value) = self.pull(this, position) {
                position += 1;
                if !visit(&value, &Value::index(position - 1)) {
                    break;
                }
            }
            return position;
        }
        this.assert_finite();
        let len = self.drain(this);
        let max = len.saturating_sub(1);
        for position in 0..len {
            let index = if reverse { max - position } else { position };
            let key = if flip { max - position } else { position };
            let Some(value) = self.pull(this, index) else {
                return position;
            };
            if !visit(&value, &Value::index(key)) {
                return position + 1;
            }
        }
        len
    }
}
