use std::fmt;

use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::Value;

/// An arithmetic progression from `start` towards `end`, exclusive.
///
/// Without an end the range is infinite.
#[derive(Debug, Clone)]
pub(crate) struct Range {
    start: i64,
    end: Option<i64>,
    step: i64,
    len: Length,
}

impl Range {
    /// The step's sign follows the direction from `start` to `end`; a zero
    /// step is taken as one.
    pub(crate) fn new(start: i64, end: Option<i64>, step: i64) -> Self {
        let magnitude = step.unsigned_abs().clamp(1, i64::MAX as u64);
        match end {
            Some(end) => {
                let distance = (i128::from(end) - i128::from(start)).unsigned_abs();
                let len = distance.div_ceil(u128::from(magnitude));
                let step = if end < start {
                    -(magnitude as i64)
                } else {
                    magnitude as i64
                };
                Range {
                    start,
                    end: Some(end),
                    step,
                    len: Length::Known(len as usize),
                }
            }
            None => Range {
                start,
                end: None,
                step: magnitude as i64,
                len: Length::Infinite,
            },
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<Value> {
        match self.len {
            Length::Known(len) if index >= len => None,
            _ => Some(self.at(index)),
        }
    }

    #[inline]
    fn at(&self, index: usize) -> Value {
        Value::Int(
            self.start
                .wrapping_add((index as i64).wrapping_mul(self.step)),
        )
    }
}

impl SourceCore for Range {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let len = match self.len {
            Length::Known(len) => len,
            _ if reverse || flip => {
                this.assert_finite();
                return 0;
            }
            _ => {
                let mut position = 0;
                loop {
                    position += 1;
                    if !visit(&self.at(position - 1), &Value::index(position - 1)) {
                        return position;
                    }
                }
            }
        };
        let max = len.saturating_sub(1);
        for position in 0..len {
            let index = if reverse { max - position } else { position };
            let key = if flip { max - position } else { position };
            if !visit(&self.at(index), &Value::index(key)) {
                return position + 1;
            }
        }
        len
    }

    fn length(&self) -> Length {
        self.len
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Range [ {}...", self.start)?;
        match self.end {
            Some(end) => write!(f, "{}", end)?,
            None => f.write_str("infinity")?,
        }
        if self.step.unsigned_abs() > 1 {
            write!(f, " by {}", self.step)?;
        }
        f.write_str(" ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_rounds_up() {
        assert_eq!(Range::new(0, Some(10), 3).length(), Length::Known(4));
        assert_eq!(Range::new(0, Some(0), 1).length(), Length::Known(0));
    }

    #[test]
    fn test_descending_step() {
        let range = Range::new(5, Some(0), 2);
        assert_eq!(range.get(0), Some(Value::from(5)));
        assert_eq!(range.get(2), Some(Value::from(1)));
        assert_eq!(range.get(3), None);
    }

    #[test]
    fn test_infinite_get() {
        let range = Range::new(1, None, 1);
        assert_eq!(range.get(1_000), Some(Value::from(1_001)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(0, Some(10), 2).to_string(), "Range [ 0...10 by 2 ]");
        assert_eq!(Range::new(0, None, 1).to_string(), "Range [ 0...infinity ]");
    }
}
