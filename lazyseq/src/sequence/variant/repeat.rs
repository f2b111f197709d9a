use std::fmt;

use crate::length::Length;
use crate::sequence::core::{Seq, Visit};
use crate::sequence::traits::SourceCore;
use crate::value::Value;

/// One value, a number of times or forever.
#[derive(Debug, Clone)]
pub(crate) struct Repeat {
    value: Value,
    times: Option<usize>,
}

impl Repeat {
    pub(crate) fn new(value: Value, times: Option<usize>) -> Self {
        Repeat { value, times }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<Value> {
        match self.times {
            Some(times) if index >= times => None,
            _ => Some(self.value.clone()),
        }
    }
}

impl SourceCore for Repeat {
    fn traverse(&self, this: &Seq, visit: Visit, reverse: bool, flip: bool) -> usize {
        let Some(times) = self.times else {
            if reverse || flip {
                this.assert_finite();
            }
            let mut position = 0;
            loop {
                position += 1;
                if !visit(&self.value, &Value::index(position - 1)) {
                    return position;
                }
            }
        };
        let max = times.saturating_sub(1);
        for position in 0..times {
            let key = if flip { max - position } else { position };
            if !visit(&self.value, &Value::index(key)) {
                return position + 1;
            }
        }
        times
    }

    fn length(&self) -> Length {
        match self.times {
            Some(times) => Length::Known(times),
            None => Length::Infinite,
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Repeat [ ")?;
        self.value.fmt_quoted(f)?;
        if let Some(times) = self.times {
            write!(f, " {} times", times)?;
        }
        f.write_str(" ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Repeat::new(Value::from("x"), Some(3)).to_string(),
            r#"Repeat [ "x" 3 times ]"#
        );
        assert_eq!(Repeat::new(Value::from(1), None).to_string(), "Repeat [ 1 ]");
    }

    #[test]
    fn test_get_past_end() {
        let repeat = Repeat::new(Value::from(1), Some(2));
        assert_eq!(repeat.get(1), Some(Value::from(1)));
        assert_eq!(repeat.get(2), None);
    }
}
