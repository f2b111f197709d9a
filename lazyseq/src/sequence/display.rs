use std::fmt;

use crate::value::Value;

use super::core::{Seq, Source};

struct Quoted<'a>(&'a Value);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_quoted(f)
    }
}

impl fmt::Display for Seq {
    /// `Seq [ 1, 2 ]` for an indexed sequence, `Seq { "a": 1 }` for a keyed
    /// one. An infinite sequence is shown without its entries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source() {
            Source::Range(range) => return fmt::Display::fmt(range, f),
            Source::Repeat(repeat) => return fmt::Display::fmt(repeat, f),
            _ => {}
        }
        let (open, close) = if self.is_indexed() {
            ("Seq [", "]")
        } else {
            ("Seq {", "}")
        };
        if self.length().is_infinite() {
            return write!(f, "{} ... {}", open, close);
        }
        let indexed = self.is_indexed();
        let mut parts = Vec::new();
        self.for_each(|value, key| {
            parts.push(if indexed {
                Quoted(value).to_string()
            } else {
                format!("{}: {}", Quoted(key), Quoted(value))
            });
            true
        });
        if parts.is_empty() {
            write!(f, "{}{}", open, close)
        } else {
            write!(f, "{} {} {}", open, parts.join(", "), close)
        }
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
