/// Build an indexed sequence from a list of values.
///
/// ```
/// use lazyseq::seq;
///
/// let seq = seq![1, "two", 3.0];
/// assert_eq!(seq.to_string(), r#"Seq [ 1, "two", 3 ]"#);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Seq::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Seq::from(vec![$($crate::Value::from($value)),+])
    };
}

/// Build a [`Record`](crate::Record) from `key => value` pairs, keeping
/// their order.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::default()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::default();
        $(record.insert(::std::rc::Rc::<str>::from($key), $crate::Value::from($value));)+
        record
    }};
}
