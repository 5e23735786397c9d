//! Bound parameters and the driver-side binder seam.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::AccessResult;
use crate::value::Value;

/// Index value a parameter carries until `bind_all_parameters` assigns the
/// real one.
pub const UNBOUND_INDEX: i32 = -1;

/// One value bound into a statement, together with where it sits in the
/// rewritten SQL text.
///
/// The final bind `index` is assigned only at bind time, in text-position
/// order, so it is independent of the order substitutions were requested
/// in. Until then it holds [`UNBOUND_INDEX`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    index: i32,
    position: usize,
    value: Value,
}

impl BoundParameter {
    pub fn new(position: usize, value: Value) -> Self {
        Self {
            index: UNBOUND_INDEX,
            position,
            value,
        }
    }

    /// Final 1-based bind index, or [`UNBOUND_INDEX`] before finalization.
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Byte offset of the bind marker in the rewritten SQL text.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn set_index(&mut self, index: i32) {
        self.index = index;
    }

    /// Hand this parameter to the driver, dispatching on the value type.
    pub fn bind(&self, binder: &mut dyn ParameterBinder) -> AccessResult<()> {
        match &self.value {
            Value::Int32(v) => binder.bind_int(self.index, *v),
            Value::Int64(v) => binder.bind_long(self.index, *v),
            Value::Float(v) => binder.bind_float(self.index, *v),
            Value::Text(v) => binder.bind_text(self.index, v),
            Value::Date(v) => binder.bind_date(self.index, *v),
            Value::DateTime(v) => binder.bind_datetime(self.index, *v),
        }
    }
}

/// Sink the real database driver implements; invoked exactly once per
/// bound parameter, in final index order.
pub trait ParameterBinder {
    fn bind_int(&mut self, index: i32, value: i32) -> AccessResult<()>;
    fn bind_long(&mut self, index: i32, value: i64) -> AccessResult<()>;
    fn bind_float(&mut self, index: i32, value: f64) -> AccessResult<()>;
    fn bind_text(&mut self, index: i32, value: &str) -> AccessResult<()>;
    fn bind_date(&mut self, index: i32, value: NaiveDate) -> AccessResult<()>;
    fn bind_datetime(&mut self, index: i32, value: NaiveDateTime) -> AccessResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBinder {
        calls: Vec<(i32, String)>,
    }

    impl ParameterBinder for RecordingBinder {
        fn bind_int(&mut self, index: i32, value: i32) -> AccessResult<()> {
            self.calls.push((index, format!("int:{value}")));
            Ok(())
        }
        fn bind_long(&mut self, index: i32, value: i64) -> AccessResult<()> {
            self.calls.push((index, format!("long:{value}")));
            Ok(())
        }
        fn bind_float(&mut self, index: i32, value: f64) -> AccessResult<()> {
            self.calls.push((index, format!("float:{value}")));
            Ok(())
        }
        fn bind_text(&mut self, index: i32, value: &str) -> AccessResult<()> {
            self.calls.push((index, format!("text:{value}")));
            Ok(())
        }
        fn bind_date(&mut self, index: i32, value: NaiveDate) -> AccessResult<()> {
            self.calls.push((index, format!("date:{value}")));
            Ok(())
        }
        fn bind_datetime(&mut self, index: i32, value: NaiveDateTime) -> AccessResult<()> {
            self.calls.push((index, format!("datetime:{value}")));
            Ok(())
        }
    }

    #[test]
    fn new_parameter_is_unbound() {
        let p = BoundParameter::new(7, Value::Int32(5));
        assert_eq!(p.index(), UNBOUND_INDEX);
        assert_eq!(p.position(), 7);
    }

    #[test]
    fn bind_dispatches_by_value_type() {
        let mut binder = RecordingBinder::default();
        let mut p = BoundParameter::new(0, Value::Text("AA".into()));
        p.set_index(3);
        p.bind(&mut binder).unwrap();
        assert_eq!(binder.calls, vec![(3, "text:AA".to_string())]);
    }
}
