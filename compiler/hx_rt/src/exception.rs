//! The method-scoped "last caught value" slot.
//!
//! Generated `try/catch` binds the caught `Dynamic` into the slot on entry to
//! the catch clause; a rethrow throws whatever the slot holds.

use crate::{RtError, Value};

#[derive(Debug, Default)]
pub struct ExceptionSlot {
    last: Option<Value>,
}

impl ExceptionSlot {
    pub fn new() -> Self {
        ExceptionSlot::default()
    }

    /// Enter a catch clause with `caught`.
    pub fn catch_value(&mut self, caught: Value) {
        self.last = Some(caught);
    }

    /// The value caught most recently, if any.
    pub fn current(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    /// Re-throw the slot's current value unchanged.
    pub fn rethrow(&self) -> RtError {
        RtError::Thrown(self.last.clone().unwrap_or(Value::Null))
    }
}

/// Run `body`; on a thrown value, bind it into `slot` and run `handler`.
///
/// Faults raised by the support library itself are thrown as their message
/// string, the way they appear to generated code.
pub fn try_catch<T>(
    slot: &mut ExceptionSlot,
    body: impl FnOnce() -> Result<T, RtError>,
    handler: impl FnOnce(&mut ExceptionSlot) -> Result<T, RtError>,
) -> Result<T, RtError> {
    match body() {
        Ok(v) => Ok(v),
        Err(RtError::Thrown(value)) => {
            slot.catch_value(value);
            handler(slot)
        }
        Err(other) => {
            slot.catch_value(Value::str(&other.to_string()));
            handler(slot)
        }
    }
}
