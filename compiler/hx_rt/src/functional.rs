//! Single-method functional adapters.
//!
//! A `<Iface>_Lambda` wraps one native callable; the interface's abstract
//! method forwards its positional arguments to it.

use crate::{RtError, Value};

type Callable = Box<dyn Fn(&[Value]) -> Result<Value, RtError>>;

pub struct FunctionalAdapter {
    callable: Callable,
}

impl FunctionalAdapter {
    pub fn new(callable: impl Fn(&[Value]) -> Result<Value, RtError> + 'static) -> Self {
        FunctionalAdapter {
            callable: Box::new(callable),
        }
    }

    /// The abstract method's body.
    pub fn call(&self, args: &[Value]) -> Result<Value, RtError> {
        (self.callable)(args)
    }
}
