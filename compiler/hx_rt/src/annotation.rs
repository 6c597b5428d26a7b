//! Annotation value proxies.
//!
//! An annotation instance is a positional value array, one slot per element
//! method in declaration order. Accessor `k` returns slot `k`.

use crate::{RtError, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationProxy {
    type_name: String,
    data: Vec<Value>,
}

impl AnnotationProxy {
    pub fn new(type_name: impl Into<String>, data: Vec<Value>) -> Self {
        AnnotationProxy {
            type_name: type_name.into(),
            data,
        }
    }

    /// Accessor for element slot `slot`.
    pub fn get(&self, slot: usize) -> Result<&Value, RtError> {
        self.data.get(slot).ok_or(RtError::NoSuchMethod(
            i32::try_from(slot).unwrap_or(i32::MAX),
        ))
    }

    /// `annotationType()`.
    pub fn annotation_type(&self) -> &str {
        &self.type_name
    }
}
