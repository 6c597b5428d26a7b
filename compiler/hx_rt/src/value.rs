//! Boxed values, as they travel through `ObjectArray`s and `Dynamic` slots.

use std::sync::Arc;

use crate::RtError;

/// Opaque object identity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ObjRef(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Arc<str>),
    Object(ObjRef),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }

    /// Name of the boxed kind, as it appears in cast errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "java.lang.Boolean",
            Value::Byte(_) => "java.lang.Byte",
            Value::Short(_) => "java.lang.Short",
            Value::Char(_) => "java.lang.Character",
            Value::Int(_) => "java.lang.Integer",
            Value::Long(_) => "java.lang.Long",
            Value::Float(_) => "java.lang.Float",
            Value::Double(_) => "java.lang.Double",
            Value::Str(_) => "java.lang.String",
            Value::Object(_) => "java.lang.Object",
        }
    }

    fn cast_error(&self, expected: &'static str) -> RtError {
        if matches!(self, Value::Null) {
            RtError::NullPointer
        } else {
            RtError::ClassCast {
                expected,
                found: self.kind_name(),
            }
        }
    }

    pub fn unbox_bool(&self) -> Result<bool, RtError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.cast_error("java.lang.Boolean")),
        }
    }

    /// Unbox any int-like value to `int`.
    pub fn unbox_int(&self) -> Result<i32, RtError> {
        match self {
            Value::Byte(v) => Ok(i32::from(*v)),
            Value::Short(v) => Ok(i32::from(*v)),
            Value::Char(v) => Ok(i32::from(*v)),
            Value::Int(v) => Ok(*v),
            other => Err(other.cast_error("java.lang.Integer")),
        }
    }

    pub fn unbox_long(&self) -> Result<i64, RtError> {
        match self {
            Value::Long(v) => Ok(*v),
            other => Err(other.cast_error("java.lang.Long")),
        }
    }

    pub fn unbox_double(&self) -> Result<f64, RtError> {
        match self {
            Value::Float(v) => Ok(f64::from(*v)),
            Value::Double(v) => Ok(*v),
            other => Err(other.cast_error("java.lang.Double")),
        }
    }

    pub fn unbox_str(&self) -> Result<Arc<str>, RtError> {
        match self {
            Value::Str(s) => Ok(Arc::clone(s)),
            other => Err(other.cast_error("java.lang.String")),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// `N.eq`: reference identity for objects and strings, value equality for
/// primitives.
pub fn eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Arc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => x == y,
        (Value::Null, Value::Null) => true,
        (x, y) => x == y,
    }
}

/// `N.ne`.
pub fn ne(a: &Value, b: &Value) -> bool {
    !eq(a, b)
}
