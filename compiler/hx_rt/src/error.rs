use std::fmt;

use crate::Value;

/// A runtime fault raised by a helper.
///
/// `Thrown` carries a program-level exception value; the other variants model
/// the faults the support library raises itself.
#[derive(Clone, Debug, PartialEq)]
pub enum RtError {
    /// Integer division or remainder by zero.
    DivisionByZero,
    /// An unboxing or cast found a value of the wrong kind.
    ClassCast {
        expected: &'static str,
        found: &'static str,
    },
    NullPointer,
    /// Reflective lookup of a method id the class descriptor does not have.
    NoSuchMethod(i32),
    /// A call reached a method whose body could not be generated.
    ErroredMethod(String),
    Thrown(Value),
}

impl fmt::Display for RtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtError::DivisionByZero => write!(f, "java.lang.ArithmeticException: / by zero"),
            RtError::ClassCast { expected, found } => {
                write!(f, "java.lang.ClassCastException: {found} cannot be cast to {expected}")
            }
            RtError::NullPointer => write!(f, "java.lang.NullPointerException"),
            RtError::NoSuchMethod(id) => write!(f, "no method with id {id}"),
            RtError::ErroredMethod(msg) => write!(f, "errored method: {msg}"),
            RtError::Thrown(value) => write!(f, "uncaught exception: {value:?}"),
        }
    }
}

impl std::error::Error for RtError {}
