//! Code generation errors.

use hx_diagnostic::{
    unresolved_class, unresolved_field, unresolved_method, Diagnostic, ErrorCode, Location,
};

use crate::Subtarget;

/// A failure while generating one class.
///
/// Unresolvable references are fatal for the enclosing unit. The others are
/// raised inside a single method body and recovered by replacing that body
/// with an errored-method stub.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("unresolved class `{class}`")]
    UnresolvedClass { class: String },

    #[error("unresolved method `{class}.{method}{descriptor}`")]
    UnresolvedMethod {
        class: String,
        method: String,
        descriptor: String,
    },

    #[error("unresolved field `{class}.{field}`")]
    UnresolvedField { class: String, field: String },

    #[error("{form} needs native goto support, which `{subtarget}` does not provide")]
    UnsupportedControlFlow {
        form: &'static str,
        subtarget: Subtarget,
    },

    #[error("malformed method body: {0}")]
    MalformedBody(String),

    #[error("`{interface}` has no functional adapter to bind a method reference to")]
    NoFunctionalAdapter { interface: String },

    #[error("cannot write `{path}`: {message}")]
    Vfs { path: String, message: String },
}

impl CodegenError {
    /// Fatal errors abort the unit; the rest are recovered per method.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CodegenError::UnresolvedClass { .. }
                | CodegenError::UnresolvedMethod { .. }
                | CodegenError::UnresolvedField { .. }
                | CodegenError::Vfs { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::UnresolvedClass { .. } => ErrorCode::E1001,
            CodegenError::UnresolvedMethod { .. } => ErrorCode::E1002,
            CodegenError::UnresolvedField { .. } => ErrorCode::E1003,
            CodegenError::UnsupportedControlFlow { .. } => ErrorCode::E2001,
            CodegenError::MalformedBody(_) => ErrorCode::E2002,
            CodegenError::NoFunctionalAdapter { .. } => ErrorCode::E2003,
            CodegenError::Vfs { .. } => ErrorCode::E3001,
        }
    }

    pub fn to_diagnostic(&self, location: Location) -> Diagnostic {
        match self {
            CodegenError::UnresolvedClass { class } => unresolved_class(location, class),
            CodegenError::UnresolvedMethod {
                class,
                method,
                descriptor,
            } => unresolved_method(location, class, &format!("{method}{descriptor}")),
            CodegenError::UnresolvedField { class, field } => {
                unresolved_field(location, class, field)
            }
            CodegenError::UnsupportedControlFlow { .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_location(location)
                .with_suggestion("lower label/goto bodies before generation, or enable `--goto` on a C++ subtarget"),
            CodegenError::MalformedBody(_)
            | CodegenError::NoFunctionalAdapter { .. }
            | CodegenError::Vfs { .. } => {
                Diagnostic::error(self.code())
                    .with_message(self.to_string())
                    .with_location(location)
            }
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
