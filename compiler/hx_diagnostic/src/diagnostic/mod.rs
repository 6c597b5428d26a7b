//! Core diagnostic types for structured error reporting.
//!
//! Generated code has no source spans of its own; a diagnostic instead points
//! at the class (and optionally the member) being generated when it was
//! raised.

use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// Where in the program model a diagnostic was raised.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Location {
    /// Fully-qualified class name.
    pub class: String,
    /// Member name and descriptor, e.g. `run(I)V`.
    pub member: Option<String>,
}

impl Location {
    pub fn class(class: impl Into<String>) -> Self {
        Location {
            class: class.into(),
            member: None,
        }
    }

    pub fn member(class: impl Into<String>, member: impl Into<String>) -> Self {
        Location {
            class: class.into(),
            member: Some(member.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}::{member}", self.class),
            None => write!(f, "{}", self.class),
        }
    }
}

/// A diagnostic with everything needed to render it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    pub location: Option<Location>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Human-readable suggestions.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            location: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (in {location})")?;
        }
        Ok(())
    }
}

/// An unresolvable class reference.
#[cold]
pub fn unresolved_class(location: Location, class: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unresolved class `{class}`"))
        .with_location(location)
        .with_note("the program model is incomplete; generation cannot continue for this class")
}

/// An unresolvable method reference.
#[cold]
pub fn unresolved_method(location: Location, class: &str, method: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("unresolved method `{class}.{method}`"))
        .with_location(location)
}

/// An unresolvable field reference.
#[cold]
pub fn unresolved_field(location: Location, class: &str, field: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!("unresolved field `{class}.{field}`"))
        .with_location(location)
}

/// A method whose body was replaced by an errored-method stub.
#[cold]
pub fn errored_method(location: Location, cause: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W1001)
        .with_message("method body could not be generated; it will fail when called")
        .with_location(location)
        .with_note(cause.to_string())
}
