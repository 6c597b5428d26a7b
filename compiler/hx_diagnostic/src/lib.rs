//! Diagnostic system for the Haxe backend.
//!
//! - Error codes for searchability (`hxc explain E1002`)
//! - Clear messages (what went wrong)
//! - A location (which class / member was being generated)
//! - Notes and suggestions
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was emitted, so a failed generation run can never be reported as a
//! silent success.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod guarantee;
pub mod queue;

pub use diagnostic::{
    errored_method, unresolved_class, unresolved_field, unresolved_method, Diagnostic, Location,
    Severity,
};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use guarantee::ErrorGuaranteed;
pub use queue::DiagnosticQueue;
