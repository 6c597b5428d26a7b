//! hx codegen - Haxe backend for the hx program model.
//!
//! Turns a read-only [`Program`](hx_ir::Program) into one Haxe unit per
//! class, plus a source map per unit.
//!
//! # Architecture
//!
//! ```text
//! Program ──► Names::build (global, read-only)
//!                 │
//!                 ▼
//!   generate_class (per class, independent)
//!     ├─ method      signature, native bodies, error recovery
//!     │   └─ body    statements / expressions, static-init touches
//!     ├─ synth       proxy, functional adapter, annotation value proxy
//!     ├─ ffi         native library binding
//!     └─ reflection  `__classInfo__`, annotation literals
//!                 │
//!                 ▼
//!   UnitEmitter ──► Vfs
//! ```
//!
//! All mutable generation state (literal table, reference table,
//! diagnostics) lives in a per-class `UnitState`, so classes can be
//! generated in parallel.
//!
//! # Re-exports
//!
//! - `generate_program`, `generate_class`, `UnitEmitter`
//! - `Names`, `GenOptions`, `Subtarget`
//! - `CodegenError`, `CodegenResult`

mod body;
mod class_gen;
mod context;
mod error;
pub mod ffi;
mod literals;
mod method;
mod names;
mod options;
mod reflection;
pub mod runtime_api;
pub mod source_map;
mod static_init;
pub mod synth;
mod unit;
pub mod vfs;

#[cfg(test)]
mod test_support;

pub use body::LiteralAccess;
pub use class_gen::{generate_class, ClassOutput, Unit};
pub use context::{CodeWriter, GenEnv, LineMapping, UnitState};
pub use error::{CodegenError, CodegenResult};
pub use literals::{ident_for, LiteralTable};
pub use names::{Companion, Names};
pub use options::{GenOptions, Subtarget, UnknownSubtarget};
pub use static_init::{guard_call, ReferenceTable, StaticInit};
pub use unit::{generate_program, ProgramOutput, UnitEmitter};
pub use vfs::{MemoryVfs, Vfs};
