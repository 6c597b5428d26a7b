//! Command-line driver for the Haxe backend.
//!
//! Reads a program model, generates Haxe units and writes them to disk.
//! The binary in `main.rs` is a thin argument dispatcher over [`commands`].

pub mod commands;
pub mod input;
pub mod tracing_setup;
pub mod vfs;

pub use input::{load_program, parse_program, InputError};
pub use vfs::LocalVfs;
