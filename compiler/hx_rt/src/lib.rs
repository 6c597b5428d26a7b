//! hx runtime semantics (`hx_rt`)
//!
//! Generated Haxe code never relies on the target's native arithmetic, dispatch
//! or initialization rules where they differ from the source language. It
//! calls small helpers instead (`N.imul`, `N.lushr`, `Cls.SI()`, `__invoke`).
//! This crate is the executable definition of what those helpers do.
//!
//! # Function Categories
//!
//! - **Numbers** ([`num`]): 32/64-bit wrapping arithmetic, shifts, tri-state
//!   comparisons, narrowing and conversions
//! - **Values** ([`value`]): boxed values, boxing/unboxing, identity equality
//! - **Static init** ([`static_init`]): the flag-first init guard
//! - **Exceptions** ([`exception`]): the per-method caught-value slot
//! - **Dispatch** ([`proxy`], [`functional`], [`annotation`]): reflective
//!   proxies, functional adapters and annotation value proxies
//! - **Native interop** ([`ffi`]): symbol binding with missing-symbol reports

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "the helpers reproduce two's-complement truncation on purpose"
)]

pub mod annotation;
pub mod exception;
pub mod ffi;
pub mod functional;
pub mod num;
pub mod proxy;
pub mod static_init;
pub mod value;

mod error;

pub use error::RtError;
pub use value::Value;
