//! Shared pipeline-test utilities.

mod interp;
mod model;

pub use interp::*;
pub use model::*;
