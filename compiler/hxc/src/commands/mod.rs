//! Command handlers for the `hxc` CLI.

mod explain;
mod gen;

pub use explain::explain_error;
pub use gen::{gen_file, generate_to_dir, parse_gen_options, GenArgs, GenFailure, GenReport};
