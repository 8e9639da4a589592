//! Go source generation for client bindings.

mod bindings;
mod file;
mod printer;

pub use bindings::*;
pub use file::*;
pub use printer::*;
