//! Wire-level view of the compilation request.
//!
//! `prost-types` decodes `ServiceOptions` into a struct that only knows the
//! built-in fields, and custom extensions are dropped on the floor. The
//! messages here mirror just the parts of `descriptor.proto` the generator
//! reads, and keep each service's options as raw bytes so they can be scanned
//! against the extensions declared anywhere in the request.
//!
//! - [`request`] - Partial `CodeGeneratorRequest` / `FileDescriptorProto`
//!   messages.
//! - [`registry`] - Index of every field that can appear on `ServiceOptions`.
//! - [`options`] - Sequential scan of raw option bytes into
//!   [`AnnotationEntry`](crate::schema::AnnotationEntry) records.

mod options;
mod registry;
mod request;

pub use options::*;
pub use registry::*;
pub use request::*;
