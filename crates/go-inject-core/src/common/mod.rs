//! Shared error and result types used across the generator.
//!
//! ## Submodules
//!
//! - [`error`] - Centralized error type for request decoding and plugin
//!   parameters.
//! - [`result`] - Crate-wide `Result` alias over [`Error`].
//!
//! Resolution failures are deliberately *not* represented here. They are
//! ordinary values ([`crate::resolve::Unresolved`]) so a single broken service
//! never aborts the run.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
