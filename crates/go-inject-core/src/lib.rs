#![doc = include_str!("../README.md")]

pub mod common;
pub mod config;
pub mod descriptor;
pub mod emit;
pub mod naming;
pub mod plugin;
pub mod resolve;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use common::*;
