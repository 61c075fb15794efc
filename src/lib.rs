//! Condition Tree Core - nested AND/OR condition editing engine
//!
//! This crate models an arbitrarily nested tree of filter conditions and
//! AND/OR groups, edits it through path-addressed copy-on-write operations,
//! and converts it to and from the legacy flat list format used on the wire.
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod editor;
pub mod error;
pub mod flat;
pub mod mutation;
pub mod tree;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod strategies;

pub use crate::error::{ConditionTreeError, Result};
