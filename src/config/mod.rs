//! Configuration module
//!
//! The host-supplied field catalogue (available fields, operators per field,
//! input type per field) and the editor settings.

mod editor;
mod schema;

pub use editor::*;
pub use schema::*;
