//! Legacy flat-format adapter
//!
//! Bidirectional conversion between the nested tree and the flat list used
//! by the rest of the application and by network payloads.

mod adapter;
mod format;


pub use adapter::*;
pub use format::*;
