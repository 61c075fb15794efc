//! Path-based mutation engine
//!
//! Locates a node by a path of child indices and applies one copy-on-write
//! update, returning a new tree.

mod command;
pub mod engine;


pub use command::Mutation;
pub use engine::*;
