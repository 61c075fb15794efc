//! Editor orchestration
//!
//! Wires the mutation engine and the flat adapter to a host that owns the
//! conditions, and describes what the host should render.

mod session;
mod summary;
mod validation;
mod view;

pub use session::*;
pub use summary::describe;
pub use validation::{validate, LeafIssue};
pub use view::*;
