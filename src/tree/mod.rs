//! Condition tree model
//!
//! Ordered, arbitrarily nested leaves and AND/OR groups, addressed by
//! positional paths.

mod id;
mod model;
mod path;
pub mod query;

pub use id::fresh_id;
pub use model::*;
pub use path::Path;
pub use query::{collect_ids, depth, find_path, leaf_count, paths};
