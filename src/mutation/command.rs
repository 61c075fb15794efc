//! One editor interaction expressed as data

use crate::error::Result;
use crate::mutation::engine::{self, LeafKey};
use crate::tree::{ConditionItem, LogicOperator, Path, Tree};

/// A single requested change, applied with exactly one engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddLeaf { parent: Path },
    AddGroup { parent: Path },
    Remove { path: Path },
    UpdateLeaf { path: Path, key: LeafKey, value: String },
    SetGroupLogic { path: Path, logic_type: LogicOperator },
    ToggleLeafLogic { path: Path },
}

impl Mutation {
    /// Apply to `tree`, producing the next revision
    pub fn apply(&self, tree: &[ConditionItem]) -> Result<Tree> {
        match self {
            Mutation::AddLeaf { parent } => engine::add_leaf(tree, parent),
            Mutation::AddGroup { parent } => engine::add_group(tree, parent),
            Mutation::Remove { path } => engine::remove_item(tree, path),
            Mutation::UpdateLeaf { path, key, value } => {
                engine::update_leaf_field(tree, path, *key, value)
            }
            Mutation::SetGroupLogic { path, logic_type } => {
                engine::set_group_logic_type(tree, path, *logic_type)
            }
            Mutation::ToggleLeafLogic { path } => engine::toggle_leaf_logic_operator(tree, path),
        }
    }

    /// Short operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddLeaf { .. } => "add_leaf",
            Mutation::AddGroup { .. } => "add_group",
            Mutation::Remove { .. } => "remove",
            Mutation::UpdateLeaf { .. } => "update_leaf",
            Mutation::SetGroupLogic { .. } => "set_group_logic",
            Mutation::ToggleLeafLogic { .. } => "toggle_leaf_logic",
        }
    }
}
