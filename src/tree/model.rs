//! Nested condition tree data model

use crate::error::ConditionTreeError;
use crate::tree::id::fresh_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logic connective used by leaves (pairwise) and groups (uniform)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicOperator {
    /// Both sides must match
    #[default]
    #[serde(alias = "AND", alias = "And")]
    And,
    /// Either side may match
    #[serde(alias = "OR", alias = "Or")]
    Or,
}

impl LogicOperator {
    /// The other connective
    pub fn toggled(self) -> Self {
        match self {
            LogicOperator::And => LogicOperator::Or,
            LogicOperator::Or => LogicOperator::And,
        }
    }

    /// Wire spelling ("and" / "or")
    pub fn as_str(self) -> &'static str {
        match self {
            LogicOperator::And => "and",
            LogicOperator::Or => "or",
        }
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicOperator {
    type Err = ConditionTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "all" => Ok(LogicOperator::And),
            "or" | "any" => Ok(LogicOperator::Or),
            _ => Err(ConditionTreeError::InvalidLogic(s.to_string())),
        }
    }
}

/// One atomic field-operator-value predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLeaf {
    pub id: String,
    /// Attribute being filtered; empty while being authored
    #[serde(default)]
    pub field: String,
    /// Comparison operator valid for `field`; empty until a field is chosen
    #[serde(default)]
    pub operator: String,
    /// Operand, always textual; empty until an operator is chosen
    #[serde(default)]
    pub value: String,
    /// How this leaf combines with its immediately preceding sibling.
    /// Ignored for the first child of a group.
    #[serde(default)]
    pub logic_operator: LogicOperator,
}

impl ConditionLeaf {
    /// A blank leaf with a fresh id
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            field: String::new(),
            operator: String::new(),
            value: String::new(),
            logic_operator: LogicOperator::And,
        }
    }

    /// Whether field, operator and value are all filled in
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.operator.is_empty() && !self.value.is_empty()
    }
}

impl Default for ConditionLeaf {
    fn default() -> Self {
        Self::new()
    }
}

/// A parenthesized sub-expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    pub id: String,
    /// Connective joining all direct children
    #[serde(default)]
    pub logic_type: LogicOperator,
    /// Ordered children; order is display and evaluation order
    #[serde(default)]
    pub children: Vec<ConditionItem>,
}

impl ConditionGroup {
    /// A new AND group holding exactly one blank leaf. Groups are never
    /// created empty.
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            logic_type: LogicOperator::And,
            children: vec![ConditionItem::Leaf(ConditionLeaf::new())],
        }
    }
}

impl Default for ConditionGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of the tree: either a leaf or a nested group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConditionItem {
    Leaf(ConditionLeaf),
    Group(ConditionGroup),
}

impl ConditionItem {
    /// Identifier of the node regardless of kind
    pub fn id(&self) -> &str {
        match self {
            ConditionItem::Leaf(leaf) => &leaf.id,
            ConditionItem::Group(group) => &group.id,
        }
    }

    pub fn as_leaf(&self) -> Option<&ConditionLeaf> {
        match self {
            ConditionItem::Leaf(leaf) => Some(leaf),
            ConditionItem::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&ConditionGroup> {
        match self {
            ConditionItem::Group(group) => Some(group),
            ConditionItem::Leaf(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ConditionItem::Group(_))
    }
}

impl From<ConditionLeaf> for ConditionItem {
    fn from(leaf: ConditionLeaf) -> Self {
        ConditionItem::Leaf(leaf)
    }
}

impl From<ConditionGroup> for ConditionItem {
    fn from(group: ConditionGroup) -> Self {
        ConditionItem::Group(group)
    }
}

/// The root sequence. Its own logic type ("match all" / "match any") is
/// owned by the host, not stored here.
pub type Tree = Vec<ConditionItem>;
