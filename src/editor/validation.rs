//! Advisory leaf checks against the field schema
//!
//! These never block a mutation; the host decides how to surface them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::{FieldSchema, FieldType};
use crate::tree::{query::walk, ConditionItem, ConditionLeaf, Path};

/// ISO calendar date, as produced by date pickers
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date pattern")
});

/// Problem with a single leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
pub enum LeafIssue {
    FieldRequired,
    UnknownField { field: String },
    OperatorRequired,
    OperatorNotAllowed { field: String, operator: String },
    ValueRequired,
    InvalidNumber { value: String },
    InvalidDate { value: String },
}

impl FieldSchema {
    /// Check one leaf, stopping at the first missing step
    /// (field, then operator, then value)
    pub fn check_leaf(&self, leaf: &ConditionLeaf) -> Vec<LeafIssue> {
        let mut issues = Vec::new();

        if leaf.field.is_empty() {
            issues.push(LeafIssue::FieldRequired);
            return issues;
        }
        if !self.is_known_field(&leaf.field) {
            issues.push(LeafIssue::UnknownField {
                field: leaf.field.clone(),
            });
        }

        if leaf.operator.is_empty() {
            issues.push(LeafIssue::OperatorRequired);
            return issues;
        }
        if !self.operators_for(&leaf.field).is_empty()
            && !self.allows_operator(&leaf.field, &leaf.operator)
        {
            issues.push(LeafIssue::OperatorNotAllowed {
                field: leaf.field.clone(),
                operator: leaf.operator.clone(),
            });
        }

        let value = leaf.value.trim();
        if value.is_empty() {
            issues.push(LeafIssue::ValueRequired);
            return issues;
        }
        match self.field_type(&leaf.field) {
            FieldType::Number if value.parse::<f64>().is_err() => {
                issues.push(LeafIssue::InvalidNumber {
                    value: leaf.value.clone(),
                });
            }
            FieldType::Date if !DATE_PATTERN.is_match(value) => {
                issues.push(LeafIssue::InvalidDate {
                    value: leaf.value.clone(),
                });
            }
            _ => {}
        }

        issues
    }
}

/// Every issue in the tree, paired with the leaf's path, in display order
pub fn validate(tree: &[ConditionItem], schema: &FieldSchema) -> Vec<(Path, LeafIssue)> {
    let mut out = Vec::new();
    walk(tree, &Path::root(), &mut |path: &Path, item: &ConditionItem| {
        if let ConditionItem::Leaf(leaf) = item {
            out.extend(
                schema
                    .check_leaf(leaf)
                    .into_iter()
                    .map(|issue| (path.clone(), issue)),
            );
        }
    });
    out
}
