//! Legacy flat wire format
//!
//! ```text
//! { id, type: "condition", field, operator, condition, value, logicOperator }
//! { id, type: "group", logicType, conditions: [...] }
//! ```
//!
//! `condition` is a deprecated alias of `operator` kept for older consumers.
//! It is written alongside `operator` only at this boundary.

use crate::tree::LogicOperator;
use serde::{Deserialize, Serialize};

/// Discriminant of a flat item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatKind {
    Condition,
    Group,
    /// Anything else; dropped on conversion
    #[serde(other)]
    Unknown,
}

/// One entry of the flat list. Every attribute is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Missing means `condition`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FlatKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Legacy mirror of `operator`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_operator: Option<LogicOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_type: Option<LogicOperator>,
    /// Children of a group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<FlatItem>>,
}

impl FlatItem {
    /// A fully populated condition entry
    pub fn condition(
        id: impl Into<String>,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
        logic_operator: LogicOperator,
    ) -> Self {
        let operator = operator.into();
        Self {
            id: Some(id.into()),
            kind: Some(FlatKind::Condition),
            field: Some(field.into()),
            condition: Some(operator.clone()),
            operator: Some(operator),
            value: Some(value.into()),
            logic_operator: Some(logic_operator),
            ..Default::default()
        }
    }

    /// A fully populated group entry
    pub fn group(id: impl Into<String>, logic_type: LogicOperator, conditions: Vec<FlatItem>) -> Self {
        Self {
            id: Some(id.into()),
            kind: Some(FlatKind::Group),
            logic_type: Some(logic_type),
            conditions: Some(conditions),
            ..Default::default()
        }
    }

    /// Kind with the `condition` default applied
    pub fn effective_kind(&self) -> FlatKind {
        self.kind.unwrap_or(FlatKind::Condition)
    }

    /// `operator`, falling back to the legacy `condition` when absent or blank
    pub fn effective_operator(&self) -> Option<&str> {
        self.operator
            .as_deref()
            .filter(|op| !op.is_empty())
            .or(self.condition.as_deref())
    }
}
