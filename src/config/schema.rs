//! Host-supplied field catalogue

use crate::error::{ConditionTreeError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Input widget kind for a field's value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Select,
}

/// One selectable operator for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorOption {
    pub value: String,
    pub label: String,
}

impl OperatorOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Filterable fields, their operators and their input types.
///
/// ```json
/// {
///   "fields": ["status", "price"],
///   "operators": { "status": [{ "value": "eq", "label": "is" }] },
///   "types": { "price": "number" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Available fields, in menu order
    #[serde(default)]
    pub fields: Vec<String>,
    /// Valid operators per field
    #[serde(default)]
    pub operators: AHashMap<String, Vec<OperatorOption>>,
    /// Input type per field; unlisted fields are text
    #[serde(default)]
    pub types: AHashMap<String, FieldType>,
}

impl FieldSchema {
    /// Load from JSON text. The top level must be an object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ConditionTreeError::DeserializationError(
                "field schema must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Register a field with its type and operators (builder style)
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        operators: Vec<OperatorOption>,
    ) -> Self {
        let name = name.into();
        if !self.fields.contains(&name) {
            self.fields.push(name.clone());
        }
        self.types.insert(name.clone(), field_type);
        self.operators.insert(name, operators);
        self
    }

    pub fn is_known_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Input type for `field`, text when unlisted
    pub fn field_type(&self, field: &str) -> FieldType {
        self.types.get(field).copied().unwrap_or_default()
    }

    /// Operators valid for `field`, empty when unlisted
    pub fn operators_for(&self, field: &str) -> &[OperatorOption] {
        self.operators.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn allows_operator(&self, field: &str, operator: &str) -> bool {
        self.operators_for(field).iter().any(|op| op.value == operator)
    }
}
