//! Conversion between the nested tree and the legacy flat list

use crate::error::{ConditionTreeError, Result};
use crate::flat::format::{FlatItem, FlatKind};
use crate::tree::{fresh_id, ConditionGroup, ConditionItem, ConditionLeaf, LogicOperator, Tree};
use ahash::AHashSet;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

// ============================================================================
// Flat -> nested
// ============================================================================

/// Convert a flat list into a tree, best effort.
///
/// Missing `type` means condition, a blank `operator` falls back to the
/// legacy `condition`, unknown kinds are dropped. Missing or duplicate ids
/// are replaced with fresh ones so the tree-wide uniqueness invariant holds.
pub fn to_nested(items: &[FlatItem]) -> Tree {
    let mut seen = AHashSet::new();
    convert_list(items, &mut seen)
}

fn convert_list(items: &[FlatItem], seen: &mut AHashSet<String>) -> Tree {
    items
        .iter()
        .filter_map(|item| convert_item(item, seen))
        .collect()
}

fn convert_item(item: &FlatItem, seen: &mut AHashSet<String>) -> Option<ConditionItem> {
    match item.effective_kind() {
        FlatKind::Condition => Some(ConditionItem::Leaf(ConditionLeaf {
            id: claim_id(item.id.as_deref(), seen),
            field: item.field.clone().unwrap_or_default(),
            operator: item.effective_operator().unwrap_or_default().to_string(),
            value: item.value.clone().unwrap_or_default(),
            logic_operator: item.logic_operator.unwrap_or_default(),
        })),
        FlatKind::Group => {
            let id = claim_id(item.id.as_deref(), seen);
            let children = item
                .conditions
                .as_deref()
                .map(|children| convert_list(children, seen))
                .unwrap_or_default();
            Some(ConditionItem::Group(ConditionGroup {
                id,
                logic_type: item.logic_type.unwrap_or_default(),
                children,
            }))
        }
        FlatKind::Unknown => {
            warn!(id = ?item.id, "dropping flat item of unknown type");
            None
        }
    }
}

fn claim_id(id: Option<&str>, seen: &mut AHashSet<String>) -> String {
    match id {
        Some(id) if !id.is_empty() && !seen.contains(id) => {
            seen.insert(id.to_string());
            id.to_string()
        }
        other => {
            let fresh = fresh_id();
            if let Some(dup) = other.filter(|id| !id.is_empty()) {
                warn!(duplicate = dup, replacement = %fresh, "regenerated duplicate condition id");
            }
            seen.insert(fresh.clone());
            fresh
        }
    }
}

/// Replace missing or repeated ids in a nested tree, in pre-order.
///
/// The first occurrence of an id keeps it, so trees with unique ids are
/// left untouched.
pub fn dedupe_ids(tree: &mut [ConditionItem]) {
    let mut seen = AHashSet::new();
    dedupe_items(tree, &mut seen);
}

fn dedupe_items(items: &mut [ConditionItem], seen: &mut AHashSet<String>) {
    for item in items {
        match item {
            ConditionItem::Leaf(leaf) => leaf.id = claim_id(Some(leaf.id.as_str()), seen),
            ConditionItem::Group(group) => {
                group.id = claim_id(Some(group.id.as_str()), seen);
                dedupe_items(&mut group.children, seen);
            }
        }
    }
}

// ============================================================================
// Nested -> flat
// ============================================================================

/// Convert a tree into the flat list. Total: every tree converts.
///
/// Leaves write both `operator` and the legacy `condition` mirror.
pub fn to_flat(tree: &[ConditionItem]) -> Vec<FlatItem> {
    tree.iter().map(flatten_item).collect()
}

fn flatten_item(item: &ConditionItem) -> FlatItem {
    match item {
        ConditionItem::Leaf(leaf) => FlatItem::condition(
            leaf.id.clone(),
            leaf.field.clone(),
            leaf.operator.clone(),
            leaf.value.clone(),
            leaf.logic_operator,
        ),
        ConditionItem::Group(group) => {
            FlatItem::group(group.id.clone(), group.logic_type, to_flat(&group.children))
        }
    }
}

// ============================================================================
// JSON boundary
// ============================================================================

/// Raw entry as found on the wire; every field tolerated in any JSON type.
/// Child lists are read from the borrowed entry instead.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlatItem {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    field: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    operator: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    value: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    logic_operator: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    logic_type: Option<String>,
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else reads as absent
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn parse_logic(raw: Option<&str>) -> Option<LogicOperator> {
    let raw = raw?;
    match raw.parse() {
        Ok(logic) => Some(logic),
        Err(_) => {
            warn!(logic = raw, "unrecognised logic operator, defaulting to and");
            None
        }
    }
}

fn parse_kind(raw: Option<&str>) -> FlatKind {
    match raw.map(|k| k.trim().to_ascii_lowercase()) {
        None => FlatKind::Condition,
        Some(k) if k.is_empty() || k == "condition" => FlatKind::Condition,
        Some(k) if k == "group" => FlatKind::Group,
        Some(_) => FlatKind::Unknown,
    }
}

fn parse_entry(value: &Value) -> Option<FlatItem> {
    if !value.is_object() {
        warn!(found = %json_type(value), "dropping flat item that is not an object");
        return None;
    }
    let raw = match RawFlatItem::deserialize(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(error = %err, "dropping malformed flat item");
            return None;
        }
    };

    let kind = parse_kind(raw.kind.as_deref());
    if kind == FlatKind::Unknown {
        warn!(kind = ?raw.kind, "dropping flat item of unknown type");
        return None;
    }

    let conditions = match kind {
        FlatKind::Group => Some(
            child_list(value, "conditions")
                .or_else(|| child_list(value, "children"))
                .map(parse_entries)
                .unwrap_or_default(),
        ),
        _ => None,
    };

    Some(FlatItem {
        id: raw.id,
        kind: Some(kind),
        field: raw.field,
        operator: raw.operator,
        condition: raw.condition,
        value: raw.value,
        logic_operator: parse_logic(raw.logic_operator.as_deref()),
        logic_type: parse_logic(raw.logic_type.as_deref()),
        conditions,
    })
}

fn child_list<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|children| !children.is_null())
}

fn parse_entries(value: &Value) -> Vec<FlatItem> {
    match value {
        Value::Array(entries) => entries.iter().filter_map(parse_entry).collect(),
        other => {
            warn!(found = %json_type(other), "expected a list of flat items");
            Vec::new()
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a flat list from raw JSON, dropping malformed entries at any depth.
///
/// Only a top level that is not an array is an error.
pub fn parse_flat_value(value: &Value) -> Result<Vec<FlatItem>> {
    match value {
        Value::Array(entries) => Ok(entries.iter().filter_map(parse_entry).collect()),
        other => Err(ConditionTreeError::DeserializationError(format!(
            "expected a list of conditions, found {}",
            json_type(other)
        ))),
    }
}

/// Parse flat JSON text straight into a tree
pub fn from_flat_json(json: &str) -> Result<Tree> {
    let value: Value = serde_json::from_str(json)?;
    Ok(to_nested(&parse_flat_value(&value)?))
}

/// Serialize a tree into the flat wire shape
pub fn to_flat_value(tree: &[ConditionItem]) -> Value {
    // FlatItem only holds strings, enums and lists, so this cannot fail
    serde_json::to_value(to_flat(tree)).unwrap_or(Value::Array(Vec::new()))
}

/// Serialize a tree into flat JSON text
pub fn to_flat_json(tree: &[ConditionItem]) -> Result<String> {
    Ok(serde_json::to_string(&to_flat(tree))?)
}
