//! Render description of the editor
//!
//! A recursive, serializable snapshot of every control the host draws:
//! one bordered container per group with its AND/OR toggle, one
//! field/operator/value row per leaf with its logic badge.

use serde::Serialize;

use crate::config::{EditorConfig, FieldSchema, FieldType, OperatorOption};
use crate::tree::{ConditionGroup, ConditionItem, ConditionLeaf, LogicOperator, Path};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    /// "Add Group" offered at the root
    pub can_add_group: bool,
    pub nodes: Vec<NodeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub path: Path,
    pub id: String,
    /// Remove control enabled
    pub can_remove: bool,
    #[serde(flatten)]
    pub kind: NodeViewKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeViewKind {
    Leaf(LeafView),
    Group(GroupView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafView {
    pub field: String,
    pub operator: String,
    pub value: String,
    /// Badge joining this row to the previous sibling; `None` for the
    /// first child, where no badge is shown
    pub logic_badge: Option<LogicOperator>,
    pub input_type: FieldType,
    pub operator_options: Vec<OperatorOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub logic_type: LogicOperator,
    /// "Add Group" offered inside this group
    pub can_add_group: bool,
    pub children: Vec<NodeView>,
}

/// Build the view for `tree`
pub fn build_view(tree: &[ConditionItem], schema: &FieldSchema, config: &EditorConfig) -> EditorView {
    EditorView {
        can_add_group: config.max_depth > 0,
        nodes: view_children(tree, &Path::root(), schema, config),
    }
}

fn view_children(
    children: &[ConditionItem],
    parent: &Path,
    schema: &FieldSchema,
    config: &EditorConfig,
) -> Vec<NodeView> {
    // root-level items are always removable; nested ones only with a sibling
    let removable = parent.is_root() || children.len() > 1;

    children
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let path = parent.child(index);
            let kind = match item {
                ConditionItem::Leaf(leaf) => NodeViewKind::Leaf(view_leaf(leaf, index, schema)),
                ConditionItem::Group(group) => {
                    NodeViewKind::Group(view_group(group, &path, schema, config))
                }
            };
            NodeView {
                id: item.id().to_string(),
                path,
                can_remove: removable,
                kind,
            }
        })
        .collect()
}

fn view_leaf(leaf: &ConditionLeaf, index: usize, schema: &FieldSchema) -> LeafView {
    LeafView {
        field: leaf.field.clone(),
        operator: leaf.operator.clone(),
        value: leaf.value.clone(),
        logic_badge: (index > 0).then_some(leaf.logic_operator),
        input_type: schema.field_type(&leaf.field),
        operator_options: schema.operators_for(&leaf.field).to_vec(),
    }
}

fn view_group(
    group: &ConditionGroup,
    path: &Path,
    schema: &FieldSchema,
    config: &EditorConfig,
) -> GroupView {
    GroupView {
        logic_type: group.logic_type,
        can_add_group: path.len() < config.max_depth,
        children: view_children(&group.children, path, schema, config),
    }
}
