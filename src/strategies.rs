//! Shared proptest strategy generators

use proptest::prelude::*;

use crate::mutation::resolve;
use crate::tree::{paths, ConditionGroup, ConditionItem, ConditionLeaf, LogicOperator, Path, Tree};

/// Generate filterable field names (including the blank "not chosen yet")
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("status".to_string()),
        Just("price".to_string()),
        Just("created_at".to_string()),
        Just("category".to_string()),
        Just("sku".to_string()),
    ]
}

/// Generate operator names
pub fn operator_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("eq".to_string()),
        Just("neq".to_string()),
        Just("gt".to_string()),
        Just("lt".to_string()),
        Just("contains".to_string()),
    ]
}

/// Generate operand text
pub fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 ]{0,8}"
}

pub fn logic_strategy() -> impl Strategy<Value = LogicOperator> {
    prop_oneof![Just(LogicOperator::And), Just(LogicOperator::Or)]
}

fn leaf_strategy() -> impl Strategy<Value = ConditionItem> {
    (
        field_strategy(),
        operator_strategy(),
        value_strategy(),
        logic_strategy(),
    )
        .prop_map(|(field, operator, value, logic_operator)| {
            ConditionItem::Leaf(ConditionLeaf {
                id: String::new(),
                field,
                operator,
                value,
                logic_operator,
            })
        })
}

/// Generate a single node up to three group levels deep, ids unassigned
fn item_strategy() -> impl Strategy<Value = ConditionItem> {
    leaf_strategy().prop_recursive(3, 32, 4, |inner| {
        (logic_strategy(), prop::collection::vec(inner, 1..4)).prop_map(|(logic_type, children)| {
            ConditionItem::Group(ConditionGroup {
                id: String::new(),
                logic_type,
                children,
            })
        })
    })
}

/// Generate a well-formed tree with unique ids
pub fn tree_strategy() -> impl Strategy<Value = Tree> {
    prop::collection::vec(item_strategy(), 0..5).prop_map(|mut tree| {
        let mut next = 0;
        assign_ids(&mut tree, &mut next);
        tree
    })
}

fn assign_ids(items: &mut [ConditionItem], next: &mut usize) {
    for item in items {
        match item {
            ConditionItem::Leaf(leaf) => {
                leaf.id = format!("n{}", next);
                *next += 1;
            }
            ConditionItem::Group(group) => {
                group.id = format!("n{}", next);
                *next += 1;
                assign_ids(&mut group.children, next);
            }
        }
    }
}

/// Paths of every leaf
pub fn leaf_paths(tree: &[ConditionItem]) -> Vec<Path> {
    paths(tree)
        .into_iter()
        .filter(|p| matches!(resolve(tree, p), Some(ConditionItem::Leaf(_))))
        .collect()
}

/// Paths of every group, plus the root path
pub fn parent_paths(tree: &[ConditionItem]) -> Vec<Path> {
    let mut out = vec![Path::root()];
    out.extend(
        paths(tree)
            .into_iter()
            .filter(|p| matches!(resolve(tree, p), Some(ConditionItem::Group(_)))),
    );
    out
}

/// Child list at a parent path (root for the empty path)
pub fn children_at<'a>(tree: &'a [ConditionItem], parent: &[usize]) -> &'a [ConditionItem] {
    if parent.is_empty() {
        return tree;
    }
    match resolve(tree, parent) {
        Some(ConditionItem::Group(group)) => &group.children,
        _ => panic!("no group at {:?}", parent),
    }
}
