//! Path-addressed copy-on-write tree mutations
//!
//! Every operation takes the current tree by reference and returns a new
//! tree; the caller's tree is never touched. A path that does not resolve
//! is a contract error and is returned as `Err`, never absorbed.

use crate::error::{ConditionTreeError, Result};
use crate::tree::{ConditionGroup, ConditionItem, ConditionLeaf, LogicOperator, Path, Tree};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Textual leaf attribute addressed by `update_leaf_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKey {
    Field,
    Operator,
    Value,
}

impl LeafKey {
    pub fn as_str(self) -> &'static str {
        match self {
            LeafKey::Field => "field",
            LeafKey::Operator => "operator",
            LeafKey::Value => "value",
        }
    }
}

impl fmt::Display for LeafKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafKey {
    type Err = ConditionTreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "field" => Ok(LeafKey::Field),
            // "condition" is the legacy spelling of operator
            "operator" | "condition" => Ok(LeafKey::Operator),
            "value" => Ok(LeafKey::Value),
            _ => Err(ConditionTreeError::UnknownLeafKey(s.to_string())),
        }
    }
}

/// Walk `path` from the root sequence. Returns `None` for an empty path,
/// an out-of-range index, or an attempt to descend into a leaf.
pub fn resolve<'a>(tree: &'a [ConditionItem], path: &[usize]) -> Option<&'a ConditionItem> {
    let (&first, rest) = path.split_first()?;
    let mut node = tree.get(first)?;
    for &index in rest {
        node = match node {
            ConditionItem::Group(group) => group.children.get(index)?,
            ConditionItem::Leaf(_) => return None,
        };
    }
    Some(node)
}

fn resolve_mut<'a>(tree: &'a mut [ConditionItem], path: &[usize]) -> Option<&'a mut ConditionItem> {
    let (&first, rest) = path.split_first()?;
    let mut node = tree.get_mut(first)?;
    for &index in rest {
        node = match node {
            ConditionItem::Group(group) => group.children.get_mut(index)?,
            ConditionItem::Leaf(_) => return None,
        };
    }
    Some(node)
}

/// Child list of the group at `parent`, or the root sequence for the empty path
fn children_mut<'a>(tree: &'a mut Tree, parent: &[usize]) -> Result<&'a mut Vec<ConditionItem>> {
    if parent.is_empty() {
        return Ok(tree);
    }
    match resolve_mut(tree, parent) {
        Some(ConditionItem::Group(group)) => Ok(&mut group.children),
        Some(ConditionItem::Leaf(_)) => Err(ConditionTreeError::NotAGroup(Path::from(parent))),
        None => Err(ConditionTreeError::PathNotFound(Path::from(parent))),
    }
}

fn leaf_mut<'a>(tree: &'a mut Tree, path: &[usize]) -> Result<&'a mut ConditionLeaf> {
    if path.is_empty() {
        return Err(ConditionTreeError::EmptyPath);
    }
    match resolve_mut(tree, path) {
        Some(ConditionItem::Leaf(leaf)) => Ok(leaf),
        Some(ConditionItem::Group(_)) => Err(ConditionTreeError::NotALeaf(Path::from(path))),
        None => Err(ConditionTreeError::PathNotFound(Path::from(path))),
    }
}

fn group_mut<'a>(tree: &'a mut Tree, path: &[usize]) -> Result<&'a mut ConditionGroup> {
    if path.is_empty() {
        return Err(ConditionTreeError::EmptyPath);
    }
    match resolve_mut(tree, path) {
        Some(ConditionItem::Group(group)) => Ok(group),
        Some(ConditionItem::Leaf(_)) => Err(ConditionTreeError::NotAGroup(Path::from(path))),
        None => Err(ConditionTreeError::PathNotFound(Path::from(path))),
    }
}

/// Append a blank leaf to the group at `parent` (empty path: root)
pub fn add_leaf(tree: &[ConditionItem], parent: &[usize]) -> Result<Tree> {
    let mut next = tree.to_vec();
    children_mut(&mut next, parent)?.push(ConditionLeaf::new().into());
    debug!(parent = %Path::from(parent), "added condition");
    Ok(next)
}

/// Append a new group (holding one blank leaf) to the group at `parent`
pub fn add_group(tree: &[ConditionItem], parent: &[usize]) -> Result<Tree> {
    let mut next = tree.to_vec();
    children_mut(&mut next, parent)?.push(ConditionGroup::new().into());
    debug!(parent = %Path::from(parent), "added group");
    Ok(next)
}

/// Remove the node at `path`; later siblings shift down by one.
///
/// Removing the last child of a nested group is structurally allowed here;
/// preventing it is up to the editor.
pub fn remove_item(tree: &[ConditionItem], path: &[usize]) -> Result<Tree> {
    let (&index, parent) = path.split_last().ok_or(ConditionTreeError::EmptyPath)?;
    let mut next = tree.to_vec();
    let children = children_mut(&mut next, parent)?;
    if index >= children.len() {
        return Err(ConditionTreeError::PathNotFound(Path::from(path)));
    }
    children.remove(index);
    debug!(path = %Path::from(path), "removed item");
    Ok(next)
}

/// Set one textual attribute of the leaf at `path`.
///
/// Setting `field` also clears `operator` and `value` in the same update,
/// since they may be invalid for the new field.
pub fn update_leaf_field(
    tree: &[ConditionItem],
    path: &[usize],
    key: LeafKey,
    value: &str,
) -> Result<Tree> {
    let mut next = tree.to_vec();
    let leaf = leaf_mut(&mut next, path)?;
    match key {
        LeafKey::Field => {
            leaf.field = value.to_string();
            leaf.operator.clear();
            leaf.value.clear();
        }
        LeafKey::Operator => leaf.operator = value.to_string(),
        LeafKey::Value => leaf.value = value.to_string(),
    }
    debug!(path = %Path::from(path), key = %key, "updated condition");
    Ok(next)
}

/// Replace the logic type of the group at `path`
pub fn set_group_logic_type(
    tree: &[ConditionItem],
    path: &[usize],
    logic_type: LogicOperator,
) -> Result<Tree> {
    let mut next = tree.to_vec();
    group_mut(&mut next, path)?.logic_type = logic_type;
    debug!(path = %Path::from(path), logic = %logic_type, "set group logic");
    Ok(next)
}

/// Flip AND/OR on the leaf at `path`
pub fn toggle_leaf_logic_operator(tree: &[ConditionItem], path: &[usize]) -> Result<Tree> {
    let mut next = tree.to_vec();
    let leaf = leaf_mut(&mut next, path)?;
    leaf.logic_operator = leaf.logic_operator.toggled();
    debug!(path = %Path::from(path), logic = %leaf.logic_operator, "toggled condition logic");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, field: &str) -> ConditionItem {
        ConditionItem::Leaf(ConditionLeaf {
            id: id.to_string(),
            field: field.to_string(),
            operator: "eq".to_string(),
            value: "x".to_string(),
            logic_operator: LogicOperator::And,
        })
    }

    fn group(id: &str, children: Vec<ConditionItem>) -> ConditionItem {
        ConditionItem::Group(ConditionGroup {
            id: id.to_string(),
            logic_type: LogicOperator::And,
            children,
        })
    }

    fn sample() -> Tree {
        vec![
            leaf("a", "status"),
            group("g", vec![leaf("b", "age"), leaf("c", "city")]),
        ]
    }

    #[test]
    fn test_resolve() {
        let tree = sample();
        assert_eq!(resolve(&tree, &[0]).unwrap().id(), "a");
        assert_eq!(resolve(&tree, &[1]).unwrap().id(), "g");
        assert_eq!(resolve(&tree, &[1, 1]).unwrap().id(), "c");
        assert!(resolve(&tree, &[]).is_none());
        assert!(resolve(&tree, &[2]).is_none());
        assert!(resolve(&tree, &[1, 2]).is_none());
        // cannot descend into a leaf
        assert!(resolve(&tree, &[0, 0]).is_none());
    }

    #[test]
    fn test_add_leaf_to_root_and_group() {
        let tree = sample();
        let next = add_leaf(&tree, &[]).unwrap();
        assert_eq!(next.len(), 3);
        assert!(next[2].as_leaf().is_some());

        let next = add_leaf(&tree, &[1]).unwrap();
        let g = next[1].as_group().unwrap();
        assert_eq!(g.children.len(), 3);
        assert_eq!(g.children[0].id(), "b");
        assert_eq!(g.children[1].id(), "c");

        // input untouched
        assert_eq!(tree, sample());
    }

    #[test]
    fn test_add_into_leaf_fails() {
        let tree = sample();
        assert_eq!(
            add_leaf(&tree, &[0]),
            Err(ConditionTreeError::NotAGroup(Path::from([0])))
        );
        assert_eq!(
            add_group(&tree, &[5]),
            Err(ConditionTreeError::PathNotFound(Path::from([5])))
        );
    }

    #[test]
    fn test_add_group_contains_one_leaf() {
        let next = add_group(&[], &[]).unwrap();
        let g = next[0].as_group().unwrap();
        assert_eq!(g.children.len(), 1);
        assert_eq!(g.logic_type, LogicOperator::And);
    }

    #[test]
    fn test_remove_item() {
        let tree = sample();
        let next = remove_item(&tree, &[1, 0]).unwrap();
        let g = next[1].as_group().unwrap();
        assert_eq!(g.children.len(), 1);
        assert_eq!(g.children[0].id(), "c");

        let next = remove_item(&tree, &[0]).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id(), "g");

        assert_eq!(remove_item(&tree, &[]), Err(ConditionTreeError::EmptyPath));
        assert_eq!(
            remove_item(&tree, &[1, 2]),
            Err(ConditionTreeError::PathNotFound(Path::from([1, 2])))
        );
    }

    #[test]
    fn test_remove_last_child_of_nested_group() {
        let tree = vec![group("g", vec![leaf("b", "age")])];
        let next = remove_item(&tree, &[0, 0]).unwrap();
        assert!(next[0].as_group().unwrap().children.is_empty());
    }

    #[test]
    fn test_update_field_clears_dependents() {
        let tree = sample();
        let next = update_leaf_field(&tree, &[1, 1], LeafKey::Field, "country").unwrap();
        let l = resolve(&next, &[1, 1]).unwrap().as_leaf().unwrap();
        assert_eq!(l.field, "country");
        assert!(l.operator.is_empty());
        assert!(l.value.is_empty());
    }

    #[test]
    fn test_update_operator_and_value() {
        let tree = sample();
        let next = update_leaf_field(&tree, &[0], LeafKey::Operator, "neq").unwrap();
        let next = update_leaf_field(&next, &[0], LeafKey::Value, "closed").unwrap();
        let l = next[0].as_leaf().unwrap();
        assert_eq!(l.field, "status");
        assert_eq!(l.operator, "neq");
        assert_eq!(l.value, "closed");
    }

    #[test]
    fn test_update_group_fails() {
        let tree = sample();
        assert_eq!(
            update_leaf_field(&tree, &[1], LeafKey::Value, "x"),
            Err(ConditionTreeError::NotALeaf(Path::from([1])))
        );
    }

    #[test]
    fn test_group_logic_and_toggle() {
        let tree = sample();
        let next = set_group_logic_type(&tree, &[1], LogicOperator::Or).unwrap();
        assert_eq!(next[1].as_group().unwrap().logic_type, LogicOperator::Or);
        assert!(set_group_logic_type(&tree, &[0], LogicOperator::Or).is_err());

        let next = toggle_leaf_logic_operator(&tree, &[1, 1]).unwrap();
        let l = resolve(&next, &[1, 1]).unwrap().as_leaf().unwrap();
        assert_eq!(l.logic_operator, LogicOperator::Or);
        assert!(toggle_leaf_logic_operator(&tree, &[1]).is_err());
    }

    #[test]
    fn test_leaf_key_parse() {
        assert_eq!("field".parse::<LeafKey>().unwrap(), LeafKey::Field);
        assert_eq!("condition".parse::<LeafKey>().unwrap(), LeafKey::Operator);
        assert!("logic".parse::<LeafKey>().is_err());
    }
}
