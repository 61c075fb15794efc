//! Read-only queries over a condition tree

use crate::tree::model::ConditionItem;
use crate::tree::path::Path;

/// Maximum nesting depth: the longest path to any node.
///
/// An empty tree has depth 0, a flat list of leaves depth 1, and each
/// level of group nesting adds one.
pub fn depth(tree: &[ConditionItem]) -> usize {
    tree.iter()
        .map(|item| match item {
            ConditionItem::Leaf(_) => 1,
            ConditionItem::Group(group) => 1 + depth(&group.children),
        })
        .max()
        .unwrap_or(0)
}

/// Number of leaves anywhere in the tree
pub fn leaf_count(tree: &[ConditionItem]) -> usize {
    tree.iter()
        .map(|item| match item {
            ConditionItem::Leaf(_) => 1,
            ConditionItem::Group(group) => leaf_count(&group.children),
        })
        .sum()
}

/// Every node id, in pre-order
pub fn collect_ids(tree: &[ConditionItem]) -> Vec<String> {
    let mut ids = Vec::new();
    walk(tree, &Path::root(), &mut |_: &Path, item: &ConditionItem| {
        ids.push(item.id().to_string())
    });
    ids
}

/// Every node path, in pre-order (display order)
pub fn paths(tree: &[ConditionItem]) -> Vec<Path> {
    let mut out = Vec::new();
    walk(tree, &Path::root(), &mut |path: &Path, _: &ConditionItem| {
        out.push(path.clone())
    });
    out
}

/// Current path of the node with the given id
pub fn find_path(tree: &[ConditionItem], id: &str) -> Option<Path> {
    for (index, item) in tree.iter().enumerate() {
        if item.id() == id {
            return Some(Path::from([index]));
        }
        if let ConditionItem::Group(group) = item {
            if let Some(rest) = find_path(&group.children, id) {
                let mut indices = Vec::with_capacity(rest.len() + 1);
                indices.push(index);
                indices.extend_from_slice(&rest);
                return Some(Path::from(indices));
            }
        }
    }
    None
}

/// Pre-order traversal handing each node its path
pub fn walk<F>(tree: &[ConditionItem], base: &Path, visit: &mut F)
where
    F: FnMut(&Path, &ConditionItem),
{
    for (index, item) in tree.iter().enumerate() {
        let path = base.child(index);
        visit(&path, item);
        if let ConditionItem::Group(group) = item {
            walk(&group.children, &path, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::model::{ConditionGroup, ConditionLeaf};

    fn sample() -> Vec<ConditionItem> {
        let mut inner = ConditionGroup::new();
        inner.children.push(ConditionLeaf::new().into());
        let mut outer = ConditionGroup::new();
        outer.children.push(inner.into());
        vec![ConditionLeaf::new().into(), outer.into()]
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(&[]), 0);
        assert_eq!(depth(&[ConditionLeaf::new().into()]), 1);
        assert_eq!(depth(&sample()), 3);
    }

    #[test]
    fn test_leaf_count() {
        assert_eq!(leaf_count(&sample()), 4);
    }

    #[test]
    fn test_paths_preorder() {
        let all = paths(&sample());
        let expected: Vec<Path> = vec![
            [0].into(),
            [1].into(),
            [1, 0].into(),
            [1, 1].into(),
            [1, 1, 0].into(),
            [1, 1, 1].into(),
        ];
        assert_eq!(all, expected);
        assert_eq!(collect_ids(&sample()).len(), 6);
    }

    #[test]
    fn test_find_path() {
        let tree = sample();
        for path in paths(&tree) {
            let id = {
                let mut node = &tree[path[0]];
                for &i in &path[1..] {
                    node = &node.as_group().unwrap().children[i];
                }
                node.id().to_string()
            };
            assert_eq!(find_path(&tree, &id), Some(path));
        }
        assert_eq!(find_path(&tree, "missing"), None);
    }
}
