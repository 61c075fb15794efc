//! Human-readable one-line rendering of a condition tree

use crate::tree::{ConditionItem, ConditionLeaf, LogicOperator};

/// Render `tree` as text, e.g. `status eq "active" AND (price gt "10" OR sku eq "A1")`.
///
/// A leaf after the first joins with its own logic operator; a group after
/// the first joins with the enclosing group's logic type (`root_logic` at
/// the top). Unfilled parts show as `?`.
pub fn describe(tree: &[ConditionItem], root_logic: LogicOperator) -> String {
    describe_children(tree, root_logic)
}

fn describe_children(children: &[ConditionItem], logic_type: LogicOperator) -> String {
    let mut out = String::new();
    for (index, item) in children.iter().enumerate() {
        if index > 0 {
            let joiner = match item {
                ConditionItem::Leaf(leaf) => leaf.logic_operator,
                ConditionItem::Group(_) => logic_type,
            };
            out.push(' ');
            out.push_str(&joiner.as_str().to_ascii_uppercase());
            out.push(' ');
        }
        match item {
            ConditionItem::Leaf(leaf) => out.push_str(&describe_leaf(leaf)),
            ConditionItem::Group(group) => {
                out.push('(');
                out.push_str(&describe_children(&group.children, group.logic_type));
                out.push(')');
            }
        }
    }
    out
}

fn describe_leaf(leaf: &ConditionLeaf) -> String {
    let field = if leaf.field.is_empty() {
        "?"
    } else {
        leaf.field.as_str()
    };
    let operator = if leaf.operator.is_empty() {
        "?"
    } else {
        leaf.operator.as_str()
    };
    if leaf.value.is_empty() {
        format!("{} {} ?", field, operator)
    } else {
        format!("{} {} \"{}\"", field, operator, leaf.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::{to_nested, FlatItem};

    #[test]
    fn test_describe() {
        let tree = to_nested(&[
            FlatItem::condition("a", "status", "eq", "active", LogicOperator::And),
            FlatItem::group(
                "g",
                LogicOperator::Or,
                vec![
                    FlatItem::condition("b", "price", "gt", "10", LogicOperator::And),
                    FlatItem::condition("c", "sku", "eq", "A1", LogicOperator::Or),
                ],
            ),
        ]);
        assert_eq!(
            describe(&tree, LogicOperator::And),
            r#"status eq "active" AND (price gt "10" OR sku eq "A1")"#
        );
        assert!(describe(&tree, LogicOperator::Or).contains(" OR ("));
    }

    #[test]
    fn test_describe_incomplete() {
        let tree = to_nested(&[FlatItem::condition("a", "status", "", "", LogicOperator::And)]);
        assert_eq!(describe(&tree, LogicOperator::And), "status ? ?");
        assert_eq!(describe(&[], LogicOperator::And), "");
    }

    #[test]
    fn test_describe_value_verbatim() {
        let tree = to_nested(&[FlatItem::condition(
            "a",
            "note",
            "contains",
            "say \"hi\"\nthen 'bye' \\o/",
            LogicOperator::And,
        )]);
        assert_eq!(
            describe(&tree, LogicOperator::And),
            "note contains \"say \"hi\"\nthen 'bye' \\o/\""
        );
    }
}
