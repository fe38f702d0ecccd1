pub mod aggregate;
pub mod arena;
pub mod raw;

use self::arena::{Hierarchy, Node, NodeId};
use self::raw::RawNode;
use crate::error::MalformedInputError;

/// Build an immutable, aggregated `Hierarchy` from nested raw records.
///
/// Leaves take their value from the input; internal nodes always get the sum of
/// their children, even when the input carries a value for them. Children end up
/// sorted by value descending, ties in input order.
pub fn build(raw: &RawNode) -> Result<Hierarchy, MalformedInputError> {
    let mut tree = Hierarchy::new(&raw.name);

    // Iterative walk so deep inputs can't overflow the stack. Siblings are appended
    // in input order before any of them is visited, which keeps the arena's
    // parent-before-child invariant.
    let mut stack: Vec<(&RawNode, NodeId)> = vec![(raw, tree.root())];
    while let Some((record, id)) = stack.pop() {
        match record.non_empty_children() {
            Some(children) => {
                if record.value.is_some() {
                    tracing::debug!(
                        "Ignoring input value of internal node '{}', it is recomputed from children",
                        tree.path_of(id)
                    );
                }
                for child in children {
                    let child_id = tree.add_child(id, Node::new(&child.name, 0.0));
                    stack.push((child, child_id));
                }
            }
            None => {
                let value = leaf_value(&tree, id, record.value)?;
                tree.get_mut(id).value = value;
            }
        }
    }

    aggregate::aggregate_values(&mut tree);
    aggregate::sort_children_by_value(&mut tree);

    let root = tree.get(tree.root());
    if !root.value.is_finite() {
        return Err(MalformedInputError::NonFiniteValue {
            path: tree.path_of(tree.root()),
            value: root.value,
        });
    }

    tracing::info!(
        "Hierarchy built: {} nodes, root '{}' (value={}, height={})",
        tree.len(),
        root.name,
        root.value,
        root.height
    );

    Ok(tree)
}

fn leaf_value(tree: &Hierarchy, id: NodeId, value: Option<f64>) -> Result<f64, MalformedInputError> {
    match value {
        None => Err(MalformedInputError::MissingWeight {
            path: tree.path_of(id),
        }),
        Some(v) if v.is_nan() || v.is_infinite() => Err(MalformedInputError::NonFiniteValue {
            path: tree.path_of(id),
            value: v,
        }),
        Some(v) if v < 0.0 => Err(MalformedInputError::NegativeValue {
            path: tree.path_of(id),
            value: v,
        }),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn builds_sorted_aggregated_tree() {
        let tree = build(&raw(json!({
            "name": "root",
            "children": [
                {"name": "small", "value": 1},
                {"name": "dir", "value": 999, "children": [
                    {"name": "x", "value": 2},
                    {"name": "y", "value": 5}
                ]},
                {"name": "big", "value": 4}
            ]
        })))
        .unwrap();

        let root = tree.get(tree.root());
        assert_eq!(root.value, 12.0);
        assert_eq!(root.height, 2);

        let order: Vec<&str> = root
            .children
            .iter()
            .map(|&c| tree.get(c).name.as_str())
            .collect();
        assert_eq!(order, ["dir", "big", "small"]);

        let dir = tree.find_child(tree.root(), "dir").unwrap();
        assert_eq!(tree.get(dir).value, 7.0);
        assert_eq!(tree.get(dir).depth, 1);
        assert_eq!(tree.get(dir).height, 1);
    }

    #[test]
    fn leaf_with_empty_children_uses_its_value() {
        let tree = build(&raw(json!({
            "name": "root",
            "children": [{"name": "a", "value": 3, "children": []}]
        })))
        .unwrap();
        let a = tree.find_child(tree.root(), "a").unwrap();
        assert!(tree.get(a).is_leaf());
        assert_eq!(tree.get(tree.root()).value, 3.0);
    }

    #[test]
    fn missing_weight_is_malformed() {
        let err = build(&raw(json!({
            "name": "root",
            "children": [{"name": "hollow", "children": []}]
        })))
        .unwrap_err();
        assert_eq!(
            err,
            MalformedInputError::MissingWeight {
                path: "root.hollow".into()
            }
        );
    }

    #[test]
    fn negative_leaf_is_malformed() {
        let err = build(&raw(json!({
            "name": "root",
            "children": [{"name": "a", "value": 3}, {"name": "b", "value": -1}]
        })))
        .unwrap_err();
        assert!(matches!(err, MalformedInputError::NegativeValue { ref path, value }
            if path == "root.b" && value == -1.0));
    }

    #[test]
    fn single_leaf_root_is_valid() {
        let tree = build(&RawNode::leaf("solo", 8.0)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(tree.root()).value, 8.0);
        assert_eq!(tree.get(tree.root()).height, 0);
    }
}
