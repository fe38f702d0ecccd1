use std::sync::Arc;

use canopy::layout::PHI;
use canopy::render::LastFrame;
use canopy::{
    build, compute_layout, resolve, Error, Hierarchy, LayoutError, LayoutOptions,
    MalformedInputError, NodeId, PathNotFoundError, RawNode, Rect, SessionConfig, ViewSession,
};
use proptest::prelude::*;
use serde_json::json;

fn from_json(value: serde_json::Value) -> Hierarchy {
    let raw: RawNode = serde_json::from_value(value).unwrap();
    build(&raw).unwrap()
}

fn scenario() -> Hierarchy {
    from_json(json!({
        "name": "root",
        "children": [{"name": "a", "value": 300}, {"name": "b", "value": 100}]
    }))
}

// ── Strategies ──────────────────────────────────────────────────────────

/// Leaf weights: mostly spread out, with some zeros and a common tie value.
fn leaf_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        2 => Just(64.0),
        7 => 0.0..1e5f64,
    ]
}

/// Sibling names are unique so every node has its own path.
fn named(mut children: Vec<RawNode>) -> Vec<RawNode> {
    for (i, child) in children.iter_mut().enumerate() {
        child.name = format!("n{}", i);
    }
    children
}

fn raw_node() -> impl Strategy<Value = RawNode> {
    let leaf = leaf_value().prop_map(|value| RawNode::leaf("leaf", value));
    leaf.prop_recursive(4, 64, 5, |inner| {
        prop::collection::vec(inner, 1..6)
            .prop_map(|children| RawNode::internal("dir", named(children)))
    })
}

fn hierarchy() -> impl Strategy<Value = Hierarchy> {
    prop::collection::vec(raw_node(), 1..6).prop_map(|children| {
        build(&RawNode::internal("root", named(children))).expect("generated input is valid")
    })
}

fn bounds() -> impl Strategy<Value = Rect> {
    (16.0..2048.0f64, 16.0..2048.0f64).prop_map(|(w, h)| Rect::from_size(w, h))
}

fn unrounded(options: LayoutOptions) -> LayoutOptions {
    LayoutOptions {
        round: false,
        ..options
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Aggregation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn internal_values_are_sums_of_children(tree in hierarchy()) {
        for id in tree.descendants(tree.root()) {
            let node = tree.get(id);
            if node.is_leaf() {
                prop_assert_eq!(node.height, 0);
                continue;
            }
            let sum: f64 = node.children.iter().map(|&c| tree.get(c).value).sum();
            prop_assert!(
                (node.value - sum).abs() <= 1e-9 * sum.max(1.0),
                "{} holds {} but its children sum to {}", tree.path_of(id), node.value, sum
            );
            let tallest = node.children.iter().map(|&c| tree.get(c).height).max();
            prop_assert_eq!(Some(node.height), tallest.map(|h| h + 1));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn children_are_contained_in_padded_parents(tree in hierarchy(), area in bounds()) {
        let options = [
            unrounded(LayoutOptions::default()),
            LayoutOptions::unpadded(),
            LayoutOptions {
                padding_outer: 0.0,
                padding_inner: 6.0,
                round: false,
                ..LayoutOptions::default()
            },
            unrounded(LayoutOptions {
                padding_outer: 2.5,
                padding_top: 7.25,
                padding_inner: 3.5,
                ..LayoutOptions::default()
            }),
        ];
        for opts in &options {
            let layout = compute_layout(&tree, tree.root(), area, opts).unwrap();
            for lr in &layout.rects {
                prop_assert!(lr.rect.width() >= 0.0 && lr.rect.height() >= 0.0);
                let Some(parent) = tree.get(lr.node).parent else {
                    continue;
                };
                let interior = opts.padded_interior(&layout.rect(parent).unwrap());
                prop_assert!(
                    interior.contains(&lr.rect),
                    "{:?} leaves {:?} under {:?}", lr.rect, interior, opts
                );
            }
        }
    }

    #[test]
    fn rounded_children_stay_inside_parents(tree in hierarchy(), area in bounds()) {
        let layout = compute_layout(&tree, tree.root(), area, &LayoutOptions::default()).unwrap();
        for lr in &layout.rects {
            let Some(parent) = tree.get(lr.node).parent else {
                continue;
            };
            let outer = layout.rect(parent).unwrap();
            prop_assert!(outer.contains(&lr.rect), "{:?} not in {:?}", lr.rect, outer);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Proportionality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn areas_are_proportional_without_padding(tree in hierarchy(), area in bounds()) {
        let layout =
            compute_layout(&tree, tree.root(), area, &LayoutOptions::unpadded()).unwrap();
        for lr in &layout.rects {
            let node = tree.get(lr.node);
            if node.is_leaf() || node.value == 0.0 {
                continue;
            }
            let parent_area = lr.rect.area();
            for &c in &node.children {
                let expected = tree.get(c).value / node.value * parent_area;
                let got = layout.rect(c).unwrap().area();
                prop_assert!(
                    (got - expected).abs() <= 1e-6 * parent_area.max(1.0),
                    "{} vs {}", got, expected
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Path round-trip and determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_path_resolves_back_to_its_node(tree in hierarchy()) {
        for id in tree.descendants(tree.root()) {
            let found: NodeId = resolve(&tree.path_of(id), &tree).unwrap();
            prop_assert_eq!(found, id);
        }
    }

    #[test]
    fn relayout_is_bit_identical(tree in hierarchy(), area in bounds()) {
        let opts = unrounded(LayoutOptions::default());
        let first = compute_layout(&tree, tree.root(), area, &opts).unwrap();
        let second = compute_layout(&tree, tree.root(), area, &opts).unwrap();
        prop_assert_eq!(first.rects.len(), second.rects.len());
        for (x, y) in first.rects.iter().zip(&second.rects) {
            prop_assert_eq!(x.node, y.node);
            for (p, q) in [
                (x.rect.x0, y.rect.x0),
                (x.rect.y0, y.rect.y0),
                (x.rect.x1, y.rect.x1),
                (x.rect.y1, y.rect.y1),
            ] {
                prop_assert_eq!(p.to_bits(), q.to_bits());
            }
        }
    }
}

#[test]
fn rounded_areas_stay_close_to_proportional() {
    let tree = scenario();
    let layout = compute_layout(
        &tree,
        tree.root(),
        Rect::from_size(401.0, 103.0),
        &LayoutOptions {
            padding_outer: 0.0,
            padding_top: 0.0,
            padding_inner: 0.0,
            round: true,
            ratio: PHI,
        },
    )
    .unwrap();
    let a = layout.rect(tree.children(tree.root())[0]).unwrap();
    let expected = 0.75 * 401.0 * 103.0;
    // One pixel of slack on each edge.
    assert!((a.area() - expected).abs() <= 401.0 + 103.0);
}

#[test]
fn siblings_are_value_descending_and_stable() {
    let tree = from_json(json!({
        "name": "root",
        "children": [
            {"name": "t1", "value": 5},
            {"name": "big", "value": 9},
            {"name": "t2", "value": 5},
            {"name": "dir", "children": [{"name": "x", "value": 5}]},
            {"name": "t3", "value": 5}
        ]
    }));
    for _ in 0..3 {
        let layout = compute_layout(
            &tree,
            tree.root(),
            Rect::from_size(300.0, 200.0),
            &LayoutOptions::default(),
        )
        .unwrap();
        let order: Vec<&str> = layout
            .rects
            .iter()
            .filter(|lr| tree.get(lr.node).parent == Some(tree.root()))
            .map(|lr| tree.get(lr.node).name.as_str())
            .collect();
        assert_eq!(order, ["big", "t1", "t2", "dir", "t3"]);
    }
}

#[test]
fn scenario_three_to_one_split() {
    let tree = scenario();
    let layout = compute_layout(
        &tree,
        tree.root(),
        Rect::from_size(400.0, 100.0),
        &LayoutOptions::unpadded(),
    )
    .unwrap();
    let children = tree.children(tree.root());
    let (a, b) = (children[0], children[1]);
    assert_eq!(tree.get(a).name, "a");
    assert!((layout.rect(a).unwrap().area() / 40_000.0 - 0.75).abs() < 1e-9);
    assert!((layout.rect(b).unwrap().area() / 40_000.0 - 0.25).abs() < 1e-9);
    assert!(layout.node_to_rect[&a] < layout.node_to_rect[&b]);
}

#[test]
fn scenario_zero_height_bounds() {
    let tree = scenario();
    let err = compute_layout(
        &tree,
        tree.root(),
        Rect::from_size(400.0, 0.0),
        &LayoutOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LayoutError::InvalidBounds { .. }));
}

#[test]
fn scenario_missing_path() {
    let tree = scenario();
    assert!(matches!(
        resolve("root.a.missing", &tree),
        Err(PathNotFoundError::LeafInPath { .. }) | Err(PathNotFoundError::MissingSegment { .. })
    ));
}

#[test]
fn scenario_negative_leaf() {
    let raw: RawNode = serde_json::from_value(json!({
        "name": "root",
        "children": [{"name": "a", "value": -5}]
    }))
    .unwrap();
    assert!(matches!(
        build(&raw),
        Err(MalformedInputError::NegativeValue { .. })
    ));
}

proptest! {
    #[test]
    fn session_zooms_and_survives_bad_paths(tree in hierarchy()) {
        let deepest_internal = tree
            .descendants(tree.root())
            .filter(|&id| !tree.get(id).is_leaf())
            .max_by_key(|&id| tree.get(id).depth)
            .unwrap();
        let path = tree.path_of(deepest_internal);

        let mut session =
            ViewSession::new(Arc::new(tree), SessionConfig::default(), LastFrame::default());
        session.reset().unwrap();
        prop_assert_eq!(session.zoom_to(&path).unwrap(), deepest_internal);

        let err = session.zoom_to("root.no.such.node").unwrap_err();
        prop_assert!(matches!(err, Error::PathNotFound(_)));
        prop_assert_eq!(session.current_root(), Some(deepest_internal));

        let frame = session.renderer().frame.as_ref().unwrap();
        prop_assert_eq!(frame.view_root, deepest_internal);
        prop_assert_eq!(frame.nodes[0].rect, Rect::from_size(1280.0, 800.0));
        for node in &frame.nodes[1..] {
            prop_assert!(node.path.starts_with(&path));
        }
    }
}
