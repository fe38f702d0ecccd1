use super::arena::Hierarchy;

/// Compute aggregated values and heights for all internal nodes (bottom-up).
/// After this, each internal node's `value` equals the sum of its children's values.
pub fn aggregate_values(tree: &mut Hierarchy) {
    // Children always have higher indices than their parents in the arena,
    // so walking backwards settles every child before its parent.
    let nodes = tree.nodes_mut();
    for i in (0..nodes.len()).rev() {
        if nodes[i].children.is_empty() {
            nodes[i].height = 0;
            continue;
        }

        let mut total = 0.0;
        let mut height = 0;
        for child in &nodes[i].children {
            let child = &nodes[child.index()];
            total += child.value;
            height = height.max(child.height + 1);
        }
        nodes[i].value = total;
        nodes[i].height = height;
    }
}

/// Sort children of each internal node by value (descending).
/// The sort is stable: equal values keep their input order, never their names.
pub fn sort_children_by_value(tree: &mut Hierarchy) {
    let nodes = tree.nodes_mut();
    for i in 0..nodes.len() {
        if nodes[i].children.len() < 2 {
            continue;
        }

        let mut children = std::mem::take(&mut nodes[i].children);
        children.sort_by(|a, b| nodes[b.index()].value.total_cmp(&nodes[a.index()].value));
        nodes[i].children = children;
    }
}
