use compact_str::CompactString;

use crate::error::{LayoutError, PathNotFoundError};
use crate::layout::{compute_layout, Layout, LayoutOptions, Rect};
use crate::tree::arena::{Hierarchy, NodeId};

/// Separator between names in a navigation path.
pub const PATH_SEPARATOR: char = '.';

/// Resolve a dotted path against the full hierarchy.
///
/// The first segment is the true root's own name; the remainder is matched against
/// child names level by level. A child name may itself contain dots (`main.rs`), so a
/// child matches when the remainder equals its name or continues past it with a
/// separator. Matching siblings are tried depth-first in layout order and the first
/// one that resolves the whole path wins; when none does, the error describes the
/// first dead end.
pub fn resolve(path: &str, tree: &Hierarchy) -> Result<NodeId, PathNotFoundError> {
    if path.is_empty() {
        return Err(PathNotFoundError::Empty);
    }

    let root = tree.root();
    let root_name = tree.get(root).name.as_str();
    let rest = match path.strip_prefix(root_name) {
        Some("") => return Ok(root),
        Some(tail) if tail.starts_with(PATH_SEPARATOR) => &tail[PATH_SEPARATOR.len_utf8()..],
        _ => {
            return Err(PathNotFoundError::WrongRoot {
                path: path.to_string(),
                root: root_name.to_string(),
            })
        }
    };

    // `None` marks a candidate that consumed the whole path.
    let mut pending: Vec<(NodeId, Option<&str>)> = vec![(root, Some(rest))];
    let mut dead_end = None;
    while let Some((current, rest)) = pending.pop() {
        let Some(rest) = rest else {
            return Ok(current);
        };

        let node = tree.get(current);
        if node.is_leaf() {
            dead_end.get_or_insert_with(|| PathNotFoundError::LeafInPath {
                path: path.to_string(),
                segment: node.name.to_string(),
            });
            continue;
        }

        let candidates: Vec<_> = node
            .children
            .iter()
            .filter_map(|&child| match rest.strip_prefix(tree.get(child).name.as_str()) {
                Some("") => Some((child, None)),
                Some(tail) => tail
                    .strip_prefix(PATH_SEPARATOR)
                    .map(|tail| (child, Some(tail))),
                None => None,
            })
            .collect();

        if candidates.is_empty() {
            dead_end.get_or_insert_with(|| PathNotFoundError::MissingSegment {
                path: path.to_string(),
                segment: first_segment(rest).to_string(),
            });
        }
        pending.extend(candidates.into_iter().rev());
    }

    Err(dead_end.unwrap_or_else(|| PathNotFoundError::MissingSegment {
        path: path.to_string(),
        segment: first_segment(rest).to_string(),
    }))
}

fn first_segment(rest: &str) -> &str {
    rest.split(PATH_SEPARATOR).next().unwrap_or(rest)
}

/// The subtree currently promoted to be displayed as if it were the root.
///
/// Shows the matched node's name and children; the node keeps its place in the full
/// hierarchy so paths of everything inside stay valid for the next zoom.
#[derive(Debug, Clone, Copy)]
pub struct ViewTree<'a> {
    tree: &'a Hierarchy,
    root: NodeId,
}

impl<'a> ViewTree<'a> {
    pub fn new(tree: &'a Hierarchy, root: NodeId) -> Self {
        Self { tree, root }
    }

    /// Resolve `path` and promote the match to a view root.
    pub fn zoom(tree: &'a Hierarchy, path: &str) -> Result<Self, PathNotFoundError> {
        resolve(path, tree).map(|root| Self::new(tree, root))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn name(&self) -> &'a CompactString {
        &self.tree.get(self.root).name
    }

    pub fn children(&self) -> &'a [NodeId] {
        self.tree.children(self.root)
    }

    pub fn layout(&self, bounds: Rect, options: &LayoutOptions) -> Result<Layout, LayoutError> {
        compute_layout(self.tree, self.root, bounds, options)
    }

    /// `(name, path)` of every ancestor from the true root down to the view root,
    /// so any of them can be zoomed to directly.
    pub fn breadcrumbs(&self) -> Vec<(CompactString, String)> {
        let mut crumbs: Vec<_> = self
            .tree
            .ancestors(self.root)
            .map(|id| (self.tree.get(id).name.clone(), self.tree.path_of(id)))
            .collect();
        crumbs.reverse();
        crumbs
    }
}
