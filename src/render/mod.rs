pub mod colors;
pub mod scene;

use std::collections::BTreeMap;

use compact_str::CompactString;

use crate::layout::{Layout, Rect};
use crate::tree::arena::{Hierarchy, NodeId};
use crate::ui::tooltip::build_title;

/// One laid-out node as handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameNode {
    pub node: NodeId,
    pub name: CompactString,
    pub value: f64,
    /// Distance from the true root
    pub depth: u32,
    /// Distance to the deepest descendant leaf
    pub height: u32,
    /// Dotted path from the true root, the key to pass back to `zoom_to`
    pub path: String,
    pub rect: Rect,
    /// Hover text: icon, slash-joined path, formatted size
    pub title: String,
    pub is_leaf: bool,
    /// Internal nodes other than the view root can be clicked to zoom in
    pub zoomable: bool,
}

/// A complete, laid-out view ready to be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view_root: NodeId,
    pub bounds: Rect,
    /// Nodes in layout order: parents before children, siblings value-descending
    pub nodes: Vec<FrameNode>,
}

impl Frame {
    /// Annotate a finished layout with the structural data a renderer needs.
    pub fn from_layout(tree: &Hierarchy, layout: &Layout, bounds: Rect) -> Self {
        let nodes = layout
            .rects
            .iter()
            .map(|lr| {
                let node = tree.get(lr.node);
                FrameNode {
                    node: lr.node,
                    name: node.name.clone(),
                    value: node.value,
                    depth: node.depth,
                    height: node.height,
                    path: tree.path_of(lr.node),
                    rect: lr.rect,
                    title: build_title(tree, lr.node),
                    is_leaf: node.is_leaf(),
                    zoomable: !node.is_leaf() && lr.node != layout.root,
                }
            })
            .collect();

        Frame {
            view_root: layout.root,
            bounds,
            nodes,
        }
    }

    /// Nodes grouped by height, tallest group first, so ancestors are painted
    /// beneath their descendants. Layout order is kept inside each group.
    pub fn layers(&self) -> Vec<(u32, Vec<&FrameNode>)> {
        let mut by_height: BTreeMap<u32, Vec<&FrameNode>> = BTreeMap::new();
        for node in &self.nodes {
            by_height.entry(node.height).or_default().push(node);
        }
        by_height.into_iter().rev().collect()
    }
}

/// Consumer of finished frames (a painter, an exporter, a test recorder).
pub trait Renderer {
    fn present(&mut self, frame: &Frame);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn present(&mut self, frame: &Frame) {
        (**self).present(frame)
    }
}

/// Keeps the most recent frame, for callers that paint on their own schedule.
#[derive(Debug, Default)]
pub struct LastFrame {
    pub frame: Option<Frame>,
    pub presented: usize,
}

impl Renderer for LastFrame {
    fn present(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
        self.presented += 1;
    }
}
