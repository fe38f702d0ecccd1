pub mod squarify;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::tree::arena::{Hierarchy, NodeId};

pub use self::squarify::squarify;

/// Golden ratio, the default target aspect ratio for squarified rows.
pub const PHI: f64 = 1.618_033_988_749_895;

/// An axis-aligned rectangle given by its corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle of the given size anchored at the origin.
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether `other` lies entirely inside `self` (edges may touch).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Shrink by the given amount on each side. Insets that would invert an axis
    /// collapse it onto its midline instead.
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        let (mut x0, mut x1) = (self.x0 + left, self.x1 - right);
        let (mut y0, mut y1) = (self.y0 + top, self.y1 - bottom);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Rect { x0, y0, x1, y1 }
    }

    /// Clamp every coordinate into `outer`.
    pub fn clamped_to(&self, outer: &Rect) -> Rect {
        let cx = |v: f64| v.clamp(outer.x0, outer.x1);
        let cy = |v: f64| v.clamp(outer.y0, outer.y1);
        Rect::new(cx(self.x0), cy(self.y0), cx(self.x1), cy(self.y1))
    }

    /// Snap every coordinate to the nearest integer, halves rounding up.
    ///
    /// The snap is monotone, so nested rectangles stay nested after rounding.
    pub fn rounded(&self) -> Rect {
        let snap = |v: f64| (v + 0.5).floor();
        Rect::new(snap(self.x0), snap(self.y0), snap(self.x1), snap(self.y1))
    }
}

/// Configuration for treemap layout.
///
/// Defaults match the reference front end: outer padding 5, a 20px label band at the
/// top of every container, 1px between siblings, integer coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Inset applied to every edge of every container
    pub padding_outer: f64,
    /// Inset at the top of every container with children (replaces `padding_outer` there)
    pub padding_top: f64,
    /// Gap between adjacent siblings
    pub padding_inner: f64,
    /// Snap coordinates to integers
    pub round: bool,
    /// Target aspect ratio for squarified rows (values below 1 act as 1)
    pub ratio: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding_outer: 5.0,
            padding_top: 20.0,
            padding_inner: 1.0,
            round: true,
            ratio: PHI,
        }
    }
}

impl LayoutOptions {
    /// No padding, no rounding: rectangles exactly partition their containers.
    pub fn unpadded() -> Self {
        Self {
            padding_outer: 0.0,
            padding_top: 0.0,
            padding_inner: 0.0,
            round: false,
            ratio: PHI,
        }
    }

    /// Area left for a container's children: its rect minus `padding_outer`, with
    /// `padding_top` on the top edge.
    pub fn padded_interior(&self, rect: &Rect) -> Rect {
        rect.inset(
            self.padding_outer,
            self.padding_top,
            self.padding_outer,
            self.padding_outer,
        )
    }

    fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("padding_outer", self.padding_outer),
            ("padding_top", self.padding_top),
            ("padding_inner", self.padding_inner),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidPadding { name, value });
            }
        }
        Ok(())
    }
}

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub node: NodeId,
    pub rect: Rect,
    /// Nesting level below the laid-out root (root = 0)
    pub level: u32,
}

/// The full layout result (rects + fast lookup).
#[derive(Debug, Clone)]
pub struct Layout {
    /// Node the layout was computed for
    pub root: NodeId,
    /// Rectangles in pre-order: parents before children, siblings value-descending
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`
    pub node_to_rect: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.node_to_rect.get(&node).map(|&i| self.rects[i].rect)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Compute the layout of the subtree rooted at `root` (any node, for drill-down)
/// inside `bounds`.
///
/// The root receives `bounds` itself. Every container's interior is its rect minus
/// `padding_outer` (and `padding_top` on the top edge); siblings are separated by
/// `padding_inner`. Descendants of a container whose children weigh nothing get no
/// rectangle.
pub fn compute_layout(
    tree: &Hierarchy,
    root: NodeId,
    bounds: Rect,
    options: &LayoutOptions,
) -> Result<Layout, LayoutError> {
    let (width, height) = (bounds.width(), bounds.height());
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(LayoutError::InvalidBounds { width, height });
    }
    options.validate()?;
    for id in tree.descendants(root) {
        let value = tree.get(id).value;
        if value.is_nan() || value < 0.0 {
            return Err(LayoutError::NegativeValue {
                path: tree.path_of(id),
                value,
            });
        }
    }

    let mut rects = Vec::with_capacity(tree.len());
    let mut node_to_rect = HashMap::with_capacity(tree.len());

    // Each pending entry carries the tile its parent assigned, the inset still to
    // apply to it (half the sibling gap, or nothing for the root) and the parent's
    // padded interior, which the result must not leave.
    let half_gap = options.padding_inner / 2.0;
    let mut stack = vec![(root, bounds, 0.0_f64, 0_u32, bounds)];
    while let Some((node_id, tile, pad, level, limit)) = stack.pop() {
        let rect = tile.inset(pad, pad, pad, pad).clamped_to(&limit);
        node_to_rect.insert(node_id, rects.len());
        rects.push(LayoutRect {
            node: node_id,
            rect,
            level,
        });

        let node = tree.get(node_id);
        if node.is_leaf() {
            continue;
        }
        if node.value <= 0.0 {
            tracing::debug!(
                "Skipping children of '{}' at level {}: zero total weight",
                node.name,
                level
            );
            continue;
        }

        // Widen the interior by half the sibling gap; each child gives it back on
        // every side, so outer edges keep the full padding and siblings get the gap.
        let interior = rect.inset(
            options.padding_outer - half_gap,
            options.padding_top - half_gap,
            options.padding_outer - half_gap,
            options.padding_outer - half_gap,
        );

        let weights: Vec<f64> = node.children.iter().map(|&c| tree.get(c).value).collect();
        let tiles = squarify(&weights, interior, options.ratio);

        // Tiling drifts by a few ulps; children are cut back to the padded interior.
        let padded = options.padded_interior(&rect);
        for (&child, &child_tile) in node.children.iter().zip(&tiles).rev() {
            stack.push((child, child_tile, half_gap, level + 1, padded));
        }
    }

    if options.round {
        for r in &mut rects {
            r.rect = r.rect.rounded();
        }
    }

    tracing::debug!(
        "Layout computed for '{}': {} rectangles in {:.0}x{:.0}",
        tree.get(root).name,
        rects.len(),
        width,
        height
    );

    Ok(Layout {
        root,
        rects,
        node_to_rect,
    })
}
