use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::layout::{LayoutOptions, Rect};
use crate::render::colors::Palette;
use crate::render::{Frame, Renderer};
use crate::tree::arena::{Hierarchy, NodeId};
use crate::ui::navigation::{self, ViewTree};

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing rendered yet
    Idle,
    /// A view root is on screen
    Displaying(NodeId),
}

/// Viewport and layout settings for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub layout: LayoutOptions,
    pub palette: Palette,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            layout: LayoutOptions::default(),
            palette: Palette::default(),
        }
    }
}

impl SessionConfig {
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.viewport_width, self.viewport_height)
    }
}

/// Holds the full hierarchy and the subtree currently on screen.
///
/// Zooms always resolve against the full hierarchy, so any ancestor path still shown
/// in a breadcrumb can be jumped to directly. The current view root only changes
/// after a layout has completed, so a failed zoom leaves the previous view in place.
pub struct ViewSession<R: Renderer> {
    hierarchy: Arc<Hierarchy>,
    config: SessionConfig,
    state: ViewState,
    renderer: R,
}

impl<R: Renderer> ViewSession<R> {
    pub fn new(hierarchy: Arc<Hierarchy>, config: SessionConfig, renderer: R) -> Self {
        Self {
            hierarchy,
            config,
            state: ViewState::Idle,
            renderer,
        }
    }

    pub fn hierarchy(&self) -> &Arc<Hierarchy> {
        &self.hierarchy
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn current_root(&self) -> Option<NodeId> {
        match self.state {
            ViewState::Idle => None,
            ViewState::Displaying(root) => Some(root),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Lay `node` out against the viewport and hand the frame to the renderer.
    pub fn show(&mut self, node: NodeId) -> Result<(), Error> {
        let bounds = self.config.bounds();
        let layout = ViewTree::new(&self.hierarchy, node).layout(bounds, &self.config.layout)?;
        let frame = Frame::from_layout(&self.hierarchy, &layout, bounds);

        tracing::info!(
            "Showing '{}': {} rectangles in {:.0}x{:.0}",
            self.hierarchy.path_of(node),
            frame.nodes.len(),
            bounds.width(),
            bounds.height()
        );

        self.renderer.present(&frame);
        self.state = ViewState::Displaying(node);
        Ok(())
    }

    /// Resolve `path` against the full hierarchy and show the matched subtree.
    pub fn zoom_to(&mut self, path: &str) -> Result<NodeId, Error> {
        let view = ViewTree::zoom(&self.hierarchy, path).map_err(|e| {
            tracing::warn!("Zoom to '{}' failed: {}", path, e);
            e
        })?;
        let root = view.root();
        self.show(root)?;
        Ok(root)
    }

    /// Re-render the current view root (the true root when nothing is shown yet).
    pub fn redraw(&mut self) -> Result<(), Error> {
        let root = self.current_root().unwrap_or_else(|| self.hierarchy.root());
        self.show(root)
    }

    /// Return to the full hierarchy.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.show(self.hierarchy.root())
    }

    /// Zoom out one level. Returns false when already at the true root.
    pub fn zoom_out(&mut self) -> Result<bool, Error> {
        let parent = self
            .current_root()
            .and_then(|root| self.hierarchy.get(root).parent);
        match parent {
            Some(parent) => self.show(parent).map(|()| true),
            None => Ok(false),
        }
    }

    /// Change the viewport size and re-render what is on screen.
    ///
    /// The new size is only kept when the re-layout succeeds.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), Error> {
        let previous = (self.config.viewport_width, self.config.viewport_height);
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        if self.state == ViewState::Idle {
            return Ok(());
        }
        let result = self.redraw();
        if result.is_err() {
            (self.config.viewport_width, self.config.viewport_height) = previous;
        }
        result
    }

    /// `(name, path)` pairs from the true root down to the current view root.
    pub fn breadcrumbs(&self) -> Vec<(compact_str::CompactString, String)> {
        let root = self.current_root().unwrap_or_else(|| self.hierarchy.root());
        ViewTree::new(&self.hierarchy, root).breadcrumbs()
    }

    /// Paths of every node that can be zoomed into from the full hierarchy.
    pub fn zoomable_paths(&self) -> Vec<String> {
        self.hierarchy
            .descendants(self.hierarchy.root())
            .filter(|&id| !self.hierarchy.get(id).is_leaf())
            .map(|id| self.hierarchy.path_of(id))
            .collect()
    }

    /// Resolve without showing, for callers that only need the node.
    pub fn resolve(&self, path: &str) -> Result<NodeId, Error> {
        Ok(navigation::resolve(path, &self.hierarchy)?)
    }
}
