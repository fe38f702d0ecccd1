// Public library interface for canopy.
// The `canopy` and `debug-layout` binaries are thin drivers over these modules.

pub mod app;
pub mod error;
pub mod layout;
pub mod render;
pub mod tree;
pub mod ui;

pub use app::{SessionConfig, ViewSession, ViewState};
pub use error::{Error, LayoutError, MalformedInputError, PathNotFoundError};
pub use layout::{compute_layout, Layout, LayoutOptions, LayoutRect, Rect};
pub use tree::arena::{Hierarchy, Node, NodeId, NodeKind};
pub use tree::build;
pub use tree::raw::RawNode;
pub use ui::navigation::{resolve, ViewTree};
