/// Raw hierarchy data that violates the node-shape contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedInputError {
    #[error("node `{path}` has neither a value nor any children")]
    MissingWeight { path: String },
    #[error("node `{path}` has negative value {value}")]
    NegativeValue { path: String, value: f64 },
    #[error("node `{path}` has non-finite value {value}")]
    NonFiniteValue { path: String, value: f64 },
}

/// The layout engine was handed bounds or weights it cannot partition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout bounds must have positive width and height, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("padding `{name}` must be a finite non-negative number, got {value}")]
    InvalidPadding { name: &'static str, value: f64 },
    #[error("node `{path}` has negative value {value}")]
    NegativeValue { path: String, value: f64 },
}

/// A zoom path that does not name a node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathNotFoundError {
    #[error("empty zoom path")]
    Empty,
    #[error("path `{path}` does not start at root `{root}`")]
    WrongRoot { path: String, root: String },
    #[error("no child named `{segment}` along path `{path}`")]
    MissingSegment { path: String, segment: String },
    #[error("`{segment}` along path `{path}` is a leaf and has no children")]
    LeafInPath { path: String, segment: String },
}

/// Any failure surfaced by the view session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    PathNotFound(#[from] PathNotFoundError),
}
