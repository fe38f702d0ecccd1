use serde::{Deserialize, Serialize};

/// One record of the nested input data, as loaded from JSON.
///
/// Leaves look like `{"name": "a", "value": 300}`, internal nodes like
/// `{"name": "root", "children": [...]}`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: None,
        }
    }

    pub fn internal(name: impl Into<String>, children: Vec<RawNode>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Some(children),
        }
    }

    /// Children, if the record has a non-empty `children` sequence.
    pub fn non_empty_children(&self) -> Option<&[RawNode]> {
        self.children.as_deref().filter(|c| !c.is_empty())
    }
}
