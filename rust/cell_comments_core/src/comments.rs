//! Comment value types carried by a thread.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentMode {
    #[default]
    Preview,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollapsibleState {
    Collapsed,
    Expanded,
}

/// A single comment as handed over by the comment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub body: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    /// Unique within the owning thread only.
    pub sequence_id: u32,
    #[serde(default)]
    pub mode: CommentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Comment {
    pub fn new(sequence_id: u32, author_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            author_name: author_name.into(),
            author_icon: None,
            sequence_id,
            mode: CommentMode::Preview,
            label: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.author_icon = Some(icon.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_mode(mut self, mode: CommentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.mode == CommentMode::Editing
    }
}

/// Draft reply text typed into the thread's input box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub value: String,
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let c: Comment = serde_json::from_str(r##"{"body":"#test","authorName":"a","sequenceId":1}"##).unwrap();
        assert_eq!(c.mode, CommentMode::Preview);
        assert!(c.author_icon.is_none());
        assert!(c.label.is_none());
    }

    #[test]
    fn serializes_camel_case_keys() {
        let c = Comment::new(3, "rebornix", "hi").with_icon("https://example.com/a.png");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["authorName"], "rebornix");
        assert_eq!(json["authorIcon"], "https://example.com/a.png");
        assert_eq!(json["sequenceId"], 3);
        assert!(json.get("author_name").is_none());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let c = Comment::new(2, "peng", "yet another test").with_label("pending").with_mode(CommentMode::Editing);
        assert!(c.is_editing());
        assert_eq!(c.label.as_deref(), Some("pending"));
    }
}
