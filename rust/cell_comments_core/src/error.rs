//! Error types for the thread model, the panel and its collaborators.

use std::fmt;

use thiserror::Error;

/// Observable fields of a [`crate::thread::CommentThread`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadField {
    Input,
    Label,
    ContextValue,
    Comments,
    Range,
    CanReply,
    CollapsibleState,
}

impl fmt::Display for ThreadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThreadField::Input => "input",
            ThreadField::Label => "label",
            ThreadField::ContextValue => "contextValue",
            ThreadField::Comments => "comments",
            ThreadField::Range => "range",
            ThreadField::CanReply => "canReply",
            ThreadField::CollapsibleState => "collapsibleState",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("cannot set {field} on a disposed comment thread")]
    Disposed { field: ThreadField },
    #[error("sequence id {0} appears more than once in the thread")]
    DuplicateSequenceId(u32),
    #[error("cell comments part is disposed")]
    PanelDisposed,
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Failures reported by the rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("failed to render comment {sequence_id}: {message}")]
    Entry { sequence_id: u32, message: String },
    #[error("failed to render thread header: {0}")]
    Header(String),
    #[error("failed to render markdown: {0}")]
    Markdown(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid panel config: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid panel config: {0}")]
    Invalid(String),
}
