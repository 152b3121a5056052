//! The comment service: menus for the hosting editor and the thread data for
//! a cell.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cell::CellViewModel;
use crate::comments::Comment;
use crate::error::ThreadError;
use crate::range::Range;
use crate::thread::CommentThread;

/// Menu contributions for one hosting editor. Opaque to the comments part,
/// which only hands it to the header renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentMenus {
    pub editor_id: String,
    #[serde(default)]
    pub thread_title_actions: Vec<String>,
    #[serde(default)]
    pub comment_actions: Vec<String>,
}

impl CommentMenus {
    pub fn new(editor_id: impl Into<String>) -> Self {
        Self { editor_id: editor_id.into(), ..Self::default() }
    }
}

/// Data a thread is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSeed {
    #[serde(default)]
    pub controller_handle: u64,
    #[serde(default)]
    pub extension_id: String,
    pub thread_id: String,
    #[serde(default)]
    pub range: Range,
    #[serde(default)]
    pub can_reply: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl ThreadSeed {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            controller_handle: 0,
            extension_id: String::new(),
            thread_id: thread_id.into(),
            range: Range::start_of_resource(),
            can_reply: false,
            label: None,
            comments: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    /// Placeholder discussion shown until a real comment provider is wired in.
    pub fn demo() -> Self {
        const AVATAR: &str = "https://avatars.githubusercontent.com/u/876920?v%3D4";
        Self::new("test").with_label("Discussion").with_comments(vec![
            Comment::new(1, "rebornix", "#test").with_icon(AVATAR),
            Comment::new(2, "peng", "yet another test").with_label("pending").with_icon(AVATAR),
        ])
    }

    pub fn validate(&self) -> Result<(), ThreadError> {
        let mut seen = HashSet::new();
        for comment in &self.comments {
            if !seen.insert(comment.sequence_id) {
                return Err(ThreadError::DuplicateSequenceId(comment.sequence_id));
            }
        }
        Ok(())
    }

    /// Build the thread for `cell`. The thread handle is the cell handle and
    /// the resource is the cell uri.
    pub fn build(&self, cell: &CellViewModel) -> Result<CommentThread, ThreadError> {
        self.validate()?;
        let thread = CommentThread::new(
            cell.handle(),
            self.controller_handle,
            self.extension_id.clone(),
            self.thread_id.clone(),
            cell.uri(),
            self.range,
            self.can_reply,
        );
        if self.label.is_some() {
            thread.set_label(self.label.clone())?;
        }
        thread.set_comments(self.comments.clone())?;
        Ok(thread)
    }
}

pub trait CommentService {
    /// Called once, when the comments part is constructed.
    fn comment_menus(&self, editor_id: &str) -> CommentMenus;

    /// Thread data for `cell`, or `None` when the cell has no discussion.
    fn thread_for_cell(&self, cell: &CellViewModel) -> Option<ThreadSeed>;
}

/// Serves [`ThreadSeed::demo`] for every cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCommentService;

impl CommentService for DemoCommentService {
    fn comment_menus(&self, editor_id: &str) -> CommentMenus {
        CommentMenus {
            editor_id: editor_id.to_string(),
            thread_title_actions: vec!["Resolve".into()],
            comment_actions: vec!["Edit".into(), "Delete".into()],
        }
    }

    fn thread_for_cell(&self, _cell: &CellViewModel) -> Option<ThreadSeed> {
        Some(ThreadSeed::demo())
    }
}

/// Serves one fixed seed, or nothing.
#[derive(Debug, Clone, Default)]
pub struct StaticCommentService {
    pub menus: CommentMenus,
    pub seed: Option<ThreadSeed>,
}

impl StaticCommentService {
    pub fn new(seed: ThreadSeed) -> Self {
        Self { menus: CommentMenus::default(), seed: Some(seed) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let seed: ThreadSeed = serde_json::from_str(json)?;
        Ok(Self::new(seed))
    }
}

impl CommentService for StaticCommentService {
    fn comment_menus(&self, editor_id: &str) -> CommentMenus {
        CommentMenus { editor_id: editor_id.to_string(), ..self.menus.clone() }
    }

    fn thread_for_cell(&self, _cell: &CellViewModel) -> Option<ThreadSeed> {
        self.seed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::CommentMode;

    #[test]
    fn demo_seed_builds_thread_for_cell() {
        let cell = CellViewModel::code(7, "vscode-notebook-cell:/nb.ipynb#7");
        let thread = ThreadSeed::demo().build(&cell).unwrap();
        assert_eq!(thread.comment_thread_handle(), 7);
        assert_eq!(thread.resource(), "vscode-notebook-cell:/nb.ipynb#7");
        assert_eq!(thread.label().as_deref(), Some("Discussion"));
        let comments = thread.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].label.as_deref(), Some("pending"));
        assert!(!thread.can_reply());
    }

    #[test]
    fn duplicate_sequence_ids_are_rejected() {
        let seed = ThreadSeed::new("t").with_comments(vec![Comment::new(1, "a", "x"), Comment::new(1, "b", "y")]);
        assert!(matches!(seed.build(&CellViewModel::code(1, "c")), Err(ThreadError::DuplicateSequenceId(1))));
    }

    #[test]
    fn static_service_parses_seed_json() {
        let json = r#"{
            "threadId": "t1",
            "label": "Review",
            "comments": [{ "body": "hi", "authorName": "a", "sequenceId": 4, "mode": "Editing" }]
        }"#;
        let svc = StaticCommentService::from_json(json).unwrap();
        let seed = svc.thread_for_cell(&CellViewModel::code(1, "c")).unwrap();
        assert_eq!(seed.comments[0].mode, CommentMode::Editing);
        assert_eq!(svc.comment_menus("nb").editor_id, "nb");
    }
}
