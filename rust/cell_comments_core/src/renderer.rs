//! Seams to the rendering collaborators of the comments part.
//!
//! The part never draws anything itself: entries, the header and the layout
//! measurement are all supplied from outside. [`crate::html`] provides the
//! reference implementations.

use std::fmt;
use std::rc::Rc;

use crate::comments::Comment;
use crate::dom::Element;
use crate::error::RenderError;
use crate::markdown_renderer::MarkdownRenderer;
use crate::service::CommentMenus;
use crate::thread::CommentThread;

/// Hooks an entry may invoke. Submission is fire-and-forget: the caller
/// never waits for the hook to finish whatever it starts.
#[derive(Clone)]
pub struct ReplyCallbacks {
    pub submit_comment: Rc<dyn Fn(&CommentThread)>,
    pub collapse: Rc<dyn Fn()>,
}

impl ReplyCallbacks {
    pub fn noop() -> Self {
        Self { submit_comment: Rc::new(|_| {}), collapse: Rc::new(|| {}) }
    }
}

impl fmt::Debug for ReplyCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyCallbacks").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct HeaderCallbacks {
    pub collapse: Rc<dyn Fn()>,
}

impl HeaderCallbacks {
    pub fn noop() -> Self {
        Self { collapse: Rc::new(|| {}) }
    }
}

impl fmt::Debug for HeaderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderCallbacks").finish_non_exhaustive()
    }
}

/// Everything an entry is built from.
pub struct EntryContext<'a> {
    pub thread: &'a Rc<CommentThread>,
    pub comment: &'a Comment,
    /// Cell handle rendered as text, used as the owner id of the entry.
    pub owner: &'a str,
    pub resource_uri: &'a str,
    pub callbacks: ReplyCallbacks,
    pub markdown: &'a MarkdownRenderer,
}

/// One rendered comment.
pub trait CommentEntry {
    fn sequence_id(&self) -> u32;
    /// Current visual node, ready to be attached to a container.
    fn node(&self) -> Element;
    fn switch_to_edit_mode(&mut self);
    fn is_editing(&self) -> bool;
}

pub trait EntryRenderer {
    fn create_entry(&self, cx: EntryContext<'_>) -> Result<Box<dyn CommentEntry>, RenderError>;
}

pub trait ThreadHeader {
    fn node(&self) -> Element;
}

pub trait HeaderRenderer {
    fn create_header(
        &self,
        callbacks: HeaderCallbacks,
        menus: &CommentMenus,
        thread: &Rc<CommentThread>,
    ) -> Result<Box<dyn ThreadHeader>, RenderError>;
}

/// Reports the client-area height of a rendered container.
pub trait LayoutMeasure {
    fn client_height(&self, element: &Element) -> f64;
}

/// Estimates height from the number of text lines and direct children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHeightMeasure {
    pub line_height: f64,
    pub entry_padding: f64,
}

impl LayoutMeasure for LineHeightMeasure {
    fn client_height(&self, element: &Element) -> f64 {
        element.line_count() as f64 * self.line_height + element.children.len() as f64 * self.entry_padding
    }
}
