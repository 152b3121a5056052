//! Reference renderers drawing into [`Element`] trees.

use std::cell::RefCell;
use std::rc::Rc;

use crate::comments::Comment;
use crate::dom::Element;
use crate::error::RenderError;
use crate::event::Subscription;
use crate::renderer::{
    CommentEntry, EntryContext, EntryRenderer, HeaderCallbacks, HeaderRenderer, ReplyCallbacks, ThreadHeader,
};
use crate::service::CommentMenus;
use crate::thread::CommentThread;

const EDIT_MODE_CLASS: &str = "edit-mode";

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEntryRenderer;

impl EntryRenderer for HtmlEntryRenderer {
    fn create_entry(&self, cx: EntryContext<'_>) -> Result<Box<dyn CommentEntry>, RenderError> {
        let body_html = cx.markdown.render(&cx.comment.body).map_err(|err| RenderError::Entry {
            sequence_id: cx.comment.sequence_id,
            message: err.to_string(),
        })?;
        Ok(Box::new(HtmlCommentEntry {
            thread: Rc::clone(cx.thread),
            comment: cx.comment.clone(),
            owner: cx.owner.to_string(),
            resource_uri: cx.resource_uri.to_string(),
            callbacks: cx.callbacks,
            body_html,
            editing: false,
        }))
    }
}

pub struct HtmlCommentEntry {
    thread: Rc<CommentThread>,
    comment: Comment,
    owner: String,
    resource_uri: String,
    callbacks: ReplyCallbacks,
    body_html: String,
    editing: bool,
}

impl HtmlCommentEntry {
    /// Hand the thread to the submit hook and return without waiting.
    pub fn submit(&self) {
        (self.callbacks.submit_comment)(&*self.thread);
    }

    pub fn collapse(&self) {
        (self.callbacks.collapse)();
    }

    fn author_row(&self) -> Element {
        let author = Element::parse("strong.author").with_text(&self.comment.author_name);
        let mut row = Element::parse("div.comment-title").with_child(author);
        if let Some(label) = &self.comment.label {
            row.append_child(Element::parse("span.isPending").with_text(label));
        }
        row
    }
}

impl CommentEntry for HtmlCommentEntry {
    fn sequence_id(&self) -> u32 {
        self.comment.sequence_id
    }

    fn node(&self) -> Element {
        let mut root = Element::parse("div.review-comment")
            .with_attr("data-sequence-id", self.comment.sequence_id.to_string())
            .with_attr("data-owner", &self.owner)
            .with_attr("data-resource", &self.resource_uri);
        if let Some(icon) = &self.comment.author_icon {
            let avatar = Element::parse("img.avatar")
                .with_attr("src", icon)
                .with_attr("alt", &self.comment.author_name);
            root.append_child(Element::parse("div.avatar-container").with_child(avatar));
        }
        let mut contents = Element::parse("div.review-comment-contents").with_child(self.author_row());
        if self.editing {
            contents.append_child(
                Element::parse("div.edit-container").with_child(Element::new("textarea").with_text(&self.comment.body)),
            );
        } else {
            contents.append_child(Element::parse("div.comment-body").with_inner_html(&self.body_html));
        }
        root.append_child(contents);
        root.toggle_class(EDIT_MODE_CLASS, self.editing);
        root
    }

    fn switch_to_edit_mode(&mut self) {
        if !self.editing {
            tracing::trace!(sequence_id = self.comment.sequence_id, "entry switched to edit mode");
        }
        self.editing = true;
    }

    fn is_editing(&self) -> bool {
        self.editing
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlHeaderRenderer;

impl HeaderRenderer for HtmlHeaderRenderer {
    fn create_header(
        &self,
        callbacks: HeaderCallbacks,
        menus: &CommentMenus,
        thread: &Rc<CommentThread>,
    ) -> Result<Box<dyn ThreadHeader>, RenderError> {
        let title = Rc::new(RefCell::new(thread.label()));
        let label_subscription = {
            let title = Rc::clone(&title);
            thread.on_did_change_label().subscribe(move |label| {
                *title.borrow_mut() = label.clone();
            })
        };
        Ok(Box::new(HtmlThreadHeader {
            title,
            actions: menus.thread_title_actions.clone(),
            callbacks,
            _label_subscription: label_subscription,
        }))
    }
}

/// Header whose title tracks the thread label.
pub struct HtmlThreadHeader {
    title: Rc<RefCell<Option<String>>>,
    actions: Vec<String>,
    callbacks: HeaderCallbacks,
    _label_subscription: Subscription,
}

impl HtmlThreadHeader {
    pub fn collapse(&self) {
        (self.callbacks.collapse)();
    }
}

impl ThreadHeader for HtmlThreadHeader {
    fn node(&self) -> Element {
        let title = self.title.borrow().clone().unwrap_or_else(|| "Start discussion".to_string());
        let mut actions = Element::parse("div.review-actions");
        for action in &self.actions {
            actions.append_child(Element::parse("a.action-label").with_attr("role", "button").with_text(action));
        }
        actions.append_child(
            Element::parse("a.action-label.codicon.codicon-close")
                .with_attr("role", "button")
                .with_attr("title", "Collapse"),
        );
        Element::parse("div.head")
            .with_child(Element::parse("div.review-title").with_child(Element::parse("span.filename").with_text(title)))
            .with_child(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown_renderer::MarkdownRenderer;
    use crate::range::Range;
    use std::cell::Cell;

    fn thread() -> Rc<CommentThread> {
        Rc::new(CommentThread::new(1, 0, "", "test", "cell://1", Range::start_of_resource(), true))
    }

    #[test]
    fn entry_renders_preview_then_edit() {
        let thread = thread();
        let comment = Comment::new(5, "peng", "**bold** <i>").with_label("pending");
        let markdown = MarkdownRenderer::new();
        let mut entry = HtmlEntryRenderer
            .create_entry(EntryContext {
                thread: &thread,
                comment: &comment,
                owner: "1",
                resource_uri: "cell://1",
                callbacks: ReplyCallbacks::noop(),
                markdown: &markdown,
            })
            .unwrap();

        let html = entry.node().to_html();
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("&lt;i&gt;"));
        assert!(html.contains("pending"));
        assert!(!entry.node().has_class(EDIT_MODE_CLASS));

        entry.switch_to_edit_mode();
        let node = entry.node();
        assert!(node.has_class(EDIT_MODE_CLASS));
        assert!(node.find_by_class("edit-container").is_some());
        assert!(node.find_by_class("comment-body").is_none());
    }

    #[test]
    fn submit_invokes_hook_with_thread() {
        let thread = thread();
        let calls = Rc::new(Cell::new(0u64));
        let collapses = Rc::new(Cell::new(0));
        let callbacks = ReplyCallbacks {
            submit_comment: {
                let calls = calls.clone();
                Rc::new(move |t: &CommentThread| calls.set(calls.get() + t.comment_thread_handle()))
            },
            collapse: {
                let collapses = collapses.clone();
                Rc::new(move || collapses.set(collapses.get() + 1))
            },
        };
        let entry = HtmlCommentEntry {
            thread,
            comment: Comment::new(1, "a", "b"),
            owner: "1".into(),
            resource_uri: "cell://1".into(),
            callbacks,
            body_html: String::new(),
            editing: false,
        };
        entry.submit();
        entry.submit();
        entry.collapse();
        assert_eq!(calls.get(), 2);
        assert_eq!(collapses.get(), 1);
    }

    #[test]
    fn header_collapse_runs_hook() {
        let collapses = Rc::new(Cell::new(0));
        let header = HtmlThreadHeader {
            title: Rc::new(RefCell::new(None)),
            actions: vec!["resolve".into()],
            callbacks: HeaderCallbacks {
                collapse: {
                    let collapses = collapses.clone();
                    Rc::new(move || collapses.set(collapses.get() + 1))
                },
            },
            _label_subscription: thread().on_did_change_label().subscribe(|_| {}),
        };
        header.collapse();
        let html = header.node().to_html();
        assert!(html.contains("Start discussion"));
        assert!(html.contains("resolve"));
        assert_eq!(collapses.get(), 1);
    }

    #[test]
    fn header_title_follows_label() {
        let thread = thread();
        thread.set_label(Some("Discussion".into())).unwrap();
        let header = HtmlHeaderRenderer
            .create_header(HeaderCallbacks::noop(), &CommentMenus::new("nb"), &thread)
            .unwrap();
        assert!(header.node().to_html().contains("Discussion"));
        thread.set_label(Some("Renamed".into())).unwrap();
        assert!(header.node().to_html().contains("Renamed"));
    }
}
