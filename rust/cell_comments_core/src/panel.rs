//! The comments part of a notebook cell.
//!
//! A part is created once per cell-view slot and reused as the list recycles
//! its slots. The first `render_cell` on a code cell builds the thread, its
//! header and one entry per comment; later calls are no-ops. Layout reports
//! the header chrome plus the measured comments container onto the cell.

use std::fmt;
use std::rc::Rc;

use crate::cell::{CellStateChange, CellViewModel};
use crate::config::PanelConfig;
use crate::dom::Element;
use crate::error::ThreadError;
use crate::html::{HtmlEntryRenderer, HtmlHeaderRenderer};
use crate::markdown_renderer::MarkdownRenderer;
use crate::renderer::{
    CommentEntry, EntryContext, EntryRenderer, HeaderCallbacks, HeaderRenderer, LayoutMeasure, ReplyCallbacks,
    ThreadHeader,
};
use crate::service::{CommentMenus, CommentService};
use crate::thread::CommentThread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Unbound,
    Initializing,
    Initialized,
    Disposed,
}

/// Collaborators the part draws with.
#[derive(Clone)]
pub struct PanelServices {
    pub comment_service: Rc<dyn CommentService>,
    pub entry_renderer: Rc<dyn EntryRenderer>,
    pub header_renderer: Rc<dyn HeaderRenderer>,
    pub measure: Rc<dyn LayoutMeasure>,
}

impl PanelServices {
    /// HTML renderers with the line-based height estimate from `config`.
    pub fn html(comment_service: Rc<dyn CommentService>, config: &PanelConfig) -> Self {
        Self {
            comment_service,
            entry_renderer: Rc::new(HtmlEntryRenderer),
            header_renderer: Rc::new(HtmlHeaderRenderer),
            measure: Rc::new(config.line_measure()),
        }
    }
}

impl fmt::Debug for PanelServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelServices").finish_non_exhaustive()
    }
}

struct BuiltThread {
    thread: Rc<CommentThread>,
    header: Box<dyn ThreadHeader>,
    entries: Vec<Box<dyn CommentEntry>>,
}

pub struct CellCommentsPart {
    config: PanelConfig,
    services: PanelServices,
    comment_menus: CommentMenus,
    markdown: MarkdownRenderer,
    reply_callbacks: ReplyCallbacks,
    header_callbacks: HeaderCallbacks,

    state: PanelState,
    current_cell: Option<Rc<CellViewModel>>,
    thread: Option<Rc<CommentThread>>,
    header: Option<Box<dyn ThreadHeader>>,
    comments_element: Option<Element>,
    entries: Vec<Box<dyn CommentEntry>>,
}

impl CellCommentsPart {
    pub fn new(config: PanelConfig, services: PanelServices) -> Self {
        let comment_menus = services.comment_service.comment_menus(&config.editor_id);
        Self {
            config,
            services,
            comment_menus,
            markdown: MarkdownRenderer::new(),
            reply_callbacks: ReplyCallbacks::noop(),
            header_callbacks: HeaderCallbacks::noop(),
            state: PanelState::Unbound,
            current_cell: None,
            thread: None,
            header: None,
            comments_element: None,
            entries: Vec::new(),
        }
    }

    pub fn with_callbacks(mut self, reply: ReplyCallbacks, header: HeaderCallbacks) -> Self {
        self.reply_callbacks = reply;
        self.header_callbacks = header;
        self
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == PanelState::Initialized
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn comment_menus(&self) -> &CommentMenus {
        &self.comment_menus
    }

    pub fn thread(&self) -> Option<&CommentThread> {
        self.thread.as_deref()
    }

    pub fn entries(&self) -> &[Box<dyn CommentEntry>] {
        &self.entries
    }

    pub fn comments_element(&self) -> Option<&Element> {
        self.comments_element.as_ref()
    }

    pub fn bound_cell_handle(&self) -> Option<u64> {
        self.current_cell.as_ref().map(|c| c.handle())
    }

    /// Bind a cell and build its discussion on first use. Cells that cannot
    /// carry a discussion are ignored. A collaborator failure leaves the part
    /// unbound with nothing attached, so the next call retries.
    pub fn render_cell(&mut self, cell: &Rc<CellViewModel>) -> Result<(), ThreadError> {
        if self.state == PanelState::Disposed {
            return Err(ThreadError::PanelDisposed);
        }
        if !cell.kind().is_discussable() {
            tracing::trace!(cell = cell.handle(), kind = ?cell.kind(), "cell kind has no comments");
            return Ok(());
        }
        self.current_cell = Some(Rc::clone(cell));
        self.initialize(cell)
    }

    fn initialize(&mut self, cell: &CellViewModel) -> Result<(), ThreadError> {
        if self.state == PanelState::Initialized {
            return Ok(());
        }
        self.state = PanelState::Initializing;
        match self.build(cell) {
            Ok(Some(built)) => {
                let mut comments_element = Element::parse("div.comments-container");
                for entry in &built.entries {
                    comments_element.append_child(entry.node());
                }
                tracing::debug!(
                    cell = cell.handle(),
                    thread_id = built.thread.thread_id(),
                    entries = built.entries.len(),
                    "comment thread initialized"
                );
                self.thread = Some(built.thread);
                self.header = Some(built.header);
                self.entries = built.entries;
                self.comments_element = Some(comments_element);
                self.state = PanelState::Initialized;
                Ok(())
            }
            Ok(None) => {
                tracing::debug!(cell = cell.handle(), "no comment thread for cell");
                self.state = PanelState::Unbound;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(cell = cell.handle(), error = %err, "failed to initialize comment thread");
                self.state = PanelState::Unbound;
                Err(err)
            }
        }
    }

    fn build(&self, cell: &CellViewModel) -> Result<Option<BuiltThread>, ThreadError> {
        let Some(seed) = self.services.comment_service.thread_for_cell(cell) else {
            return Ok(None);
        };
        let thread = Rc::new(seed.build(cell)?);
        match self.build_views(cell, &thread) {
            Ok((header, entries)) => Ok(Some(BuiltThread { thread, header, entries })),
            Err(err) => {
                thread.dispose();
                Err(err)
            }
        }
    }

    fn build_views(
        &self,
        cell: &CellViewModel,
        thread: &Rc<CommentThread>,
    ) -> Result<(Box<dyn ThreadHeader>, Vec<Box<dyn CommentEntry>>), ThreadError> {
        let header =
            self.services.header_renderer.create_header(self.header_callbacks.clone(), &self.comment_menus, thread)?;

        let owner = cell.handle().to_string();
        let comments = thread.comments();
        let mut entries = Vec::with_capacity(comments.len());
        for comment in &comments {
            let mut entry = self.services.entry_renderer.create_entry(EntryContext {
                thread,
                comment,
                owner: &owner,
                resource_uri: cell.uri(),
                callbacks: self.reply_callbacks.clone(),
                markdown: &self.markdown,
            })?;
            if comment.is_editing() {
                entry.switch_to_edit_mode();
            }
            entries.push(entry);
        }
        Ok((header, entries))
    }

    /// Write the part's height contribution onto the bound cell. Skipped
    /// until a thread has been rendered.
    pub fn prepare_layout(&self) {
        let Some(cell) = &self.current_cell else {
            return;
        };
        if !cell.kind().is_discussable() {
            return;
        }
        let Some(container) = &self.comments_element else {
            tracing::trace!(cell = cell.handle(), "comments container not built, skipping layout");
            return;
        };
        let height = self.config.header_height + self.services.measure.client_height(container);
        cell.set_comment_height(height);
    }

    /// Layout pass hook. Nothing to do.
    pub fn update_internal_layout_now(&mut self, cell: &CellViewModel) {
        tracing::trace!(cell = cell.handle(), "update_internal_layout_now");
    }

    /// View-model state change hook. Nothing to do.
    pub fn update_state(&mut self, cell: &CellViewModel, change: &CellStateChange) {
        tracing::trace!(cell = cell.handle(), ?change, "update_state");
    }

    /// Whole part as one element: header, then the body holding the comments.
    pub fn to_element(&self) -> Element {
        let mut root = Element::parse("div.cell-comment-container");
        if let Some(header) = &self.header {
            root.append_child(header.node());
        }
        if let Some(comments) = &self.comments_element {
            root.append_child(Element::parse("div.body").with_child(comments.clone()));
        }
        root
    }

    pub fn to_html(&self) -> String {
        self.to_element().to_html()
    }

    /// Release the thread, header and entries and empty the container.
    pub fn dispose(&mut self) {
        if self.state == PanelState::Disposed {
            return;
        }
        self.entries.clear();
        self.header = None;
        self.comments_element = None;
        if let Some(thread) = self.thread.take() {
            thread.dispose();
        }
        self.current_cell = None;
        self.state = PanelState::Disposed;
        tracing::debug!("cell comments part disposed");
    }
}

impl Drop for CellCommentsPart {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for CellCommentsPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellCommentsPart")
            .field("state", &self.state)
            .field("cell", &self.bound_cell_handle())
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::DemoCommentService;

    fn part() -> CellCommentsPart {
        let config = PanelConfig::default();
        let services = PanelServices::html(Rc::new(DemoCommentService), &config);
        CellCommentsPart::new(config, services)
    }

    #[test]
    fn demo_thread_renders_two_entries() {
        let mut part = part();
        let cell = Rc::new(CellViewModel::code(4, "cell://4"));
        part.render_cell(&cell).unwrap();
        assert!(part.is_initialized());
        assert_eq!(part.entries().len(), 2);
        assert_eq!(part.comment_menus().editor_id, "notebook");
        let html = part.to_html();
        assert!(html.contains("Discussion"));
        assert!(html.contains("rebornix"));
        assert!(html.contains("pending"));
    }

    #[test]
    fn layout_uses_config_header_height() {
        let config = PanelConfig { header_height: 40.0, ..PanelConfig::default() };
        let mut services = PanelServices::html(Rc::new(DemoCommentService), &config);
        services.measure = Rc::new(crate::renderer::LineHeightMeasure { line_height: 0.0, entry_padding: 0.0 });
        let mut part = CellCommentsPart::new(config, services);
        let cell = Rc::new(CellViewModel::code(1, "cell://1"));
        part.render_cell(&cell).unwrap();
        part.prepare_layout();
        assert_eq!(cell.comment_height(), 40.0);
    }

    #[test]
    fn render_after_dispose_is_rejected() {
        let mut part = part();
        part.dispose();
        part.dispose();
        let cell = Rc::new(CellViewModel::code(1, "cell://1"));
        assert!(matches!(part.render_cell(&cell), Err(ThreadError::PanelDisposed)));
        assert_eq!(part.state(), PanelState::Disposed);
    }
}
