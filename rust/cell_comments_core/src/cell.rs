//! The host editor's per-cell view model, reduced to what the comments part
//! reads and writes.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Markup,
    Code,
}

impl CellKind {
    /// Only code cells carry a discussion.
    pub fn is_discussable(self) -> bool {
        matches!(self, CellKind::Code)
    }
}

#[derive(Debug)]
pub struct CellViewModel {
    handle: u64,
    kind: CellKind,
    uri: String,
    comment_height: Cell<f64>,
}

impl CellViewModel {
    pub fn new(handle: u64, kind: CellKind, uri: impl Into<String>) -> Self {
        Self { handle, kind, uri: uri.into(), comment_height: Cell::new(0.0) }
    }

    pub fn code(handle: u64, uri: impl Into<String>) -> Self {
        Self::new(handle, CellKind::Code, uri)
    }

    pub fn markup(handle: u64, uri: impl Into<String>) -> Self {
        Self::new(handle, CellKind::Markup, uri)
    }

    pub fn handle(&self) -> u64 {
        self.handle
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Height the comments part contributes to the cell layout.
    pub fn comment_height(&self) -> f64 {
        self.comment_height.get()
    }

    pub fn set_comment_height(&self, height: f64) {
        self.comment_height.set(height);
    }
}

/// What changed on the cell's view model since the last state update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStateChange {
    pub metadata_changed: bool,
    pub run_state_changed: bool,
    pub selection_changed: bool,
    pub focus_mode_changed: bool,
    pub editor_attached_changed: bool,
    pub cell_line_numbers_changed: bool,
    pub input_collapsed_changed: bool,
    pub output_collapsed_changed: bool,
    pub drag_state_changed: bool,
}
