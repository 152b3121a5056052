//! Comment threads attached to notebook cells.
//!
//! [`thread::CommentThread`] is the observable model, [`panel::CellCommentsPart`]
//! the view part that builds a thread for a code cell on first render and
//! reports its height back to the cell.

pub mod cell;
pub mod comments;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod html;
pub mod markdown_renderer;
pub mod panel;
pub mod range;
pub mod renderer;
pub mod service;
pub mod thread;

pub use cell::{CellKind, CellStateChange, CellViewModel};
pub use comments::{CollapsibleState, Comment, CommentInput, CommentMode};
pub use config::PanelConfig;
pub use error::{ConfigError, RenderError, ThreadError, ThreadField};
pub use event::{Emitter, Event, Subscription};
pub use panel::{CellCommentsPart, PanelServices, PanelState};
pub use range::Range;
pub use service::{CommentMenus, CommentService, DemoCommentService, StaticCommentService, ThreadSeed};
pub use thread::CommentThread;
