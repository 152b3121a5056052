//! Observable comment thread model.
//!
//! Every field has a getter, a setter and (except `context_value`) its own
//! channel. A setter stores the value, then fires the channel with it, with
//! no equality check. Once the thread is disposed every setter fails with
//! [`ThreadError::Disposed`] and nothing fires again.

use std::cell::{Cell, RefCell};

use crate::comments::{CollapsibleState, Comment, CommentInput};
use crate::error::{ThreadError, ThreadField};
use crate::event::{Emitter, Event};
use crate::range::Range;

#[derive(Debug)]
pub struct CommentThread {
    comment_thread_handle: u64,
    controller_handle: u64,
    extension_id: String,
    thread_id: String,
    resource: String,

    input: RefCell<Option<CommentInput>>,
    label: RefCell<Option<String>>,
    context_value: RefCell<Option<String>>,
    comments: RefCell<Vec<Comment>>,
    range: Cell<Range>,
    can_reply: Cell<bool>,
    collapsible_state: Cell<Option<CollapsibleState>>,
    disposed: Cell<bool>,

    on_did_change_input: Emitter<Option<CommentInput>>,
    on_did_change_label: Emitter<Option<String>>,
    on_did_change_comments: Emitter<Vec<Comment>>,
    on_did_change_range: Emitter<Range>,
    on_did_change_can_reply: Emitter<bool>,
    on_did_change_collapsible_state: Emitter<Option<CollapsibleState>>,
}

impl CommentThread {
    pub fn new(
        comment_thread_handle: u64,
        controller_handle: u64,
        extension_id: impl Into<String>,
        thread_id: impl Into<String>,
        resource: impl Into<String>,
        range: Range,
        can_reply: bool,
    ) -> Self {
        Self {
            comment_thread_handle,
            controller_handle,
            extension_id: extension_id.into(),
            thread_id: thread_id.into(),
            resource: resource.into(),
            input: RefCell::new(None),
            label: RefCell::new(None),
            context_value: RefCell::new(None),
            comments: RefCell::new(Vec::new()),
            range: Cell::new(range),
            can_reply: Cell::new(can_reply),
            collapsible_state: Cell::new(None),
            disposed: Cell::new(false),
            on_did_change_input: Emitter::new(),
            on_did_change_label: Emitter::new(),
            on_did_change_comments: Emitter::new(),
            on_did_change_range: Emitter::new(),
            on_did_change_can_reply: Emitter::new(),
            on_did_change_collapsible_state: Emitter::new(),
        }
    }

    pub fn comment_thread_handle(&self) -> u64 {
        self.comment_thread_handle
    }

    pub fn controller_handle(&self) -> u64 {
        self.controller_handle
    }

    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn ensure_live(&self, field: ThreadField) -> Result<(), ThreadError> {
        if self.disposed.get() {
            tracing::warn!(thread_id = %self.thread_id, %field, "mutation on disposed comment thread");
            return Err(ThreadError::Disposed { field });
        }
        Ok(())
    }

    // input

    pub fn input(&self) -> Option<CommentInput> {
        self.input.borrow().clone()
    }

    pub fn set_input(&self, input: Option<CommentInput>) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::Input)?;
        self.input.replace(input.clone());
        self.on_did_change_input.fire(&input);
        Ok(())
    }

    pub fn on_did_change_input(&self) -> Event<Option<CommentInput>> {
        self.on_did_change_input.event()
    }

    // label

    pub fn label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    pub fn set_label(&self, label: Option<String>) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::Label)?;
        self.label.replace(label.clone());
        self.on_did_change_label.fire(&label);
        Ok(())
    }

    pub fn on_did_change_label(&self) -> Event<Option<String>> {
        self.on_did_change_label.event()
    }

    // context value, plain property

    pub fn context_value(&self) -> Option<String> {
        self.context_value.borrow().clone()
    }

    pub fn set_context_value(&self, context_value: Option<String>) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::ContextValue)?;
        self.context_value.replace(context_value);
        Ok(())
    }

    // comments

    pub fn comments(&self) -> Vec<Comment> {
        self.comments.borrow().clone()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.borrow().len()
    }

    pub fn set_comments(&self, comments: Vec<Comment>) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::Comments)?;
        self.comments.replace(comments.clone());
        self.on_did_change_comments.fire(&comments);
        Ok(())
    }

    pub fn on_did_change_comments(&self) -> Event<Vec<Comment>> {
        self.on_did_change_comments.event()
    }

    // range

    pub fn range(&self) -> Range {
        self.range.get()
    }

    pub fn set_range(&self, range: Range) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::Range)?;
        self.range.set(range);
        self.on_did_change_range.fire(&range);
        Ok(())
    }

    pub fn on_did_change_range(&self) -> Event<Range> {
        self.on_did_change_range.event()
    }

    // can reply

    pub fn can_reply(&self) -> bool {
        self.can_reply.get()
    }

    pub fn set_can_reply(&self, can_reply: bool) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::CanReply)?;
        self.can_reply.set(can_reply);
        self.on_did_change_can_reply.fire(&can_reply);
        Ok(())
    }

    pub fn on_did_change_can_reply(&self) -> Event<bool> {
        self.on_did_change_can_reply.event()
    }

    // collapsible state

    pub fn collapsible_state(&self) -> Option<CollapsibleState> {
        self.collapsible_state.get()
    }

    pub fn set_collapsible_state(&self, state: Option<CollapsibleState>) -> Result<(), ThreadError> {
        self.ensure_live(ThreadField::CollapsibleState)?;
        self.collapsible_state.set(state);
        self.on_did_change_collapsible_state.fire(&state);
        Ok(())
    }

    pub fn on_did_change_collapsible_state(&self) -> Event<Option<CollapsibleState>> {
        self.on_did_change_collapsible_state.event()
    }

    /// Mark the thread disposed and close every channel. Safe to call twice.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        tracing::debug!(thread_id = %self.thread_id, "disposing comment thread");
        self.on_did_change_collapsible_state.dispose();
        self.on_did_change_comments.dispose();
        self.on_did_change_input.dispose();
        self.on_did_change_label.dispose();
        self.on_did_change_range.dispose();
        self.on_did_change_can_reply.dispose();
    }
}

impl Drop for CommentThread {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::CommentMode;
    use std::rc::Rc;

    fn thread() -> CommentThread {
        CommentThread::new(3, 0, "", "test", "cell://3", Range::start_of_resource(), false)
    }

    fn recorder<T: Clone + 'static>(event: Event<T>) -> (Rc<RefCell<Vec<T>>>, crate::event::Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = seen.clone();
            event.subscribe(move |v: &T| seen.borrow_mut().push(v.clone()))
        };
        (seen, sub)
    }

    #[test]
    fn setter_fires_even_when_value_is_unchanged() {
        let t = thread();
        let (labels, _sub) = recorder(t.on_did_change_label());
        t.set_label(Some("Discussion".into())).unwrap();
        t.set_label(Some("Discussion".into())).unwrap();
        t.set_label(None).unwrap();
        assert_eq!(*labels.borrow(), vec![Some("Discussion".to_string()), Some("Discussion".to_string()), None]);
        assert_eq!(t.label(), None);
    }

    #[test]
    fn channels_are_independent() {
        let t = thread();
        let (ranges, _r) = recorder(t.on_did_change_range());
        let (replies, _c) = recorder(t.on_did_change_can_reply());
        let (states, _s) = recorder(t.on_did_change_collapsible_state());
        let (inputs, _i) = recorder(t.on_did_change_input());
        let (comments, _m) = recorder(t.on_did_change_comments());

        t.set_label(Some("x".into())).unwrap();
        t.set_can_reply(true).unwrap();
        assert!(ranges.borrow().is_empty());
        assert_eq!(*replies.borrow(), vec![true]);

        t.set_range(Range::new(2, 1, 2, 5)).unwrap();
        t.set_collapsible_state(Some(CollapsibleState::Expanded)).unwrap();
        assert_eq!(*ranges.borrow(), vec![Range::new(2, 1, 2, 5)]);
        assert_eq!(*states.borrow(), vec![Some(CollapsibleState::Expanded)]);
        assert!(inputs.borrow().is_empty());
        assert!(comments.borrow().is_empty());
    }

    #[test]
    fn listener_sees_the_stored_value() {
        let t = Rc::new(thread());
        let observed = Rc::new(RefCell::new(None));
        let _sub = {
            let weak = Rc::downgrade(&t);
            let observed = observed.clone();
            t.on_did_change_comments().subscribe(move |_| {
                if let Some(t) = weak.upgrade() {
                    *observed.borrow_mut() = Some(t.comment_count());
                }
            })
        };
        t.set_comments(vec![Comment::new(1, "a", "one"), Comment::new(2, "b", "two")]).unwrap();
        assert_eq!(*observed.borrow(), Some(2));
    }

    #[test]
    fn context_value_has_no_channel_but_is_guarded() {
        let t = thread();
        t.set_context_value(Some("draft".into())).unwrap();
        assert_eq!(t.context_value().as_deref(), Some("draft"));
        t.dispose();
        assert!(matches!(
            t.set_context_value(None),
            Err(ThreadError::Disposed { field: ThreadField::ContextValue })
        ));
    }

    #[test]
    fn disposed_thread_rejects_every_setter_and_stays_silent() {
        let t = thread();
        let (labels, _l) = recorder(t.on_did_change_label());
        t.dispose();
        let (late, _late) = recorder(t.on_did_change_comments());

        assert!(matches!(t.set_label(Some("x".into())), Err(ThreadError::Disposed { field: ThreadField::Label })));
        assert!(t.set_input(Some(CommentInput::default())).is_err());
        assert!(t.set_comments(vec![Comment::new(1, "a", "b").with_mode(CommentMode::Editing)]).is_err());
        assert!(t.set_range(Range::new(1, 1, 2, 2)).is_err());
        assert!(t.set_can_reply(true).is_err());
        assert!(t.set_collapsible_state(Some(CollapsibleState::Collapsed)).is_err());

        assert!(labels.borrow().is_empty());
        assert!(late.borrow().is_empty());
        assert_eq!(t.label(), None);
        assert!(!t.can_reply());

        t.dispose();
        assert!(t.is_disposed());
    }
}
