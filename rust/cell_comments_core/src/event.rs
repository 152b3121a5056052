//! Single-topic notification channels.
//!
//! An [`Emitter`] owns the listeners of one channel; consumers reach it
//! through an [`Event`] handle and keep a [`Subscription`] guard for as long
//! as they want to be notified. Everything is single-threaded (`Rc` +
//! `RefCell`), listeners run outside of any internal borrow so they are free
//! to read or mutate whatever fired them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Channel<T> {
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
    disposed: bool,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self { listeners: Vec::new(), next_id: 0, disposed: false }
    }
}

/// Owning side of a channel.
pub struct Emitter<T> {
    channel: Rc<RefCell<Channel<T>>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self { channel: Rc::new(RefCell::new(Channel::default())) }
    }

    /// Subscribe-only view handed out to observers.
    pub fn event(&self) -> Event<T> {
        Event { channel: Rc::downgrade(&self.channel) }
    }

    /// Deliver `value` to every listener registered at the time of the call,
    /// in registration order. Does nothing once the emitter is disposed.
    pub fn fire(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = {
            let channel = self.channel.borrow();
            if channel.disposed {
                return;
            }
            channel.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        tracing::trace!(listeners = snapshot.len(), "fire");
        for listener in snapshot {
            listener(value);
        }
    }

    /// Close the channel for good. Listeners are dropped and later
    /// subscriptions are inert. Calling it again is a no-op.
    pub fn dispose(&self) {
        let listeners = {
            let mut channel = self.channel.borrow_mut();
            if channel.disposed {
                return;
            }
            channel.disposed = true;
            std::mem::take(&mut channel.listeners)
        };
        // Listeners may own subscriptions on this channel; drop them unborrowed.
        drop(listeners);
    }

    pub fn is_disposed(&self) -> bool {
        self.channel.borrow().disposed
    }

    pub fn listener_count(&self) -> usize {
        self.channel.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = self.channel.borrow();
        f.debug_struct("Emitter")
            .field("listeners", &channel.listeners.len())
            .field("disposed", &channel.disposed)
            .finish()
    }
}

/// Subscribe side of a channel. Holds the emitter weakly, so an `Event`
/// outliving its emitter simply yields inert subscriptions.
pub struct Event<T> {
    channel: Weak<RefCell<Channel<T>>>,
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self { channel: self.channel.clone() }
    }
}

impl<T: 'static> Event<T> {
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let Some(channel) = self.channel.upgrade() else {
            return Subscription::inert();
        };
        let id = {
            let mut inner = channel.borrow_mut();
            if inner.disposed {
                tracing::trace!("subscribe on closed channel");
                return Subscription::inert();
            }
            let id = inner.next_id;
            inner.next_id += 1;
            let listener: Listener<T> = Rc::new(listener);
            inner.listeners.push((id, listener));
            id
        };
        let weak = Rc::downgrade(&channel);
        Subscription {
            release: Some(Box::new(move || {
                let Some(channel) = weak.upgrade() else {
                    return;
                };
                let removed = {
                    let mut inner = channel.borrow_mut();
                    let index = inner.listeners.iter().position(|(lid, _)| *lid == id);
                    index.map(|i| inner.listeners.remove(i))
                };
                drop(removed);
            })),
        }
    }
}

/// Keeps a listener attached; dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches the listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn inert() -> Self {
        Self { release: None }
    }

    /// False when the subscription was taken on a closed channel.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}
