//! Notification bus
//!
//! Controllers hold a clone of the [`NotificationBus`] handed to them at
//! construction and publish into it. The owner of the controllers drains the
//! queue after each input, routes notifications to sibling controllers, then
//! fans them out to any [`Listeners`]. Publishing never calls back into other
//! controllers, so no controller is ever re-entered mid-update.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use slotmap::{new_key_type, SlotMap};

use crate::events::Notification;

new_key_type! {
    /// Handle returned by [`Listeners::subscribe`]
    pub struct ListenerId;
}

/// Observer callback
pub type Listener = Box<dyn FnMut(&Notification) + Send>;

/// Cloneable publish handle over a shared queue
#[derive(Clone, Default)]
pub struct NotificationBus {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, notification: Notification) {
        tracing::trace!("bus: publish {:?}", notification);
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notification);
    }

    /// Take everything published so far, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Registry of external observers
#[derive(Default)]
pub struct Listeners {
    slots: SlotMap<ListenerId, Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.slots.insert(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.slots.remove(id).is_some()
    }

    /// Deliver one notification to every listener, in subscription order
    pub fn dispatch(&mut self, notification: &Notification) {
        for (_, listener) in self.slots.iter_mut() {
            listener(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
