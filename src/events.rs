//! Events.
//!
//! The overlay only listens to one kind of event: the modifier keys changing. Whoever owns the
//! window forwards those to a [`Notifications`] source, and an enabled overlay holds a
//! [`Subscription`] to it.

use bitflags::bitflags;
use crossbeam::channel::{self, Receiver, Sender, TryIter, TrySendError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

bitflags! {
    /// Modifier key state, using the toolkit’s bit layout.
    ///
    /// The low 16 bits are device-dependent and carry no meaning here; they’re retained but
    /// masked off by [`ModifierFlags::DEVICE_INDEPENDENT_FLAGS_MASK`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u64 {
        /// Caps lock is engaged.
        const CAPS_LOCK = 1 << 16;
        /// Any shift key is pressed.
        const SHIFT = 1 << 17;
        /// Any control key is pressed.
        const CONTROL = 1 << 18;
        /// Any option key or alt key is pressed.
        const OPTION = 1 << 19;
        /// Any command key or meta key is pressed.
        const COMMAND = 1 << 20;
        /// A key on the numeric pad is involved.
        const NUMERIC_PAD = 1 << 21;
        /// The help key is pressed.
        const HELP = 1 << 22;
        /// The function key is pressed.
        const FUNCTION = 1 << 23;

        /// Every bit that is the same across input devices.
        const DEVICE_INDEPENDENT_FLAGS_MASK = 0xffff_0000;

        const _ = !0;
    }
}

/// The modifier keys changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagsChanged {
    /// Modifier state after the change.
    pub modifiers: ModifierFlags,
}

impl FlagsChanged {
    pub fn new(modifiers: ModifierFlags) -> Self {
        FlagsChanged { modifiers }
    }

    /// Raw event flags, as delivered by the window.
    pub fn from_bits(bits: u64) -> Self {
        FlagsChanged {
            modifiers: ModifierFlags::from_bits_retain(bits),
        }
    }
}

/// How many notifications a subscription holds before the oldest ones are dropped.
///
/// Only the latest modifier state matters to a subscriber, so a subscription nobody polls for a
/// while keeps its tail instead of growing without bound.
pub const QUEUE_CAPACITY: usize = 16;

#[derive(Debug)]
struct Registration {
    id: u64,
    sender: Sender<FlagsChanged>,
    /// Shares the subscriber’s queue so a full queue can shed its oldest entry.
    backlog: Receiver<FlagsChanged>,
}

impl Registration {
    fn deliver(&self, mut event: FlagsChanged) {
        loop {
            match self.sender.try_send(event) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    let _ = self.backlog.try_recv();
                    event = rejected;
                }
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

type Subscribers = Mutex<Vec<Registration>>;

/// A source of modifier-change notifications.
///
/// Cloning yields another handle to the same source.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    subscribers: Arc<Subscribers>,
    next_id: Arc<AtomicU64>,
}

impl Notifications {
    pub fn new() -> Notifications {
        Notifications::default()
    }

    /// Registers a new subscriber. Dropping the subscription unregisters it.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = channel::bounded(QUEUE_CAPACITY);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().push(Registration {
            id,
            sender,
            backlog: receiver.clone(),
        });

        Subscription {
            id,
            receiver,
            source: Arc::downgrade(&self.subscribers),
        }
    }

    /// Delivers an event to every subscriber and returns how many received it.
    ///
    /// Never blocks; a subscriber with a full queue loses its oldest notification.
    pub fn post(&self, event: FlagsChanged) -> usize {
        let subscribers = self.subscribers.lock();
        for registration in subscribers.iter() {
            registration.deliver(event);
        }
        subscribers.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// A registration with a [`Notifications`] source.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: Receiver<FlagsChanged>,
    source: Weak<Subscribers>,
}

impl Subscription {
    /// Iterates over the notifications that have arrived so far, without blocking.
    pub fn try_iter(&self) -> TryIter<'_, FlagsChanged> {
        self.receiver.try_iter()
    }

    /// Whether the source still exists.
    pub fn is_connected(&self) -> bool {
        self.source.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.source.upgrade() {
            let id = self.id;
            subscribers.lock().retain(|registration| registration.id != id);
        }
    }
}
