//! Event System
//! 
//! Provides a pub/sub event bus so page widgets can react to editor actions.

use parking_lot::RwLock;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::config::{DisplayMode, TextSize};

/// Events emitted by the editor and the page widgets
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Markup was applied to the edit area
    MarkupApplied { command: String, used_sample: bool },
    /// Format picker shown or hidden
    FormatMenuToggled { visible: bool },
    /// A link was followed
    Navigated { url: String, mode: DisplayMode },
    /// A popup window was opened
    PopupOpened { url: String },
    /// The previous popup window was closed
    PopupClosed,
    /// A field group became the visible one
    GroupShown { group: String },
    /// A tab was selected
    TabSelected { id: String },
    /// Upload progress update
    UploadProgress { uploaded: u64, total: u64 },
    /// Upload finished or the id became invalid
    UploadFinished,
    /// Edit area text size changed
    TextSizeChanged(TextSize),
}

/// Subscriber handle for receiving events
#[derive(Clone)]
pub struct EventSubscription {
    receiver: Receiver<Event>,
}

impl EventSubscription {
    /// Receive the next event (blocking)
    pub fn recv(&self) -> Result<Event, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Result<Event, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every event received so far
    pub fn drain(&self) -> Vec<Event> {
        self.receiver.try_iter().collect()
    }
}

/// Event bus for publish/subscribe pattern
pub struct EventBus {
    subscribers: RwLock<Vec<Sender<Event>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        self.subscribers.write().push(sender);
        EventSubscription { receiver }
    }

    /// Emit an event to all subscribers, dropping the ones that hung up
    pub fn emit(&self, event: Event) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        let delivered = subscribers.len();
        
        debug!("Event {:?} delivered to {} subscribers", event, delivered);
        delivered
    }

    /// Get the number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
