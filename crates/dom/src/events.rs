//! Events and the listener registry.

use crate::document::Document;
use crate::node::NodeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Event types the player stack fires or listens for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    LoadStart,
    Emptied,
    CanPlay,
    Play,
    Playing,
    Pause,
    Seeking,
    Seeked,
    TimeUpdate,
    VolumeChange,
    Ended,
    Error,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::LoadStart => "loadstart",
            EventType::Emptied => "emptied",
            EventType::CanPlay => "canplay",
            EventType::Play => "play",
            EventType::Playing => "playing",
            EventType::Pause => "pause",
            EventType::Seeking => "seeking",
            EventType::Seeked => "seeked",
            EventType::TimeUpdate => "timeupdate",
            EventType::VolumeChange => "volumechange",
            EventType::Ended => "ended",
            EventType::Error => "error",
        }
    }

    /// Media notifications are fired at the element only; clicks bubble.
    pub fn bubbles(&self) -> bool {
        matches!(self, EventType::Click)
    }
}

/// An event in flight.
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was fired at.
    pub target: Option<NodeId>,
    /// Node whose listeners are running.
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        let bubbles = event_type.bubbles();
        Self {
            event_type,
            target: None,
            current_target: None,
            bubbles,
        }
    }
}

/// Listener callback.
///
/// Listeners run while the document is borrowed for dispatch, so they get
/// the document itself and may mutate the tree or queue further events.
pub type EventCallback = Arc<dyn Fn(&mut Document, &mut Event) + Send + Sync>;

/// Identifies one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ListenerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone)]
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) callback: EventCallback,
}

/// Listeners keyed by node, then event type, in registration order.
#[derive(Default)]
pub(crate) struct EventManager {
    listeners: HashMap<NodeId, HashMap<EventType, Vec<Listener>>>,
}

impl EventManager {
    pub(crate) fn add(&mut self, node: NodeId, event_type: EventType, callback: EventCallback) -> ListenerId {
        let id = ListenerId::next();
        self.listeners
            .entry(node)
            .or_default()
            .entry(event_type)
            .or_default()
            .push(Listener { id, callback });
        id
    }

    pub(crate) fn remove(&mut self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&node).and_then(|n| n.get_mut(event_type)) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| l.id != id);
        before != list.len()
    }

    pub(crate) fn contains(&self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        self.listeners
            .get(&node)
            .and_then(|n| n.get(event_type))
            .is_some_and(|list| list.iter().any(|l| l.id == id))
    }

    /// Owned copy of the current list, so callbacks can borrow the document.
    pub(crate) fn snapshot(&self, node: NodeId, event_type: &EventType) -> Vec<Listener> {
        self.listeners
            .get(&node)
            .and_then(|n| n.get(event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node: NodeId, event_type: &EventType) -> usize {
        self.listeners
            .get(&node)
            .and_then(|n| n.get(event_type))
            .map_or(0, Vec::len)
    }

    /// Forget every listener registered on `node`.
    pub(crate) fn remove_node(&mut self, node: NodeId) {
        self.listeners.remove(&node);
    }
}
