//! The host document.

use crate::element::{ElementData, ElementFlags, TagName};
use crate::events::{Event, EventCallback, EventManager, EventType, ListenerId};
use crate::node::NodeId;
use crate::tree::DomTree;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::trace;
use url::Url;

/// A notification waiting on the task queue.
#[derive(Clone, Debug)]
struct Task {
    target: NodeId,
    event_type: EventType,
}

/// DOM Document.
///
/// Owns the node tree, the listener registry and a FIFO task queue.
/// Everything runs on one thread; notifications queued while a listener
/// runs are dispatched in order by [`Document::run_pending_events`].
pub struct Document {
    pub tree: DomTree,
    /// Base for resolving relative source locators.
    pub url: Url,
    body: NodeId,
    events: EventManager,
    tasks: VecDeque<Task>,
}

impl Document {
    /// A document with an empty `<html><head></head><body></body></html>` skeleton.
    pub fn new(url: Url) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element(ElementData::new(TagName::new("html")));
        let head = tree.create_element(ElementData::new(TagName::new("head")));
        let body = tree.create_element(ElementData::new(TagName::new("body")));
        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url,
            body,
            events: EventManager::default(),
            tasks: VecDeque::new(),
        }
    }

    pub fn blank() -> Self {
        Self::new(Url::parse("about:blank").expect("about:blank is a valid URL"))
    }

    pub fn into_ref(self) -> DocumentRef {
        Arc::new(RwLock::new(self))
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree.create_element(ElementData::new(TagName::new(tag_name)))
    }

    /// Create a detached element in `namespace` (SVG).
    pub fn create_element_ns(&mut self, namespace: &str, tag_name: &str) -> NodeId {
        self.tree
            .create_element(ElementData::with_namespace(TagName::new(tag_name), namespace))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    pub fn append_to_body(&mut self, node: NodeId) {
        self.tree.append_child(self.body, node);
    }

    /// Remove `node` with its subtree. Listeners registered on any removed
    /// node are dropped; queued notifications for them are discarded when
    /// the queue runs.
    pub fn remove_node(&mut self, node: NodeId) {
        let removed = self.tree.remove(node);
        trace!(count = removed.len(), "remove subtree");
        for id in removed {
            self.events.remove_node(id);
        }
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.tree.get_element(node)
    }

    fn with_element(&mut self, node: NodeId, f: impl FnOnce(&mut ElementData)) {
        if let Some(elem) = self.tree.get_element_mut(node) {
            f(elem);
        }
    }

    // Unknown nodes are ignored by every setter below.

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.with_element(node, |e| e.set_attribute(name, value));
    }

    pub fn toggle_attribute(&mut self, node: NodeId, name: &str, present: bool) {
        self.with_element(node, |e| e.toggle_attribute(name, present));
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.get_attribute(name))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.with_element(node, |e| e.add_class(class));
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.with_element(node, |e| e.set_style(property, value));
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.style_property(property))
    }

    pub fn has_flag(&self, node: NodeId, flag: ElementFlags) -> bool {
        self.element(node).is_some_and(|e| e.flags.contains(flag))
    }

    pub fn insert_flag(&mut self, node: NodeId, flag: ElementFlags) {
        self.with_element(node, |e| e.flags.insert(flag));
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_element_by_id(id)
    }

    pub fn get_elements_by_class_name(&self, class_names: &str) -> Vec<NodeId> {
        self.tree.find_elements_by_class_name(class_names)
    }

    /// Resolve a locator against the document URL.
    pub fn resolve_url(&self, url: &str) -> Result<Url, url::ParseError> {
        self.url.join(url)
    }

    // Events

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        callback: EventCallback,
    ) -> ListenerId {
        self.events.add(node, event_type, callback)
    }

    /// Unsubscribe. Takes effect immediately, also for a dispatch in progress.
    pub fn remove_event_listener(&mut self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        self.events.remove(node, event_type, id)
    }

    pub fn listener_count(&self, node: NodeId, event_type: &EventType) -> usize {
        self.events.count(node, event_type)
    }

    /// Fire `event` at `target`, then up through its ancestors if it bubbles.
    pub fn dispatch_event(&mut self, target: NodeId, event: &mut Event) {
        trace!(event = event.event_type.as_str(), "dispatch");
        event.target = Some(target);

        let path: Vec<NodeId> = if event.bubbles {
            std::iter::once(target).chain(self.tree.ancestors(target)).collect()
        } else {
            vec![target]
        };

        for node in path {
            event.current_target = Some(node);
            for listener in self.events.snapshot(node, &event.event_type) {
                // An earlier listener may have unsubscribed this one
                if self.events.contains(node, &event.event_type, listener.id) {
                    (listener.callback)(self, event);
                }
            }
        }
        event.current_target = None;
    }

    /// User activation of `target`.
    pub fn click(&mut self, target: NodeId) {
        self.dispatch_event(target, &mut Event::new(EventType::Click));
    }

    /// Queue a notification for a later turn.
    pub fn queue_event(&mut self, target: NodeId, event_type: EventType) {
        trace!(event = event_type.as_str(), "queue");
        self.tasks.push_back(Task { target, event_type });
    }

    /// Event types queued for `target`, in dispatch order.
    pub fn pending_events_for(&self, target: NodeId) -> Vec<EventType> {
        self.tasks
            .iter()
            .filter(|task| task.target == target)
            .map(|task| task.event_type.clone())
            .collect()
    }

    /// Drain the queue in FIFO order, including anything listeners queue
    /// along the way. Tasks whose target is gone are dropped. Returns the
    /// number of events dispatched.
    pub fn run_pending_events(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(task) = self.tasks.pop_front() {
            if self.tree.get(task.target).is_none() {
                continue;
            }
            self.dispatch_event(task.target, &mut Event::new(task.event_type));
            dispatched += 1;
        }
        dispatched
    }
}

/// Shared document reference.
pub type DocumentRef = Arc<RwLock<Document>>;

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Arc<RwLock<Vec<String>>>;

    fn recorder(log: &Log, label: &'static str) -> EventCallback {
        let log = log.clone();
        Arc::new(move |_: &mut Document, event: &mut Event| {
            log.write().push(format!("{}:{}", label, event.event_type.as_str()));
        })
    }

    fn mounted(doc: &mut Document, tag: &str) -> NodeId {
        let node = doc.create_element(tag);
        doc.append_to_body(node);
        node
    }

    #[test]
    fn test_blank_document() {
        let doc = Document::blank();
        assert_eq!(doc.url.as_str(), "about:blank");
        assert_eq!(doc.element(doc.body()).unwrap().tag_name.as_str(), "body");
    }

    #[test]
    fn test_attributes_and_style() {
        let mut doc = Document::blank();
        let stage = mounted(&mut doc, "div");
        doc.set_attribute(stage, "id", "stage");
        doc.set_style(stage, "position", "relative");

        assert_eq!(doc.get_element_by_id("stage"), Some(stage));
        assert_eq!(doc.style(stage, "position"), Some("relative"));
        assert_eq!(doc.get_attribute(stage, "style"), Some("position: relative;"));
    }

    #[test]
    fn test_flags() {
        let mut doc = Document::blank();
        let video = mounted(&mut doc, "video");
        assert!(!doc.has_flag(video, ElementFlags::OVERLAY_ATTACHED));
        doc.insert_flag(video, ElementFlags::OVERLAY_ATTACHED);
        assert!(doc.has_flag(video, ElementFlags::OVERLAY_ATTACHED));
        assert_eq!(doc.element(video).unwrap().attributes().count(), 0);
    }

    #[test]
    fn test_click_bubbles_media_events_do_not() {
        let mut doc = Document::blank();
        let stage = mounted(&mut doc, "div");
        let video = doc.create_element("video");
        let button = doc.create_element("button");
        doc.append_child(stage, video);
        doc.append_child(stage, button);

        let log = Log::default();
        doc.add_event_listener(button, EventType::Click, recorder(&log, "button"));
        doc.add_event_listener(stage, EventType::Click, recorder(&log, "stage"));
        doc.add_event_listener(video, EventType::Play, recorder(&log, "video"));
        doc.add_event_listener(stage, EventType::Play, recorder(&log, "stage"));

        doc.click(button);
        doc.dispatch_event(video, &mut Event::new(EventType::Play));
        assert_eq!(*log.read(), vec!["button:click", "stage:click", "video:play"]);
    }

    #[test]
    fn test_listener_removed_mid_dispatch_does_not_run() {
        let mut doc = Document::blank();
        let video = mounted(&mut doc, "video");
        let log = Log::default();

        let victim = Arc::new(RwLock::new(None::<ListenerId>));
        let slot = victim.clone();
        doc.add_event_listener(
            video,
            EventType::Pause,
            Arc::new(move |doc: &mut Document, event: &mut Event| {
                if let (Some(target), Some(id)) = (event.target, *slot.read()) {
                    doc.remove_event_listener(target, &EventType::Pause, id);
                }
            }),
        );
        let second = doc.add_event_listener(video, EventType::Pause, recorder(&log, "second"));
        *victim.write() = Some(second);

        doc.dispatch_event(video, &mut Event::new(EventType::Pause));
        assert!(log.read().is_empty());
        assert_eq!(doc.listener_count(video, &EventType::Pause), 1);
    }

    #[test]
    fn test_queue_is_fifo_and_reentrant() {
        let mut doc = Document::blank();
        let video = mounted(&mut doc, "video");

        let log = Log::default();
        doc.add_event_listener(video, EventType::Play, recorder(&log, "v"));
        doc.add_event_listener(video, EventType::Pause, recorder(&log, "v"));
        doc.add_event_listener(video, EventType::Playing, recorder(&log, "v"));
        doc.add_event_listener(
            video,
            EventType::Play,
            Arc::new(|doc: &mut Document, event: &mut Event| {
                if let Some(target) = event.target {
                    doc.queue_event(target, EventType::Playing);
                }
            }),
        );

        doc.queue_event(video, EventType::Play);
        doc.queue_event(video, EventType::Pause);
        assert_eq!(doc.pending_events_for(video), vec![EventType::Play, EventType::Pause]);

        assert_eq!(doc.run_pending_events(), 3);
        assert_eq!(*log.read(), vec!["v:play", "v:pause", "v:playing"]);
        assert!(doc.pending_events_for(video).is_empty());
    }

    #[test]
    fn test_remove_node_drops_listeners_and_tasks() {
        let mut doc = Document::blank();
        let stage = mounted(&mut doc, "div");
        let video = doc.create_element("video");
        doc.append_child(stage, video);

        let log = Log::default();
        doc.add_event_listener(video, EventType::Play, recorder(&log, "video"));
        doc.add_event_listener(stage, EventType::Click, recorder(&log, "stage"));
        doc.queue_event(video, EventType::Play);

        doc.remove_node(stage);
        assert_eq!(doc.listener_count(video, &EventType::Play), 0);
        assert_eq!(doc.listener_count(stage, &EventType::Click), 0);
        assert_eq!(doc.run_pending_events(), 0);
        assert!(log.read().is_empty());
    }

    #[test]
    fn test_remove_node_releases_captured_state() {
        let mut doc = Document::blank();
        let video = mounted(&mut doc, "video");
        let state = Arc::new(());
        let captured = state.clone();
        doc.add_event_listener(
            video,
            EventType::Play,
            Arc::new(move |_: &mut Document, _: &mut Event| {
                let _ = Arc::strong_count(&captured);
            }),
        );
        assert_eq!(Arc::strong_count(&state), 2);

        doc.remove_node(video);
        assert_eq!(Arc::strong_count(&state), 1);
    }

    #[test]
    fn test_resolve_url() {
        let doc = Document::new(Url::parse("https://example.com/media/").unwrap());
        let url = doc.resolve_url("movie.mp4").unwrap();
        assert_eq!(url.as_str(), "https://example.com/media/movie.mp4");
    }
}
