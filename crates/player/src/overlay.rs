//! Overlay transport controls.
//!
//! Two buttons pinned over the mount point. Which one is visible is driven
//! only by the media element's `play` and `pause` notifications, so the
//! overlay follows playback no matter what started or stopped it (the
//! buttons themselves, native controls, or a [`PlayerHandle`]).
//!
//! [`PlayerHandle`]: crate::PlayerHandle

use crate::icons::Icon;
use dom::{Document, ElementFlags, Event, EventType, NodeId};
use player_media::MediaElement;
use std::sync::Arc;
use tracing::{debug, trace};

/// Class carried by both overlay buttons.
pub const OVERLAY_BUTTON_CLASS: &str = "overlay-btn";

/// Declarations shared by both buttons.
const BUTTON_STYLE: [(&str, &str); 8] = [
    ("position", "absolute"),
    ("bottom", "20px"),
    ("padding", "10px"),
    ("background-color", "#121212"),
    ("border", "none"),
    ("color", "white"),
    ("border-radius", "5px"),
    ("cursor", "pointer"),
];

/// What the overlay currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    /// Play button shown, pause button hidden.
    Paused,
    /// Pause button shown, play button hidden.
    Playing,
}

impl OverlayState {
    fn apply(self, doc: &mut Document, controls: &OverlayControls) {
        let (play, pause) = match self {
            OverlayState::Paused => ("block", "none"),
            OverlayState::Playing => ("none", "block"),
        };
        doc.set_style(controls.play_button, "display", play);
        doc.set_style(controls.pause_button, "display", pause);
    }
}

/// The attached button pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayControls {
    pub play_button: NodeId,
    pub pause_button: NodeId,
}

impl OverlayControls {
    /// Read the state back from what is rendered.
    pub fn state(&self, doc: &Document) -> OverlayState {
        if self.is_pause_visible(doc) {
            OverlayState::Playing
        } else {
            OverlayState::Paused
        }
    }

    pub fn is_play_visible(&self, doc: &Document) -> bool {
        is_visible(doc, self.play_button)
    }

    pub fn is_pause_visible(&self, doc: &Document) -> bool {
        is_visible(doc, self.pause_button)
    }
}

fn is_visible(doc: &Document, node: NodeId) -> bool {
    doc.element(node).map(|e| !e.is_hidden()).unwrap_or(false)
}

/// Attaches overlay controls to a media element.
pub struct OverlayControlSync;

impl OverlayControlSync {
    /// Build the overlay over `container` and wire it to `media`.
    ///
    /// Attaching is idempotent per element: a second call leaves the tree
    /// untouched and returns `None`.
    pub fn attach(
        doc: &mut Document,
        media: &Arc<MediaElement>,
        container: NodeId,
    ) -> Option<OverlayControls> {
        let media_node = media.node();
        if doc.has_flag(media_node, ElementFlags::OVERLAY_ATTACHED) {
            debug!(node = ?media_node, "overlay already attached");
            return None;
        }

        let play_button = create_button(doc, Icon::Play, "Play");
        let pause_button = create_button(doc, Icon::Stop, "Pause");
        doc.set_style(play_button, "left", "20px");
        doc.set_style(pause_button, "right", "20px");

        // Pin the overlay to the container's box, not the document's
        doc.set_style(container, "position", "relative");
        doc.append_child(container, play_button);
        doc.append_child(container, pause_button);

        let controls = OverlayControls {
            play_button,
            pause_button,
        };

        let target = media.clone();
        doc.add_event_listener(
            play_button,
            EventType::Click,
            Arc::new(move |doc: &mut Document, _: &mut Event| {
                if let Err(err) = target.play(doc) {
                    debug!(node = ?target.node(), "overlay play rejected: {}", err);
                }
            }),
        );

        let target = media.clone();
        doc.add_event_listener(
            pause_button,
            EventType::Click,
            Arc::new(move |doc: &mut Document, _: &mut Event| target.pause(doc)),
        );

        doc.add_event_listener(
            media_node,
            EventType::Play,
            Arc::new(move |doc: &mut Document, _: &mut Event| {
                trace!("overlay -> playing");
                OverlayState::Playing.apply(doc, &controls);
            }),
        );

        doc.add_event_listener(
            media_node,
            EventType::Pause,
            Arc::new(move |doc: &mut Document, _: &mut Event| {
                trace!("overlay -> paused");
                OverlayState::Paused.apply(doc, &controls);
            }),
        );

        OverlayState::Paused.apply(doc, &controls);
        doc.insert_flag(media_node, ElementFlags::OVERLAY_ATTACHED);
        debug!(node = ?media_node, "overlay attached");

        Some(controls)
    }
}

fn create_button(doc: &mut Document, icon: Icon, label: &str) -> NodeId {
    let button = doc.create_element("button");
    doc.set_attribute(button, "type", "button");
    doc.set_attribute(button, "aria-label", label);
    doc.add_class(button, OVERLAY_BUTTON_CLASS);
    for (property, value) in BUTTON_STYLE {
        doc.set_style(button, property, value);
    }
    let svg = icon.build(doc);
    doc.append_child(button, svg);
    button
}
