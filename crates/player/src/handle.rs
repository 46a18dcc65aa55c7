//! Remote-control handle returned by the player factories.

use crate::overlay::OverlayControls;
use dom::{DocumentRef, NodeId};
use player_media::{MediaElement, MediaKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Controls one mounted media element.
///
/// Cheap to clone; every clone drives the same element. None of the
/// operations report failure: whatever the platform does with a request
/// (ignore it, reject it) is logged and otherwise left alone.
///
/// Each call locks the document, so do not call a handle from inside an
/// event listener; listeners get the document directly and should use the
/// [`MediaElement`] instead.
#[derive(Clone)]
pub struct PlayerHandle {
    document: DocumentRef,
    element: Arc<MediaElement>,
    overlay: Option<OverlayControls>,
}

impl PlayerHandle {
    pub(crate) fn new(
        document: DocumentRef,
        element: Arc<MediaElement>,
        overlay: Option<OverlayControls>,
    ) -> Self {
        Self {
            document,
            element,
            overlay,
        }
    }

    /// Request playback.
    pub fn play(&self) {
        let mut doc = self.document.write();
        if let Err(err) = self.element.play(&mut doc) {
            debug!(node = ?self.element.node(), "play rejected: {}", err);
        }
    }

    /// Request suspension.
    pub fn pause(&self) {
        let mut doc = self.document.write();
        self.element.pause(&mut doc);
    }

    /// Pause, then rewind to the start.
    pub fn stop(&self) {
        let mut doc = self.document.write();
        self.element.pause(&mut doc);
        self.element.set_current_time(&mut doc, Duration::ZERO);
    }

    /// Hand `level` to the element unchanged.
    pub fn set_volume(&self, level: f64) {
        let mut doc = self.document.write();
        if let Err(err) = self.element.set_volume(&mut doc, level) {
            debug!(node = ?self.element.node(), level, "volume rejected: {}", err);
        }
    }

    /// The controlled element.
    pub fn element(&self) -> &Arc<MediaElement> {
        &self.element
    }

    /// The element's DOM node.
    pub fn node(&self) -> NodeId {
        self.element.node()
    }

    pub fn kind(&self) -> MediaKind {
        self.element.kind()
    }

    /// The overlay buttons, if this call attached them.
    pub fn overlay(&self) -> Option<OverlayControls> {
        self.overlay
    }

    pub fn is_paused(&self) -> bool {
        self.element.paused()
    }

    pub fn current_time(&self) -> Duration {
        self.element.current_time()
    }

    pub fn volume(&self) -> f64 {
        self.element.volume()
    }

    /// The document this player lives in.
    pub fn document(&self) -> &DocumentRef {
        &self.document
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("element", &self.element)
            .field("overlay", &self.overlay)
            .finish()
    }
}
