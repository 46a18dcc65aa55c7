//! Media element factory.

use crate::handle::PlayerHandle;
use crate::options::PlayerOptions;
use crate::overlay::OverlayControlSync;
use dom::{DocumentRef, NodeId};
use player_media::{MediaElement, MediaKind};
use std::sync::Arc;
use tracing::debug;

/// Creates players inside one shared document.
#[derive(Clone)]
pub struct MediaElementFactory {
    document: DocumentRef,
}

impl MediaElementFactory {
    pub fn new(document: DocumentRef) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &DocumentRef {
        &self.document
    }

    /// Create a `kind` element playing `src`, append it to `container` and
    /// return a handle to it.
    ///
    /// `src` is used verbatim; an unplayable source only surfaces later as
    /// a media error. Never fails.
    pub fn create(
        &self,
        kind: MediaKind,
        src: &str,
        container: NodeId,
        options: &PlayerOptions,
    ) -> PlayerHandle {
        let resolved = options.resolve(kind);
        let mut doc = self.document.write();

        let element = Arc::new(MediaElement::new(&mut doc, kind));
        let node = element.node();
        element.set_src(&mut doc, src);
        element.set_controls(&mut doc, resolved.controls);
        doc.add_class(node, class_for(kind));

        if let Some(width) = &resolved.width {
            doc.set_style(node, "width", width);
        }
        if let Some(height) = &resolved.height {
            doc.set_style(node, "height", height);
        }

        doc.append_child(container, node);

        let overlay = if resolved.show_overlay_controls {
            OverlayControlSync::attach(&mut doc, &element, container)
        } else {
            None
        };

        debug!(
            kind = kind.tag_name(),
            src,
            controls = resolved.controls,
            overlay = overlay.is_some(),
            "created player"
        );

        drop(doc);
        PlayerHandle::new(self.document.clone(), element, overlay)
    }
}

fn class_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "video-player",
        MediaKind::Audio => "audio-player",
    }
}

/// Mount a video player. `None` options use [`PlayerOptions::video_defaults`].
pub fn create_player(
    document: &DocumentRef,
    src: &str,
    container: NodeId,
    options: Option<&PlayerOptions>,
) -> PlayerHandle {
    let defaults = PlayerOptions::video_defaults();
    MediaElementFactory::new(document.clone()).create(
        MediaKind::Video,
        src,
        container,
        options.unwrap_or(&defaults),
    )
}

/// Mount an audio player. `None` options use [`PlayerOptions::audio_defaults`].
pub fn create_audio(
    document: &DocumentRef,
    src: &str,
    container: NodeId,
    options: Option<&PlayerOptions>,
) -> PlayerHandle {
    let defaults = PlayerOptions::audio_defaults();
    MediaElementFactory::new(document.clone()).create(
        MediaKind::Audio,
        src,
        container,
        options.unwrap_or(&defaults),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{OverlayState, OVERLAY_BUTTON_CLASS};
    use dom::Document;

    fn stage() -> (DocumentRef, NodeId) {
        let mut doc = Document::blank();
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", "stage");
        doc.append_to_body(container);
        (doc.into_ref(), container)
    }

    fn children(document: &DocumentRef, node: NodeId) -> Vec<NodeId> {
        document.read().tree.children(node).collect()
    }

    #[test]
    fn test_video_with_empty_options() {
        let (document, container) = stage();
        let player = create_player(&document, "movie.mp4", container, Some(&PlayerOptions::new()));

        let doc = document.read();
        let kids: Vec<_> = doc.tree.children(container).collect();
        assert_eq!(kids.len(), 3);
        assert_eq!(kids[0], player.node());

        let video = doc.element(player.node()).unwrap();
        assert_eq!(video.tag_name.as_str(), "video");
        assert_eq!(video.get_attribute("src"), Some("movie.mp4"));
        assert!(video.has_attribute("controls"));
        assert!(video.has_class("video-player"));

        let overlay = player.overlay().unwrap();
        assert_eq!(&kids[1..], &[overlay.play_button, overlay.pause_button]);
        assert!(overlay.is_play_visible(&doc));
        assert!(!overlay.is_pause_visible(&doc));
    }

    #[test]
    fn test_audio_without_controls() {
        let (document, container) = stage();
        let options = PlayerOptions::new().with_controls(false);
        let player = create_audio(&document, "song.mp3", container, Some(&options));

        assert_eq!(children(&document, container), vec![player.node()]);
        let doc = document.read();
        let audio = doc.element(player.node()).unwrap();
        assert_eq!(audio.tag_name.as_str(), "audio");
        assert!(!audio.has_attribute("controls"));
        assert!(audio.has_class("audio-player"));
        assert!(player.overlay().is_none());
    }

    #[test]
    fn test_explicit_dimensions() {
        let (document, container) = stage();
        let options = PlayerOptions::new().with_size("640px", "360px");
        let player = create_player(&document, "a.mp4", container, Some(&options));

        let doc = document.read();
        assert_eq!(doc.style(player.node(), "width"), Some("640px"));
        assert_eq!(doc.style(player.node(), "height"), Some("360px"));
        assert!(player.overlay().is_some());
    }

    #[test]
    fn test_dimensions_absent_by_default() {
        let (document, container) = stage();
        let player = create_player(&document, "a.mp4", container, None);

        let doc = document.read();
        assert_eq!(doc.style(player.node(), "width"), None);
        assert_eq!(doc.get_attribute(player.node(), "style"), None);
    }

    #[test]
    fn test_controls_default_true() {
        let (document, container) = stage();
        let video = create_player(&document, "a.mp4", container, Some(&PlayerOptions::new()));
        let audio = create_audio(&document, "b.mp3", container, None);
        assert!(video.element().controls());
        assert!(audio.element().controls());
    }

    #[test]
    fn test_overlay_disabled() {
        let (document, container) = stage();
        let options = PlayerOptions::new().with_overlay_controls(false);
        let player = create_player(&document, "a.mp4", container, Some(&options));

        assert!(player.overlay().is_none());
        assert_eq!(children(&document, container), vec![player.node()]);
        assert!(document.read().get_elements_by_class_name(OVERLAY_BUTTON_CLASS).is_empty());
    }

    #[test]
    fn test_audio_ignores_overlay_flag() {
        let (document, container) = stage();
        let options = PlayerOptions::new().with_overlay_controls(true);
        let player = create_audio(&document, "b.mp3", container, Some(&options));
        assert!(player.overlay().is_none());
        assert_eq!(children(&document, container).len(), 1);
    }

    #[test]
    fn test_handle_drives_overlay() {
        let (document, container) = stage();
        let player = create_player(&document, "movie.mp4", container, None);
        let overlay = player.overlay().unwrap();

        player.play();
        document.write().run_pending_events();
        assert_eq!(overlay.state(&document.read()), OverlayState::Playing);

        player.stop();
        document.write().run_pending_events();
        assert_eq!(overlay.state(&document.read()), OverlayState::Paused);
        assert!(player.is_paused());
    }

    #[test]
    fn test_players_share_document() {
        let (document, container) = stage();
        let factory = MediaElementFactory::new(document.clone());
        let first = factory.create(MediaKind::Video, "a.mp4", container, &PlayerOptions::new());
        let second = factory.create(MediaKind::Audio, "b.mp3", container, &PlayerOptions::new());

        assert_eq!(children(&document, container).len(), 4);
        assert_ne!(first.node(), second.node());
    }
}
