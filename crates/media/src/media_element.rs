//! HTMLMediaElement base implementation.

use dom::{Document, EventType, NodeId};
use parking_lot::RwLock;
use std::time::Duration;
use tracing::{debug, trace};

/// Which kind of media element to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Tag name of the element.
    pub fn tag_name(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

/// Media element (base for audio and video).
///
/// State setters that the platform would announce take the owning
/// [`Document`] and queue the matching notification on it. The element's
/// node is created detached; the caller decides where to insert it.
#[derive(Debug)]
pub struct MediaElement {
    /// Backing DOM node.
    node: NodeId,
    /// Video or audio.
    kind: MediaKind,
    /// Source URL, verbatim.
    src: RwLock<String>,
    /// Current source URL (resolved against the document base).
    current_src: RwLock<String>,
    /// Network state.
    network_state: RwLock<MediaNetworkState>,
    /// Ready state.
    ready_state: RwLock<MediaReadyState>,
    /// Seeking flag.
    seeking: RwLock<bool>,
    /// Current time.
    current_time: RwLock<Duration>,
    /// Duration.
    duration: RwLock<Option<Duration>>,
    /// Paused flag.
    paused: RwLock<bool>,
    /// Ended flag.
    ended: RwLock<bool>,
    /// Controls flag.
    controls: RwLock<bool>,
    /// Volume.
    volume: RwLock<f64>,
    /// Muted flag.
    muted: RwLock<bool>,
    /// Error.
    error: RwLock<Option<MediaError>>,
}

impl MediaElement {
    /// Create a new, detached media element node in `doc`.
    pub fn new(doc: &mut Document, kind: MediaKind) -> Self {
        let node = doc.create_element(kind.tag_name());
        Self {
            node,
            kind,
            src: RwLock::new(String::new()),
            current_src: RwLock::new(String::new()),
            network_state: RwLock::new(MediaNetworkState::Empty),
            ready_state: RwLock::new(MediaReadyState::HaveNothing),
            seeking: RwLock::new(false),
            current_time: RwLock::new(Duration::ZERO),
            duration: RwLock::new(None),
            paused: RwLock::new(true),
            ended: RwLock::new(false),
            controls: RwLock::new(false),
            volume: RwLock::new(1.0),
            muted: RwLock::new(false),
            error: RwLock::new(None),
        }
    }

    /// Backing DOM node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Video or audio.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    // Source attributes

    /// Get src attribute.
    pub fn src(&self) -> String {
        self.src.read().clone()
    }

    /// Set src attribute verbatim and restart loading.
    pub fn set_src(&self, doc: &mut Document, src: &str) {
        *self.src.write() = src.to_string();
        doc.set_attribute(self.node, "src", src);
        self.load(doc);
    }

    /// Get current src.
    pub fn current_src(&self) -> String {
        self.current_src.read().clone()
    }

    // Network and ready state

    /// Get network state.
    pub fn network_state(&self) -> MediaNetworkState {
        *self.network_state.read()
    }

    /// Get ready state.
    pub fn ready_state(&self) -> MediaReadyState {
        *self.ready_state.read()
    }

    /// Check if seeking.
    pub fn seeking(&self) -> bool {
        *self.seeking.read()
    }

    // Playback state

    /// Get current time.
    pub fn current_time(&self) -> Duration {
        *self.current_time.read()
    }

    /// Seek. Clamped to the duration once it is known.
    pub fn set_current_time(&self, doc: &mut Document, time: Duration) {
        let time = match *self.duration.read() {
            Some(duration) => time.min(duration),
            None => time,
        };

        *self.seeking.write() = true;
        doc.queue_event(self.node, EventType::Seeking);
        *self.current_time.write() = time;
        *self.ended.write() = false;
        *self.seeking.write() = false;
        doc.queue_event(self.node, EventType::TimeUpdate);
        doc.queue_event(self.node, EventType::Seeked);
    }

    /// Get duration.
    pub fn duration(&self) -> Option<Duration> {
        *self.duration.read()
    }

    /// Check if paused.
    pub fn paused(&self) -> bool {
        *self.paused.read()
    }

    /// Check if ended.
    pub fn ended(&self) -> bool {
        *self.ended.read()
    }

    // Controls

    /// Get controls.
    pub fn controls(&self) -> bool {
        *self.controls.read()
    }

    /// Set controls, reflected as the boolean `controls` attribute.
    pub fn set_controls(&self, doc: &mut Document, controls: bool) {
        *self.controls.write() = controls;
        doc.toggle_attribute(self.node, "controls", controls);
    }

    /// Get volume.
    pub fn volume(&self) -> f64 {
        *self.volume.read()
    }

    /// Set volume. Values outside `[0, 1]` are rejected and leave the
    /// volume unchanged.
    pub fn set_volume(&self, doc: &mut Document, volume: f64) -> Result<(), MediaError> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(MediaError::IndexSize(volume));
        }
        let changed = {
            let mut current = self.volume.write();
            let changed = *current != volume;
            *current = volume;
            changed
        };
        if changed {
            doc.queue_event(self.node, EventType::VolumeChange);
        }
        Ok(())
    }

    /// Get muted.
    pub fn muted(&self) -> bool {
        *self.muted.read()
    }

    /// Set muted. Shares the `volumechange` notification with volume.
    pub fn set_muted(&self, doc: &mut Document, muted: bool) {
        let was_muted = std::mem::replace(&mut *self.muted.write(), muted);
        if was_muted != muted {
            doc.queue_event(self.node, EventType::VolumeChange);
        }
    }

    // Methods

    /// Load the media resource.
    pub fn load(&self, doc: &mut Document) {
        if *self.network_state.read() != MediaNetworkState::Empty {
            doc.queue_event(self.node, EventType::Emptied);
        }

        *self.ready_state.write() = MediaReadyState::HaveNothing;
        *self.current_time.write() = Duration::ZERO;
        *self.duration.write() = None;
        *self.ended.write() = false;
        *self.paused.write() = true;

        let src = self.src.read().clone();
        if src.is_empty() {
            *self.network_state.write() = MediaNetworkState::NoSource;
            *self.current_src.write() = String::new();
            self.set_error(doc, MediaError::SrcNotSupported);
            return;
        }

        // currentSrc is the resolved URL; an unresolvable locator is kept
        // as-is and left for the loader to reject.
        let resolved = doc
            .resolve_url(&src)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| src.clone());
        trace!(src = %src, current_src = %resolved, "load");

        *self.current_src.write() = resolved;
        *self.error.write() = None;
        *self.network_state.write() = MediaNetworkState::Loading;
        doc.queue_event(self.node, EventType::LoadStart);
    }

    /// Play the media.
    ///
    /// Announces `play` immediately when leaving the paused state;
    /// `playing` follows once enough data is available.
    pub fn play(&self, doc: &mut Document) -> Result<(), MediaError> {
        if let Some(MediaError::SrcNotSupported) = *self.error.read() {
            return Err(MediaError::SrcNotSupported);
        }

        if *self.ended.read() {
            self.set_current_time(doc, Duration::ZERO);
        }

        let was_paused = std::mem::replace(&mut *self.paused.write(), false);
        if was_paused {
            debug!(node = ?self.node, "play");
            doc.queue_event(self.node, EventType::Play);
            if self.ready_state() >= MediaReadyState::HaveFutureData {
                doc.queue_event(self.node, EventType::Playing);
            }
        }
        Ok(())
    }

    /// Pause the media.
    pub fn pause(&self, doc: &mut Document) {
        let was_paused = std::mem::replace(&mut *self.paused.write(), true);
        if !was_paused {
            debug!(node = ?self.node, "pause");
            doc.queue_event(self.node, EventType::TimeUpdate);
            doc.queue_event(self.node, EventType::Pause);
        }
    }

    /// Get error.
    pub fn error(&self) -> Option<MediaError> {
        self.error.read().clone()
    }

    // Platform hooks

    /// Report a new ready state.
    pub fn set_ready_state(&self, doc: &mut Document, state: MediaReadyState) {
        let previous = std::mem::replace(&mut *self.ready_state.write(), state);
        if previous < MediaReadyState::HaveFutureData && state >= MediaReadyState::HaveFutureData {
            *self.network_state.write() = MediaNetworkState::Idle;
            doc.queue_event(self.node, EventType::CanPlay);
            if !self.paused() {
                doc.queue_event(self.node, EventType::Playing);
            }
        }
    }

    /// Report the resource duration.
    pub fn set_duration(&self, duration: Duration) {
        *self.duration.write() = Some(duration);
    }

    /// Report that playback ran to the end of the resource.
    pub fn reach_end(&self, doc: &mut Document) {
        if let Some(duration) = self.duration() {
            *self.current_time.write() = duration;
        }
        *self.ended.write() = true;
        doc.queue_event(self.node, EventType::TimeUpdate);
        let was_paused = std::mem::replace(&mut *self.paused.write(), true);
        if !was_paused {
            doc.queue_event(self.node, EventType::Pause);
        }
        doc.queue_event(self.node, EventType::Ended);
    }

    /// Report a loading or decoding failure.
    pub fn set_error(&self, doc: &mut Document, error: MediaError) {
        debug!(node = ?self.node, code = error.code(), "media error: {}", error);
        *self.error.write() = Some(error);
        if *self.network_state.read() == MediaNetworkState::Loading {
            *self.network_state.write() = MediaNetworkState::Idle;
        }
        doc.queue_event(self.node, EventType::Error);
    }
}

/// Media ready state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MediaReadyState {
    /// No information about media.
    HaveNothing = 0,
    /// Metadata available.
    HaveMetadata = 1,
    /// Current frame available.
    HaveCurrentData = 2,
    /// Future data available.
    HaveFutureData = 3,
    /// Enough data for playback.
    HaveEnoughData = 4,
}

/// Media network state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaNetworkState {
    /// Not initialized.
    Empty = 0,
    /// Idle (no activity).
    Idle = 1,
    /// Loading.
    Loading = 2,
    /// No source found.
    NoSource = 3,
}

/// Media error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MediaError {
    #[error("Media aborted")]
    Aborted,

    #[error("Network error")]
    Network,

    #[error("Decode error")]
    Decode,

    #[error("Source not supported")]
    SrcNotSupported,

    #[error("Volume {0} outside of [0, 1]")]
    IndexSize(f64),
}

impl MediaError {
    /// Get error code.
    pub fn code(&self) -> u16 {
        match self {
            MediaError::Aborted => 1,
            MediaError::Network => 2,
            MediaError::Decode => 3,
            MediaError::SrcNotSupported => 4,
            MediaError::IndexSize(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(kind: MediaKind) -> (Document, MediaElement) {
        let mut doc = Document::blank();
        let element = MediaElement::new(&mut doc, kind);
        doc.append_to_body(element.node());
        (doc, element)
    }

    #[test]
    fn test_media_element() {
        let (mut doc, element) = mounted(MediaKind::Video);
        assert_eq!(element.ready_state(), MediaReadyState::HaveNothing);
        assert!(element.paused());
        assert_eq!(doc.element(element.node()).unwrap().tag_name.as_str(), "video");

        element.set_src(&mut doc, "https://example.com/video.mp4");
        assert_eq!(element.network_state(), MediaNetworkState::Loading);
        assert_eq!(doc.get_attribute(element.node(), "src"), Some("https://example.com/video.mp4"));
        assert_eq!(doc.pending_events_for(element.node()), vec![EventType::LoadStart]);
    }

    #[test]
    fn test_src_kept_verbatim() {
        let (mut doc, element) = mounted(MediaKind::Audio);
        element.set_src(&mut doc, "song.mp3");
        assert_eq!(element.src(), "song.mp3");
        assert_eq!(doc.get_attribute(element.node(), "src"), Some("song.mp3"));
    }

    #[test]
    fn test_empty_src_rejects_play() {
        let (mut doc, element) = mounted(MediaKind::Video);
        element.set_src(&mut doc, "");
        assert_eq!(element.network_state(), MediaNetworkState::NoSource);
        assert_eq!(element.play(&mut doc), Err(MediaError::SrcNotSupported));
        assert!(element.paused());
    }

    #[test]
    fn test_play_pause_notifications() {
        let (mut doc, element) = mounted(MediaKind::Video);
        element.set_src(&mut doc, "movie.mp4");
        doc.run_pending_events();

        element.play(&mut doc).unwrap();
        element.play(&mut doc).unwrap();
        assert!(!element.paused());
        assert_eq!(doc.pending_events_for(element.node()), vec![EventType::Play]);
        doc.run_pending_events();

        element.pause(&mut doc);
        element.pause(&mut doc);
        assert!(element.paused());
        assert_eq!(
            doc.pending_events_for(element.node()),
            vec![EventType::TimeUpdate, EventType::Pause]
        );
    }

    #[test]
    fn test_playing_follows_readiness() {
        let (mut doc, element) = mounted(MediaKind::Video);
        element.set_src(&mut doc, "movie.mp4");
        element.play(&mut doc).unwrap();
        doc.run_pending_events();

        element.set_ready_state(&mut doc, MediaReadyState::HaveEnoughData);
        assert_eq!(
            doc.pending_events_for(element.node()),
            vec![EventType::CanPlay, EventType::Playing]
        );
    }

    #[test]
    fn test_seek_resets_position() {
        let (mut doc, element) = mounted(MediaKind::Video);
        element.set_src(&mut doc, "movie.mp4");
        element.set_duration(Duration::from_secs(60));
        doc.run_pending_events();

        element.set_current_time(&mut doc, Duration::from_secs(90));
        assert_eq!(element.current_time(), Duration::from_secs(60));

        element.set_current_time(&mut doc, Duration::ZERO);
        assert_eq!(element.current_time(), Duration::ZERO);
        assert!(!element.seeking());
    }

    #[test]
    fn test_volume() {
        let (mut doc, element) = mounted(MediaKind::Audio);
        assert!(element.set_volume(&mut doc, 0.5).is_ok());
        assert_eq!(element.volume(), 0.5);

        assert_eq!(element.set_volume(&mut doc, 1.5), Err(MediaError::IndexSize(1.5)));
        assert!(element.set_volume(&mut doc, -0.1).is_err());
        assert!(element.set_volume(&mut doc, f64::NAN).is_err());
        assert_eq!(element.volume(), 0.5);
        assert_eq!(doc.pending_events_for(element.node()), vec![EventType::VolumeChange]);
    }

    #[test]
    fn test_muted() {
        let (mut doc, element) = mounted(MediaKind::Video);
        doc.run_pending_events();
        assert!(!element.muted());

        element.set_muted(&mut doc, true);
        element.set_muted(&mut doc, true);
        assert!(element.muted());
        assert_eq!(element.volume(), 1.0);
        assert_eq!(doc.pending_events_for(element.node()), vec![EventType::VolumeChange]);
    }

    #[test]
    fn test_controls_attribute() {
        let (mut doc, element) = mounted(MediaKind::Video);
        element.set_controls(&mut doc, true);
        assert!(element.controls());
        assert!(doc.element(element.node()).unwrap().has_attribute("controls"));

        element.set_controls(&mut doc, false);
        assert!(!doc.element(element.node()).unwrap().has_attribute("controls"));
    }

    #[test]
    fn test_reach_end() {
        let (mut doc, element) = mounted(MediaKind::Video);
        element.set_src(&mut doc, "movie.mp4");
        element.set_duration(Duration::from_secs(5));
        element.play(&mut doc).unwrap();
        doc.run_pending_events();

        element.reach_end(&mut doc);
        assert!(element.ended());
        assert!(element.paused());
        assert_eq!(element.current_time(), Duration::from_secs(5));
        assert_eq!(
            doc.pending_events_for(element.node()),
            vec![EventType::TimeUpdate, EventType::Pause, EventType::Ended]
        );

        // Playing again restarts from the beginning
        element.play(&mut doc).unwrap();
        assert_eq!(element.current_time(), Duration::ZERO);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MediaError::SrcNotSupported.code(), 4);
        assert_eq!(MediaError::Network.code(), 2);
        assert_eq!(MediaError::IndexSize(2.0).code(), 0);
    }
}
