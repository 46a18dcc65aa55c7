//! Player configuration.

use common::{PlayerError, PlayerResult};
use player_media::MediaKind;
use serde::{Deserialize, Serialize};

/// Options accepted by the player factories.
///
/// Every field is optional; [`PlayerOptions::resolve`] fills the gaps with
/// the documented defaults. Deserializes from camelCase JSON, e.g.
/// `{"controls": false, "showOverlayControls": true}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerOptions {
    /// Show the platform's native transport UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<bool>,
    /// CSS width override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// CSS height override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Build the synthetic play/pause overlay (video only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_overlay_controls: Option<bool>,
}

impl PlayerOptions {
    /// Create empty options; every field takes its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults used when a video player is created without options.
    pub fn video_defaults() -> Self {
        Self {
            controls: Some(true),
            show_overlay_controls: Some(true),
            ..Self::default()
        }
    }

    /// Defaults used when an audio player is created without options.
    pub fn audio_defaults() -> Self {
        Self {
            controls: Some(true),
            ..Self::default()
        }
    }

    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> PlayerResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(PlayerError::invalid_options(format!(
                "expected a JSON object, got {}",
                json.trim()
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Set native controls.
    pub fn with_controls(mut self, controls: bool) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Set width.
    pub fn with_width(mut self, width: &str) -> Self {
        self.width = Some(width.to_string());
        self
    }

    /// Set height.
    pub fn with_height(mut self, height: &str) -> Self {
        self.height = Some(height.to_string());
        self
    }

    /// Set width and height.
    pub fn with_size(self, width: &str, height: &str) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Set overlay controls.
    pub fn with_overlay_controls(mut self, show: bool) -> Self {
        self.show_overlay_controls = Some(show);
        self
    }

    /// Overlay fields from `other` that are set.
    pub fn merge(mut self, other: PlayerOptions) -> Self {
        if other.controls.is_some() {
            self.controls = other.controls;
        }
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.height.is_some() {
            self.height = other.height;
        }
        if other.show_overlay_controls.is_some() {
            self.show_overlay_controls = other.show_overlay_controls;
        }
        self
    }

    /// Normalize into a fully populated record for `kind`.
    ///
    /// Empty dimension strings count as absent. Audio never gets an overlay.
    pub fn resolve(&self, kind: MediaKind) -> ResolvedOptions {
        let dimension = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        ResolvedOptions {
            controls: self.controls.unwrap_or(true),
            width: dimension(&self.width),
            height: dimension(&self.height),
            show_overlay_controls: kind == MediaKind::Video
                && self.show_overlay_controls.unwrap_or(true),
        }
    }
}

/// Options after normalization; what the factory actually applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub controls: bool,
    pub width: Option<String>,
    pub height: Option<String>,
    pub show_overlay_controls: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_resolve_to_defaults() {
        let resolved = PlayerOptions::new().resolve(MediaKind::Video);
        assert!(resolved.controls);
        assert!(resolved.show_overlay_controls);
        assert_eq!(resolved.width, None);
        assert_eq!(resolved.height, None);
    }

    #[test]
    fn test_audio_never_gets_overlay() {
        let options = PlayerOptions::new().with_overlay_controls(true);
        assert!(!options.resolve(MediaKind::Audio).show_overlay_controls);
        assert!(!PlayerOptions::audio_defaults().resolve(MediaKind::Audio).show_overlay_controls);
    }

    #[test]
    fn test_defaults_are_fresh_values() {
        let mut first = PlayerOptions::video_defaults();
        first.controls = Some(false);
        assert_eq!(PlayerOptions::video_defaults().controls, Some(true));
    }

    #[test]
    fn test_empty_dimension_is_absent() {
        let resolved = PlayerOptions::new()
            .with_size("", "360px")
            .resolve(MediaKind::Video);
        assert_eq!(resolved.width, None);
        assert_eq!(resolved.height.as_deref(), Some("360px"));
    }

    #[test]
    fn test_from_json() {
        let options =
            PlayerOptions::from_json(r#"{"controls": false, "width": "640px", "showOverlayControls": false}"#)
                .unwrap();
        assert_eq!(options.controls, Some(false));
        assert_eq!(options.width.as_deref(), Some("640px"));
        assert_eq!(options.height, None);
        assert_eq!(options.show_overlay_controls, Some(false));

        assert_eq!(PlayerOptions::from_json("{}").unwrap(), PlayerOptions::new());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            PlayerOptions::from_json("[]"),
            Err(PlayerError::InvalidOptions(_))
        ));
        assert!(matches!(
            PlayerOptions::from_json(r#"{"controls": "yes"}"#),
            Err(PlayerError::Json(_))
        ));
        assert!(PlayerOptions::from_json(r#"{"autoplay": true}"#).is_err());
    }

    #[test]
    fn test_merge() {
        let base = PlayerOptions::new().with_controls(false).with_width("100%");
        let merged = base.merge(PlayerOptions::new().with_width("640px"));
        assert_eq!(merged.controls, Some(false));
        assert_eq!(merged.width.as_deref(), Some("640px"));
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let json = serde_json::to_string(&PlayerOptions::new().with_overlay_controls(false)).unwrap();
        assert_eq!(json, r#"{"showOverlayControls":false}"#);
    }
}
