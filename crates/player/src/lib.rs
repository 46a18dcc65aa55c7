//! Embeddable media players.
//!
//! This crate mounts `<video>` and `<audio>` players into a host document:
//! - Option normalization
//! - Element creation and configuration
//! - Overlay play/pause controls kept in step with playback
//! - A small remote-control handle per player

pub mod factory;
pub mod handle;
pub mod icons;
pub mod options;
pub mod overlay;

pub use factory::{create_audio, create_player, MediaElementFactory};
pub use handle::PlayerHandle;
pub use options::{PlayerOptions, ResolvedOptions};
pub use overlay::{OverlayControlSync, OverlayControls, OverlayState};
pub use player_media::MediaKind;

/// Player version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
