//! Media elements for the host document.
//!
//! A [`MediaElement`] is the playable side of a `<video>` or `<audio>` node:
//! it tracks playback state and announces every change as a notification
//! on the owning document's task queue. Decoding and rendering are not
//! modelled; the host reports readiness through the `set_*` hooks.

pub mod media_element;

pub use media_element::{MediaElement, MediaError, MediaKind, MediaNetworkState, MediaReadyState};
