//! Common utilities and types shared by the player crates.

pub mod error;

pub use error::{PlayerError, PlayerResult};
