//! DOM (Document Object Model) implementation.
//!
//! This crate provides the host presentation tree media players are mounted
//! into: ordered children, attributes, inline style, class lists, and event
//! listeners fed by a single-threaded task queue.

pub mod node;
pub mod document;
pub mod element;
pub mod style;
pub mod tree;
pub mod events;
pub mod serializer;

pub use node::{Node, NodeData, NodeId};
pub use document::{Document, DocumentRef};
pub use element::{ElementData, ElementFlags, TagName};
pub use style::InlineStyle;
pub use tree::DomTree;
pub use events::{Event, EventCallback, EventType, ListenerId};
