//! Inline SVG icons for the overlay buttons.

use dom::element::SVG_NAMESPACE;
use dom::{Document, NodeId};

/// Transparent 24×24 frame shared by every icon.
const FRAME_PATH: &str = "M0 0h24v24H0z";

const PLAY_PATH: &str = "M7 4v16l13 -8z";

const STOP_PATH: &str =
    "M5 5m0 2a2 2 0 0 1 2 -2h10a2 2 0 0 1 2 2v10a2 2 0 0 1 -2 2h-10a2 2 0 0 1 -2 -2z";

/// Overlay icon glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Play,
    Stop,
}

impl Icon {
    fn class_name(&self) -> &'static str {
        match self {
            Icon::Play => "icon icon-tabler icon-tabler-player-play",
            Icon::Stop => "icon icon-tabler icon-tabler-player-stop",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Icon::Play => PLAY_PATH,
            Icon::Stop => STOP_PATH,
        }
    }

    /// Build the icon as a detached `<svg>` subtree and return its root.
    pub fn build(&self, doc: &mut Document) -> NodeId {
        let svg = doc.create_element_ns(SVG_NAMESPACE, "svg");
        for (name, value) in [
            ("xmlns", SVG_NAMESPACE),
            ("class", self.class_name()),
            ("width", "32"),
            ("height", "32"),
            ("viewBox", "0 0 24 24"),
            ("stroke-width", "1.5"),
            ("stroke", "#ffffff"),
            ("fill", "none"),
            ("stroke-linecap", "round"),
            ("stroke-linejoin", "round"),
        ] {
            doc.set_attribute(svg, name, value);
        }

        let frame = doc.create_element_ns(SVG_NAMESPACE, "path");
        doc.set_attribute(frame, "stroke", "none");
        doc.set_attribute(frame, "d", FRAME_PATH);
        doc.set_attribute(frame, "fill", "none");
        doc.append_child(svg, frame);

        let glyph = doc.create_element_ns(SVG_NAMESPACE, "path");
        doc.set_attribute(glyph, "d", self.path());
        doc.append_child(svg, glyph);

        svg
    }
}
