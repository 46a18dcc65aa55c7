//! HTML output for DOM subtrees.

use crate::element::ElementData;
use crate::node::{NodeData, NodeId};
use crate::tree::DomTree;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Output formatting.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerializeOptions {
    /// One element per line, indented by depth.
    pub pretty: bool,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

/// Markup of `node` and its subtree.
pub fn serialize_outer_html(tree: &DomTree, node: NodeId) -> String {
    serialize_outer_html_with_options(tree, node, &SerializeOptions::new())
}

pub fn serialize_outer_html_with_options(
    tree: &DomTree,
    node: NodeId,
    options: &SerializeOptions,
) -> String {
    let mut writer = HtmlWriter {
        tree,
        pretty: options.pretty,
        out: String::new(),
    };
    writer.node(node, 0);
    writer.out
}

struct HtmlWriter<'a> {
    tree: &'a DomTree,
    pretty: bool,
    out: String,
}

impl HtmlWriter<'_> {
    fn node(&mut self, node: NodeId, depth: usize) {
        let tree = self.tree;
        let Some(data) = tree.get(node) else {
            return;
        };
        match &data.data {
            NodeData::Document => {
                for child in tree.children(node) {
                    self.node(child, depth);
                }
            }
            NodeData::Element(elem) => self.element(node, elem, depth),
        }
    }

    fn element(&mut self, node: NodeId, elem: &ElementData, depth: usize) {
        self.indent(depth);
        self.open_tag(elem);
        if elem.is_void() {
            self.newline();
            return;
        }

        let tree = self.tree;
        if tree.last_child(node).is_some() {
            self.newline();
            for child in tree.children(node) {
                self.node(child, depth + 1);
            }
            self.indent(depth);
        }
        let _ = write!(self.out, "</{}>", elem.tag_name);
        self.newline();
    }

    fn open_tag(&mut self, elem: &ElementData) {
        let _ = write!(self.out, "<{}", elem.tag_name);
        for (name, value) in elem.attributes() {
            if value.is_empty() {
                let _ = write!(self.out, " {}", name);
            } else {
                let _ = write!(self.out, " {}=\"{}\"", name, escape_attribute(value));
            }
        }
        self.out.push('>');
    }

    fn indent(&mut self, depth: usize) {
        if self.pretty {
            self.out.push_str(&INDENT.repeat(depth));
        }
    }

    fn newline(&mut self) {
        if self.pretty {
            self.out.push('\n');
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
