//! Element payload: tag, attributes, classes and inline style.

use crate::style::InlineStyle;
use bitflags::bitflags;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Interned, lowercase tag name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    pub fn new(name: &str) -> Self {
        static TAGS: Lazy<RwLock<HashSet<Arc<str>>>> = Lazy::new(|| RwLock::new(HashSet::new()));

        let name = name.to_ascii_lowercase();
        if let Some(tag) = TAGS.read().get(name.as_str()) {
            return TagName(tag.clone());
        }

        let mut tags = TAGS.write();
        if let Some(tag) = tags.get(name.as_str()) {
            return TagName(tag.clone());
        }
        let tag: Arc<str> = Arc::from(name);
        tags.insert(tag.clone());
        TagName(tag)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        /// No end tag (`<source>`, `<img>`, ...).
        const VOID = 1 << 0;
        /// SVG content; attribute names keep their case.
        const FOREIGN = 1 << 1;
        /// Carries the `hidden` attribute.
        const HIDDEN = 1 << 2;
        /// Overlay transport controls are attached to this media element.
        const OVERLAY_ATTACHED = 1 << 3;
    }
}

/// Element data.
#[derive(Clone, Debug)]
pub struct ElementData {
    pub tag_name: TagName,
    pub flags: ElementFlags,
    attributes: IndexMap<String, String>,
    style: InlineStyle,
}

impl ElementData {
    /// An HTML element.
    pub fn new(tag_name: TagName) -> Self {
        let mut flags = ElementFlags::empty();
        if matches!(
            tag_name.as_str(),
            "br" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "track" | "wbr"
        ) {
            flags |= ElementFlags::VOID;
        }
        Self {
            tag_name,
            flags,
            attributes: IndexMap::new(),
            style: InlineStyle::new(),
        }
    }

    /// An element in `namespace`. Only SVG is treated specially.
    pub fn with_namespace(tag_name: TagName, namespace: &str) -> Self {
        let mut elem = Self::new(tag_name);
        if namespace == SVG_NAMESPACE {
            elem.flags = ElementFlags::FOREIGN;
        }
        elem
    }

    fn key(&self, name: &str) -> String {
        if self.flags.contains(ElementFlags::FOREIGN) {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }

    /// Set an attribute. Overwriting keeps the attribute's position.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let key = self.key(name);
        match key.as_str() {
            "style" => self.style = InlineStyle::parse(value),
            "hidden" => self.flags.insert(ElementFlags::HIDDEN),
            _ => {}
        }
        self.attributes.insert(key, value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        let key = self.key(name);
        match key.as_str() {
            "style" => self.style = InlineStyle::new(),
            "hidden" => self.flags.remove(ElementFlags::HIDDEN),
            _ => {}
        }
        self.attributes.shift_remove(&key);
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&self.key(name)).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(&self.key(name))
    }

    /// Set or clear a boolean attribute such as `controls`.
    pub fn toggle_attribute(&mut self, name: &str, present: bool) {
        if present {
            self.set_attribute(name, "");
        } else {
            self.remove_attribute(name);
        }
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let list = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute("class", &list);
    }

    /// Set one declaration of the inline style; the `style` attribute
    /// follows and disappears once the style is empty.
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.set_property(property, value);
        if self.style.is_empty() {
            self.attributes.shift_remove("style");
        } else {
            self.attributes.insert("style".to_string(), self.style.to_string());
        }
    }

    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.style.get_property(property)
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.flags.contains(ElementFlags::VOID)
    }

    /// Hidden through the `hidden` attribute or `display: none`.
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ElementFlags::HIDDEN) || self.style_property("display") == Some("none")
    }
}
