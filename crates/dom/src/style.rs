//! Inline style declarations (the `style` attribute).

use indexmap::IndexMap;
use std::fmt;

/// Ordered set of CSS declarations attached to one element.
///
/// Property names are stored lowercase in their hyphenated form
/// (`background-color`). Values are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    declarations: IndexMap<String, String>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for declaration in css_text.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                style.set_property(name, value.trim());
            }
        }
        style
    }

    /// Set a property. An empty value removes the declaration.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return;
        }
        if value.is_empty() {
            self.declarations.shift_remove(&name);
            return;
        }
        // IndexMap keeps an overwritten key in place
        self.declarations.insert(name, value.to_string());
    }

    /// Get a property value.
    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.declarations
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.declarations {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", name, value)?;
            first = false;
        }
        Ok(())
    }
}
