//! In-memory XML-like configuration tree
//!
//! [`XmlConfiguration`] holds a document with a single named root element.
//! Values live in element text or in attributes and are addressed by path
//! expressions relative to the root:
//!
//! - `a.b.c` - nested elements, created on demand by the setters
//! - `host[1]` - second sibling element called `host`
//! - `disk[@name=s3]` - first `disk` element whose `name` attribute is `s3`
//! - `server[@port]` - the `port` attribute of `server`
//!
//! ```rust
//! use cfgtree::{ConfigStore, XmlConfiguration};
//!
//! let mut config = XmlConfiguration::new("clickhouse");
//! config.set_string("storage.disk", "s3")?;
//! config.set_u64("storage.max_size", 10)?;
//!
//! assert_eq!(config.get_string("storage.disk")?, "s3");
//! assert_eq!(config.keys("storage"), vec!["disk", "max_size"]);
//! # Ok::<(), cfgtree::Error>(())
//! ```

pub(crate) mod path;

use crate::error::{Error, Result};
use crate::store::ConfigStore;
use crate::value::ScalarKind;
use path::{ParsedPath, Selector};

/// Default separator between path segments
pub const DEFAULT_SEPARATOR: char = '.';

/// Default root element name used by [`XmlConfiguration::default`]
pub const DEFAULT_ROOT_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    fn count_named(&self, name: &str) -> usize {
        self.children.iter().filter(|c| c.name == name).count()
    }

    fn position_of(&self, name: &str, selector: &Selector) -> Option<usize> {
        match selector {
            Selector::Index(index) => self
                .children
                .iter()
                .enumerate()
                .filter(|(_, c)| c.name == name)
                .nth(*index)
                .map(|(pos, _)| pos),
            Selector::Attribute {
                name: attr,
                value,
            } => self
                .children
                .iter()
                .position(|c| c.name == name && c.attribute(attr) == Some(value.as_str())),
        }
    }

    fn child(&self, name: &str, selector: &Selector) -> Option<&Element> {
        self.position_of(name, selector).map(|pos| &self.children[pos])
    }

    fn push_child(&mut self, name: &str, selector: &Selector) -> usize {
        let mut element = Element::new(name);
        if let Selector::Attribute { name: attr, value } = selector {
            element.set_attribute(attr, value.clone());
        }
        self.children.push(element);
        self.children.len() - 1
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attributes.is_empty() && self.children.is_empty()
    }
}

/// Resolved target of a path
enum Node<'a> {
    Element(&'a Element),
    Attribute(&'a str),
}

/// Hierarchical in-memory configuration document.
///
/// Intermediate elements are created on demand by the setters. Numbers are
/// stored as their canonical decimal text, so every value written through a
/// typed setter reads back unchanged through the matching getter.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlConfiguration {
    root: Element,
    separator: char,
}

impl Default for XmlConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME)
    }
}

impl XmlConfiguration {
    /// Create an empty document whose root element is named `root_name`
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: Element::new(root_name),
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Create a builder for a document with a custom path separator
    ///
    /// # Example
    /// ```rust
    /// use cfgtree::{ConfigStore, XmlConfiguration};
    ///
    /// let mut config = XmlConfiguration::builder("root").separator('/').build();
    /// config.set_string("server/host", "localhost")?;
    /// assert!(config.has("server/host"));
    /// # Ok::<(), cfgtree::Error>(())
    /// ```
    pub fn builder(root_name: impl Into<String>) -> XmlConfigurationBuilder {
        XmlConfigurationBuilder::new(root_name)
    }

    /// Name of the document root element
    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Separator between path segments
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Whether the root holds no text, attributes or child elements
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Distinct names of the child elements at `path`, in document order.
    ///
    /// An empty `path` lists the children of the root. Returns an empty list
    /// when the path does not resolve to an element.
    pub fn keys(&self, path: &str) -> Vec<String> {
        let element = if path.is_empty() {
            &self.root
        } else {
            let Ok(parsed) = path::parse(path, self.separator) else {
                return Vec::new();
            };
            let Some(Node::Element(element)) = self.find(&parsed) else {
                return Vec::new();
            };
            element
        };

        let mut keys: Vec<String> = Vec::new();
        for child in &element.children {
            if !keys.contains(&child.name) {
                keys.push(child.name.clone());
            }
        }
        keys
    }

    fn find(&self, parsed: &ParsedPath) -> Option<Node<'_>> {
        let mut current = &self.root;
        for (name, selector) in &parsed.elements {
            current = current.child(name, selector)?;
        }
        match &parsed.attribute {
            Some(attr) => current.attribute(attr).map(Node::Attribute),
            None => Some(Node::Element(current)),
        }
    }

    fn get_raw(&self, path: &str) -> Result<String> {
        let parsed = path::parse(path, self.separator)?;
        match self.find(&parsed) {
            Some(Node::Element(element)) => Ok(element.text.clone()),
            Some(Node::Attribute(value)) => Ok(value.to_string()),
            None => Err(Error::MissingKey(path.to_string())),
        }
    }

    /// Walk the existing prefix and make sure every missing step can be created.
    ///
    /// Runs before any mutation so a failing write leaves the tree untouched.
    fn check_creatable(&self, parsed: &ParsedPath, path: &str) -> Result<()> {
        let mut current = Some(&self.root);
        for (name, selector) in &parsed.elements {
            let (existing, count) = match current {
                Some(element) => (element.child(name, selector), element.count_named(name)),
                None => (None, 0),
            };
            if existing.is_none() {
                if let Selector::Index(index) = selector {
                    if *index != count {
                        return Err(Error::invalid_path(
                            path,
                            format!("cannot create `{name}[{index}]`: only {count} `{name}` element(s) exist"),
                        ));
                    }
                }
            }
            current = existing;
        }
        Ok(())
    }

    fn element_mut(
        &mut self,
        parsed: &[(String, Selector)],
        create: bool,
    ) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for (name, selector) in parsed {
            let position = match current.position_of(name, selector) {
                Some(position) => position,
                None if create => current.push_child(name, selector),
                None => return None,
            };
            current = &mut current.children[position];
        }
        Some(current)
    }

    fn set_raw(&mut self, path: &str, value: String) -> Result<()> {
        let parsed = path::parse(path, self.separator)?;
        self.check_creatable(&parsed, path)?;

        let element = self
            .element_mut(&parsed.elements, true)
            .ok_or_else(|| Error::invalid_path(path, "cannot create element"))?;
        match &parsed.attribute {
            Some(attr) => element.set_attribute(attr, value),
            None => element.text = value,
        }
        Ok(())
    }

    fn remove_raw(&mut self, path: &str) -> Result<()> {
        let parsed = path::parse(path, self.separator)?;

        if let Some(attr) = &parsed.attribute {
            if let Some(element) = self.element_mut(&parsed.elements, false) {
                element.remove_attribute(attr);
            }
            return Ok(());
        }

        let Some(((name, selector), parents)) = parsed.elements.split_last() else {
            return Err(Error::invalid_path(path, "the root element cannot be removed"));
        };

        if let Some(parent) = self.element_mut(parents, false) {
            if let Some(position) = parent.position_of(name, selector) {
                parent.children.remove(position);
            }
        }
        Ok(())
    }
}

fn invalid_value(path: &str, kind: ScalarKind, value: &str) -> Error {
    Error::InvalidValue {
        path: path.to_string(),
        kind: kind.to_string(),
        value: value.to_string(),
    }
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn parse_u64(path: &str, raw: &str) -> Result<u64> {
    let text = raw.trim();
    match strip_hex_prefix(text) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    }
    .map_err(|_| invalid_value(path, ScalarKind::UInt64, raw))
}

fn parse_i64(path: &str, raw: &str) -> Result<i64> {
    let text = raw.trim();
    match strip_hex_prefix(text) {
        // Hex literals spell out the two's complement bit pattern
        Some(hex) => u64::from_str_radix(hex, 16).map(|v| v as i64),
        None => text.parse::<i64>(),
    }
    .map_err(|_| invalid_value(path, ScalarKind::Int64, raw))
}

fn parse_f64(path: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| invalid_value(path, ScalarKind::Float64, raw))
}

impl ConfigStore for XmlConfiguration {
    fn has(&self, path: &str) -> bool {
        path::parse(path, self.separator)
            .map(|parsed| self.find(&parsed).is_some())
            .unwrap_or(false)
    }

    fn get_string(&self, path: &str) -> Result<String> {
        self.get_raw(path)
    }

    fn get_u64(&self, path: &str) -> Result<u64> {
        parse_u64(path, &self.get_raw(path)?)
    }

    fn get_i64(&self, path: &str) -> Result<i64> {
        parse_i64(path, &self.get_raw(path)?)
    }

    fn get_f64(&self, path: &str) -> Result<f64> {
        parse_f64(path, &self.get_raw(path)?)
    }

    fn set_string(&mut self, path: &str, value: &str) -> Result<()> {
        self.set_raw(path, value.to_string())
    }

    fn set_u64(&mut self, path: &str, value: u64) -> Result<()> {
        self.set_raw(path, value.to_string())
    }

    fn set_i64(&mut self, path: &str, value: i64) -> Result<()> {
        self.set_raw(path, value.to_string())
    }

    fn set_f64(&mut self, path: &str, value: f64) -> Result<()> {
        self.set_raw(path, value.to_string())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        self.remove_raw(path)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`XmlConfiguration`] with a fluent API
#[derive(Debug, Clone)]
pub struct XmlConfigurationBuilder {
    root_name: String,
    separator: char,
}

impl XmlConfigurationBuilder {
    /// Create a new builder with the required root element name
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Set the path separator (default: `.`)
    ///
    /// `[`, `]`, `@` and `=` are reserved by the path grammar and are ignored.
    pub fn separator(mut self, separator: char) -> Self {
        if matches!(separator, '[' | ']' | '@' | '=') {
            log::warn!("Ignoring reserved path separator '{separator}'");
        } else {
            self.separator = separator;
        }
        self
    }

    /// Build the empty document
    pub fn build(self) -> XmlConfiguration {
        XmlConfiguration {
            root: Element::new(self.root_name),
            separator: self.separator,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
