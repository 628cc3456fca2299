//! DOM Node
//!
//! Nodes link to each other through `NodeId`s into the tree arena instead
//! of pointers, so the whole tree is a single `Vec`.

use std::borrow::Cow;

use crate::{ClassList, InlineStyle, NodeId, Rect};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a doctype node
    pub fn doctype(name: String) -> Self {
        Self::with_data(NodeData::Doctype { name })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are not kept in `attrs`; they live in `classes` and
/// `style` so scripts can mutate them without reparsing.
#[derive(Debug)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: String,
    /// Remaining attributes in source order
    pub attrs: Vec<Attribute>,
    /// Class list
    pub classes: ClassList,
    /// Inline style declarations
    pub style: InlineStyle,
    /// Border box in document coordinates
    pub layout: Rect,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: ClassList::new(),
            style: InlineStyle::new(),
            layout: Rect::default(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "class" if !self.classes.is_empty() => Some(Cow::Owned(self.classes.value())),
            "class" => None,
            "style" if !self.style.is_empty() => Some(Cow::Owned(self.style.css_text())),
            "style" => None,
            _ => self
                .attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| Cow::Borrowed(a.value.as_str())),
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.classes.set_value(value),
            "style" => self.style.set_css_text(value),
            _ => {
                if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
                    attr.value = value.to_string();
                } else {
                    self.attrs.push(Attribute { name, value: value.to_string() });
                }
            }
        }
    }

    /// Check for attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        match name {
            "class" => !self.classes.is_empty(),
            "style" => !self.style.is_empty(),
            _ => self.attrs.iter().any(|a| a.name == name),
        }
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.iter().find(|a| a.name == "id").map(|a| a.value.as_str())
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_and_style_attrs_are_routed() {
        let mut elem = ElementData::new("DIV");
        elem.set_attr("class", "card  project-card");
        elem.set_attr("style", "height: 100px");
        elem.set_attr("id", "about");

        assert_eq!(elem.tag, "div");
        assert!(elem.classes.contains("project-card"));
        assert_eq!(elem.style.get("height"), Some("100px"));
        assert_eq!(elem.id(), Some("about"));
        assert_eq!(elem.attr("class").as_deref(), Some("card project-card"));
        assert!(elem.has_attr("style"));
        assert!(!elem.has_attr("href"));
        assert!(elem.attrs.iter().all(|a| a.name != "class"));
    }

    #[test]
    fn test_set_attr_overwrites() {
        let mut elem = ElementData::new("a");
        elem.set_attr("href", "#home");
        elem.set_attr("href", "#about");
        assert_eq!(elem.attr("href").as_deref(), Some("#about"));
        assert_eq!(elem.attrs.len(), 1);
    }
}
