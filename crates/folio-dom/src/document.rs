//! Document - High-level document API

use crate::{DomTree, ElementData, NodeId, Rect, Result, SelectorList};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let find = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|&c| tree.element(c).is_some_and(|e| e.tag == tag))
                .unwrap_or(NodeId::NONE)
        };
        self.html_element = find(&self.tree, self.tree.root(), "html");
        if self.html_element.is_valid() {
            self.head_element = find(&self.tree, self.html_element, "head");
            self.body_element = find(&self.tree, self.html_element, "body");
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .children(self.head_element)
            .find(|&c| self.tree.element(c).is_some_and(|e| e.tag == "title"))
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(ElementData::id) == Some(id))
    }

    /// First element matching `selector` in document order
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self.select(&list).into_iter().next())
    }

    /// All elements matching `selector` in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self.select(&list))
    }

    /// All elements matching a pre-parsed selector list
    pub fn select(&self, list: &SelectorList) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&n| list.matches(&self.tree, n))
            .collect()
    }

    /// Element data for `node`
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.tree.element(node)
    }

    /// Mutable element data for `node`
    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        self.tree.element_mut(node)
    }

    /// Border box of `node` in document coordinates
    pub fn layout(&self, node: NodeId) -> Option<Rect> {
        self.tree.element(node).map(|e| e.layout)
    }

    /// Assign the border box of `node`
    pub fn set_layout(&mut self, node: NodeId, rect: Rect) {
        if let Some(elem) = self.tree.element_mut(node) {
            elem.layout = rect;
        }
    }

    /// Height of the laid-out content
    pub fn content_height(&self) -> f64 {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter_map(|n| self.layout(n))
            .map(|r| r.bottom())
            .fold(0.0, f64::max)
    }

    /// Text content of `node`
    pub fn text_content(&self, node: NodeId) -> String {
        self.tree.text_content(node)
    }

    /// Replace the children of `node` with text
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.tree.set_text_content(node, text);
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
