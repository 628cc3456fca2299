//! Block layout
//!
//! A deliberately small flow layout: every rendered element is a block
//! stacked under its previous sibling, as wide as its container. Heights
//! come from an inline `height: Npx` when present, otherwise from the
//! children (one line per non-blank text run). This is enough geometry for
//! scroll, visibility and pointer hit-testing.

use crate::{Document, DomTree, NodeId, Rect};

/// Elements that generate no box
const NON_RENDERED: &[&str] = &["head", "title", "meta", "link", "script", "style", "template"];

/// Vertical block flow layout
#[derive(Debug, Clone, Copy)]
pub struct BlockLayout {
    /// Initial containing block width
    pub viewport_width: f64,
    /// Height of one line of text
    pub line_height: f64,
}

impl BlockLayout {
    pub fn new(viewport_width: f64) -> Self {
        Self { viewport_width, line_height: 24.0 }
    }

    /// Lay out the whole document; returns the content height
    pub fn apply(&self, doc: &mut Document) -> f64 {
        let root = doc.tree().root();
        let height = self.layout_children(doc.tree_mut(), root, 0.0, 0.0, self.viewport_width);
        tracing::debug!("Block layout: {} nodes, {}px tall", doc.tree().len(), height);
        height
    }

    fn layout_children(&self, tree: &mut DomTree, parent: NodeId, x: f64, y: f64, width: f64) -> f64 {
        let children: Vec<NodeId> = tree.children(parent).collect();
        let mut cursor = y;
        for child in children {
            cursor += self.layout_node(tree, child, x, cursor, width);
        }
        cursor - y
    }

    fn layout_node(&self, tree: &mut DomTree, node: NodeId, x: f64, y: f64, width: f64) -> f64 {
        if let Some(text) = tree.get(node).and_then(|n| n.as_text()) {
            return if text.trim().is_empty() { 0.0 } else { self.line_height };
        }

        let Some(elem) = tree.element(node) else { return 0.0 };
        if NON_RENDERED.contains(&elem.tag.as_str()) || elem.style.get("display") == Some("none") {
            return 0.0;
        }
        let fixed_height = elem.style.px("height");
        let width = elem.style.px("width").unwrap_or(width);

        let content = self.layout_children(tree, node, x, y, width);
        let height = fixed_height.unwrap_or(content);

        if let Some(elem) = tree.element_mut(node) {
            elem.layout = Rect::from_xywh(x, y, width, height);
        }
        height
    }
}
