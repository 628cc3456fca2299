//! Selector query tests against a portfolio-shaped tree

use folio_dom::{Document, NodeId};

fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = doc.tree_mut().create_element(tag);
    for (name, value) in attrs {
        doc.element_mut(node).unwrap().set_attr(name, value);
    }
    doc.tree_mut().append_child(parent, node);
    node
}

fn portfolio() -> (Document, Vec<NodeId>, Vec<NodeId>) {
    let mut doc = Document::new("file:///index.html");
    let body = doc.body();
    let nav = element(&mut doc, body, "nav", &[("class", "navbar")]);
    let menu = element(&mut doc, nav, "ul", &[("class", "nav-menu")]);
    let links: Vec<NodeId> = ["#home", "#about", "#projects"]
        .iter()
        .map(|href| element(&mut doc, menu, "a", &[("class", "nav-link"), ("href", *href)]))
        .collect();
    let sections: Vec<NodeId> = ["home", "about", "projects"]
        .iter()
        .map(|id| element(&mut doc, body, "section", &[("id", *id)]))
        .collect();
    element(&mut doc, body, "a", &[("href", "https://example.com")]);
    (doc, links, sections)
}

#[test]
fn test_fragment_anchor_query() {
    let (doc, links, _) = portfolio();
    let anchors = doc.query_selector_all(r##"a[href^="#"]"##).unwrap();
    assert_eq!(anchors, links);
}

#[test]
fn test_sections_with_ids_in_document_order() {
    let (doc, _, sections) = portfolio();
    assert_eq!(doc.query_selector_all("section[id]").unwrap(), sections);
}

#[test]
fn test_selector_list_preserves_document_order() {
    let (doc, links, _) = portfolio();
    let found = doc.query_selector_all(".nav-link, .navbar").unwrap();
    assert_eq!(found.len(), 4);
    assert_eq!(&found[1..], &links[..]);
}

#[test]
fn test_fragment_as_selector() {
    let (doc, _, sections) = portfolio();
    assert_eq!(doc.query_selector("#about").unwrap(), Some(sections[1]));
    assert!(doc.query_selector("#").is_err());
    assert_eq!(doc.query_selector("#nowhere").unwrap(), None);
}
