//! Page state report

use std::fmt;

use folio_dom::{Document, NodeId};
use folio_interactions::InteractionConfig;
use folio_runtime::Page;
use serde::Serialize;

/// An element and one of its inline style values
#[derive(Debug, Serialize)]
pub struct StyledElement {
    pub element: String,
    pub value: String,
}

/// What the interactions did to the page
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub url: String,
    pub time_ms: f64,
    pub scroll_y: f64,
    pub scroll_locked: bool,
    pub menu_open: bool,
    pub hero_title: Option<String>,
    pub active_link: Option<String>,
    pub navbar_shadow: Option<String>,
    pub revealed: Vec<String>,
    pub pending_reveal: Vec<String>,
    pub counters: Vec<String>,
    pub tilted: Vec<StyledElement>,
    pub parallax: Vec<StyledElement>,
    pub behaviors: Vec<&'static str>,
}

impl Snapshot {
    pub fn capture(page: &Page, config: &InteractionConfig, behaviors: Vec<&'static str>) -> Self {
        let doc = page.document();
        let selectors = &config.selectors;
        let all = |selector: &str| doc.query_selector_all(selector).unwrap_or_default();
        let first = |selector: &str| doc.query_selector(selector).ok().flatten();
        let has_class = |node: NodeId, class: &str| doc.element(node).is_some_and(|e| e.classes.contains(class));
        let style = |node: NodeId, property: &str| {
            doc.element(node).and_then(|e| e.style.get(property)).map(str::to_string)
        };

        let (revealed, pending_reveal): (Vec<NodeId>, Vec<NodeId>) =
            all(&selectors.reveal).into_iter().partition(|&n| has_class(n, "active"));
        let styled = |nodes: Vec<NodeId>| -> Vec<StyledElement> {
            nodes
                .into_iter()
                .filter_map(|n| Some(StyledElement { element: describe(doc, n), value: style(n, "transform")? }))
                .collect()
        };

        Self {
            url: doc.url().to_string(),
            time_ms: page.now(),
            scroll_y: page.scroll_y(),
            scroll_locked: page.is_scroll_locked(),
            menu_open: first(&selectors.nav_menu).is_some_and(|n| has_class(n, "active")),
            hero_title: first(&selectors.hero_title).map(|n| doc.text_content(n)),
            active_link: all(&selectors.nav_links)
                .into_iter()
                .find(|&n| has_class(n, "active"))
                .and_then(|n| doc.element(n)?.attr("href").map(|h| h.into_owned())),
            navbar_shadow: first(&selectors.navbar).and_then(|n| style(n, "box-shadow")),
            revealed: revealed.into_iter().map(|n| describe(doc, n)).collect(),
            pending_reveal: pending_reveal.into_iter().map(|n| describe(doc, n)).collect(),
            counters: all(&selectors.stats).into_iter().map(|n| doc.text_content(n)).collect(),
            tilted: styled(all(&selectors.tilt_cards)),
            parallax: styled(all(&selectors.parallax)),
            behaviors,
        }
    }
}

/// `tag#id.first-class`
fn describe(doc: &Document, node: NodeId) -> String {
    let Some(elem) = doc.element(node) else { return node.to_string() };
    let mut out = elem.tag.clone();
    if let Some(id) = elem.id() {
        out.push('#');
        out.push_str(id);
    }
    if let Some(class) = elem.classes.iter().next() {
        out.push('.');
        out.push_str(class);
    }
    out
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_none = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

        writeln!(f, "page:          {}", self.url)?;
        writeln!(f, "time:          {}ms", self.time_ms)?;
        writeln!(f, "scroll:        {}{}", self.scroll_y, if self.scroll_locked { " (locked)" } else { "" })?;
        writeln!(f, "menu:          {}", if self.menu_open { "open" } else { "closed" })?;
        writeln!(f, "hero title:    {:?}", or_none(&self.hero_title))?;
        writeln!(f, "active link:   {}", or_none(&self.active_link))?;
        writeln!(f, "navbar shadow: {}", or_none(&self.navbar_shadow))?;
        writeln!(f, "revealed:      {} of {}", self.revealed.len(), self.revealed.len() + self.pending_reveal.len())?;
        for element in &self.revealed {
            writeln!(f, "  {element}")?;
        }
        writeln!(f, "counters:      {}", self.counters.join(" | "))?;
        for (label, entries) in [("tilt", &self.tilted), ("parallax", &self.parallax)] {
            writeln!(f, "{label}:")?;
            for entry in entries {
                writeln!(f, "  {}: {}", entry.element, entry.value)?;
            }
        }
        write!(f, "behaviors:     {}", self.behaviors.join(", "))
    }
}
