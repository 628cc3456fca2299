//! Active section tracking and navbar shadow

use folio_dom::{NodeId, Rect};
use folio_runtime::{Event, EventKind, EventTarget, ListenerId, Page, Subscriptions};

use super::{set_class, set_style, Behavior};
use crate::{InteractionConfig, NavHighlightConfig, Result};

/// Index of the current section: the last one whose range
/// `[top - offset, top - offset + height)` contains `scroll_y`
pub fn current_section(sections: &[Rect], scroll_y: f64, offset: f64) -> Option<usize> {
    sections
        .iter()
        .rposition(|rect| {
            let top = rect.top() - offset;
            scroll_y >= top && scroll_y < top + rect.height
        })
}

/// Marks the nav link of the current section `active` and toggles the navbar
/// shadow on every scroll
#[derive(Debug)]
pub struct NavHighlight {
    listener: ListenerId,
    /// Sections with their ids, in document order
    sections: Vec<(NodeId, String)>,
    links: Vec<NodeId>,
    navbar: Option<NodeId>,
    config: NavHighlightConfig,
}

impl NavHighlight {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let document = page.document();
        let sections: Vec<(NodeId, String)> = document
            .query_selector_all(&config.selectors.sections)?
            .into_iter()
            .filter_map(|node| Some((node, document.element(node)?.id()?.to_string())))
            .collect();
        let links = document.query_selector_all(&config.selectors.nav_links)?;
        let navbar = document.query_selector(&config.selectors.navbar)?;

        if navbar.is_none() && (sections.is_empty() || links.is_empty()) {
            return Ok(None);
        }

        let listener = subs.listen(page, EventTarget::Window, EventKind::Scroll);
        Ok(Some(Self { listener, sections, links, navbar, config: config.nav_highlight.clone() }))
    }

    fn update(&self, page: &mut Page) {
        let scroll_y = page.scroll_y();

        if let Some(navbar) = self.navbar {
            let shadow = if scroll_y > self.config.shadow_threshold { self.config.shadow.as_str() } else { "none" };
            set_style(page, navbar, "box-shadow", shadow);
        }

        let rects: Vec<Rect> = self
            .sections
            .iter()
            .map(|(node, _)| page.document().layout(*node).unwrap_or_default())
            .collect();
        let Some(current) = current_section(&rects, scroll_y, self.config.section_offset) else {
            return;
        };

        let href = format!("#{}", self.sections[current].1);
        for &link in &self.links {
            let matches = page
                .document()
                .element(link)
                .and_then(|e| e.attr("href"))
                .is_some_and(|h| h == href);
            set_class(page, link, "active", matches);
        }
    }
}

impl Behavior for NavHighlight {
    fn name(&self) -> &'static str {
        "nav highlight"
    }

    fn on_event(&mut self, page: &mut Page, _subs: &mut Subscriptions, listener: ListenerId, _event: &mut Event) -> bool {
        if listener != self.listener {
            return false;
        }
        self.update(page);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(top: f64, height: f64) -> Rect {
        Rect::from_xywh(0.0, top, 1280.0, height)
    }

    #[test]
    fn test_offset_pre_triggers() {
        let sections = [section(0.0, 800.0), section(800.0, 600.0)];
        assert_eq!(current_section(&sections, 650.0, 100.0), Some(0));
        assert_eq!(current_section(&sections, 700.0, 100.0), Some(1));
        assert_eq!(current_section(&sections, 1300.0, 100.0), None);
    }

    #[test]
    fn test_overlap_last_wins() {
        let sections = [section(0.0, 1000.0), section(500.0, 1000.0)];
        assert_eq!(current_section(&sections, 600.0, 100.0), Some(1));
        assert_eq!(current_section(&sections, 300.0, 100.0), Some(0));
    }

    #[test]
    fn test_no_sections() {
        assert_eq!(current_section(&[], 0.0, 100.0), None);
    }
}
