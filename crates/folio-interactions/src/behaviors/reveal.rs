//! Scroll reveal

use std::collections::HashSet;

use folio_dom::NodeId;
use folio_runtime::{IntersectionEntry, IntersectionObserverOptions, ObserverId, Page, RootMargin, Subscriptions};

use super::Behavior;
use crate::{InteractionConfig, Result};

/// Marks content blocks `reveal` up front and `reveal active` the first time
/// they come into view
#[derive(Debug)]
pub struct ScrollReveal {
    observer: ObserverId,
    threshold: f64,
    revealed: HashSet<NodeId>,
}

impl ScrollReveal {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let elements = page.document().query_selector_all(&config.selectors.reveal)?;
        if elements.is_empty() {
            return Ok(None);
        }
        let root_margin = RootMargin::parse(&config.reveal.root_margin)?;
        let options = IntersectionObserverOptions::new(&[config.reveal.threshold], root_margin);

        for &node in &elements {
            if let Some(elem) = page.document_mut().element_mut(node) {
                elem.classes.add(&["reveal"]);
            }
        }
        tracing::debug!("Watching {} elements for reveal", elements.len());

        let observer = subs.observe(page, options, &elements);
        Ok(Some(Self { observer, threshold: config.reveal.threshold, revealed: HashSet::new() }))
    }

    /// Whether `node` has been revealed
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }
}

impl Behavior for ScrollReveal {
    fn name(&self) -> &'static str {
        "scroll reveal"
    }

    fn on_intersection(
        &mut self,
        page: &mut Page,
        _subs: &mut Subscriptions,
        observer: ObserverId,
        entries: &[IntersectionEntry],
    ) -> bool {
        if observer != self.observer {
            return false;
        }
        for entry in entries {
            if !entry.reaches(self.threshold) || !self.revealed.insert(entry.target) {
                continue;
            }
            if let Some(elem) = page.document_mut().element_mut(entry.target) {
                elem.classes.add(&["reveal", "active"]);
            }
            page.unobserve(observer, entry.target);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Rect;
    use folio_runtime::PageOptions;

    fn visible(page: &Page, target: NodeId) -> IntersectionEntry {
        let rect = Rect::from_xywh(0.0, 100.0, 1280.0, 300.0);
        IntersectionEntry {
            target,
            bounding_client_rect: rect,
            intersection_rect: rect,
            root_bounds: page.viewport(),
            intersection_ratio: 1.0,
            is_intersecting: true,
            time: page.now(),
        }
    }

    #[test]
    fn test_repeated_entries_reveal_once() {
        let doc = folio_html::parse(r#"<div class="about-content"></div><div class="project-card"></div>"#).unwrap();
        let mut page = Page::new(doc, PageOptions::default());
        let mut subs = Subscriptions::new();
        let mut reveal = ScrollReveal::init(&mut page, &mut subs, &InteractionConfig::default()).unwrap().unwrap();
        let about = page.document().query_selector(".about-content").unwrap().unwrap();
        let card = page.document().query_selector(".project-card").unwrap().unwrap();
        let observer = reveal.observer;

        let entry = visible(&page, about);
        assert!(reveal.on_intersection(&mut page, &mut subs, observer, &[entry.clone(), entry.clone()]));
        assert!(reveal.on_intersection(&mut page, &mut subs, observer, &[entry]));

        assert!(reveal.is_revealed(about));
        assert!(!reveal.is_revealed(card));
        assert_eq!(page.document().element(about).unwrap().classes.value(), "about-content reveal active");
        assert_eq!(page.document().element(card).unwrap().classes.value(), "project-card reveal");
    }

    #[test]
    fn test_entry_below_threshold_is_ignored() {
        let doc = folio_html::parse(r#"<div class="about-content"></div>"#).unwrap();
        let mut page = Page::new(doc, PageOptions::default());
        let mut subs = Subscriptions::new();
        let mut reveal = ScrollReveal::init(&mut page, &mut subs, &InteractionConfig::default()).unwrap().unwrap();
        let about = page.document().query_selector(".about-content").unwrap().unwrap();

        let entry = IntersectionEntry { intersection_ratio: 0.05, ..visible(&page, about) };
        reveal.on_intersection(&mut page, &mut subs, reveal.observer, &[entry]);

        assert!(!reveal.is_revealed(about));
        assert!(!page.document().element(about).unwrap().classes.contains("active"));
    }
}
