//! Smooth scrolling for in-page links

use folio_dom::{NodeId, ScrollBehavior};
use folio_runtime::{Event, EventKind, EventTarget, ListenerId, Page, Subscriptions};

use super::Behavior;
use crate::{InteractionConfig, Result};

/// Replaces fragment-link navigation with a smooth scroll to the target
#[derive(Debug)]
pub struct SmoothScrollLinks {
    anchors: Vec<(ListenerId, NodeId)>,
}

impl SmoothScrollLinks {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let anchors = page.document().query_selector_all(&config.selectors.anchors)?;
        if anchors.is_empty() {
            return Ok(None);
        }

        let anchors = anchors
            .into_iter()
            .map(|anchor| (subs.listen(page, EventTarget::Node(anchor), EventKind::Click), anchor))
            .collect();
        Ok(Some(Self { anchors }))
    }

    fn follow(&self, page: &mut Page, anchor: NodeId) {
        let Some(href) = page
            .document()
            .element(anchor)
            .and_then(|a| a.attr("href"))
            .map(|href| href.into_owned())
        else {
            return;
        };

        // The href doubles as a selector; "#" alone does not parse
        match page.document().query_selector(&href) {
            Ok(Some(target)) => page.scroll_into_view(target, ScrollBehavior::Smooth),
            Ok(None) => tracing::debug!("No element matches {}", href),
            Err(e) => tracing::debug!("Ignoring link {:?}: {}", href, e),
        }
    }
}

impl Behavior for SmoothScrollLinks {
    fn name(&self) -> &'static str {
        "smooth scroll"
    }

    fn on_event(&mut self, page: &mut Page, _subs: &mut Subscriptions, listener: ListenerId, event: &mut Event) -> bool {
        let Some(&(_, anchor)) = self.anchors.iter().find(|(id, _)| *id == listener) else {
            return false;
        };
        event.prevent_default();
        self.follow(page, anchor);
        true
    }
}
