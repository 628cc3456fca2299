//! Mobile navigation toggle

use folio_dom::NodeId;
use folio_runtime::{Event, EventKind, EventTarget, ListenerId, Page, Subscriptions};

use super::{set_class, set_scroll_lock, Behavior};
use crate::{InteractionConfig, Result};

/// Opens and closes the navigation menu
///
/// The menu is open iff the menu panel carries `active`; the body is scroll
/// locked while it is open. Any nav link closes the menu.
#[derive(Debug)]
pub struct NavToggle {
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    toggle_listener: Option<ListenerId>,
    link_listeners: Vec<ListenerId>,
}

impl NavToggle {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let selectors = &config.selectors;
        let toggle = page.document().query_selector(&selectors.nav_toggle)?;
        let menu = page.document().query_selector(&selectors.nav_menu)?;
        let links = page.document().query_selector_all(&selectors.nav_links)?;

        if toggle.is_none() && links.is_empty() {
            return Ok(None);
        }

        let toggle_listener = toggle.map(|node| subs.listen(page, EventTarget::Node(node), EventKind::Click));
        let link_listeners = links
            .into_iter()
            .map(|link| subs.listen(page, EventTarget::Node(link), EventKind::Click))
            .collect();

        Ok(Some(Self { toggle, menu, toggle_listener, link_listeners }))
    }

    /// Whether the menu panel is open
    pub fn is_open(&self, page: &Page) -> bool {
        self.menu
            .and_then(|menu| page.document().element(menu))
            .is_some_and(|menu| menu.classes.contains("active"))
    }

    fn flip(&self, page: &mut Page) {
        if let Some(toggle) = self.toggle {
            if let Some(elem) = page.document_mut().element_mut(toggle) {
                elem.classes.toggle("active", None);
            }
        }
        let Some(menu) = self.menu else { return };
        let open = match page.document_mut().element_mut(menu) {
            Some(elem) => elem.classes.toggle("active", None),
            None => return,
        };
        set_scroll_lock(page, open);
        tracing::debug!("Navigation menu {}", if open { "opened" } else { "closed" });
    }

    fn close(&self, page: &mut Page) {
        if let Some(toggle) = self.toggle {
            set_class(page, toggle, "active", false);
        }
        if let Some(menu) = self.menu {
            set_class(page, menu, "active", false);
        }
        set_scroll_lock(page, false);
    }
}

impl Behavior for NavToggle {
    fn name(&self) -> &'static str {
        "nav toggle"
    }

    fn on_event(&mut self, page: &mut Page, _subs: &mut Subscriptions, listener: ListenerId, _event: &mut Event) -> bool {
        if self.toggle_listener == Some(listener) {
            self.flip(page);
            true
        } else if self.link_listeners.contains(&listener) {
            self.close(page);
            true
        } else {
            false
        }
    }
}
