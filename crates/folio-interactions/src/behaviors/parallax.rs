//! Parallax on decorative elements

use folio_dom::SelectorList;
use folio_runtime::{Event, EventKind, EventTarget, ListenerId, Page, Subscriptions};

use super::{set_style, Behavior};
use crate::{InteractionConfig, ParallaxConfig, Result};

/// Vertical offset of the `index`-th element at `scroll_y`
pub fn parallax_offset(scroll_y: f64, index: usize, config: &ParallaxConfig) -> f64 {
    scroll_y * (config.base_speed + index as f64 * config.speed_step)
}

/// Shifts each decorative element by a scroll-proportional amount, later
/// elements faster
#[derive(Debug)]
pub struct Parallax {
    listener: ListenerId,
    /// Elements are looked up on every scroll
    selector: SelectorList,
    config: ParallaxConfig,
}

impl Parallax {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let selector = SelectorList::parse(&config.selectors.parallax)?;
        let listener = subs.listen(page, EventTarget::Window, EventKind::Scroll);
        Ok(Some(Self { listener, selector, config: config.parallax.clone() }))
    }
}

impl Behavior for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn on_event(&mut self, page: &mut Page, _subs: &mut Subscriptions, listener: ListenerId, _event: &mut Event) -> bool {
        if listener != self.listener {
            return false;
        }
        let scroll_y = page.scroll_y();
        for (index, node) in page.document().select(&self.selector).into_iter().enumerate() {
            let offset = parallax_offset(scroll_y, index, &self.config);
            set_style(page, node, "transform", &format!("translateY({offset}px)"));
        }
        true
    }
}
