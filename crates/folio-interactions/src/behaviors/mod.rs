//! Page behaviors
//!
//! Each behavior is built from the page when it loads and afterwards only
//! reacts to the callbacks for handles it registered. A callback returns
//! `true` when it belonged to the behavior.

mod counter;
mod nav_highlight;
mod nav_toggle;
mod parallax;
mod reveal;
mod smooth_scroll;
mod tilt;
mod typing;

pub use counter::{ease_out_cubic, parse_stat, CounterAnimation, Stat, StatsCounter};
pub use nav_highlight::{current_section, NavHighlight};
pub use nav_toggle::NavToggle;
pub use parallax::{parallax_offset, Parallax};
pub use reveal::ScrollReveal;
pub use smooth_scroll::SmoothScrollLinks;
pub use tilt::{Tilt, TiltCards};
pub use typing::{TypingDelays, TypingEffect, TypingMachine, TypingPhase, TypingStep};

use folio_dom::NodeId;
use folio_runtime::{Event, FrameId, IntersectionEntry, ListenerId, ObserverId, Page, Subscriptions, TimerId};

/// A page behavior driven by the controller
pub trait Behavior: std::fmt::Debug {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn on_event(&mut self, _page: &mut Page, _subs: &mut Subscriptions, _listener: ListenerId, _event: &mut Event) -> bool {
        false
    }

    fn on_timer(&mut self, _page: &mut Page, _subs: &mut Subscriptions, _timer: TimerId) -> bool {
        false
    }

    fn on_animation_frame(&mut self, _page: &mut Page, _subs: &mut Subscriptions, _frame: FrameId, _now: f64) -> bool {
        false
    }

    fn on_intersection(
        &mut self,
        _page: &mut Page,
        _subs: &mut Subscriptions,
        _observer: ObserverId,
        _entries: &[IntersectionEntry],
    ) -> bool {
        false
    }
}

/// Set or clear `overflow: hidden` on the body
pub(crate) fn set_scroll_lock(page: &mut Page, locked: bool) {
    let body = page.document().body();
    if let Some(body) = page.document_mut().element_mut(body) {
        body.style.set("overflow", if locked { "hidden" } else { "" });
    }
}

/// Set one inline style property; an empty value removes it
pub(crate) fn set_style(page: &mut Page, node: NodeId, property: &str, value: &str) {
    if let Some(elem) = page.document_mut().element_mut(node) {
        elem.style.set(property, value);
    }
}

/// Add or remove a class
pub(crate) fn set_class(page: &mut Page, node: NodeId, class: &str, on: bool) {
    if let Some(elem) = page.document_mut().element_mut(node) {
        elem.classes.toggle(class, Some(on));
    }
}
