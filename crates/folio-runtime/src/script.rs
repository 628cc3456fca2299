//! Page script callbacks
//!
//! A page script owns its own state; the page calls back into it with the
//! handle it was given when the listener, timer, frame or observer was
//! registered.

use crate::{Event, FrameId, IntersectionEntry, ListenerId, ObserverId, Page, TimerId};

/// Receiver of page callbacks
pub trait PageScript {
    /// A listener registered through `Page::add_event_listener` fired
    fn on_event(&mut self, page: &mut Page, listener: ListenerId, event: &mut Event);

    /// A timer scheduled through `Page::set_timeout` fired
    fn on_timer(&mut self, _page: &mut Page, _timer: TimerId) {}

    /// A frame requested through `Page::request_animation_frame` is running
    fn on_animation_frame(&mut self, _page: &mut Page, _frame: FrameId, _now: f64) {}

    /// An intersection observer has a batch of entries
    fn on_intersection(&mut self, _page: &mut Page, _observer: ObserverId, _entries: &[IntersectionEntry]) {}
}

/// Script that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScript;

impl PageScript for NoScript {
    fn on_event(&mut self, _page: &mut Page, _listener: ListenerId, _event: &mut Event) {}
}
