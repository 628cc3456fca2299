//! Subscriptions
//!
//! Everything a script registered on a page, so it can all be released at
//! once. Timers are covered by the subscription's cancellation token.

use folio_dom::NodeId;

use crate::{
    CancellationToken, EventKind, EventTarget, FrameId, IntersectionObserverOptions, ListenerId,
    ObserverId, Page, TimerId,
};

/// Handles owned by one script
#[derive(Debug, Default)]
pub struct Subscriptions {
    listeners: Vec<ListenerId>,
    observers: Vec<ObserverId>,
    frames: Vec<FrameId>,
    token: CancellationToken,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener and keep its handle
    pub fn listen(&mut self, page: &mut Page, target: EventTarget, kind: EventKind) -> ListenerId {
        let id = page.add_event_listener(target, kind);
        self.listeners.push(id);
        id
    }

    /// Create an observer watching `targets` and keep its handle
    pub fn observe(
        &mut self,
        page: &mut Page,
        options: IntersectionObserverOptions,
        targets: &[NodeId],
    ) -> ObserverId {
        let id = page.create_intersection_observer(options);
        for &target in targets {
            page.observe(id, target);
        }
        self.observers.push(id);
        id
    }

    /// Schedule a timer under this subscription's token
    pub fn set_timeout(&mut self, page: &mut Page, delay_ms: f64) -> Option<TimerId> {
        if self.token.is_cancelled() {
            return None;
        }
        Some(page.set_timeout(delay_ms, &self.token))
    }

    /// Request an animation frame and keep its handle until it runs
    pub fn request_frame(&mut self, page: &mut Page) -> Option<FrameId> {
        if self.token.is_cancelled() {
            return None;
        }
        let id = page.request_animation_frame();
        self.frames.push(id);
        Some(id)
    }

    /// Forget a frame that has run; returns false if it is not ours
    pub fn frame_done(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|&f| f != id);
        self.frames.len() != before
    }

    pub fn owns_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn owns_observer(&self, id: ObserverId) -> bool {
        self.observers.contains(&id)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Whether `teardown` has run
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Release every listener, observer, frame and timer
    pub fn teardown(&mut self, page: &mut Page) {
        let listeners = std::mem::take(&mut self.listeners);
        let observers = std::mem::take(&mut self.observers);
        let frames = std::mem::take(&mut self.frames);
        tracing::debug!(
            "Tearing down {} listeners, {} observers, {} frames",
            listeners.len(),
            observers.len(),
            frames.len()
        );

        for id in listeners {
            page.remove_event_listener(id);
        }
        for id in observers {
            page.disconnect(id);
        }
        for id in frames {
            page.cancel_animation_frame(id);
        }
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoScript, PageOptions};
    use folio_dom::Document;

    #[test]
    fn test_teardown_releases_everything() {
        let mut page = Page::new(Document::new("about:blank"), PageOptions::default());
        let mut subs = Subscriptions::new();

        let listener = subs.listen(&mut page, EventTarget::Window, EventKind::Scroll);
        let body = page.document().body();
        let observer = subs.observe(&mut page, IntersectionObserverOptions::default(), &[body]);
        subs.set_timeout(&mut page, 100.0);
        subs.request_frame(&mut page);

        assert!(subs.owns_listener(listener));
        assert!(subs.owns_observer(observer));
        assert_eq!(page.pending_timers(), 1);

        subs.teardown(&mut page);

        assert_eq!(page.listener_count(), 0);
        assert!(page.intersection_observer(observer).is_none());
        assert_eq!(page.pending_timers(), 0);
        assert!(!page.has_pending_frames());
        assert!(subs.set_timeout(&mut page, 10.0).is_none());
        assert!(subs.request_frame(&mut page).is_none());

        page.advance(500.0, &mut NoScript);
    }
}
