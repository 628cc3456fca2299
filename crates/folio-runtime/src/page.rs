//! Page
//!
//! A loaded document plus everything a page script can reach: the viewport,
//! the virtual clock, listeners, timers, animation frames and observers.
//!
//! Time only moves through `advance`. Within each frame interval, due timers
//! run first, then the rendering steps: smooth scroll, one coalesced scroll
//! event, animation frame callbacks, intersection observers.

use folio_dom::{Document, NodeId, Rect, ScrollBehavior};

use crate::{
    AnimationFrames, CancellationToken, Event, EventKind, EventListeners, EventTarget, FrameId,
    IntersectionObserver, IntersectionObserverOptions, ListenerId, ObserverId, PageScript,
    SmoothScroll, TimerId, TimerQueue, FRAME_INTERVAL_MS, MIN_NESTED_TIMEOUT_MS,
};

/// Page host options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageOptions {
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Time between rendering frames
    pub frame_interval_ms: f64,
    /// Duration of a smooth scroll
    pub smooth_scroll_ms: f64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            frame_interval_ms: FRAME_INTERVAL_MS,
            smooth_scroll_ms: 400.0,
        }
    }
}

/// A loaded page
#[derive(Debug)]
pub struct Page {
    document: Document,
    options: PageOptions,
    now: f64,
    next_frame_at: f64,
    scroll_y: f64,
    scroll_pending: bool,
    smooth_scroll: Option<SmoothScroll>,
    listeners: EventListeners,
    timers: TimerQueue,
    frames: AnimationFrames,
    observers: Vec<IntersectionObserver>,
    next_observer_id: u64,
    /// Element under the pointer and its ancestors, deepest first
    hovered: Vec<NodeId>,
    /// Set while a timer callback runs
    in_timer: bool,
}

impl Page {
    /// Create a page around an already laid-out document
    ///
    /// A frame interval that is not a positive number falls back to 60 Hz.
    pub fn new(document: Document, mut options: PageOptions) -> Self {
        if !(options.frame_interval_ms.is_finite() && options.frame_interval_ms > 0.0) {
            tracing::warn!(
                "Invalid frame interval {}ms, using {}ms",
                options.frame_interval_ms,
                FRAME_INTERVAL_MS
            );
            options.frame_interval_ms = FRAME_INTERVAL_MS;
        }
        Self {
            document,
            options,
            now: 0.0,
            next_frame_at: options.frame_interval_ms,
            scroll_y: 0.0,
            scroll_pending: false,
            smooth_scroll: None,
            listeners: EventListeners::new(),
            timers: TimerQueue::new(),
            frames: AnimationFrames::new(),
            observers: Vec::new(),
            next_observer_id: 0,
            hovered: Vec::new(),
            in_timer: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Current time on the page clock (ms)
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Vertical scroll offset (window.scrollY)
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Viewport in client coordinates
    pub fn viewport(&self) -> Rect {
        Rect::from_xywh(0.0, 0.0, self.options.viewport_width, self.options.viewport_height)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll_y(&self) -> f64 {
        (self.document.content_height() - self.options.viewport_height).max(0.0)
    }

    /// Element border box in viewport coordinates (getBoundingClientRect)
    pub fn bounding_client_rect(&self, node: NodeId) -> Option<Rect> {
        self.document.layout(node).map(|r| r.translate(0.0, -self.scroll_y))
    }

    /// Whether the body has `overflow: hidden`
    pub fn is_scroll_locked(&self) -> bool {
        self.document
            .element(self.document.body())
            .is_some_and(|body| body.style.get("overflow") == Some("hidden"))
    }

    // ------------------------------------------------------------------
    // Listeners, timers, frames, observers
    // ------------------------------------------------------------------

    /// Attach a listener
    pub fn add_event_listener(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        self.listeners.add(target, kind)
    }

    /// Detach a listener
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Schedule `PageScript::on_timer` after `delay_ms`
    ///
    /// Timers scheduled from inside a timer callback wait at least
    /// `MIN_NESTED_TIMEOUT_MS`, so a timer that keeps re-arming itself
    /// cannot stall the clock.
    pub fn set_timeout(&mut self, delay_ms: f64, token: &CancellationToken) -> TimerId {
        let delay_ms = if self.in_timer { delay_ms.max(MIN_NESTED_TIMEOUT_MS) } else { delay_ms };
        self.timers.schedule(self.now, delay_ms, token)
    }

    /// Cancel one pending timer; returns false if it already fired
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.clear(id)
    }

    /// Number of live pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Schedule `PageScript::on_animation_frame` on the next frame
    pub fn request_animation_frame(&mut self) -> FrameId {
        self.frames.request()
    }

    pub fn cancel_animation_frame(&mut self, id: FrameId) -> bool {
        self.frames.cancel(id)
    }

    pub fn has_pending_frames(&self) -> bool {
        self.frames.has_pending()
    }

    /// Create an intersection observer
    pub fn create_intersection_observer(&mut self, options: IntersectionObserverOptions) -> ObserverId {
        self.next_observer_id += 1;
        let id = ObserverId(self.next_observer_id);
        self.observers.push(IntersectionObserver::new(id, options));
        id
    }

    pub fn intersection_observer(&self, id: ObserverId) -> Option<&IntersectionObserver> {
        self.observers.iter().find(|o| o.id() == id)
    }

    fn observer_mut(&mut self, id: ObserverId) -> Option<&mut IntersectionObserver> {
        self.observers.iter_mut().find(|o| o.id() == id)
    }

    pub fn observe(&mut self, id: ObserverId, target: NodeId) {
        if let Some(observer) = self.observer_mut(id) {
            observer.observe(target);
        }
    }

    pub fn unobserve(&mut self, id: ObserverId, target: NodeId) -> bool {
        self.observer_mut(id).is_some_and(|o| o.unobserve(target))
    }

    /// Disconnect and drop an observer
    pub fn disconnect(&mut self, id: ObserverId) {
        self.observers.retain(|o| o.id() != id);
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Programmatic instant scroll (window.scrollTo)
    pub fn scroll_to(&mut self, y: f64) {
        self.smooth_scroll = None;
        self.set_scroll_position(y);
    }

    /// User scroll (wheel/touch); ignored while the body is scroll-locked
    pub fn user_scroll_by(&mut self, dy: f64) -> bool {
        if self.is_scroll_locked() {
            tracing::debug!("User scroll of {}px ignored: scroll locked", dy);
            return false;
        }
        self.scroll_to(self.scroll_y + dy);
        true
    }

    /// Bring `node` to the top of the viewport (element.scrollIntoView)
    pub fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) {
        let Some(layout) = self.document.layout(node) else { return };
        let target = layout.top().clamp(0.0, self.max_scroll_y());

        match behavior {
            ScrollBehavior::Auto => self.scroll_to(target),
            ScrollBehavior::Smooth => {
                tracing::debug!("Smooth scroll {} -> {}", self.scroll_y, target);
                self.smooth_scroll = Some(SmoothScroll::new(
                    self.scroll_y,
                    target,
                    self.now,
                    self.options.smooth_scroll_ms,
                ));
            }
        }
    }

    /// Whether a smooth scroll is in flight
    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth_scroll.is_some()
    }

    fn set_scroll_position(&mut self, y: f64) {
        let y = y.clamp(0.0, self.max_scroll_y());
        if y != self.scroll_y {
            self.scroll_y = y;
            self.scroll_pending = true;
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle and input
    // ------------------------------------------------------------------

    /// Fire DOMContentLoaded
    pub fn load(&mut self, script: &mut dyn PageScript) {
        tracing::debug!("DOMContentLoaded for {}", self.document.url());
        let event = Event::new(EventKind::DomContentLoaded, EventTarget::Document, self.now);
        self.dispatch_event(event, script);
    }

    /// Fire unload
    pub fn unload(&mut self, script: &mut dyn PageScript) {
        tracing::debug!("unload for {}", self.document.url());
        let event = Event::new(EventKind::Unload, EventTarget::Window, self.now);
        self.dispatch_event(event, script);
    }

    /// Click an element. Returns true if the default action ran.
    ///
    /// The default action of a `#fragment` link is an instant jump to the
    /// matching element.
    pub fn click(&mut self, node: NodeId, script: &mut dyn PageScript) -> bool {
        let (x, y) = self
            .bounding_client_rect(node)
            .map(|r| (r.x + r.width / 2.0, r.y + r.height / 2.0))
            .unwrap_or_default();
        let event = Event::pointer(EventKind::Click, node, x, y, self.now);
        let event = self.dispatch_event(event, script);
        if event.is_default_prevented() {
            return false;
        }

        if let Some(target) = self.fragment_target(node) {
            self.scroll_into_view(target, ScrollBehavior::Auto);
        }
        true
    }

    fn fragment_target(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.document.tree();
        let anchor = std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|&n| tree.element(n).is_some_and(|e| e.tag == "a"))?;
        let href = tree.element(anchor)?.attr("href")?.into_owned();
        if !href.starts_with('#') {
            return None;
        }
        self.document.query_selector(&href).ok().flatten()
    }

    /// Move the pointer to viewport coordinates
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, script: &mut dyn PageScript) {
        let hit = self.hit_test(client_x, client_y);
        let path: Vec<NodeId> = match hit {
            Some(node) => std::iter::once(node)
                .chain(self.document.tree().ancestors(node))
                .filter(|&n| n != NodeId::ROOT)
                .collect(),
            None => Vec::new(),
        };
        self.update_hover(path, client_x, client_y, script);

        if let Some(node) = hit {
            let event = Event::pointer(EventKind::MouseMove, node, client_x, client_y, self.now);
            self.dispatch_event(event, script);
        }
    }

    /// Move the pointer out of the window
    pub fn pointer_out(&mut self, script: &mut dyn PageScript) {
        self.update_hover(Vec::new(), -1.0, -1.0, script);
    }

    fn update_hover(&mut self, path: Vec<NodeId>, x: f64, y: f64, script: &mut dyn PageScript) {
        let left: Vec<NodeId> = self.hovered.iter().copied().filter(|n| !path.contains(n)).collect();
        self.hovered = path;
        for node in left {
            let event = Event::pointer(EventKind::MouseLeave, node, x, y, self.now);
            self.dispatch_event(event, script);
        }
    }

    /// Deepest element with a non-empty box under viewport coordinates
    pub fn hit_test(&self, client_x: f64, client_y: f64) -> Option<NodeId> {
        let (x, y) = (client_x, client_y + self.scroll_y);
        let tree = self.document.tree();
        tree.descendants(tree.root())
            .into_iter()
            .filter(|&n| {
                tree.element(n)
                    .is_some_and(|e| e.layout.area() > 0.0 && e.layout.contains_point(x, y))
            })
            .last()
    }

    /// Dispatch an event along its propagation path; returns the event
    /// after every listener has seen it
    pub fn dispatch_event(&mut self, mut event: Event, script: &mut dyn PageScript) -> Event {
        for current in self.propagation_path(event.target, event.kind.bubbles()) {
            event.current_target = current;
            for id in self.listeners.matching(current, event.kind) {
                // A listener may have been removed by an earlier one
                if self.listeners.contains(id) {
                    script.on_event(self, id, &mut event);
                }
            }
        }
        event
    }

    fn propagation_path(&self, target: EventTarget, bubbles: bool) -> Vec<EventTarget> {
        let mut path = vec![target];
        if !bubbles {
            return path;
        }
        match target {
            EventTarget::Node(node) => {
                path.extend(
                    self.document
                        .tree()
                        .ancestors(node)
                        .into_iter()
                        .filter(|&n| n != NodeId::ROOT)
                        .map(EventTarget::Node),
                );
                path.push(EventTarget::Document);
                path.push(EventTarget::Window);
            }
            EventTarget::Document => path.push(EventTarget::Window),
            EventTarget::Window => {}
        }
        path
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Advance the clock by `ms`, running timers and frames on the way
    pub fn advance(&mut self, ms: f64, script: &mut dyn PageScript) {
        let end = self.now + ms.max(0.0);
        loop {
            let frame_at = self.next_frame_at;
            self.run_timers(frame_at.min(end), script);
            if frame_at > end {
                self.now = end;
                break;
            }
            self.now = frame_at;
            self.next_frame_at += self.options.frame_interval_ms;
            self.render_frame(script);
        }
    }

    fn run_timers(&mut self, until: f64, script: &mut dyn PageScript) {
        while let Some((id, due)) = self.timers.pop_due(until) {
            self.now = self.now.max(due);
            self.in_timer = true;
            script.on_timer(self, id);
            self.in_timer = false;
        }
    }

    fn render_frame(&mut self, script: &mut dyn PageScript) {
        if let Some(animation) = self.smooth_scroll {
            let (y, done) = animation.position_at(self.now);
            self.set_scroll_position(y);
            if done {
                self.smooth_scroll = None;
            }
        }

        if std::mem::take(&mut self.scroll_pending) {
            let event = Event::new(EventKind::Scroll, EventTarget::Window, self.now);
            self.dispatch_event(event, script);
        }

        let now = self.now;
        for id in self.frames.take() {
            script.on_animation_frame(self, id, now);
        }

        self.update_intersections(script);
    }

    fn update_intersections(&mut self, script: &mut dyn PageScript) {
        let viewport = self.viewport();
        let mut batches = Vec::new();
        for observer in &mut self.observers {
            let entries = observer.check_intersections(viewport, &self.document, self.scroll_y, self.now);
            if !entries.is_empty() {
                batches.push((observer.id(), entries));
            }
        }
        for (id, entries) in batches {
            script.on_intersection(self, id, &entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoScript;

    fn tall_page() -> Page {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        doc.set_layout(body, Rect::from_xywh(0.0, 0.0, 1280.0, 3000.0));
        Page::new(doc, PageOptions::default())
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut page = tall_page();
        page.scroll_to(10_000.0);
        assert_eq!(page.scroll_y(), 2280.0);
        page.scroll_to(-5.0);
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_scroll_lock_blocks_user_scroll() {
        let mut page = tall_page();
        let body = page.document().body();
        page.document_mut().element_mut(body).unwrap().style.set("overflow", "hidden");

        assert!(!page.user_scroll_by(300.0));
        assert_eq!(page.scroll_y(), 0.0);

        page.scroll_to(300.0);
        assert_eq!(page.scroll_y(), 300.0);
    }

    #[test]
    fn test_advance_moves_clock_exactly() {
        let mut page = tall_page();
        page.advance(1000.0, &mut NoScript);
        assert_eq!(page.now(), 1000.0);
    }

    #[test]
    fn test_smooth_scroll_completes() {
        let mut page = tall_page();
        let target = page.document_mut().tree_mut().create_element("section");
        let body = page.document().body();
        page.document_mut().tree_mut().append_child(body, target);
        page.document_mut().set_layout(target, Rect::from_xywh(0.0, 1200.0, 1280.0, 600.0));

        page.scroll_into_view(target, ScrollBehavior::Smooth);
        assert!(page.is_smooth_scrolling());
        page.advance(100.0, &mut NoScript);
        assert!(page.scroll_y() > 0.0 && page.scroll_y() < 1200.0);

        page.advance(400.0, &mut NoScript);
        assert_eq!(page.scroll_y(), 1200.0);
        assert!(!page.is_smooth_scrolling());
    }
}
