//! Integration tests - page host dispatch, clock and observers
//!
//! A recording script drives a small hand-built page.

use folio_dom::{Document, NodeId, Rect};
use folio_runtime::{
    CancellationToken, Event, EventKind, EventTarget, FrameId, IntersectionEntry,
    IntersectionObserverOptions, ListenerId, ObserverId, Page, PageOptions, PageScript, TimerId,
    FRAME_INTERVAL_MS, MIN_NESTED_TIMEOUT_MS,
};

#[derive(Default)]
struct Recorder {
    events: Vec<(ListenerId, EventKind, EventTarget)>,
    targets: Vec<Option<NodeId>>,
    timers: Vec<(TimerId, f64)>,
    frames: Vec<(FrameId, f64)>,
    batches: Vec<(ObserverId, Vec<IntersectionEntry>)>,
    prevent: Vec<ListenerId>,
    remove_on_fire: Option<(ListenerId, ListenerId)>,
    /// Re-arm every fired timer with this delay
    rearm: Option<f64>,
    token: CancellationToken,
}

impl PageScript for Recorder {
    fn on_event(&mut self, page: &mut Page, listener: ListenerId, event: &mut Event) {
        self.events.push((listener, event.kind, event.current_target));
        self.targets.push(event.target_node());
        if self.prevent.contains(&listener) {
            event.prevent_default();
        }
        if let Some((trigger, victim)) = self.remove_on_fire {
            if trigger == listener {
                page.remove_event_listener(victim);
            }
        }
    }

    fn on_timer(&mut self, page: &mut Page, timer: TimerId) {
        self.timers.push((timer, page.now()));
        if let Some(delay) = self.rearm {
            page.set_timeout(delay, &self.token);
        }
    }

    fn on_animation_frame(&mut self, _page: &mut Page, frame: FrameId, now: f64) {
        self.frames.push((frame, now));
    }

    fn on_intersection(&mut self, _page: &mut Page, observer: ObserverId, entries: &[IntersectionEntry]) {
        self.batches.push((observer, entries.to_vec()));
    }
}

// ============================================================================
// FIXTURE
// ============================================================================

struct Fixture {
    page: Page,
    nav: NodeId,
    link: NodeId,
    card: NodeId,
    section: NodeId,
}

/// body (0..3000) > nav (0..80) > a[href="#target"] (10..70)
///               > div.card (200..500)
///               > section#target (1500..2100)
fn fixture() -> Fixture {
    let mut doc = Document::new("about:blank");
    let body = doc.body();

    let nav = doc.tree_mut().create_element("nav");
    let link = doc.tree_mut().create_element("a");
    let card = doc.tree_mut().create_element("div");
    let section = doc.tree_mut().create_element("section");
    doc.tree_mut().append_child(body, nav);
    doc.tree_mut().append_child(nav, link);
    doc.tree_mut().append_child(body, card);
    doc.tree_mut().append_child(body, section);

    doc.element_mut(link).unwrap().set_attr("href", "#target");
    doc.element_mut(card).unwrap().set_attr("class", "card");
    doc.element_mut(section).unwrap().set_attr("id", "target");

    doc.set_layout(body, Rect::from_xywh(0.0, 0.0, 1280.0, 3000.0));
    doc.set_layout(nav, Rect::from_xywh(0.0, 0.0, 1280.0, 80.0));
    doc.set_layout(link, Rect::from_xywh(10.0, 10.0, 100.0, 60.0));
    doc.set_layout(card, Rect::from_xywh(100.0, 200.0, 400.0, 300.0));
    doc.set_layout(section, Rect::from_xywh(0.0, 1500.0, 1280.0, 600.0));

    Fixture { page: Page::new(doc, PageOptions::default()), nav, link, card, section }
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_click_bubbles_to_window() {
    let mut f = fixture();
    let on_link = f.page.add_event_listener(EventTarget::Node(f.link), EventKind::Click);
    let on_nav = f.page.add_event_listener(EventTarget::Node(f.nav), EventKind::Click);
    let on_doc = f.page.add_event_listener(EventTarget::Document, EventKind::Click);
    let on_win = f.page.add_event_listener(EventTarget::Window, EventKind::Click);

    let mut script = Recorder::default();
    f.page.click(f.link, &mut script);

    let order: Vec<ListenerId> = script.events.iter().map(|(id, _, _)| *id).collect();
    assert_eq!(order, vec![on_link, on_nav, on_doc, on_win]);
}

#[test]
fn test_fragment_click_jumps_unless_prevented() {
    let mut f = fixture();
    let mut script = Recorder::default();
    assert!(f.page.click(f.link, &mut script));
    assert_eq!(f.page.scroll_y(), 1500.0);

    let mut f = fixture();
    let listener = f.page.add_event_listener(EventTarget::Node(f.link), EventKind::Click);
    let mut script = Recorder { prevent: vec![listener], ..Default::default() };
    assert!(!f.page.click(f.link, &mut script));
    assert_eq!(f.page.scroll_y(), 0.0);
}

#[test]
fn test_listener_removed_during_dispatch_does_not_fire() {
    let mut f = fixture();
    let first = f.page.add_event_listener(EventTarget::Window, EventKind::Click);
    let second = f.page.add_event_listener(EventTarget::Window, EventKind::Click);
    let mut script = Recorder { remove_on_fire: Some((first, second)), ..Default::default() };

    f.page.click(f.card, &mut script);

    assert_eq!(script.events.len(), 1);
    assert_eq!(script.events[0].0, first);
}

#[test]
fn test_pointer_move_and_leave() {
    let mut f = fixture();
    let moves = f.page.add_event_listener(EventTarget::Node(f.card), EventKind::MouseMove);
    let leaves = f.page.add_event_listener(EventTarget::Node(f.card), EventKind::MouseLeave);
    let mut script = Recorder::default();

    f.page.pointer_move(300.0, 350.0, &mut script);
    f.page.pointer_move(310.0, 360.0, &mut script);
    assert_eq!(script.events.iter().filter(|e| e.0 == moves).count(), 2);
    assert!(script.events.iter().all(|e| e.0 != leaves));

    f.page.pointer_move(900.0, 700.0, &mut script);
    assert_eq!(script.events.iter().filter(|e| e.0 == leaves).count(), 1);
}

#[test]
fn test_pointer_out_leaves_hovered_elements() {
    let mut f = fixture();
    let leaves = f.page.add_event_listener(EventTarget::Node(f.card), EventKind::MouseLeave);
    let mut script = Recorder::default();

    f.page.pointer_move(300.0, 350.0, &mut script);
    f.page.pointer_out(&mut script);

    let fired: Vec<usize> = (0..script.events.len()).filter(|&i| script.events[i].0 == leaves).collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(script.targets[fired[0]], Some(f.card));

    // Already out: nothing left to leave
    f.page.pointer_out(&mut script);
    assert_eq!(script.events.iter().filter(|e| e.0 == leaves).count(), 1);
}

#[test]
fn test_hit_test_accounts_for_scroll() {
    let mut f = fixture();
    assert_eq!(f.page.hit_test(300.0, 350.0), Some(f.card));
    f.page.scroll_to(1400.0);
    assert_eq!(f.page.hit_test(300.0, 350.0), Some(f.section));
}

// ============================================================================
// CLOCK
// ============================================================================

#[test]
fn test_scroll_events_coalesce_per_frame() {
    let mut f = fixture();
    let listener = f.page.add_event_listener(EventTarget::Window, EventKind::Scroll);
    let mut script = Recorder::default();

    f.page.user_scroll_by(100.0);
    f.page.user_scroll_by(100.0);
    f.page.user_scroll_by(100.0);
    f.page.advance(20.0, &mut script);

    assert_eq!(script.events.len(), 1);
    assert_eq!(script.events[0].0, listener);
    assert_eq!(f.page.scroll_y(), 300.0);

    f.page.advance(100.0, &mut script);
    assert_eq!(script.events.len(), 1);
}

#[test]
fn test_timers_fire_at_their_due_time() {
    let mut f = fixture();
    let token = CancellationToken::new();
    let a = f.page.set_timeout(1000.0, &token);
    let b = f.page.set_timeout(100.0, &token);
    let mut script = Recorder::default();

    f.page.advance(999.0, &mut script);
    assert_eq!(script.timers, vec![(b, 100.0)]);

    f.page.advance(1.0, &mut script);
    assert_eq!(script.timers, vec![(b, 100.0), (a, 1000.0)]);
}

#[test]
fn test_cleared_timer_does_not_fire() {
    let mut f = fixture();
    let token = CancellationToken::new();
    let kept = f.page.set_timeout(100.0, &token);
    let cleared = f.page.set_timeout(50.0, &token);

    assert!(f.page.clear_timeout(cleared));
    assert!(!f.page.clear_timeout(cleared));

    let mut script = Recorder::default();
    f.page.advance(200.0, &mut script);
    assert_eq!(script.timers, vec![(kept, 100.0)]);
}

#[test]
fn test_zero_delay_rearm_does_not_stall_the_clock() {
    let mut f = fixture();
    let mut script = Recorder { rearm: Some(0.0), ..Default::default() };
    f.page.set_timeout(0.0, &script.token);

    f.page.advance(100.0, &mut script);
    assert_eq!(f.page.now(), 100.0);

    // First run at 0, then every nested re-arm waits the minimum delay
    let times: Vec<f64> = script.timers.iter().map(|(_, at)| *at).collect();
    assert_eq!(times.len(), 26);
    assert_eq!(times[0], 0.0);
    assert!(times.windows(2).all(|w| w[1] - w[0] == MIN_NESTED_TIMEOUT_MS));

    // Frames kept running in between
    f.page.request_animation_frame();
    f.page.advance(20.0, &mut script);
    assert_eq!(script.frames.len(), 1);
}

#[test]
fn test_cancelled_token_stops_timers() {
    let mut f = fixture();
    let token = CancellationToken::new();
    f.page.set_timeout(50.0, &token);
    token.cancel();

    let mut script = Recorder::default();
    f.page.advance(1000.0, &mut script);
    assert!(script.timers.is_empty());
}

#[test]
fn test_animation_frames_run_once() {
    let mut f = fixture();
    let frame = f.page.request_animation_frame();
    let mut script = Recorder::default();

    f.page.advance(100.0, &mut script);
    assert_eq!(script.frames.len(), 1);
    assert_eq!(script.frames[0].0, frame);
    assert!(script.frames[0].1 > 0.0);
}

#[test]
fn test_zero_frame_interval_falls_back_to_default() {
    let options = PageOptions { frame_interval_ms: 0.0, ..PageOptions::default() };
    let mut page = Page::new(Document::new("about:blank"), options);
    assert_eq!(page.options().frame_interval_ms, FRAME_INTERVAL_MS);

    let frame = page.request_animation_frame();
    let mut script = Recorder::default();
    page.advance(50.0, &mut script);
    assert_eq!(page.now(), 50.0);
    assert_eq!(script.frames[0].0, frame);
}

// ============================================================================
// OBSERVERS
// ============================================================================

#[test]
fn test_observer_reports_on_scroll() {
    let mut f = fixture();
    let observer = f.page.create_intersection_observer(IntersectionObserverOptions::with_threshold(0.5));
    f.page.observe(observer, f.section);
    let mut script = Recorder::default();

    f.page.advance(20.0, &mut script);
    assert_eq!(script.batches.len(), 1);
    assert!(!script.batches[0].1[0].is_intersecting);

    f.page.scroll_to(1200.0);
    f.page.advance(20.0, &mut script);
    assert_eq!(script.batches.len(), 2);
    assert!(script.batches[1].1[0].reaches(0.5));

    f.page.disconnect(observer);
    f.page.scroll_to(0.0);
    f.page.advance(20.0, &mut script);
    assert_eq!(script.batches.len(), 2);
}
