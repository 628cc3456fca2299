//! Animated stats counters

use std::collections::HashSet;

use folio_dom::NodeId;
use folio_runtime::{FrameId, IntersectionEntry, IntersectionObserverOptions, ObserverId, Page, RootMargin, Subscriptions};

use super::Behavior;
use crate::{InteractionConfig, Result};

/// A stat label split into its number and the text around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub target: u64,
    /// Every non-digit character, in order
    pub suffix: String,
}

/// Parse a stat label; `None` if it has no digits or the number overflows
pub fn parse_stat(text: &str) -> Option<Stat> {
    let (digits, suffix): (String, String) = text.chars().partition(char::is_ascii_digit);
    let target = digits.parse().ok()?;
    Some(Stat { target, suffix })
}

/// `1 - (1 - p)^3` over p in [0, 1]
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress.clamp(0.0, 1.0)).powi(3)
}

/// `floor(target * fraction)` for fraction in [0, 1]
///
/// Targets past 2^53 don't fit an f64 exactly, so those are scaled in
/// 53-bit fixed point instead.
fn scale_target(target: u64, fraction: f64) -> u64 {
    const ONE: u64 = 1 << 53;
    let fraction = fraction.clamp(0.0, 1.0);
    if target <= ONE {
        return (target as f64 * fraction).floor() as u64;
    }
    let fixed = (fraction * ONE as f64) as u128;
    (u128::from(target) * fixed / u128::from(ONE)) as u64
}

/// One counter counting up from zero
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    pub element: NodeId,
    pub stat: Stat,
    start: f64,
    duration: f64,
}

impl CounterAnimation {
    pub fn new(element: NodeId, stat: Stat, start: f64, duration: f64) -> Self {
        Self { element, stat, start, duration }
    }

    /// Text to show at `now` and whether the animation is over
    pub fn frame(&self, now: f64) -> (String, bool) {
        let progress = if self.duration > 0.0 { ((now - self.start) / self.duration).min(1.0) } else { 1.0 };
        if progress >= 1.0 {
            return (format!("{}{}", self.stat.target, self.stat.suffix), true);
        }
        let current = scale_target(self.stat.target, ease_out_cubic(progress));
        (format!("{}{}", current, self.stat.suffix), false)
    }
}

/// Starts a counter the first time each stat label is half visible
#[derive(Debug)]
pub struct StatsCounter {
    observer: ObserverId,
    threshold: f64,
    duration: f64,
    triggered: HashSet<NodeId>,
    running: Vec<(FrameId, CounterAnimation)>,
}

impl StatsCounter {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let stats = page.document().query_selector_all(&config.selectors.stats)?;
        if stats.is_empty() {
            return Ok(None);
        }
        let options = IntersectionObserverOptions::new(&[config.counter.threshold], RootMargin::default());
        let observer = subs.observe(page, options, &stats);

        Ok(Some(Self {
            observer,
            threshold: config.counter.threshold,
            duration: config.counter.duration_ms,
            triggered: HashSet::new(),
            running: Vec::new(),
        }))
    }

    /// Whether the counter for `node` has been triggered
    pub fn is_triggered(&self, node: NodeId) -> bool {
        self.triggered.contains(&node)
    }

    fn start(&mut self, page: &mut Page, subs: &mut Subscriptions, element: NodeId) {
        let text = page.document().text_content(element);
        let Some(stat) = parse_stat(&text) else {
            tracing::debug!("Stat {:?} has no number, leaving it alone", text);
            return;
        };
        let animation = CounterAnimation::new(element, stat, page.now(), self.duration);
        if let Some(frame) = subs.request_frame(page) {
            self.running.push((frame, animation));
        }
    }
}

impl Behavior for StatsCounter {
    fn name(&self) -> &'static str {
        "stats counter"
    }

    fn on_intersection(
        &mut self,
        page: &mut Page,
        subs: &mut Subscriptions,
        observer: ObserverId,
        entries: &[IntersectionEntry],
    ) -> bool {
        if observer != self.observer {
            return false;
        }
        for entry in entries {
            if entry.reaches(self.threshold) && self.triggered.insert(entry.target) {
                page.unobserve(observer, entry.target);
                self.start(page, subs, entry.target);
            }
        }
        true
    }

    fn on_animation_frame(&mut self, page: &mut Page, subs: &mut Subscriptions, frame: FrameId, now: f64) -> bool {
        let Some(index) = self.running.iter().position(|(id, _)| *id == frame) else {
            return false;
        };
        subs.frame_done(frame);
        let (_, animation) = self.running.swap_remove(index);

        let (text, done) = animation.frame(now);
        page.document_mut().set_text_content(animation.element, &text);
        if !done {
            if let Some(next) = subs.request_frame(page) {
                self.running.push((next, animation));
            }
        }
        true
    }
}
