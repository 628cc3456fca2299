//! Intersection Observer API
//!
//! Observe element visibility and intersection with the viewport.

use std::str::FromStr;

use folio_dom::{Document, NodeId, Rect};

use crate::RuntimeError;

/// Observer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

/// Root margin in pixels; positive values grow the viewport, negative
/// values shrink it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Same margin on every side
    pub fn uniform(px: f64) -> Self {
        Self { top: px, right: px, bottom: px, left: px }
    }

    /// Parse CSS margin shorthand (1 to 4 pixel lengths)
    pub fn parse(s: &str) -> Result<Self, RuntimeError> {
        let invalid = || RuntimeError::InvalidRootMargin(s.to_string());
        let values = s
            .split_whitespace()
            .map(|part| {
                let number = match part.strip_suffix("px") {
                    Some(n) => n,
                    None if part == "0" => part,
                    None => return Err(invalid()),
                };
                number.parse::<f64>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<f64>, RuntimeError>>()?;

        match values.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(invalid()),
        }
    }

    /// Apply to a root rectangle
    pub fn apply(&self, root: Rect) -> Rect {
        root.outset(self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Intersection observer options
#[derive(Debug, Clone)]
pub struct IntersectionObserverOptions {
    /// Root margin around the viewport
    pub root_margin: RootMargin,
    /// Ascending ratios that trigger a notification when crossed
    pub thresholds: Vec<f64>,
}

impl IntersectionObserverOptions {
    pub fn new(thresholds: &[f64], root_margin: RootMargin) -> Self {
        let mut thresholds: Vec<f64> = thresholds.iter().map(|t| t.clamp(0.0, 1.0)).collect();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        Self { root_margin, thresholds }
    }

    /// Single threshold, no margin
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(&[threshold], RootMargin::default())
    }
}

impl Default for IntersectionObserverOptions {
    fn default() -> Self {
        Self::new(&[0.0], RootMargin::default())
    }
}

/// Intersection observer entry
#[derive(Debug, Clone)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub bounding_client_rect: Rect,
    pub intersection_rect: Rect,
    pub root_bounds: Rect,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
    pub time: f64,
}

impl IntersectionEntry {
    /// Intersecting with at least `threshold` of the target visible
    pub fn reaches(&self, threshold: f64) -> bool {
        self.is_intersecting && self.intersection_ratio >= threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastState {
    threshold_index: usize,
    is_intersecting: bool,
}

/// Intersection observer
#[derive(Debug)]
pub struct IntersectionObserver {
    id: ObserverId,
    options: IntersectionObserverOptions,
    /// Targets in observation order with their last delivered state
    observed: Vec<(NodeId, Option<LastState>)>,
}

impl IntersectionObserver {
    pub fn new(id: ObserverId, options: IntersectionObserverOptions) -> Self {
        Self { id, options, observed: Vec::new() }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn options(&self) -> &IntersectionObserverOptions {
        &self.options
    }

    /// Observe an element; observing twice is a no-op
    pub fn observe(&mut self, target: NodeId) {
        if !self.is_observing(target) {
            self.observed.push((target, None));
        }
    }

    /// Stop observing
    pub fn unobserve(&mut self, target: NodeId) -> bool {
        let before = self.observed.len();
        self.observed.retain(|(node, _)| *node != target);
        self.observed.len() != before
    }

    /// Disconnect all
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.iter().any(|(node, _)| *node == target)
    }

    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    /// Compute entries for targets whose threshold index or intersecting
    /// state changed. `viewport` is in client coordinates; element layout is
    /// in document coordinates, offset by `scroll_y`.
    pub fn check_intersections(
        &mut self,
        viewport: Rect,
        document: &Document,
        scroll_y: f64,
        time: f64,
    ) -> Vec<IntersectionEntry> {
        let root_bounds = self.options.root_margin.apply(viewport);
        let mut entries = Vec::new();

        for (node, last) in &mut self.observed {
            let Some(layout) = document.layout(*node) else { continue };
            let rect = layout.translate(0.0, -scroll_y);
            let intersection = rect.intersection(&root_bounds);
            let is_intersecting = intersection.is_some();
            let ratio = match intersection {
                Some(hit) if rect.area() > 0.0 => hit.area() / rect.area(),
                Some(_) => 1.0,
                None => 0.0,
            };
            let threshold_index = if is_intersecting {
                self.options.thresholds.iter().take_while(|&&t| t <= ratio).count()
            } else {
                0
            };

            let state = LastState { threshold_index, is_intersecting };
            if *last == Some(state) {
                continue;
            }
            *last = Some(state);

            entries.push(IntersectionEntry {
                target: *node,
                bounding_client_rect: rect,
                intersection_rect: intersection.unwrap_or_default(),
                root_bounds,
                intersection_ratio: ratio,
                is_intersecting,
                time,
            });
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_box(top: f64, height: f64) -> (Document, NodeId) {
        let mut doc = Document::new("about:blank");
        let node = doc.tree_mut().create_element("div");
        let body = doc.body();
        doc.tree_mut().append_child(body, node);
        doc.set_layout(node, Rect::from_xywh(0.0, top, 400.0, height));
        (doc, node)
    }

    #[test]
    fn test_root_margin_parse() {
        assert_eq!(RootMargin::parse("-50px").unwrap(), RootMargin::uniform(-50.0));
        assert_eq!(
            RootMargin::parse("10px 0").unwrap(),
            RootMargin { top: 10.0, right: 0.0, bottom: 10.0, left: 0.0 }
        );
        assert!(RootMargin::parse("10%").is_err());
        assert!(RootMargin::parse("").is_err());
        assert!(RootMargin::parse("1px 2px 3px 4px 5px").is_err());
    }

    #[test]
    fn test_initial_observation_always_delivers() {
        let (doc, node) = doc_with_box(2000.0, 100.0);
        let mut observer = IntersectionObserver::new(ObserverId(1), IntersectionObserverOptions::default());
        observer.observe(node);

        let viewport = Rect::from_xywh(0.0, 0.0, 800.0, 600.0);
        let entries = observer.check_intersections(viewport, &doc, 0.0, 0.0);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // Nothing changed, nothing delivered
        assert!(observer.check_intersections(viewport, &doc, 0.0, 16.0).is_empty());
    }

    #[test]
    fn test_threshold_crossing() {
        let (doc, node) = doc_with_box(700.0, 100.0);
        let mut observer = IntersectionObserver::new(ObserverId(1), IntersectionObserverOptions::with_threshold(0.5));
        observer.observe(node);
        let viewport = Rect::from_xywh(0.0, 0.0, 800.0, 600.0);

        observer.check_intersections(viewport, &doc, 0.0, 0.0);

        // 30% visible: intersecting but below the threshold
        let entries = observer.check_intersections(viewport, &doc, 130.0, 16.0);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!(!entries[0].reaches(0.5));

        let entries = observer.check_intersections(viewport, &doc, 160.0, 32.0);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].reaches(0.5));
        assert!((entries[0].intersection_ratio - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_positive_margin_triggers_early() {
        let (doc, node) = doc_with_box(620.0, 100.0);
        let viewport = Rect::from_xywh(0.0, 0.0, 800.0, 600.0);

        let mut plain = IntersectionObserver::new(ObserverId(1), IntersectionObserverOptions::with_threshold(0.1));
        plain.observe(node);
        assert!(!plain.check_intersections(viewport, &doc, 0.0, 0.0)[0].reaches(0.1));

        let mut early = IntersectionObserver::new(
            ObserverId(2),
            IntersectionObserverOptions::new(&[0.1], RootMargin::uniform(50.0)),
        );
        early.observe(node);
        assert!(early.check_intersections(viewport, &doc, 0.0, 0.0)[0].reaches(0.1));
    }

    #[test]
    fn test_unobserve() {
        let (_, node) = doc_with_box(0.0, 10.0);
        let mut observer = IntersectionObserver::new(ObserverId(1), IntersectionObserverOptions::default());
        observer.observe(node);
        observer.observe(node);
        assert_eq!(observer.observed_len(), 1);
        assert!(observer.unobserve(node));
        assert!(!observer.is_observing(node));
    }
}
