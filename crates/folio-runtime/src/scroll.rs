//! Smooth scrolling

/// Cubic ease-in-out over t in [0, 1]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// In-flight smooth scroll of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, start: f64, duration: f64) -> Self {
        Self { from, to, start, duration }
    }

    /// Scroll position at `now` and whether the animation has finished
    pub fn position_at(&self, now: f64) -> (f64, bool) {
        if self.duration <= 0.0 || now >= self.start + self.duration {
            return (self.to, true);
        }
        let progress = ((now - self.start) / self.duration).max(0.0);
        let eased = ease_in_out_cubic(progress);
        (self.from + (self.to - self.from) * eased, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_smooth_scroll_lands_exactly() {
        let anim = SmoothScroll::new(0.0, 800.0, 100.0, 400.0);
        let (mid, done) = anim.position_at(300.0);
        assert!(!done);
        assert_eq!(mid, 400.0);
        assert_eq!(anim.position_at(500.0), (800.0, true));
        assert_eq!(anim.position_at(10_000.0), (800.0, true));
    }

    #[test]
    fn test_smooth_scroll_upward() {
        let anim = SmoothScroll::new(1000.0, 200.0, 0.0, 400.0);
        let (y, _) = anim.position_at(100.0);
        assert!(y < 1000.0 && y > 200.0);
    }
}
