//! Interaction configuration
//!
//! Every selector, delay and factor the behaviors use. Any field may be
//! overridden from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::{InteractionError, Result};

/// Controller configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub selectors: Selectors,
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub nav_highlight: NavHighlightConfig,
    pub counter: CounterConfig,
    pub tilt: TiltConfig,
    pub parallax: ParallaxConfig,
}

impl InteractionConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no behavior can run with
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("reveal.threshold", self.reveal.threshold),
            ("counter.threshold", self.counter.threshold),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(InteractionError::InvalidConfig(format!("{name} must be in [0, 1], got {value}")));
            }
        }

        let delays = [
            ("typing.start_delay_ms", self.typing.start_delay_ms),
            ("counter.duration_ms", self.counter.duration_ms),
        ];
        for (name, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(InteractionError::InvalidConfig(format!("{name} must be a non-negative number, got {value}")));
            }
        }

        // Typing steps re-arm the loop and must be positive
        let steps = [
            ("typing.type_delay_ms", self.typing.type_delay_ms),
            ("typing.delete_delay_ms", self.typing.delete_delay_ms),
            ("typing.pause_full_ms", self.typing.pause_full_ms),
            ("typing.pause_empty_ms", self.typing.pause_empty_ms),
        ];
        for (name, value) in steps {
            if !value.is_finite() || value <= 0.0 {
                return Err(InteractionError::InvalidConfig(format!("{name} must be a positive number, got {value}")));
            }
        }
        Ok(())
    }
}

/// Element selectors the page markup is expected to provide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub anchors: String,
    pub sections: String,
    pub navbar: String,
    pub hero_title: String,
    pub reveal: String,
    pub stats: String,
    pub tilt_cards: String,
    pub parallax: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_toggle: ".nav-toggle".into(),
            nav_menu: ".nav-menu".into(),
            nav_links: ".nav-link".into(),
            anchors: "a[href^=\"#\"]".into(),
            sections: "section[id]".into(),
            navbar: ".navbar".into(),
            hero_title: ".hero-title".into(),
            reveal: ".section-title, .about-content, .skill-category, .project-card, \
                     .timeline-item, .contact-content, .code-window"
                .into(),
            stats: ".stat-number".into(),
            tilt_cards: ".project-card, .photo-frame".into(),
            parallax: ".gradient-orb".into(),
        }
    }
}

/// Typing effect phrases and timing (ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub start_delay_ms: f64,
    pub type_delay_ms: f64,
    pub delete_delay_ms: f64,
    pub pause_full_ms: f64,
    pub pause_empty_ms: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "Tech Leader",
                "Product Management",
                "Project Management",
                "Problem Solver",
                "Software Developer",
                "Full Stack Engineer",
            ]
            .map(String::from)
            .to_vec(),
            start_delay_ms: 1000.0,
            type_delay_ms: 100.0,
            delete_delay_ms: 50.0,
            pause_full_ms: 2000.0,
            pause_empty_ms: 500.0,
        }
    }
}

/// Scroll reveal trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    /// CSS margin around the viewport; positive values trigger early
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.1, root_margin: "50px".into() }
    }
}

/// Navbar shadow and active section tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavHighlightConfig {
    /// Scroll offset past which the navbar gets its shadow
    pub shadow_threshold: f64,
    pub shadow: String,
    /// A section counts as current this many pixels before its top
    pub section_offset: f64,
}

impl Default for NavHighlightConfig {
    fn default() -> Self {
        Self {
            shadow_threshold: 50.0,
            shadow: "0 4px 20px rgba(0, 0, 0, 0.3)".into(),
            section_offset: 100.0,
        }
    }
}

/// Stats counter trigger and duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub threshold: f64,
    pub duration_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { threshold: 0.5, duration_ms: 2000.0 }
    }
}

/// Card tilt transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation per unit of normalized pointer offset (degrees)
    pub max_rotation_deg: f64,
    pub perspective_px: f64,
    pub lift_px: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self { max_rotation_deg: 5.0, perspective_px: 1000.0, lift_px: 4.0 }
    }
}

/// Parallax speeds: element `i` moves at `base + i * step`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub base_speed: f64,
    pub speed_step: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { base_speed: 0.1, speed_step: 0.05 }
    }
}
