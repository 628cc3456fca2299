//! folio Interactions - Portfolio page behaviors
//!
//! A single `Controller` wires eight independent behaviors to a page once its
//! markup is parsed:
//!
//! - Navigation toggle (mobile menu and scroll lock)
//! - Smooth scrolling for in-page links
//! - Scroll reveal of content blocks
//! - Typing effect on the hero title
//! - Active nav link and navbar shadow
//! - Animated stats counters
//! - 3D tilt on cards
//! - Parallax on decorative orbs
//!
//! Behaviors only toggle classes, inline styles and text; the stylesheet
//! decides what those look like.

mod config;
mod controller;
pub mod behaviors;

pub use config::{
    CounterConfig, InteractionConfig, NavHighlightConfig, ParallaxConfig, RevealConfig, Selectors,
    TiltConfig, TypingConfig,
};
pub use controller::Controller;

/// Interaction errors
#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Runtime(#[from] folio_runtime::RuntimeError),

    #[error(transparent)]
    Dom(#[from] folio_dom::DomError),
}

pub type Result<T> = std::result::Result<T, InteractionError>;
