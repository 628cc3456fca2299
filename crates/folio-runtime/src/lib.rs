//! folio Runtime - Page host
//!
//! Runs page scripts against a `folio_dom::Document` on a virtual clock.
//!
//! # Features
//! - Event listeners with bubbling and `preventDefault`
//! - Timers with cancellation tokens
//! - Animation frame callbacks on a fixed frame interval
//! - Intersection observers evaluated once per frame
//! - Viewport scrolling (instant and smooth) with per-frame scroll events
//! - Pointer hit-testing with `mouseleave` tracking

mod event;
mod timers;
mod frames;
mod intersection;
mod scroll;
mod page;
mod script;
mod subscription;

pub use event::{Event, EventKind, EventListeners, EventTarget, ListenerId};
pub use timers::{CancellationToken, TimerId, TimerQueue};
pub use frames::{AnimationFrames, FrameId};
pub use intersection::{
    IntersectionEntry, IntersectionObserver, IntersectionObserverOptions, ObserverId, RootMargin,
};
pub use scroll::{ease_in_out_cubic, SmoothScroll};
pub use page::{Page, PageOptions};
pub use script::{NoScript, PageScript};
pub use subscription::Subscriptions;

/// Default frame interval (60 Hz)
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Shortest delay for a timer scheduled from a timer callback
pub const MIN_NESTED_TIMEOUT_MS: f64 = 4.0;

/// Runtime errors
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Invalid root margin {0:?}")]
    InvalidRootMargin(String),

    #[error(transparent)]
    Dom(#[from] folio_dom::DomError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
