//! Page interaction controller
//!
//! Owns every behavior and every subscription on the page. Behaviors are
//! built on `DOMContentLoaded` and released on `unload`.

use folio_runtime::{
    Event, EventKind, EventTarget, FrameId, IntersectionEntry, ListenerId, ObserverId, Page, PageScript,
    Subscriptions, TimerId,
};

use crate::behaviors::{
    Behavior, NavHighlight, NavToggle, Parallax, ScrollReveal, SmoothScrollLinks, StatsCounter, TiltCards,
    TypingEffect,
};
use crate::{InteractionConfig, Result};

/// Page interaction controller
#[derive(Debug)]
pub struct Controller {
    config: InteractionConfig,
    subscriptions: Subscriptions,
    behaviors: Vec<Box<dyn Behavior>>,
    loaded: Option<ListenerId>,
    unload: Option<ListenerId>,
    started: bool,
}

impl Controller {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            subscriptions: Subscriptions::new(),
            behaviors: Vec::new(),
            loaded: None,
            unload: None,
            started: false,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Listen for the page lifecycle; behaviors start on `DOMContentLoaded`
    pub fn attach(&mut self, page: &mut Page) {
        if self.loaded.is_some() {
            return;
        }
        self.loaded = Some(self.subscriptions.listen(page, EventTarget::Document, EventKind::DomContentLoaded));
        self.unload = Some(self.subscriptions.listen(page, EventTarget::Window, EventKind::Unload));
        tracing::info!("Controller attached to {}", page.document().url());
    }

    /// Whether the behaviors have been built
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether `teardown` has run
    pub fn is_torn_down(&self) -> bool {
        self.subscriptions.is_cancelled()
    }

    /// Names of the running behaviors
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    /// Build every behavior; one that fails is skipped
    pub fn start(&mut self, page: &mut Page) {
        if self.started || self.is_torn_down() {
            return;
        }
        self.started = true;

        let config = &self.config;
        let subs = &mut self.subscriptions;
        let behaviors = &mut self.behaviors;

        add(behaviors, "nav toggle", NavToggle::init(page, subs, config));
        add(behaviors, "smooth scroll", SmoothScrollLinks::init(page, subs, config));
        add(behaviors, "scroll reveal", ScrollReveal::init(page, subs, config));
        add(behaviors, "typing effect", TypingEffect::init(page, subs, config));
        add(behaviors, "nav highlight", NavHighlight::init(page, subs, config));
        add(behaviors, "stats counter", StatsCounter::init(page, subs, config));
        add(behaviors, "tilt", TiltCards::init(page, subs, config));
        add(behaviors, "parallax", Parallax::init(page, subs, config));

        tracing::info!("Controller started {} behaviors", self.behaviors.len());
    }

    /// Release every listener, observer, frame and timer
    pub fn teardown(&mut self, page: &mut Page) {
        if self.is_torn_down() {
            return;
        }
        self.subscriptions.teardown(page);
        self.behaviors.clear();
        tracing::info!("Controller torn down");
    }
}

fn add<B: Behavior + 'static>(behaviors: &mut Vec<Box<dyn Behavior>>, name: &str, built: Result<Option<B>>) {
    match built {
        Ok(Some(behavior)) => {
            tracing::debug!("Started {}", name);
            behaviors.push(Box::new(behavior));
        }
        Ok(None) => tracing::debug!("No elements for {}", name),
        Err(e) => tracing::warn!("Skipping {}: {}", name, e),
    }
}

impl PageScript for Controller {
    fn on_event(&mut self, page: &mut Page, listener: ListenerId, event: &mut Event) {
        if self.loaded == Some(listener) {
            self.start(page);
            return;
        }
        if self.unload == Some(listener) {
            self.teardown(page);
            return;
        }
        if !self.subscriptions.owns_listener(listener) {
            return;
        }
        for behavior in &mut self.behaviors {
            if behavior.on_event(page, &mut self.subscriptions, listener, event) {
                break;
            }
        }
    }

    fn on_timer(&mut self, page: &mut Page, timer: TimerId) {
        for behavior in &mut self.behaviors {
            if behavior.on_timer(page, &mut self.subscriptions, timer) {
                break;
            }
        }
    }

    fn on_animation_frame(&mut self, page: &mut Page, frame: FrameId, now: f64) {
        for behavior in &mut self.behaviors {
            if behavior.on_animation_frame(page, &mut self.subscriptions, frame, now) {
                break;
            }
        }
    }

    fn on_intersection(&mut self, page: &mut Page, observer: ObserverId, entries: &[IntersectionEntry]) {
        if !self.subscriptions.owns_observer(observer) {
            return;
        }
        for behavior in &mut self.behaviors {
            if behavior.on_intersection(page, &mut self.subscriptions, observer, entries) {
                break;
            }
        }
    }
}
