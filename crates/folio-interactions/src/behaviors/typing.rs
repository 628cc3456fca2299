//! Typing effect
//!
//! Types a phrase one character at a time, holds it, deletes it, then moves
//! on to the next phrase. The cycle never ends; it runs as a repeating timer
//! under the controller's cancellation token.

use folio_dom::NodeId;
use folio_runtime::{Page, Subscriptions, TimerId};

use super::Behavior;
use crate::{InteractionConfig, Result, TypingConfig};

/// Where the machine is after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Characters are being added
    Typing,
    /// The full phrase is shown
    PauseFull,
    /// Characters are being removed
    Deleting,
    /// The text is empty before the next phrase
    PauseEmpty,
}

/// Step delays (ms)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypingDelays {
    pub type_ms: f64,
    pub delete_ms: f64,
    pub pause_full_ms: f64,
    pub pause_empty_ms: f64,
}

impl From<&TypingConfig> for TypingDelays {
    fn from(config: &TypingConfig) -> Self {
        Self {
            type_ms: config.type_delay_ms,
            delete_ms: config.delete_delay_ms,
            pause_full_ms: config.pause_full_ms,
            pause_empty_ms: config.pause_empty_ms,
        }
    }
}

/// Output of one step
#[derive(Debug, Clone, PartialEq)]
pub struct TypingStep {
    /// Text to display
    pub text: String,
    /// Delay before the next step
    pub delay: f64,
    pub phase: TypingPhase,
}

/// Typing state machine
#[derive(Debug, Clone)]
pub struct TypingMachine {
    phrases: Vec<Vec<char>>,
    index: usize,
    cursor: usize,
    deleting: bool,
    delays: TypingDelays,
}

impl TypingMachine {
    /// Build a machine; empty phrases are dropped and `None` is returned if
    /// nothing is left to type
    pub fn new<S: AsRef<str>>(phrases: &[S], delays: TypingDelays) -> Option<Self> {
        let phrases: Vec<Vec<char>> = phrases
            .iter()
            .map(|p| p.as_ref().chars().collect::<Vec<char>>())
            .filter(|p| !p.is_empty())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self { phrases, index: 0, cursor: 0, deleting: false, delays })
    }

    /// Index of the current phrase
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Advance one character
    pub fn step(&mut self) -> TypingStep {
        let phrase = &self.phrases[self.index];

        let (mut delay, mut phase) = if self.deleting {
            self.cursor -= 1;
            (self.delays.delete_ms, TypingPhase::Deleting)
        } else {
            self.cursor += 1;
            (self.delays.type_ms, TypingPhase::Typing)
        };
        let text: String = phrase[..self.cursor].iter().collect();

        if !self.deleting && self.cursor == phrase.len() {
            self.deleting = true;
            delay = self.delays.pause_full_ms;
            phase = TypingPhase::PauseFull;
        } else if self.deleting && self.cursor == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            delay = self.delays.pause_empty_ms;
            phase = TypingPhase::PauseEmpty;
        }

        TypingStep { text, delay, phase }
    }
}

/// Runs a `TypingMachine` against the hero title
#[derive(Debug)]
pub struct TypingEffect {
    element: NodeId,
    machine: TypingMachine,
    /// The single pending step
    timer: Option<TimerId>,
}

impl TypingEffect {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let Some(element) = page.document().query_selector(&config.selectors.hero_title)? else {
            return Ok(None);
        };
        let Some(machine) = TypingMachine::new(&config.typing.phrases, TypingDelays::from(&config.typing)) else {
            tracing::debug!("No phrases to type");
            return Ok(None);
        };

        let timer = subs.set_timeout(page, config.typing.start_delay_ms);
        Ok(Some(Self { element, machine, timer }))
    }
}

impl Behavior for TypingEffect {
    fn name(&self) -> &'static str {
        "typing effect"
    }

    fn on_timer(&mut self, page: &mut Page, subs: &mut Subscriptions, timer: TimerId) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        let step = self.machine.step();
        page.document_mut().set_text_content(self.element, &step.text);
        self.timer = subs.set_timeout(page, step.delay);
        true
    }
}
