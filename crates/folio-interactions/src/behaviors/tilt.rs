//! 3D tilt on cards

use folio_dom::{NodeId, Rect};
use folio_runtime::{Event, EventKind, EventTarget, ListenerId, Page, Subscriptions};

use super::{set_style, Behavior};
use crate::{InteractionConfig, Result, TiltConfig};

/// Card rotation for a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_y: f64,
    pub rotate_x: f64,
}

impl Tilt {
    /// Rotation for a pointer at (`x`, `y`) over `rect`, both in viewport
    /// coordinates. `None` for an empty rect.
    pub fn at(rect: Rect, x: f64, y: f64, max_rotation: f64) -> Option<Self> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let dx = ((x - rect.left()) / rect.width - 0.5).clamp(-0.5, 0.5);
        let dy = ((y - rect.top()) / rect.height - 0.5).clamp(-0.5, 0.5);
        // + 0.0 turns -0 into 0
        Some(Self { rotate_y: dx * max_rotation + 0.0, rotate_x: -dy * max_rotation + 0.0 })
    }

    /// CSS `transform` value
    pub fn transform(&self, config: &TiltConfig) -> String {
        format!(
            "perspective({}px) rotateY({}deg) rotateX({}deg) translateY({}px)",
            config.perspective_px, self.rotate_y, self.rotate_x, -config.lift_px
        )
    }
}

#[derive(Debug)]
struct Card {
    node: NodeId,
    on_move: ListenerId,
    on_leave: ListenerId,
}

/// Tilts cards toward the pointer and resets them when it leaves
#[derive(Debug)]
pub struct TiltCards {
    cards: Vec<Card>,
    config: TiltConfig,
}

impl TiltCards {
    pub fn init(page: &mut Page, subs: &mut Subscriptions, config: &InteractionConfig) -> Result<Option<Self>> {
        let nodes = page.document().query_selector_all(&config.selectors.tilt_cards)?;
        if nodes.is_empty() {
            return Ok(None);
        }

        let cards = nodes
            .into_iter()
            .map(|node| Card {
                node,
                on_move: subs.listen(page, EventTarget::Node(node), EventKind::MouseMove),
                on_leave: subs.listen(page, EventTarget::Node(node), EventKind::MouseLeave),
            })
            .collect();
        Ok(Some(Self { cards, config: config.tilt.clone() }))
    }
}

impl Behavior for TiltCards {
    fn name(&self) -> &'static str {
        "tilt"
    }

    fn on_event(&mut self, page: &mut Page, _subs: &mut Subscriptions, listener: ListenerId, event: &mut Event) -> bool {
        if let Some(card) = self.cards.iter().find(|c| c.on_move == listener) {
            let tilt = page
                .bounding_client_rect(card.node)
                .and_then(|rect| Tilt::at(rect, event.client_x, event.client_y, self.config.max_rotation_deg));
            if let Some(tilt) = tilt {
                set_style(page, card.node, "transform", &tilt.transform(&self.config));
            }
            return true;
        }
        if let Some(card) = self.cards.iter().find(|c| c.on_leave == listener) {
            set_style(page, card.node, "transform", "");
            return true;
        }
        false
    }
}
