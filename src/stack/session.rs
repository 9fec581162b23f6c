use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::models::swipe::SwipeDirection;
use crate::services::dispatch_service::{Actor, SwipeResolution};
use crate::services::outcome_service::OutcomeService;
use crate::stack::animate::{Animator, Transition};
use crate::stack::deck::{CardDeck, InteractiveLease};
use crate::stack::gesture::{DirectionPolicy, DragTracker, GestureOutcome, Intent, Offset};

pub const EXIT_DURATION: Duration = Duration::from_millis(450);
pub const ACCEPT_FADE: Duration = Duration::from_millis(800);

/// One rendered stack: the deck, the drag state of its top card, and the
/// plumbing a resolved gesture flows into. Gestures are lease-gated, the
/// visual removal is optimistic, and persistence runs behind the outcome
/// queue without ever blocking the gesture path.
pub struct StackSession {
    deck: CardDeck,
    tracker: DragTracker,
    policy: DirectionPolicy,
    actor: Option<Actor>,
    outcomes: Arc<OutcomeService>,
    animator: Arc<dyn Animator>,
}

impl StackSession {
    pub fn new(
        deck: CardDeck,
        policy: DirectionPolicy,
        actor: Option<Actor>,
        outcomes: Arc<OutcomeService>,
        animator: Arc<dyn Animator>,
    ) -> Self {
        Self {
            deck,
            tracker: DragTracker::new(),
            policy,
            actor,
            outcomes,
            animator,
        }
    }

    pub fn deck(&self) -> &CardDeck {
        &self.deck
    }

    pub fn acquire_lease(&mut self) -> Option<InteractiveLease> {
        self.deck.acquire_lease()
    }

    /// Drag progress for the leased card; anything else is inert.
    pub fn pointer_update(
        &mut self,
        lease: &InteractiveLease,
        translation_x: f32,
        translation_y: f32,
    ) -> Option<Offset> {
        if !self.deck.holds_top(lease) {
            return None;
        }
        Some(self.tracker.update(translation_x, translation_y))
    }

    pub fn intent(&self) -> Option<Intent> {
        self.tracker.intent()
    }

    /// A drag that lost its pointer; the offset carries into the next one.
    pub fn pointer_interrupt(&mut self, lease: InteractiveLease) {
        self.tracker.interrupt();
        self.deck.release_lease(lease);
    }

    /// Resolves the drag. A cancel springs the card back; a commit flies
    /// it out, removes it, and queues the directional action. Returns
    /// `None` for an inert (non-top) gesture.
    pub async fn pointer_release(&mut self, lease: InteractiveLease) -> Option<GestureOutcome> {
        if !self.deck.holds_top(&lease) {
            self.deck.release_lease(lease);
            return None;
        }
        let outcome = self.tracker.release(self.policy);
        match outcome {
            GestureOutcome::Cancelled => {
                self.animator
                    .run(Transition::SpringTo {
                        target: Offset::default(),
                    })
                    .await;
                self.deck.release_lease(lease);
            }
            GestureOutcome::Committed { direction, exit } => {
                let finished = self
                    .animator
                    .run(Transition::TimingTo {
                        target: exit,
                        duration: EXIT_DURATION,
                    })
                    .await;
                if finished {
                    self.resolve(lease, direction);
                } else {
                    self.deck.release_lease(lease);
                }
            }
        }
        Some(outcome)
    }

    /// Double-tap accepts no matter where the drag sits. Returns whether
    /// the card was resolved.
    pub async fn double_tap(&mut self, lease: InteractiveLease) -> bool {
        if !self.deck.holds_top(&lease) {
            self.deck.release_lease(lease);
            return false;
        }
        let finished = self
            .animator
            .run(Transition::ShrinkFade {
                duration: ACCEPT_FADE,
            })
            .await;
        if !finished {
            self.deck.release_lease(lease);
            return false;
        }
        self.resolve(lease, SwipeDirection::Right);
        true
    }

    /// Route for the top card's info button.
    pub fn info_route(&self) -> Option<String> {
        self.deck.top().map(|card| card.detail_route())
    }

    /// Watermark fade for the current occupancy.
    pub fn watermark_transition(&self) -> Transition {
        self.deck.watermark_transition()
    }

    fn resolve(&mut self, lease: InteractiveLease, direction: SwipeDirection) {
        let Some(card) = self.deck.remove(lease) else {
            return;
        };
        self.tracker = DragTracker::new();
        let Some(actor) = self.actor else {
            warn!(
                "No authenticated actor; dropping {} swipe on card {}",
                direction.as_str(),
                card.id
            );
            return;
        };
        self.outcomes.submit(SwipeResolution {
            actor,
            direction,
            card,
        });
    }
}
