use crate::models::swipe::SwipeDirection;

/// Release inside this box (both axes) snaps the card back.
pub const COMMIT_THRESHOLD: f32 = 100.0;
/// A committed card keeps flying along its trajectory, scaled up by this.
pub const EXIT_MULTIPLIER: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Color of the glow ring while a gesture is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Accept,
    Reject,
}

/// How a committed drag maps to a swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionPolicy {
    /// Job stack: any committed drag is a pass.
    AnyCommitIsLeft,
    /// Candidate stack: the sign of the horizontal offset decides.
    ByHorizontalSign,
}

impl DirectionPolicy {
    pub fn resolve(&self, offset: Offset) -> SwipeDirection {
        match self {
            DirectionPolicy::AnyCommitIsLeft => SwipeDirection::Left,
            DirectionPolicy::ByHorizontalSign => {
                if offset.x > 0.0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Below threshold on both axes: spring back, nothing dispatched.
    Cancelled,
    /// Past threshold: the card exits along `exit` and the action fires.
    Committed {
        direction: SwipeDirection,
        exit: Offset,
    },
}

/// Accumulates drag translation for the top card. Translation is relative
/// to the drag's start, on top of whatever a previous interrupted drag
/// left behind.
#[derive(Debug, Default)]
pub struct DragTracker {
    position: Offset,
    last_offset: Offset,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, translation_x: f32, translation_y: f32) -> Offset {
        self.position = Offset {
            x: translation_x + self.last_offset.x,
            y: translation_y + self.last_offset.y,
        };
        self.position
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    /// The indicator defaults to the reject color as soon as the card
    /// leaves the origin; only a double-tap turns it green.
    pub fn intent(&self) -> Option<Intent> {
        if self.position.is_origin() {
            None
        } else {
            Some(Intent::Reject)
        }
    }

    /// A drag that loses its pointer without a release carries its offset
    /// into the next drag.
    pub fn interrupt(&mut self) {
        self.last_offset = self.position;
    }

    pub fn release(&mut self, policy: DirectionPolicy) -> GestureOutcome {
        let position = self.position;
        self.last_offset = Offset::default();
        if position.x.abs() < COMMIT_THRESHOLD && position.y.abs() < COMMIT_THRESHOLD {
            self.position = Offset::default();
            return GestureOutcome::Cancelled;
        }
        GestureOutcome::Committed {
            direction: policy.resolve(position),
            exit: Offset {
                x: position.x * EXIT_MULTIPLIER,
                y: position.y * EXIT_MULTIPLIER,
            },
        }
    }
}
