use std::time::Duration;

use uuid::Uuid;

use crate::models::card::SwipeCard;
use crate::stack::animate::Transition;
use crate::stack::visual::{depth_transform, CardTransform};

pub const WATERMARK_FADE_IN: Duration = Duration::from_millis(500);
pub const WATERMARK_FADE_OUT: Duration = Duration::from_millis(300);

/// Permission to handle gestures for exactly one card. The deck hands out
/// at most one at a time, and any structural change invalidates leases
/// issued before it.
#[derive(Debug, PartialEq, Eq)]
pub struct InteractiveLease {
    card_id: Uuid,
    index: usize,
    generation: u64,
}

impl InteractiveLease {
    pub fn card_id(&self) -> Uuid {
        self.card_id
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered stack of cards, newest-first fetch order, with the last
/// element as the visual top.
#[derive(Debug)]
pub struct CardDeck {
    items: Vec<SwipeCard>,
    top_index: isize,
    generation: u64,
    lease_out: bool,
}

impl CardDeck {
    pub fn new(items: Vec<SwipeCard>) -> Self {
        let top_index = items.len() as isize - 1;
        Self {
            items,
            top_index,
            generation: 0,
            lease_out: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn top_index(&self) -> isize {
        self.top_index
    }

    pub fn items(&self) -> &[SwipeCard] {
        &self.items
    }

    pub fn top(&self) -> Option<&SwipeCard> {
        usize::try_from(self.top_index)
            .ok()
            .and_then(|i| self.items.get(i))
    }

    /// Issues the interactive lease for the current top card, or `None`
    /// if one is already out or the deck is empty.
    pub fn acquire_lease(&mut self) -> Option<InteractiveLease> {
        if self.lease_out {
            return None;
        }
        let index = usize::try_from(self.top_index).ok()?;
        let card = self.items.get(index)?;
        self.lease_out = true;
        Some(InteractiveLease {
            card_id: card.id,
            index,
            generation: self.generation,
        })
    }

    /// Hands a lease back without resolving it (cancelled gesture).
    pub fn release_lease(&mut self, lease: InteractiveLease) {
        if lease.generation == self.generation {
            self.lease_out = false;
        }
    }

    pub fn holds_top(&self, lease: &InteractiveLease) -> bool {
        lease.generation == self.generation
            && self.top_index >= 0
            && lease.index == self.top_index as usize
            && self.items.get(lease.index).map(|c| c.id) == Some(lease.card_id)
    }

    /// Removes the leased card and shifts the cursor down by one. The
    /// lease guarantees the removal targets the current top; a stale
    /// lease removes nothing.
    pub fn remove(&mut self, lease: InteractiveLease) -> Option<SwipeCard> {
        if lease.generation != self.generation {
            return None;
        }
        self.lease_out = false;
        if !self.holds_top(&lease) {
            return None;
        }
        let removed = self.items.remove(lease.index);
        self.top_index -= 1;
        self.generation += 1;
        Some(removed)
    }

    /// Replaces the deck contents with a fresh batch.
    pub fn refill(&mut self, items: Vec<SwipeCard>) {
        self.items = items;
        self.top_index = self.items.len() as isize - 1;
        self.generation += 1;
        self.lease_out = false;
    }

    pub fn depth_transform(&self, index: usize) -> CardTransform {
        depth_transform(index, self.top_index as f32)
    }

    /// Watermark fade matching the deck's occupancy.
    pub fn watermark_transition(&self) -> Transition {
        if self.items.is_empty() {
            Transition::FadeIn {
                duration: WATERMARK_FADE_IN,
            }
        } else {
            Transition::FadeOut {
                duration: WATERMARK_FADE_OUT,
            }
        }
    }
}
