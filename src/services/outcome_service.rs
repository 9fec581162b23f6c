use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::swipe::SwipeDirection;
use crate::services::dispatch_service::{DispatchOutcome, DispatchService, SwipeResolution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Persisted,
    AlreadyRecorded,
    /// Every attempt failed; the swipe is lost until the item shows up in
    /// a future fetch.
    Lost { error: String, attempts: u32 },
}

/// What became of a swipe after its card was already gone from view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeEvent {
    pub card_id: Uuid,
    pub direction: SwipeDirection,
    pub status: OutcomeStatus,
}

struct PendingOutcome {
    resolution: SwipeResolution,
    attempts: u32,
}

/// Second phase of a swipe: the deck drops the card immediately, this
/// queue gets the mutation there eventually. Failures are retried a few
/// times and reported on the event channel; they are never rolled back
/// into the deck.
pub struct OutcomeService {
    dispatch: DispatchService,
    queue: Mutex<VecDeque<PendingOutcome>>,
    events: UnboundedSender<OutcomeEvent>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl OutcomeService {
    pub fn new(
        dispatch: DispatchService,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> (Arc<Self>, UnboundedReceiver<OutcomeEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let service = Arc::new(Self {
            dispatch,
            queue: Mutex::new(VecDeque::new()),
            events,
            max_attempts,
            retry_delay,
        });
        (service, receiver)
    }

    /// Non-blocking; the caller has already removed the card from view.
    pub fn submit(&self, resolution: SwipeResolution) {
        info!(
            "Queued {} swipe for card {}",
            resolution.direction.as_str(),
            resolution.card.id
        );
        self.queue.lock().unwrap().push_back(PendingOutcome {
            resolution,
            attempts: 0,
        });
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Drains one queued outcome. `Ok(false)` means the queue was empty;
    /// an `Err` means the attempt failed and the caller should back off.
    pub async fn run_once(&self) -> Result<bool> {
        let pending = self.queue.lock().unwrap().pop_front();
        let Some(mut pending) = pending else {
            return Ok(false);
        };
        pending.attempts += 1;
        match self.dispatch.dispatch(&pending.resolution).await {
            Ok(outcome) => {
                let status = match outcome {
                    DispatchOutcome::Persisted => OutcomeStatus::Persisted,
                    DispatchOutcome::Duplicate => OutcomeStatus::AlreadyRecorded,
                };
                self.publish(&pending.resolution, status);
                Ok(true)
            }
            Err(e) => {
                if pending.attempts < self.max_attempts {
                    warn!(
                        "Swipe persistence attempt {} failed for card {}: {}; requeueing",
                        pending.attempts, pending.resolution.card.id, e
                    );
                    self.queue.lock().unwrap().push_back(pending);
                } else {
                    error!(
                        "Dropping swipe for card {} after {} attempts: {}",
                        pending.resolution.card.id, pending.attempts, e
                    );
                    let status = OutcomeStatus::Lost {
                        error: e.to_string(),
                        attempts: pending.attempts,
                    };
                    self.publish(&pending.resolution, status);
                }
                Err(e)
            }
        }
    }

    /// Background drain loop. Idles briefly when the queue is empty and
    /// backs off after a failed attempt.
    pub fn spawn_worker(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match service.run_once().await {
                    Ok(true) => {}
                    Ok(false) => tokio::time::sleep(service.retry_delay).await,
                    Err(_) => tokio::time::sleep(service.retry_delay).await,
                }
            }
        })
    }

    fn publish(&self, resolution: &SwipeResolution, status: OutcomeStatus) {
        let event = OutcomeEvent {
            card_id: resolution.card.id,
            direction: resolution.direction,
            status,
        };
        // nobody listening is fine
        let _ = self.events.send(event);
    }
}
