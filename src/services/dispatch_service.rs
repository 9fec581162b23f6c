use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::backend::store::SwipeStore;
use crate::error::Result;
use crate::models::application::{ApplicationStatus, NewApplication};
use crate::models::card::SwipeCard;
use crate::models::swipe::{NewSwipeAction, SwipeDirection};

/// Who is swiping. The variant picks the dispatch flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    JobSeeker(Uuid),
    Recruiter(Uuid),
}

/// A gesture that already resolved visually and now needs persisting.
#[derive(Debug, Clone)]
pub struct SwipeResolution {
    pub actor: Actor,
    pub direction: SwipeDirection,
    pub card: SwipeCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Persisted,
    /// The record already existed; a benign no-op.
    Duplicate,
}

#[derive(Clone)]
pub struct DispatchService {
    store: Arc<dyn SwipeStore>,
}

impl DispatchService {
    pub fn new(store: Arc<dyn SwipeStore>) -> Self {
        Self { store }
    }

    pub async fn dispatch(&self, resolution: &SwipeResolution) -> Result<DispatchOutcome> {
        match (resolution.actor, resolution.direction) {
            (Actor::JobSeeker(job_seeker_id), SwipeDirection::Right) => {
                self.apply_to_job(job_seeker_id, &resolution.card).await
            }
            (Actor::JobSeeker(job_seeker_id), SwipeDirection::Left) => {
                self.pass_job(job_seeker_id, &resolution.card).await
            }
            (Actor::Recruiter(recruiter_id), direction) => {
                self.record_candidate_swipe(recruiter_id, &resolution.card, direction)
                    .await
            }
        }
    }

    /// Accept on the job stack. The lookup keeps the duplicate log
    /// friendly; the table's unique index is what actually enforces one
    /// application per (job, seeker).
    pub async fn apply_to_job(
        &self,
        job_seeker_id: Uuid,
        card: &SwipeCard,
    ) -> Result<DispatchOutcome> {
        if let Some(existing) = self.store.find_application(card.id, job_seeker_id).await? {
            info!(
                "Already applied to job {} (application {})",
                card.id, existing.id
            );
            return Ok(DispatchOutcome::Duplicate);
        }
        let inserted = self
            .store
            .insert_application(NewApplication {
                job_id: card.id,
                job_seeker_id,
                status: ApplicationStatus::Pending,
            })
            .await?;
        match inserted {
            Some(application) => {
                info!("Applied to job {}: application {}", card.id, application.id);
                Ok(DispatchOutcome::Persisted)
            }
            None => {
                info!("Concurrent application to job {} was kept instead", card.id);
                Ok(DispatchOutcome::Duplicate)
            }
        }
    }

    /// Reject on the job stack: a left swipe against the job's recruiter.
    pub async fn pass_job(&self, job_seeker_id: Uuid, card: &SwipeCard) -> Result<DispatchOutcome> {
        self.record_swipe(NewSwipeAction {
            recruiter_id: card.owner_id,
            job_seeker_id,
            direction: SwipeDirection::Left,
        })
        .await
    }

    pub async fn record_candidate_swipe(
        &self,
        recruiter_id: Uuid,
        card: &SwipeCard,
        direction: SwipeDirection,
    ) -> Result<DispatchOutcome> {
        self.record_swipe(NewSwipeAction {
            recruiter_id,
            job_seeker_id: card.owner_id,
            direction,
        })
        .await
    }

    async fn record_swipe(&self, action: NewSwipeAction) -> Result<DispatchOutcome> {
        let recruiter_id = action.recruiter_id;
        let job_seeker_id = action.job_seeker_id;
        let direction = action.direction;
        match self.store.insert_swipe_action(action).await? {
            Some(_) => {
                info!(
                    "Recorded {} swipe: recruiter {} / seeker {}",
                    direction.as_str(),
                    recruiter_id,
                    job_seeker_id
                );
                Ok(DispatchOutcome::Persisted)
            }
            None => {
                info!(
                    "Swipe already recorded: recruiter {} / seeker {} ({})",
                    recruiter_id,
                    job_seeker_id,
                    direction.as_str()
                );
                Ok(DispatchOutcome::Duplicate)
            }
        }
    }
}
