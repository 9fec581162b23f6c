use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::store::SwipeStore;
use crate::error::Result;
use crate::models::application::ApplicationStatus;
use crate::models::interview::{Interview, NewInterview};
use crate::models::job_match::{JobMatch, NewMatch};

#[derive(Debug, Clone)]
pub struct ScheduleInterview {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub recruiter_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn SwipeStore>,
}

impl MatchService {
    pub fn new(store: Arc<dyn SwipeStore>) -> Self {
        Self { store }
    }

    /// Books the interview, flips the application, then reconciles the
    /// match for the (job, seeker) pair. A failed reconciliation leaves
    /// the interview standing and is not retried.
    pub async fn schedule_interview(&self, request: ScheduleInterview) -> Result<Interview> {
        let interview = self
            .store
            .insert_interview(NewInterview {
                applicant_id: request.application_id,
                recruiter_id: request.recruiter_id,
                scheduled_date: request.scheduled_date,
                location: request.location.clone(),
                notes: request.notes.clone(),
            })
            .await?;
        info!(
            "Interview {} scheduled for application {}",
            interview.id, request.application_id
        );

        self.store
            .update_application_status(request.application_id, ApplicationStatus::Interview)
            .await?;

        if let Err(e) = self
            .ensure_match(
                request.job_id,
                request.job_seeker_id,
                request.recruiter_id,
                request.application_id,
            )
            .await
        {
            error!(
                "Match reconciliation failed for job {} / seeker {}: {}",
                request.job_id, request.job_seeker_id, e
            );
        }

        Ok(interview)
    }

    /// Lookup-then-insert, with the backend's unique index as the real
    /// guard. A lookup error other than not-found aborts the insert.
    /// Returns the match for the pair, or `None` when a concurrent
    /// insert won the race and was kept instead.
    pub async fn ensure_match(
        &self,
        job_id: Uuid,
        job_seeker_id: Uuid,
        recruiter_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<JobMatch>> {
        if let Some(existing) = self.store.find_match(job_id, job_seeker_id).await? {
            info!(
                "Match already exists for job {} / seeker {}; skipping insert",
                job_id, job_seeker_id
            );
            return Ok(Some(existing));
        }

        let created = self
            .store
            .insert_match(NewMatch {
                job_id,
                job_seeker_id,
                recruiter_id,
                application_id,
            })
            .await?;
        if created.is_some() {
            info!("Match created for job {} / seeker {}", job_id, job_seeker_id);
        }
        Ok(created)
    }

    pub async fn accept_application(&self, application_id: Uuid) -> Result<()> {
        self.store
            .update_application_status(application_id, ApplicationStatus::Accepted)
            .await
    }

    pub async fn reject_application(&self, application_id: Uuid) -> Result<()> {
        self.store
            .update_application_status(application_id, ApplicationStatus::Rejected)
            .await
    }
}
