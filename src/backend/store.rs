use crate::error::Result;
use crate::models::application::{ApplicantRow, Application, ApplicationStatus, NewApplication};
use crate::models::interview::{Interview, NewInterview};
use crate::models::job::Job;
use crate::models::job_match::{JobMatch, NewMatch};
use crate::models::swipe::{NewSwipeAction, SwipeAction};
use async_trait::async_trait;
use uuid::Uuid;

/// Typed surface of the managed backend's query/mutation client. Lookups
/// return `None` for absence; insert-or-ignore inserts return `None` when
/// the backend's uniqueness constraint swallowed a duplicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwipeStore: Send + Sync {
    async fn list_jobs_excluding(&self, exclude: Vec<Uuid>, limit: u32) -> Result<Vec<Job>>;

    async fn list_applied_job_ids(&self, job_seeker_id: Uuid) -> Result<Vec<Uuid>>;

    async fn list_pending_applicants(&self, limit: u32) -> Result<Vec<ApplicantRow>>;

    async fn find_application(
        &self,
        job_id: Uuid,
        job_seeker_id: Uuid,
    ) -> Result<Option<Application>>;

    async fn insert_application(&self, new: NewApplication) -> Result<Option<Application>>;

    async fn update_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<()>;

    async fn insert_swipe_action(&self, new: NewSwipeAction) -> Result<Option<SwipeAction>>;

    async fn find_match(&self, job_id: Uuid, job_seeker_id: Uuid) -> Result<Option<JobMatch>>;

    async fn insert_match(&self, new: NewMatch) -> Result<Option<JobMatch>>;

    async fn insert_interview(&self, new: NewInterview) -> Result<Interview>;
}
