use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most one exists per (job, job seeker) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub recruiter_id: Uuid,
    pub application_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub recruiter_id: Uuid,
    pub application_id: Uuid,
}
