use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::JobRef;
use crate::models::job_seeker::JobSeeker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub status: ApplicationStatus,
}

/// An application row with its job and job-seeker columns embedded, the
/// shape the candidate deck is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub job: Option<JobRef>,
    #[serde(default)]
    pub job_seeker: Option<JobSeeker>,
}
