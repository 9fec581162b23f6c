use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub badge: Option<String>,
    #[serde(default)]
    pub recruiters: Option<RecruiterInfo>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Embedded recruiter columns fetched alongside a job row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruiterInfo {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRef {
    pub id: Uuid,
    pub title: String,
}
