use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub recruiter_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInterview {
    pub applicant_id: Uuid,
    pub recruiter_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}
