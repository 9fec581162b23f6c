use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

/// One-way expression of interest or disinterest between a recruiter and
/// a job seeker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeAction {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub job_seeker_id: Uuid,
    pub direction: SwipeDirection,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSwipeAction {
    pub recruiter_id: Uuid,
    pub job_seeker_id: Uuid,
    pub direction: SwipeDirection,
}
