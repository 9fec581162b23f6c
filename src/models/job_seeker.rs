use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSeeker {
    pub id: Uuid,
    pub full_name: String,
    pub profession: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub avatar_url: Option<String>,
}
