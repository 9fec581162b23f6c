use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Job,
    Candidate,
}

/// Display snapshot a stack card is rendered from. Built once at fetch
/// time and never live-synced; dropped the moment its gesture resolves.
#[derive(Debug, Clone)]
pub struct SwipeCard {
    pub id: Uuid,
    /// Counterpart recorded in swipe/match rows: the job's recruiter, or
    /// the candidate's own job-seeker id.
    pub owner_id: Uuid,
    pub kind: CardKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    /// Signed URL, resolved by the deck service before the card is shown.
    pub poster: Option<String>,
    pub tags: Vec<String>,
}

impl SwipeCard {
    /// Navigation target for the card's info button.
    pub fn detail_route(&self) -> String {
        match self.kind {
            CardKind::Job => format!("/job-details?id={}", self.id),
            CardKind::Candidate => format!("/candidate-details?id={}", self.id),
        }
    }
}
