use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::storage::{StorageClient, JOB_POSTER_BUCKET, PROFILE_PHOTO_BUCKET};
use crate::backend::store::SwipeStore;
use crate::error::Result;
use crate::models::application::ApplicantRow;
use crate::models::card::{CardKind, SwipeCard};
use crate::models::job::Job;

/// Shapes backend rows into swipeable cards. Exclusion filters run at
/// fetch time only; an application made elsewhere while a deck is open
/// stays invisible until the next load.
#[derive(Clone)]
pub struct DeckService {
    store: Arc<dyn SwipeStore>,
    storage: StorageClient,
    fetch_limit: u32,
}

impl DeckService {
    pub fn new(store: Arc<dyn SwipeStore>, storage: StorageClient, fetch_limit: u32) -> Self {
        Self {
            store,
            storage,
            fetch_limit,
        }
    }

    /// Jobs the seeker has not applied to, newest first.
    pub async fn load_job_deck(&self, job_seeker_id: Uuid) -> Result<Vec<SwipeCard>> {
        let applied = self.store.list_applied_job_ids(job_seeker_id).await?;
        let jobs = self
            .store
            .list_jobs_excluding(applied, self.fetch_limit)
            .await?;
        let mut cards = Vec::with_capacity(jobs.len());
        for job in jobs {
            cards.push(self.job_card(job).await);
        }
        info!("Loaded {} job cards for seeker {}", cards.len(), job_seeker_id);
        Ok(cards)
    }

    /// Candidates with a pending application, newest first.
    pub async fn load_candidate_deck(&self) -> Result<Vec<SwipeCard>> {
        let applicants = self.store.list_pending_applicants(self.fetch_limit).await?;
        let mut cards = Vec::with_capacity(applicants.len());
        for row in applicants {
            if let Some(card) = self.candidate_card(row).await {
                cards.push(card);
            }
        }
        info!("Loaded {} candidate cards", cards.len());
        Ok(cards)
    }

    async fn job_card(&self, job: Job) -> SwipeCard {
        let poster = match &job.poster {
            Some(reference) => self.storage.resolve_media(JOB_POSTER_BUCKET, reference).await,
            None => None,
        };
        let company = job
            .recruiters
            .as_ref()
            .and_then(|r| r.company_name.clone());
        SwipeCard {
            id: job.id,
            owner_id: job.recruiter_id,
            kind: CardKind::Job,
            title: job.title,
            subtitle: job.subtitle.or(company),
            description: job.description,
            poster,
            tags: job.badge.into_iter().collect(),
        }
    }

    async fn candidate_card(&self, row: ApplicantRow) -> Option<SwipeCard> {
        let Some(seeker) = row.job_seeker else {
            warn!("Application {} has no job seeker embedded; skipping", row.id);
            return None;
        };
        let poster = match &seeker.avatar_url {
            Some(reference) => {
                self.storage
                    .resolve_media(PROFILE_PHOTO_BUCKET, reference)
                    .await
            }
            None => None,
        };
        let applied_for = row
            .job
            .as_ref()
            .map(|job| format!("Applied for: {} ({})", job.title, row.status.as_str()));
        let mut tags = seeker.skills;
        tags.extend(seeker.qualifications);
        Some(SwipeCard {
            id: seeker.id,
            owner_id: seeker.id,
            kind: CardKind::Candidate,
            title: seeker.full_name,
            subtitle: applied_for.or(seeker.profession),
            description: seeker.summary,
            poster,
            tags,
        })
    }
}
