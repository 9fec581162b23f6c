use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use jobscape_core::backend::store::SwipeStore;
use jobscape_core::error::{Error, Result};
use jobscape_core::models::application::{
    ApplicantRow, Application, ApplicationStatus, NewApplication,
};
use jobscape_core::models::interview::{Interview, NewInterview};
use jobscape_core::models::job::Job;
use jobscape_core::models::job_match::{JobMatch, NewMatch};
use jobscape_core::models::swipe::{NewSwipeAction, SwipeAction};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// In-memory stand-in for the backend store, with the same uniqueness
/// behavior the real tables enforce. Failure injection covers the retry
/// paths.
#[derive(Default)]
pub struct MemoryStore {
    pub jobs: Mutex<Vec<Job>>,
    pub applications: Mutex<Vec<Application>>,
    pub swipe_actions: Mutex<Vec<SwipeAction>>,
    pub matches: Mutex<Vec<JobMatch>>,
    pub interviews: Mutex<Vec<Interview>>,
    pub applicants: Mutex<Vec<ApplicantRow>>,
    /// Inserts to fail before the store recovers.
    pub insert_failures: AtomicU32,
    pub fail_match_lookup: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_job(&self, job: Job) {
        self.jobs.lock().unwrap().push(job);
    }

    pub fn seed_applicant(&self, row: ApplicantRow) {
        self.applicants.lock().unwrap().push(row);
    }

    fn take_failure(&self) -> bool {
        self.insert_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }

    fn backend_down() -> Error {
        Error::Backend {
            status: 503,
            message: "backend unavailable".to_string(),
        }
    }
}

#[async_trait]
impl SwipeStore for MemoryStore {
    async fn list_jobs_excluding(&self, exclude: Vec<Uuid>, limit: u32) -> Result<Vec<Job>> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .filter(|job| !exclude.contains(&job.id))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_applied_job_ids(&self, job_seeker_id: Uuid) -> Result<Vec<Uuid>> {
        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .filter(|a| a.job_seeker_id == job_seeker_id)
            .map(|a| a.job_id)
            .collect())
    }

    async fn list_pending_applicants(&self, limit: u32) -> Result<Vec<ApplicantRow>> {
        let applicants = self.applicants.lock().unwrap();
        Ok(applicants
            .iter()
            .filter(|row| row.status == ApplicationStatus::Pending)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_application(
        &self,
        job_id: Uuid,
        job_seeker_id: Uuid,
    ) -> Result<Option<Application>> {
        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .find(|a| a.job_id == job_id && a.job_seeker_id == job_seeker_id)
            .cloned())
    }

    async fn insert_application(&self, new: NewApplication) -> Result<Option<Application>> {
        if self.take_failure() {
            return Err(Self::backend_down());
        }
        let mut applications = self.applications.lock().unwrap();
        if applications
            .iter()
            .any(|a| a.job_id == new.job_id && a.job_seeker_id == new.job_seeker_id)
        {
            return Ok(None);
        }
        let application = Application {
            id: Uuid::new_v4(),
            job_id: new.job_id,
            job_seeker_id: new.job_seeker_id,
            status: new.status,
            applied_at: Some(Utc::now()),
        };
        applications.push(application.clone());
        Ok(Some(application))
    }

    async fn update_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<()> {
        let mut applications = self.applications.lock().unwrap();
        match applications.iter_mut().find(|a| a.id == id) {
            Some(application) => {
                application.status = status;
                Ok(())
            }
            None => Err(Error::NotFound(format!("application {}", id))),
        }
    }

    async fn insert_swipe_action(&self, new: NewSwipeAction) -> Result<Option<SwipeAction>> {
        if self.take_failure() {
            return Err(Self::backend_down());
        }
        let mut swipe_actions = self.swipe_actions.lock().unwrap();
        if swipe_actions.iter().any(|s| {
            s.recruiter_id == new.recruiter_id
                && s.job_seeker_id == new.job_seeker_id
                && s.direction == new.direction
        }) {
            return Ok(None);
        }
        let action = SwipeAction {
            id: Uuid::new_v4(),
            recruiter_id: new.recruiter_id,
            job_seeker_id: new.job_seeker_id,
            direction: new.direction,
            created_at: Some(Utc::now()),
        };
        swipe_actions.push(action.clone());
        Ok(Some(action))
    }

    async fn find_match(&self, job_id: Uuid, job_seeker_id: Uuid) -> Result<Option<JobMatch>> {
        if self.fail_match_lookup.load(Ordering::SeqCst) {
            return Err(Self::backend_down());
        }
        let matches = self.matches.lock().unwrap();
        Ok(matches
            .iter()
            .find(|m| m.job_id == job_id && m.job_seeker_id == job_seeker_id)
            .cloned())
    }

    async fn insert_match(&self, new: NewMatch) -> Result<Option<JobMatch>> {
        let mut matches = self.matches.lock().unwrap();
        if matches
            .iter()
            .any(|m| m.job_id == new.job_id && m.job_seeker_id == new.job_seeker_id)
        {
            return Ok(None);
        }
        let created = JobMatch {
            id: Uuid::new_v4(),
            job_id: new.job_id,
            job_seeker_id: new.job_seeker_id,
            recruiter_id: new.recruiter_id,
            application_id: new.application_id,
            created_at: Some(Utc::now()),
        };
        matches.push(created.clone());
        Ok(Some(created))
    }

    async fn insert_interview(&self, new: NewInterview) -> Result<Interview> {
        let mut interviews = self.interviews.lock().unwrap();
        let interview = Interview {
            id: Uuid::new_v4(),
            applicant_id: new.applicant_id,
            recruiter_id: new.recruiter_id,
            scheduled_date: new.scheduled_date,
            location: new.location,
            notes: new.notes,
            created_at: Some(Utc::now()),
        };
        interviews.push(interview.clone());
        Ok(interview)
    }
}
