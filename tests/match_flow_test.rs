mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use common::MemoryStore;
use jobscape_core::backend::storage::StorageClient;
use jobscape_core::backend::store::SwipeStore;
use jobscape_core::models::application::ApplicationStatus;
use jobscape_core::models::card::{CardKind, SwipeCard};
use jobscape_core::services::match_service::ScheduleInterview;
use jobscape_core::AppState;

fn app_state(store: &Arc<MemoryStore>) -> AppState {
    let storage = StorageClient::new("http://localhost:1", "test-key", 60).unwrap();
    let (state, _events) = AppState::with_store(
        Arc::clone(store) as Arc<dyn SwipeStore>,
        storage,
        30,
        3,
        Duration::from_millis(1),
    );
    state
}

async fn seeded_application(state: &AppState, job_id: Uuid, seeker_id: Uuid) -> Uuid {
    let card = SwipeCard {
        id: job_id,
        owner_id: Uuid::from_u128(99),
        kind: CardKind::Job,
        title: "Backend Engineer".to_string(),
        subtitle: None,
        description: None,
        poster: None,
        tags: Vec::new(),
    };
    state
        .dispatch_service
        .apply_to_job(seeker_id, &card)
        .await
        .unwrap();
    state
        .store
        .find_application(job_id, seeker_id)
        .await
        .unwrap()
        .expect("application seeded")
        .id
}

fn request(application_id: Uuid, job_id: Uuid, seeker_id: Uuid) -> ScheduleInterview {
    ScheduleInterview {
        application_id,
        job_id,
        job_seeker_id: seeker_id,
        recruiter_id: Uuid::from_u128(99),
        scheduled_date: Utc::now(),
        location: Some("HQ, floor 2".to_string()),
        notes: Some("Bring portfolio".to_string()),
    }
}

#[tokio::test]
async fn scheduling_an_interview_creates_the_match_exactly_once() {
    common::init_tracing();
    let job_id = Uuid::from_u128(1);
    let seeker_id = Uuid::from_u128(2);
    let store = Arc::new(MemoryStore::new());
    let state = app_state(&store);
    let application_id = seeded_application(&state, job_id, seeker_id).await;

    let interview = state
        .match_service
        .schedule_interview(request(application_id, job_id, seeker_id))
        .await
        .unwrap();
    assert_eq!(interview.applicant_id, application_id);

    {
        let applications = store.applications.lock().unwrap();
        assert_eq!(applications[0].status, ApplicationStatus::Interview);
        let matches = store.matches.lock().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].job_id, job_id);
        assert_eq!(matches[0].job_seeker_id, seeker_id);
        assert_eq!(matches[0].application_id, application_id);
    }

    // a second booking for the same pair reuses the existing match
    state
        .match_service
        .schedule_interview(request(application_id, job_id, seeker_id))
        .await
        .unwrap();
    assert_eq!(store.interviews.lock().unwrap().len(), 2);
    assert_eq!(store.matches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_match_lookup_aborts_creation_but_keeps_the_interview() {
    common::init_tracing();
    let job_id = Uuid::from_u128(1);
    let seeker_id = Uuid::from_u128(2);
    let store = Arc::new(MemoryStore::new());
    let state = app_state(&store);
    let application_id = seeded_application(&state, job_id, seeker_id).await;

    store
        .fail_match_lookup
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let interview = state
        .match_service
        .schedule_interview(request(application_id, job_id, seeker_id))
        .await
        .unwrap();
    assert_eq!(interview.applicant_id, application_id);
    assert!(store.matches.lock().unwrap().is_empty());
    assert_eq!(store.interviews.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn accept_and_reject_flip_the_application_status() {
    common::init_tracing();
    let job_id = Uuid::from_u128(1);
    let seeker_id = Uuid::from_u128(2);
    let store = Arc::new(MemoryStore::new());
    let state = app_state(&store);
    let application_id = seeded_application(&state, job_id, seeker_id).await;

    state
        .match_service
        .accept_application(application_id)
        .await
        .unwrap();
    assert_eq!(
        store.applications.lock().unwrap()[0].status,
        ApplicationStatus::Accepted
    );

    state
        .match_service
        .reject_application(application_id)
        .await
        .unwrap();
    assert_eq!(
        store.applications.lock().unwrap()[0].status,
        ApplicationStatus::Rejected
    );
}

#[tokio::test]
async fn ensure_match_is_idempotent_for_the_pair() {
    common::init_tracing();
    let job_id = Uuid::from_u128(1);
    let seeker_id = Uuid::from_u128(2);
    let recruiter_id = Uuid::from_u128(3);
    let store = Arc::new(MemoryStore::new());
    let state = app_state(&store);
    let application_id = seeded_application(&state, job_id, seeker_id).await;

    let first = state
        .match_service
        .ensure_match(job_id, seeker_id, recruiter_id, application_id)
        .await
        .unwrap()
        .expect("match created");

    let second = state
        .match_service
        .ensure_match(job_id, seeker_id, recruiter_id, application_id)
        .await
        .unwrap()
        .expect("existing match returned");

    assert_eq!(first.id, second.id);
    assert_eq!(store.matches.lock().unwrap().len(), 1);
}
