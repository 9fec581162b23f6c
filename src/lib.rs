pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod stack;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::rest::RestStore;
use crate::backend::storage::StorageClient;
use crate::backend::store::SwipeStore;
use crate::models::card::SwipeCard;
use crate::services::deck_service::DeckService;
use crate::services::dispatch_service::{Actor, DispatchService};
use crate::services::match_service::MatchService;
use crate::services::outcome_service::{OutcomeEvent, OutcomeService};
use crate::stack::animate::Animator;
use crate::stack::deck::CardDeck;
use crate::stack::gesture::DirectionPolicy;
use crate::stack::session::StackSession;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SwipeStore>,
    pub deck_service: DeckService,
    pub dispatch_service: DispatchService,
    pub match_service: MatchService,
    pub outcome_service: Arc<OutcomeService>,
}

impl AppState {
    /// Wires every service against the configured backend. The returned
    /// receiver carries persistence outcomes for hosts that want to show
    /// them; dropping it is fine.
    pub fn new() -> crate::error::Result<(Self, UnboundedReceiver<OutcomeEvent>)> {
        let config = crate::config::get_config();
        let store: Arc<dyn SwipeStore> = Arc::new(RestStore::from_config()?);
        let storage = StorageClient::from_config()?;
        Ok(Self::with_store(
            store,
            storage,
            config.deck_fetch_limit,
            config.outcome_max_attempts,
            Duration::from_millis(config.outcome_retry_ms),
        ))
    }

    pub fn with_store(
        store: Arc<dyn SwipeStore>,
        storage: StorageClient,
        deck_fetch_limit: u32,
        outcome_max_attempts: u32,
        outcome_retry_delay: Duration,
    ) -> (Self, UnboundedReceiver<OutcomeEvent>) {
        let dispatch_service = DispatchService::new(Arc::clone(&store));
        let match_service = MatchService::new(Arc::clone(&store));
        let deck_service = DeckService::new(Arc::clone(&store), storage, deck_fetch_limit);
        let (outcome_service, events) = OutcomeService::new(
            dispatch_service.clone(),
            outcome_max_attempts,
            outcome_retry_delay,
        );
        (
            Self {
                store,
                deck_service,
                dispatch_service,
                match_service,
                outcome_service,
            },
            events,
        )
    }

    /// A stack session over a freshly loaded deck.
    pub fn session(
        &self,
        cards: Vec<SwipeCard>,
        policy: DirectionPolicy,
        actor: Option<Actor>,
        animator: Arc<dyn Animator>,
    ) -> StackSession {
        StackSession::new(
            CardDeck::new(cards),
            policy,
            actor,
            Arc::clone(&self.outcome_service),
            animator,
        )
    }
}
