pub mod deck_service;
pub mod dispatch_service;
pub mod match_service;
pub mod outcome_service;
