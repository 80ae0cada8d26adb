#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use config::game::GameConfig;
pub use domain::cards::{Card, CardId};
pub use domain::lobby::JoinResult;
pub use domain::player_view::VisibleCards;
pub use domain::rules::EndCondition;
pub use domain::state::{ChatId, GameSession, PlayerId, Stage};
pub use domain::voting::RoundSummary;
pub use errors::GameError;
pub use services::game_flow::{GameFlowService, GameUpdate, ScoreLine};
pub use state::session_registry::SessionRegistry;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
