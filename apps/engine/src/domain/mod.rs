//! Domain layer: pure game-session logic.

pub mod cards;
pub mod dealing;
pub mod lobby;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod turns;
pub mod voting;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_consistency;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use cards::{Card, CardId};
pub use dealing::Deck;
pub use player_view::VisibleCards;
pub use scoring::{score_round, ScoreBoard, ScoreEntry};
pub use state::{ChatId, GameSession, Player, PlayerId, Stage};
pub use turns::SubmitCardResult;
pub use voting::{group_votes, RoundSummary, VoteResult};
