//! Transport-facing surface of the engine.
//!
//! Each call resolves the conversation to its session, takes the session
//! lock, applies exactly one operation, and returns a render-ready update.
//! The adapter contains no rules; everything it may show comes from here.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::game::GameConfig;
use crate::domain::cards::CardId;
use crate::domain::player_view::VisibleCards;
use crate::domain::state::{ChatId, GameSession, PlayerId, Stage};
use crate::domain::voting::RoundSummary;
use crate::errors::GameError;
use crate::state::session_registry::SessionRegistry;

/// One player's line on the score display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
    pub player: PlayerId,
    pub display_name: String,
    pub total: i32,
    pub last_delta: i32,
}

/// Snapshot returned by every mutating call, sufficient for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct GameUpdate {
    pub stage: Stage,
    /// Current storyteller once the game is underway.
    pub storyteller: Option<PlayerId>,
    pub clue: Option<String>,
    /// Join order, cumulative totals plus last round's deltas.
    pub scores: Vec<ScoreLine>,
    /// Present exactly once per round, on the resolving vote.
    pub round_summary: Option<RoundSummary>,
}

/// Session engine entry point for the chat-transport adapter.
pub struct GameFlowService {
    registry: SessionRegistry,
    config: GameConfig,
}

impl GameFlowService {
    pub fn new(config: GameConfig) -> Self {
        Self {
            registry: SessionRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Create an empty game for a conversation with the caller as master.
    pub fn new_game(
        &self,
        chat: ChatId,
        master: PlayerId,
        master_name: &str,
    ) -> Result<GameUpdate, GameError> {
        let session = GameSession::new_game(self.config.clone(), master, master_name);
        let shared = self.registry.create(chat, session)?;
        info!(chat, master, "new game created");
        let session = shared.lock();
        Ok(render(&session, None))
    }

    pub fn add_player(
        &self,
        chat: ChatId,
        player: PlayerId,
        display_name: &str,
    ) -> Result<GameUpdate, GameError> {
        let shared = self.registry.get(chat)?;
        let mut session = shared.lock();
        let joined = session.add_player(player, display_name)?;
        debug!(chat, player, seated_now = joined.seated_now, "join applied");
        Ok(render(&session, None))
    }

    pub fn start_game(&self, chat: ChatId, caller: PlayerId) -> Result<GameUpdate, GameError> {
        let shared = self.registry.get(chat)?;
        let mut session = shared.lock();
        session.start_game(caller)?;
        Ok(render(&session, None))
    }

    pub fn submit_clue_and_card(
        &self,
        chat: ChatId,
        player: PlayerId,
        clue: &str,
        card: CardId,
    ) -> Result<GameUpdate, GameError> {
        let shared = self.registry.get(chat)?;
        let mut session = shared.lock();
        session.submit_clue_and_card(player, clue, card)?;
        Ok(render(&session, None))
    }

    pub fn submit_card(
        &self,
        chat: ChatId,
        player: PlayerId,
        card: CardId,
    ) -> Result<GameUpdate, GameError> {
        let shared = self.registry.get(chat)?;
        let mut session = shared.lock();
        let result = session.submit_card(player, card)?;
        debug!(
            chat,
            player,
            cards_on_table = result.cards_on_table,
            players_in_round = result.players_in_round,
            "card on the table"
        );
        Ok(render(&session, None))
    }

    pub fn submit_vote(
        &self,
        chat: ChatId,
        voter: PlayerId,
        accused: PlayerId,
    ) -> Result<GameUpdate, GameError> {
        let shared = self.registry.get(chat)?;
        let mut session = shared.lock();
        let result = session.submit_vote(voter, accused)?;
        debug!(
            chat,
            voter,
            votes_cast = result.votes_cast,
            votes_expected = result.votes_expected,
            "vote counted"
        );
        Ok(render(&session, result.summary))
    }

    /// Read-only query, served under the same lock as mutations.
    pub fn cards_visible_to(
        &self,
        chat: ChatId,
        player: PlayerId,
    ) -> Result<VisibleCards, GameError> {
        let shared = self.registry.get(chat)?;
        let session = shared.lock();
        Ok(session.cards_visible_to(player))
    }

    /// Tear down a conversation's game. Returns whether one existed.
    pub fn end_game(&self, chat: ChatId) -> bool {
        let removed = self.registry.remove(chat);
        if removed {
            info!(chat, "game torn down");
        }
        removed
    }
}

fn render(session: &GameSession, summary: Option<RoundSummary>) -> GameUpdate {
    let storyteller = match session.stage {
        Stage::StorytellerTurn | Stage::PlayersTurn | Stage::Voting => {
            Some(session.storyteller().id)
        }
        Stage::Lobby | Stage::Finished => None,
    };
    GameUpdate {
        stage: session.stage,
        storyteller,
        clue: session.clue.clone(),
        scores: session
            .players
            .iter()
            .map(|p| {
                let entry = session.score.entry(p.id);
                ScoreLine {
                    player: p.id,
                    display_name: p.display_name.clone(),
                    total: entry.total,
                    last_delta: entry.last_delta,
                }
            })
            .collect(),
        round_summary: summary,
    }
}
