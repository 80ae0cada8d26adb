use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::game::GameConfig;
use crate::domain::cards::{Card, CardId};
use crate::domain::dealing::Deck;
use crate::domain::scoring::ScoreBoard;
use crate::errors::GameError;

/// Transport-supplied player identity.
pub type PlayerId = i64;

/// Conversation identifier a session is attached to.
pub type ChatId = i64;

/// One participant. Players are never removed mid-session.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// Membership is what matters; order is irrelevant.
    pub hand: Vec<Card>,
    /// Whether the player participates in the current round. Between-round
    /// joiners stay inactive until hands are dealt at the next boundary.
    pub active: bool,
}

/// Per-round stage of the session state machine.
///
/// Monotonic within a round, cyclic across rounds; `Lobby` is visited only
/// once, at session birth. `Finished` is reachable only when a non-default
/// end condition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Session created, players joining, nothing dealt yet.
    Lobby,
    /// Waiting for the storyteller's clue and seed card.
    StorytellerTurn,
    /// Waiting for every other player's decoy card.
    PlayersTurn,
    /// Waiting for every non-storyteller vote.
    Voting,
    /// End condition met; no further actions are accepted.
    Finished,
}

/// Entire session container: deck, seats, table, votes, and scores.
///
/// All mutation goes through the stage-checked operations in `lobby`,
/// `turns`, and `voting`; callers serialize access via the session lock held
/// by the registry.
#[derive(Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub stage: Stage,
    /// Rotation order = join order. The master is always index 0.
    pub players: Vec<Player>,
    pub storyteller_index: usize,
    /// 1-based once the game starts; 0 in the lobby.
    pub round_no: u32,
    pub clue: Option<String>,
    /// One entry per player that has played this round, keyed by player id.
    pub table: Vec<(PlayerId, Card)>,
    /// Table display order during Voting, fixed when Voting begins so play
    /// order is not leaked.
    pub voting_order: Vec<PlayerId>,
    /// voter -> accused. Never contains the storyteller as voter.
    pub votes: Vec<(PlayerId, PlayerId)>,
    pub deck: Deck,
    pub score: ScoreBoard,
    pub(crate) rng: ChaCha8Rng,
}

impl GameSession {
    /// The player who created the session. Always seated at index 0.
    pub fn master(&self) -> &Player {
        &self.players[0]
    }

    pub fn storyteller(&self) -> &Player {
        &self.players[self.storyteller_index]
    }

    pub fn is_storyteller(&self, player: PlayerId) -> bool {
        self.storyteller().id == player
    }

    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player)
    }

    pub fn player(&self, player: PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.id == player)
            .ok_or(GameError::UnknownPlayer(player))
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| p.id == player)
            .ok_or(GameError::UnknownPlayer(player))
    }

    /// Players participating in the current round, in rotation order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    pub fn active_ids(&self) -> Vec<PlayerId> {
        self.active_players().map(|p| p.id).collect()
    }

    /// The card a player has on the table this round, if any.
    pub fn table_entry(&self, player: PlayerId) -> Option<&Card> {
        self.table
            .iter()
            .find(|(owner, _)| *owner == player)
            .map(|(_, card)| card)
    }

    pub fn has_played(&self, player: PlayerId) -> bool {
        self.table_entry(player).is_some()
    }

    pub fn has_voted(&self, voter: PlayerId) -> bool {
        self.votes.iter().any(|(v, _)| *v == voter)
    }

    /// Move a card out of a player's hand.
    pub(crate) fn remove_from_hand(
        &mut self,
        player: PlayerId,
        card: CardId,
    ) -> Result<Card, GameError> {
        let owner = self.player_mut(player)?;
        let pos = owner
            .hand
            .iter()
            .position(|c| c.id == card)
            .ok_or(GameError::UnknownCard(card))?;
        Ok(owner.hand.remove(pos))
    }
}
