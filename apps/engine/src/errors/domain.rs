//! Domain-level error type used across the session engine.
//!
//! Every fallible operation returns this as a plain value; no variant is ever
//! raised mid-mutation, so a returned error always means the session state is
//! exactly what it was before the call.

use thiserror::Error;

use crate::domain::cards::CardId;
use crate::domain::state::PlayerId;

/// Central error type for the game session engine.
///
/// Setup errors (`TooManyPlayers` .. `NotEnoughPlayers`), stage-legality
/// errors (`NotStoryteller`, `NotYourTurn`, `EmptyClue`), and referential
/// errors (`UnknownCard`, `UnknownPlayer`, `SelfVote`) are all recoverable
/// and reported back to the calling player. `DeckExhausted` is fatal to the
/// current round; the abort-vs-shrink policy belongs to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the deck cannot sustain another player")]
    TooManyPlayers,
    #[error("player is already in the game")]
    UserAlreadyInGame,
    #[error("only the game master may do this")]
    UserIsNotMaster,
    #[error("the game has already started")]
    GameAlreadyStarted,
    #[error("at least {min} players are required, got {actual}")]
    NotEnoughPlayers { min: usize, actual: usize },
    #[error("player is not the storyteller")]
    NotStoryteller,
    #[error("not this player's turn to act")]
    NotYourTurn,
    #[error("the clue must not be blank")]
    EmptyClue,
    #[error("card {0} is not available to this player")]
    UnknownCard(CardId),
    #[error("player {0} is not part of this round")]
    UnknownPlayer(PlayerId),
    #[error("players cannot vote for their own card")]
    SelfVote,
    #[error("deck exhausted: needed {needed} cards, {remaining} remain")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("the game is finished")]
    GameFinished,
    #[error("no game is running in this conversation")]
    NoGame,
    #[error("a game already exists in this conversation")]
    GameAlreadyExists,
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl GameError {
    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }
}
