/// Hand size every player is topped back up to at the end of a round.
pub const HAND_SIZE: usize = 6;

/// Minimum quorum to start a game.
pub const MIN_PLAYERS: usize = 3;

/// Default number of cards in a fresh deck.
pub const DECK_SIZE: u32 = 84;

/// Largest player count the deck can sustain for a full game: the initial
/// deal plus one complete storyteller rotation of replenishment (each round
/// consumes one card per seated player).
pub fn max_players(deck_size: usize, hand_size: usize) -> usize {
    let mut p = 0;
    while (p + 1) * hand_size + (p + 1) * (p + 1) <= deck_size {
        p += 1;
    }
    p
}

/// End-of-game predicate evaluated over the score board after each round.
///
/// The classic ruleset has no agreed stopping point for open-ended play, so
/// the default is `Never`; a target score turns the session terminal once any
/// total reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCondition {
    Never,
    TargetScore(i32),
}

impl EndCondition {
    pub fn is_met(&self, best_total: i32) -> bool {
        match self {
            EndCondition::Never => false,
            EndCondition::TargetScore(target) => best_total >= *target,
        }
    }
}
