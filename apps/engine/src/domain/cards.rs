use std::fmt;

use serde::Serialize;

/// Stable card identity, unique within a session and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable card: identity plus an opaque artwork reference.
///
/// A card is owned by exactly one place at a time: the deck's draw pile, one
/// player's hand, the table, or the discard pile after a round is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub artwork: String,
}
