//! Player view of the session: which cards a read-only query may offer.
//!
//! Served under the same session lock as mutations so a player is never
//! offered cards based on stale hand contents.

use serde::Serialize;

use crate::domain::cards::Card;
use crate::domain::state::{GameSession, PlayerId, Stage};

/// What the adapter should show a player right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VisibleCards {
    /// The player's own hand, to pick a card from.
    Hand(Vec<Card>),
    /// The table in its fixed voting order, to vote on.
    Table(Vec<Card>),
    /// Nothing to do; the adapter renders "please wait".
    Wait,
}

impl GameSession {
    /// Cards a player should be offered, depending on stage and role.
    pub fn cards_visible_to(&self, player: PlayerId) -> VisibleCards {
        let Ok(seated) = self.player(player) else {
            return VisibleCards::Wait;
        };
        match self.stage {
            Stage::StorytellerTurn if self.is_storyteller(player) => {
                VisibleCards::Hand(seated.hand.clone())
            }
            Stage::PlayersTurn if seated.active && !self.is_storyteller(player) => {
                VisibleCards::Hand(seated.hand.clone())
            }
            Stage::Voting if seated.active && !self.is_storyteller(player) => {
                let table = self
                    .voting_order
                    .iter()
                    .filter_map(|owner| self.table_entry(*owner).cloned())
                    .collect();
                VisibleCards::Table(table)
            }
            _ => VisibleCards::Wait,
        }
    }
}
