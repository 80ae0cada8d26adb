//! In-round card submissions: the storyteller's clue and seed card, then one
//! decoy per remaining player.

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::domain::cards::CardId;
use crate::domain::state::{GameSession, PlayerId, Stage};
use crate::errors::GameError;

/// Result of a decoy submission, describing the table afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitCardResult {
    pub cards_on_table: usize,
    pub players_in_round: usize,
    pub voting_started: bool,
}

impl GameSession {
    /// The storyteller commits a clue and the seed card, opening the table
    /// to everyone else.
    pub fn submit_clue_and_card(
        &mut self,
        player: PlayerId,
        clue: &str,
        card: CardId,
    ) -> Result<(), GameError> {
        match self.stage {
            Stage::StorytellerTurn => {}
            Stage::Finished => return Err(GameError::GameFinished),
            _ => return Err(GameError::NotStoryteller),
        }
        if !self.is_storyteller(player) {
            return Err(GameError::NotStoryteller);
        }
        let clue = clue.trim();
        if clue.is_empty() {
            return Err(GameError::EmptyClue);
        }

        let card = self.remove_from_hand(player, card)?;
        debug!(player, card = %card.id, clue, "storyteller played the seed card");
        self.table.push((player, card));
        self.clue = Some(clue.to_string());
        self.stage = Stage::PlayersTurn;
        info!(round = self.round_no, "clue given; players' turn begins");
        Ok(())
    }

    /// A non-storyteller plays their decoy. Once the table holds one card
    /// per active player, voting begins.
    ///
    /// A second submission from the same player is an error, not a no-op;
    /// treating it silently could double-remove the card.
    pub fn submit_card(
        &mut self,
        player: PlayerId,
        card: CardId,
    ) -> Result<SubmitCardResult, GameError> {
        match self.stage {
            Stage::PlayersTurn => {}
            Stage::Finished => return Err(GameError::GameFinished),
            _ => return Err(GameError::NotYourTurn),
        }
        let seated = self.player(player)?;
        if !seated.active || self.is_storyteller(player) || self.has_played(player) {
            return Err(GameError::NotYourTurn);
        }

        let card = self.remove_from_hand(player, card)?;
        debug!(player, card = %card.id, "decoy card played");
        self.table.push((player, card));

        let cards_on_table = self.table.len();
        let players_in_round = self.active_count();
        let voting_started = cards_on_table == players_in_round;
        if voting_started {
            self.begin_voting();
        }
        Ok(SubmitCardResult {
            cards_on_table,
            players_in_round,
            voting_started,
        })
    }

    /// Fix the table's display order for the vote. Shuffled once so the
    /// order players submitted in is not leaked.
    fn begin_voting(&mut self) {
        let mut order: Vec<PlayerId> = self.table.iter().map(|(owner, _)| *owner).collect();
        order.shuffle(&mut self.rng);
        self.voting_order = order;
        self.stage = Stage::Voting;
        info!(
            round = self.round_no,
            cards = self.table.len(),
            "all cards on the table; voting begins"
        );
    }
}
