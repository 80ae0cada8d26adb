//! Vote bookkeeping and end-of-round resolution.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::cards::Card;
use crate::domain::dealing;
use crate::domain::scoring::{score_round, ScoreEntry};
use crate::domain::state::{GameSession, PlayerId, Stage};
use crate::errors::GameError;

/// Result of a vote, carrying the round summary once the last vote lands.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteResult {
    pub votes_cast: usize,
    pub votes_expected: usize,
    /// Present exactly once per round, on the resolving vote.
    pub summary: Option<RoundSummary>,
}

/// Everything the adapter needs to render the end of a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    /// The round that was just resolved.
    pub round_no: u32,
    pub storyteller: PlayerId,
    pub clue: String,
    /// The storyteller's seed card, revealed.
    pub reveal: Card,
    pub correct_voters: Vec<PlayerId>,
    /// accused -> voters, in first-accusation order, for the
    /// "who voted on whose card" display.
    pub grouped_votes: Vec<(PlayerId, Vec<PlayerId>)>,
    /// Totals and per-round deltas for every player, in join order.
    pub scores: Vec<(PlayerId, ScoreEntry)>,
    /// None when the game just finished.
    pub next_storyteller: Option<PlayerId>,
    /// Present when the end condition fired.
    pub winners: Option<Vec<PlayerId>>,
}

impl GameSession {
    /// Record one vote. When every non-storyteller has voted, the round is
    /// resolved: scores commit, hands replenish, and the storyteller
    /// rotation advances.
    pub fn submit_vote(
        &mut self,
        voter: PlayerId,
        accused: PlayerId,
    ) -> Result<VoteResult, GameError> {
        match self.stage {
            Stage::Voting => {}
            Stage::Finished => return Err(GameError::GameFinished),
            _ => return Err(GameError::NotYourTurn),
        }
        let seated = self.player(voter)?;
        if !seated.active || self.is_storyteller(voter) || self.has_voted(voter) {
            return Err(GameError::NotYourTurn);
        }
        if accused == voter {
            return Err(GameError::SelfVote);
        }
        if !self.has_played(accused) {
            return Err(GameError::UnknownPlayer(accused));
        }

        self.votes.push((voter, accused));
        debug!(voter, accused, "vote recorded");

        let votes_cast = self.votes.len();
        let votes_expected = self.active_count() - 1;
        let summary = if votes_cast == votes_expected {
            match self.resolve_round() {
                Ok(summary) => Some(summary),
                // Keep the call all-or-nothing: resolution mutates nothing
                // before its deck check, so dropping the vote restores the
                // pre-call state exactly.
                Err(err) => {
                    self.votes.pop();
                    return Err(err);
                }
            }
        } else {
            None
        };
        Ok(VoteResult {
            votes_cast,
            votes_expected,
            summary,
        })
    }

    /// Commit the round: tally, score, discard the table, replenish every
    /// hand (late joiners included), advance the storyteller, and evaluate
    /// the end condition.
    ///
    /// Deck sufficiency is checked before anything mutates, so an exhausted
    /// deck surfaces with scores, table, and votes untouched.
    fn resolve_round(&mut self) -> Result<RoundSummary, GameError> {
        let storyteller = self.storyteller().id;
        let round_players = self.active_ids();

        // Everyone gets topped back up, including players dealt in now.
        let needed: usize = self
            .players
            .iter()
            .map(|p| self.config.hand_size.saturating_sub(p.hand.len()))
            .sum();
        if needed > self.deck.remaining() {
            return Err(GameError::DeckExhausted {
                needed,
                remaining: self.deck.remaining(),
            });
        }

        let reveal = self
            .table_entry(storyteller)
            .cloned()
            .ok_or_else(|| GameError::invariant("storyteller card missing from table"))?;

        let correct_voters: BTreeSet<PlayerId> = self
            .votes
            .iter()
            .filter(|(_, accused)| *accused == storyteller)
            .map(|(voter, _)| *voter)
            .collect();
        let mut votes_received: BTreeMap<PlayerId, usize> = BTreeMap::new();
        for (_, accused) in &self.votes {
            *votes_received.entry(*accused).or_default() += 1;
        }

        let deltas = score_round(storyteller, &round_players, &correct_voters, &votes_received);
        self.score.apply_round_result(&deltas);

        let clue = self.clue.take().unwrap_or_default();
        let grouped_votes = group_votes(&self.votes);
        let resolved_round = self.round_no;

        // Round turnover: table cards retire, everyone is dealt in.
        let played: Vec<Card> = self.table.drain(..).map(|(_, card)| card).collect();
        self.deck.discard(played);
        self.voting_order.clear();
        self.votes.clear();
        for player in &mut self.players {
            player.active = true;
        }
        dealing::replenish_hands(&mut self.deck, &mut self.players, self.config.hand_size)?;

        self.storyteller_index = (self.storyteller_index + 1) % self.players.len();
        self.round_no += 1;

        let winners = if self
            .config
            .end_condition
            .is_met(self.score.best_total())
        {
            self.stage = Stage::Finished;
            Some(self.score.leaders())
        } else {
            self.stage = Stage::StorytellerTurn;
            None
        };

        info!(
            round = resolved_round,
            storyteller,
            correct = correct_voters.len(),
            finished = winners.is_some(),
            "round resolved"
        );

        Ok(RoundSummary {
            round_no: resolved_round,
            storyteller,
            clue,
            reveal,
            correct_voters: correct_voters.into_iter().collect(),
            grouped_votes,
            scores: self
                .players
                .iter()
                .map(|p| (p.id, self.score.entry(p.id)))
                .collect(),
            next_storyteller: match winners {
                Some(_) => None,
                None => Some(self.storyteller().id),
            },
            winners,
        })
    }
}

/// Group votes by accused player, preserving first-accusation order.
pub fn group_votes(votes: &[(PlayerId, PlayerId)]) -> Vec<(PlayerId, Vec<PlayerId>)> {
    let mut grouped: Vec<(PlayerId, Vec<PlayerId>)> = Vec::new();
    for (voter, accused) in votes {
        match grouped.iter_mut().find(|(a, _)| a == accused) {
            Some((_, voters)) => voters.push(*voter),
            None => grouped.push((*accused, vec![*voter])),
        }
    }
    grouped
}
