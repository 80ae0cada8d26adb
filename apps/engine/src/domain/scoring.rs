//! Round scoring, kept isolated from the state machine so the ruleset can be
//! swapped without touching stage logic.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::state::PlayerId;

/// Storyteller and correct-voter award when some but not all voters found
/// the seed card.
const FOUND_AWARD: i32 = 3;
/// Everyone-else award when the clue was too obvious or too obscure
/// (all voters correct, or none).
const ALL_OR_NOTHING_AWARD: i32 = 2;
/// Bonus per vote a decoy card attracted.
const DECOY_VOTE_AWARD: i32 = 1;

/// Cumulative total plus the most recent round's delta, kept for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub total: i32,
    pub last_delta: i32,
}

/// Per-player running scores for one session.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    entries: BTreeMap<PlayerId, ScoreEntry>,
}

impl ScoreBoard {
    /// Add a player with a zero score. Idempotent.
    pub fn register(&mut self, player: PlayerId) {
        self.entries.entry(player).or_default();
    }

    pub fn entry(&self, player: PlayerId) -> ScoreEntry {
        self.entries.get(&player).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, ScoreEntry)> + '_ {
        self.entries.iter().map(|(p, e)| (*p, *e))
    }

    /// Commit one round's deltas: every `last_delta` is reset first, so a
    /// player absent from `deltas` shows +0 for the round.
    pub fn apply_round_result(&mut self, deltas: &BTreeMap<PlayerId, i32>) {
        for entry in self.entries.values_mut() {
            entry.last_delta = 0;
        }
        for (player, delta) in deltas {
            let entry = self.entries.entry(*player).or_default();
            entry.total += delta;
            entry.last_delta = *delta;
        }
    }

    pub fn best_total(&self) -> i32 {
        self.entries.values().map(|e| e.total).max().unwrap_or(0)
    }

    /// Players holding the best total.
    pub fn leaders(&self) -> Vec<PlayerId> {
        let best = self.best_total();
        self.entries
            .iter()
            .filter(|(_, e)| e.total == best)
            .map(|(p, _)| *p)
            .collect()
    }
}

/// Classical ruleset for one round, as a pure function over the vote tally.
///
/// With k = |correct voters| and n = non-storyteller players:
/// - k == 0 or k == n: storyteller 0, every other player +2;
/// - otherwise: storyteller +3, each correct voter +3.
///
/// Independently, every non-storyteller gains +1 per vote their own card
/// received, rewarding convincing decoys.
pub fn score_round(
    storyteller: PlayerId,
    round_players: &[PlayerId],
    correct_voters: &BTreeSet<PlayerId>,
    votes_received: &BTreeMap<PlayerId, usize>,
) -> BTreeMap<PlayerId, i32> {
    let n = round_players.len().saturating_sub(1);
    let k = correct_voters.len();

    let mut deltas: BTreeMap<PlayerId, i32> =
        round_players.iter().map(|p| (*p, 0)).collect();

    if k == 0 || k == n {
        for player in round_players {
            if *player != storyteller {
                *deltas.entry(*player).or_default() += ALL_OR_NOTHING_AWARD;
            }
        }
    } else {
        *deltas.entry(storyteller).or_default() += FOUND_AWARD;
        for voter in correct_voters {
            *deltas.entry(*voter).or_default() += FOUND_AWARD;
        }
    }

    for player in round_players {
        if *player == storyteller {
            continue;
        }
        if let Some(count) = votes_received.get(player) {
            *deltas.entry(*player).or_default() += DECOY_VOTE_AWARD * *count as i32;
        }
    }

    deltas
}
