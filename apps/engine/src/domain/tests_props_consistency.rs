use std::collections::{BTreeMap, BTreeSet, HashSet};

use proptest::prelude::*;

use crate::domain::cards::CardId;
use crate::domain::scoring::score_round;
use crate::domain::state::{GameSession, PlayerId, Stage};
use crate::domain::test_gens::count_and_votes;
use crate::domain::test_state_helpers::{play_round_to_voting, started_session};

fn all_card_ids(session: &GameSession) -> Vec<CardId> {
    let mut ids = session.deck.draw_ids();
    ids.extend(session.players.iter().flat_map(|p| p.hand.iter().map(|c| c.id)));
    ids.extend(session.table.iter().map(|(_, c)| c.id));
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The classical ruleset stays within its award bounds no matter how the
    /// votes fall.
    #[test]
    fn prop_scoring_bounds((n, picks) in count_and_votes()) {
        let players: Vec<PlayerId> = (1..=n as PlayerId).collect();
        let storyteller = players[0];

        let mut correct: BTreeSet<PlayerId> = BTreeSet::new();
        let mut received: BTreeMap<PlayerId, usize> = BTreeMap::new();
        for (voter, pick) in players[1..].iter().zip(&picks) {
            let others: Vec<PlayerId> =
                players.iter().copied().filter(|p| p != voter).collect();
            let accused = others[pick % others.len()];
            if accused == storyteller {
                correct.insert(*voter);
            }
            *received.entry(accused).or_default() += 1;
        }

        let deltas = score_round(storyteller, &players, &correct, &received);

        let k = correct.len();
        let all_or_none = k == 0 || k == n - 1;
        prop_assert_eq!(deltas[&storyteller], if all_or_none { 0 } else { 3 });
        for player in &players[1..] {
            let delta = deltas[player];
            prop_assert!(delta >= 0);
            if all_or_none {
                prop_assert!(delta >= 2);
            } else if correct.contains(player) {
                prop_assert!(delta >= 3);
            }
            // A decoy never collects more bonus votes than there are voters.
            prop_assert!(delta <= 3 + (n as i32 - 1));
        }
    }

    /// A full round never duplicates, leaks, or invents a card, and the
    /// committed deltas match the totals they produced.
    #[test]
    fn prop_full_round_conserves_cards((n, picks) in count_and_votes()) {
        let mut session = started_session(n);
        let total = session.config.deck_size as usize;
        play_round_to_voting(&mut session, "clue");

        let storyteller = session.storyteller().id;
        let voters: Vec<PlayerId> = session
            .active_ids()
            .into_iter()
            .filter(|p| *p != storyteller)
            .collect();
        for (voter, pick) in voters.iter().zip(&picks) {
            let others: Vec<PlayerId> = session
                .active_ids()
                .into_iter()
                .filter(|p| p != voter)
                .collect();
            let accused = others[pick % others.len()];
            session.submit_vote(*voter, accused).unwrap();
        }

        prop_assert_eq!(session.stage, Stage::StorytellerTurn);
        prop_assert!(session
            .players
            .iter()
            .all(|p| p.hand.len() == session.config.hand_size));

        let ids = all_card_ids(&session);
        let distinct: HashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), distinct.len());
        prop_assert_eq!(ids.len() + session.deck.discarded(), total);

        // First round, so each total is exactly that round's delta.
        for (_, entry) in session.score.iter() {
            prop_assert_eq!(entry.total, entry.last_delta);
        }
    }
}
