// Proptest generators for domain tests.

use proptest::prelude::*;

/// Seatable player counts: quorum up to the default deck's capacity.
pub fn player_count() -> impl Strategy<Value = usize> {
    3..=6usize
}

/// One accused pick per non-storyteller voter, as an index into the list of
/// players other than that voter (so self-votes are unrepresentable).
pub fn vote_picks(player_count: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..player_count - 1, player_count - 1)
}

pub fn count_and_votes() -> impl Strategy<Value = (usize, Vec<usize>)> {
    player_count().prop_flat_map(|n| (Just(n), vote_picks(n)))
}
