//! Test-only session builders for domain unit tests.

use crate::config::game::GameConfig;
use crate::domain::cards::CardId;
use crate::domain::state::{GameSession, PlayerId};

pub const ALICE: PlayerId = 1;
pub const BOB: PlayerId = 2;
pub const CAROL: PlayerId = 3;
pub const DAVE: PlayerId = 4;

pub fn test_config() -> GameConfig {
    GameConfig {
        shuffle_seed: Some(42),
        ..GameConfig::default()
    }
}

/// A lobby with Alice as master and `player_count - 1` more players seated.
pub fn lobby_session(player_count: usize) -> GameSession {
    lobby_session_with(test_config(), player_count)
}

pub fn lobby_session_with(config: GameConfig, player_count: usize) -> GameSession {
    assert!((1..=6).contains(&player_count));
    let mut session = GameSession::new_game(config, ALICE, "Alice");
    let names = ["Bob", "Carol", "Dave", "Erin", "Frank"];
    for i in 1..player_count {
        session
            .add_player(i as PlayerId + 1, names[i - 1])
            .unwrap();
    }
    session
}

pub fn started_session(player_count: usize) -> GameSession {
    started_session_with(test_config(), player_count)
}

pub fn started_session_with(config: GameConfig, player_count: usize) -> GameSession {
    let mut session = lobby_session_with(config, player_count);
    session.start_game(ALICE).unwrap();
    session
}

/// First card currently in a player's hand.
pub fn hand_card(session: &GameSession, player: PlayerId) -> CardId {
    session.player(player).unwrap().hand[0].id
}

/// Drive a started session to Voting: the storyteller plays their first card
/// with the given clue, then every other active player plays theirs.
pub fn play_round_to_voting(session: &mut GameSession, clue: &str) {
    let storyteller = session.storyteller().id;
    let seed_card = hand_card(session, storyteller);
    session
        .submit_clue_and_card(storyteller, clue, seed_card)
        .unwrap();
    let others: Vec<PlayerId> = session
        .active_ids()
        .into_iter()
        .filter(|p| *p != storyteller)
        .collect();
    for player in others {
        let card = hand_card(session, player);
        session.submit_card(player, card).unwrap();
    }
}

/// Resolve the current Voting stage with every voter naming the storyteller.
pub fn vote_all_correct(session: &mut GameSession) {
    let storyteller = session.storyteller().id;
    let voters: Vec<PlayerId> = session
        .active_ids()
        .into_iter()
        .filter(|p| *p != storyteller)
        .collect();
    for voter in voters {
        session.submit_vote(voter, storyteller).unwrap();
    }
}
