use std::collections::HashSet;

use crate::domain::cards::CardId;
use crate::domain::state::{GameSession, Stage};
use crate::domain::test_state_helpers::{
    hand_card, lobby_session, play_round_to_voting, started_session, test_config, vote_all_correct,
    ALICE, BOB, CAROL, DAVE,
};
use crate::errors::GameError;

/// Every card the session has ever owned, wherever it currently lives.
fn all_card_ids(session: &GameSession) -> Vec<CardId> {
    let mut ids = session.deck.draw_ids();
    ids.extend(session.players.iter().flat_map(|p| p.hand.iter().map(|c| c.id)));
    ids.extend(session.table.iter().map(|(_, c)| c.id));
    ids
}

#[test]
fn quorum_boundary() {
    let mut two = lobby_session(2);
    assert_eq!(
        two.start_game(ALICE),
        Err(GameError::NotEnoughPlayers { min: 3, actual: 2 })
    );
    assert_eq!(two.stage, Stage::Lobby);

    let mut three = lobby_session(3);
    assert!(three.start_game(ALICE).is_ok());
    assert_eq!(three.stage, Stage::StorytellerTurn);
}

#[test]
fn only_the_master_starts() {
    let mut session = lobby_session(3);
    assert_eq!(session.start_game(BOB), Err(GameError::UserIsNotMaster));
    assert_eq!(session.stage, Stage::Lobby);
}

#[test]
fn starting_twice_fails() {
    let mut session = started_session(3);
    assert_eq!(session.start_game(ALICE), Err(GameError::GameAlreadyStarted));
}

#[test]
fn duplicate_join_rejected() {
    let mut session = lobby_session(3);
    assert_eq!(
        session.add_player(BOB, "Bob again"),
        Err(GameError::UserAlreadyInGame)
    );
    assert_eq!(session.players.len(), 3);
}

#[test]
fn deck_capacity_caps_the_lobby() {
    // The default 84-card deck sustains six players, not seven.
    let mut session = lobby_session(6);
    assert_eq!(session.add_player(99, "Grace"), Err(GameError::TooManyPlayers));
    assert_eq!(session.players.len(), 6);
}

#[test]
fn start_deals_hands_and_seats_the_master_as_storyteller() {
    let session = started_session(4);
    assert_eq!(session.storyteller().id, ALICE);
    assert!(session.players.iter().all(|p| p.hand.len() == 6));
    assert_eq!(session.deck.remaining(), 84 - 4 * 6);
    assert!(session.clue.is_none());
    assert!(session.table.is_empty());
}

#[test]
fn only_the_storyteller_opens_the_round() {
    let mut session = started_session(3);
    let card = hand_card(&session, BOB);
    assert_eq!(
        session.submit_clue_and_card(BOB, "a clue", card),
        Err(GameError::NotStoryteller)
    );
}

#[test]
fn blank_clue_rejected() {
    let mut session = started_session(3);
    let card = hand_card(&session, ALICE);
    assert_eq!(
        session.submit_clue_and_card(ALICE, "   ", card),
        Err(GameError::EmptyClue)
    );
    // Nothing moved.
    assert_eq!(session.player(ALICE).unwrap().hand.len(), 6);
    assert_eq!(session.stage, Stage::StorytellerTurn);
}

#[test]
fn clue_with_unknown_card_rejected() {
    let mut session = started_session(3);
    assert_eq!(
        session.submit_clue_and_card(ALICE, "a clue", CardId(9999)),
        Err(GameError::UnknownCard(CardId(9999)))
    );
    assert_eq!(session.stage, Stage::StorytellerTurn);
}

#[test]
fn seed_card_moves_to_the_table() {
    let mut session = started_session(3);
    let card = hand_card(&session, ALICE);
    session.submit_clue_and_card(ALICE, "  the fog  ", card).unwrap();

    assert_eq!(session.stage, Stage::PlayersTurn);
    assert_eq!(session.clue.as_deref(), Some("the fog"));
    assert_eq!(session.player(ALICE).unwrap().hand.len(), 5);
    assert_eq!(session.table_entry(ALICE).map(|c| c.id), Some(card));
}

#[test]
fn storyteller_cannot_play_a_decoy() {
    let mut session = started_session(3);
    let seed = hand_card(&session, ALICE);
    session.submit_clue_and_card(ALICE, "clue", seed).unwrap();

    let another = hand_card(&session, ALICE);
    assert_eq!(session.submit_card(ALICE, another), Err(GameError::NotYourTurn));
}

#[test]
fn decoys_out_of_stage_rejected() {
    let mut session = started_session(3);
    let card = hand_card(&session, BOB);
    assert_eq!(session.submit_card(BOB, card), Err(GameError::NotYourTurn));
}

#[test]
fn second_decoy_from_the_same_player_rejected() {
    let mut session = started_session(4);
    let seed = hand_card(&session, ALICE);
    session.submit_clue_and_card(ALICE, "clue", seed).unwrap();

    let first = hand_card(&session, BOB);
    session.submit_card(BOB, first).unwrap();
    let table_before: Vec<CardId> = session.table.iter().map(|(_, c)| c.id).collect();

    let second = hand_card(&session, BOB);
    assert_eq!(session.submit_card(BOB, second), Err(GameError::NotYourTurn));

    // The table and Bob's hand are exactly as after the first play.
    let table_after: Vec<CardId> = session.table.iter().map(|(_, c)| c.id).collect();
    assert_eq!(table_before, table_after);
    assert_eq!(session.player(BOB).unwrap().hand.len(), 5);
}

#[test]
fn full_table_starts_the_vote() {
    let mut session = started_session(4);
    play_round_to_voting(&mut session, "clue");

    assert_eq!(session.stage, Stage::Voting);
    assert_eq!(session.table.len(), 4);

    // The voting order is a permutation of everyone at the table.
    let owners: HashSet<_> = session.table.iter().map(|(p, _)| *p).collect();
    let order: HashSet<_> = session.voting_order.iter().copied().collect();
    assert_eq!(owners, order);
    assert_eq!(session.voting_order.len(), 4);
}

#[test]
fn joins_mid_round_rejected() {
    let mut session = started_session(3);
    let seed = hand_card(&session, ALICE);
    session.submit_clue_and_card(ALICE, "clue", seed).unwrap();

    assert_eq!(
        session.add_player(DAVE, "Dave"),
        Err(GameError::GameAlreadyStarted)
    );
}

#[test]
fn joins_between_rounds_enter_next_rotation() {
    let mut session = started_session(3);
    play_round_to_voting(&mut session, "clue");
    vote_all_correct(&mut session);
    assert_eq!(session.stage, Stage::StorytellerTurn);
    assert_eq!(session.storyteller().id, BOB);

    // Between rounds: the seed card has not been played yet.
    let joined = session.add_player(DAVE, "Dave").unwrap();
    assert!(!joined.seated_now);
    assert!(!session.player(DAVE).unwrap().active);
    assert!(session.player(DAVE).unwrap().hand.is_empty());

    // Dave sits this round out entirely.
    play_round_to_voting(&mut session, "second clue");
    assert_eq!(session.table.len(), 3);
    vote_all_correct(&mut session);

    // Dealt in at the boundary, storyteller rotation reaches him in order.
    assert!(session.player(DAVE).unwrap().active);
    assert_eq!(session.player(DAVE).unwrap().hand.len(), 6);
    assert_eq!(session.storyteller().id, CAROL);

    play_round_to_voting(&mut session, "third clue");
    assert_eq!(session.table.len(), 4);
    vote_all_correct(&mut session);
    assert_eq!(session.storyteller().id, DAVE);
}

#[test]
fn cards_are_conserved_across_a_round() {
    let mut session = started_session(4);
    let total = test_config().deck_size as usize;

    let check = |session: &GameSession| {
        let ids = all_card_ids(session);
        let distinct: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(ids.len(), distinct.len(), "a card id appears twice");
        assert_eq!(
            ids.len() + session.deck.discarded(),
            total,
            "cards leaked or vanished"
        );
    };

    check(&session);
    play_round_to_voting(&mut session, "clue");
    check(&session);
    vote_all_correct(&mut session);
    check(&session);

    // The played table retired to the discard pile.
    assert_eq!(session.deck.discarded(), 4);
}
