//! Deck construction, dealing, and round replenishment.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::config::game::GameConfig;
use crate::domain::cards::{Card, CardId};
use crate::domain::state::Player;
use crate::errors::GameError;

/// Shuffled draw pile plus the discard pile of resolved table cards.
///
/// Cards leave the draw pile once and never return; the discard pile exists
/// only so the session can account for every card it has ever owned.
#[derive(Debug, Clone)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Build the full deck with ids `1..=deck_size` and shuffle it.
    pub fn build(config: &GameConfig, rng: &mut ChaCha8Rng) -> Self {
        let mut draw_pile: Vec<Card> = (1..=config.deck_size)
            .map(|n| {
                let id = CardId(n);
                Card {
                    id,
                    artwork: config.artwork_url(id),
                }
            })
            .collect();
        draw_pile.shuffle(rng);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discarded(&self) -> usize {
        self.discard_pile.len()
    }

    /// Remove and return `n` distinct cards from the undealt pool.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if self.draw_pile.len() < n {
            return Err(GameError::DeckExhausted {
                needed: n,
                remaining: self.draw_pile.len(),
            });
        }
        let at = self.draw_pile.len() - n;
        Ok(self.draw_pile.split_off(at))
    }

    /// Retire resolved table cards; they are never drawn again.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    #[cfg(test)]
    pub fn draw_ids(&self) -> Vec<CardId> {
        self.draw_pile.iter().map(|c| c.id).collect()
    }
}

/// Deal `hand_size` cards to every player, in join order.
///
/// All-or-nothing: sufficiency is checked up front so a failure leaves every
/// hand untouched.
pub fn deal_initial_hands(
    deck: &mut Deck,
    players: &mut [Player],
    hand_size: usize,
) -> Result<(), GameError> {
    let needed = players.len() * hand_size;
    if needed > deck.remaining() {
        return Err(GameError::DeckExhausted {
            needed,
            remaining: deck.remaining(),
        });
    }
    for player in players.iter_mut() {
        player.hand = deck.draw(hand_size)?;
    }
    Ok(())
}

/// Top every hand back up to `hand_size` after a round.
///
/// Covers late joiners with empty hands. All-or-nothing like the initial
/// deal; an insufficient deck is surfaced, never silently skipped.
pub fn replenish_hands(
    deck: &mut Deck,
    players: &mut [Player],
    hand_size: usize,
) -> Result<(), GameError> {
    let needed: usize = players
        .iter()
        .map(|p| hand_size.saturating_sub(p.hand.len()))
        .sum();
    if needed > deck.remaining() {
        return Err(GameError::DeckExhausted {
            needed,
            remaining: deck.remaining(),
        });
    }
    for player in players.iter_mut() {
        let top_up = hand_size.saturating_sub(player.hand.len());
        if top_up > 0 {
            let drawn = deck.draw(top_up)?;
            player.hand.extend(drawn);
        }
    }
    Ok(())
}
