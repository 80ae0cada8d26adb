//! Session creation, joining, and game start.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::game::GameConfig;
use crate::domain::dealing::{self, Deck};
use crate::domain::scoring::ScoreBoard;
use crate::domain::state::{GameSession, Player, PlayerId, Stage};
use crate::errors::GameError;

/// Outcome of a join, telling the adapter whether the player is in the
/// current rotation or waits for the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinResult {
    pub seated_now: bool,
}

impl GameSession {
    /// Create an empty session in the lobby with the master seated.
    pub fn new_game(
        config: GameConfig,
        master: PlayerId,
        master_name: impl Into<String>,
    ) -> Self {
        let mut rng = match config.shuffle_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        let deck = Deck::build(&config, &mut rng);
        let mut score = ScoreBoard::default();
        score.register(master);
        Self {
            config,
            stage: Stage::Lobby,
            players: vec![Player {
                id: master,
                display_name: master_name.into(),
                hand: Vec::new(),
                active: true,
            }],
            storyteller_index: 0,
            round_no: 0,
            clue: None,
            table: Vec::new(),
            voting_order: Vec::new(),
            votes: Vec::new(),
            deck,
            score,
            rng,
        }
    }

    /// Add a player in the lobby, or between rounds while no card has been
    /// played yet. Between-round joiners are dealt in at the next boundary.
    pub fn add_player(
        &mut self,
        player: PlayerId,
        display_name: impl Into<String>,
    ) -> Result<JoinResult, GameError> {
        let seated_now = match self.stage {
            Stage::Lobby => true,
            Stage::StorytellerTurn if self.table.is_empty() => false,
            Stage::Finished => return Err(GameError::GameFinished),
            _ => return Err(GameError::GameAlreadyStarted),
        };
        if self.contains_player(player) {
            return Err(GameError::UserAlreadyInGame);
        }
        if self.players.len() + 1 > self.config.max_players() {
            return Err(GameError::TooManyPlayers);
        }
        self.players.push(Player {
            id: player,
            display_name: display_name.into(),
            hand: Vec::new(),
            active: seated_now,
        });
        self.score.register(player);
        info!(player, seated_now, "player joined the game");
        Ok(JoinResult { seated_now })
    }

    /// Deal initial hands and hand the first turn to the master.
    pub fn start_game(&mut self, caller: PlayerId) -> Result<(), GameError> {
        if self.stage != Stage::Lobby {
            return Err(GameError::GameAlreadyStarted);
        }
        if caller != self.master().id {
            return Err(GameError::UserIsNotMaster);
        }
        if self.players.len() < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                min: self.config.min_players,
                actual: self.players.len(),
            });
        }

        dealing::deal_initial_hands(&mut self.deck, &mut self.players, self.config.hand_size)?;

        // The master tells the first story.
        self.storyteller_index = 0;
        self.round_no = 1;
        self.clue = None;
        self.table.clear();
        self.votes.clear();
        self.stage = Stage::StorytellerTurn;
        info!(
            players = self.players.len(),
            storyteller = self.storyteller().id,
            "game started; storyteller turn begins"
        );
        Ok(())
    }
}
