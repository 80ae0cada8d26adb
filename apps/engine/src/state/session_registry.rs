//! One exclusively-owned game session per conversation.
//!
//! Sessions in different conversations share no state, so cross-session
//! parallelism is unrestricted; within one session, the `Mutex` provides the
//! single exclusive-write critical section every mutation runs in.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::state::{ChatId, GameSession};
use crate::errors::GameError;

pub type SharedSession = Arc<Mutex<GameSession>>;

/// Conversation id -> session map. Thin by design; all rules live in the
/// session itself.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<ChatId, SharedSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a fresh session, failing if the conversation already has
    /// one. The entry API makes the check-and-insert atomic.
    pub fn create(
        &self,
        chat: ChatId,
        session: GameSession,
    ) -> Result<SharedSession, GameError> {
        match self.sessions.entry(chat) {
            Entry::Occupied(_) => Err(GameError::GameAlreadyExists),
            Entry::Vacant(vacant) => {
                let shared = Arc::new(Mutex::new(session));
                vacant.insert(Arc::clone(&shared));
                Ok(shared)
            }
        }
    }

    pub fn get(&self, chat: ChatId) -> Result<SharedSession, GameError> {
        self.sessions
            .get(&chat)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(GameError::NoGame)
    }

    /// Tear down a conversation's session. Returns whether one existed.
    pub fn remove(&self, chat: ChatId) -> bool {
        self.sessions.remove(&chat).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
