//! In-memory storage backend.
//!
//! Thread-safe implementations of the storage traits seeded from the
//! fixtures. Nothing is persisted; dropping a store discards every change.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

use crate::fixtures;
use crate::message::{ConversationId, ConversationSummary, Message, Sender};
use crate::profile::{Profile, ProfileId};
use crate::storage::traits::{ConversationStore, ProfileStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory profile store.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryProfileStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the fixture profiles.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_profiles(fixtures::profiles())
    }

    /// Create a store holding `profiles`.
    #[must_use]
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, id: ProfileId) -> Result<Option<Profile>, StorageError> {
        let profiles = self.profiles.read().map_err(|_| lock_err("profile.get"))?;
        Ok(profiles.iter().find(|p| p.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Profile>, StorageError> {
        let profiles = self.profiles.read().map_err(|_| lock_err("profile.list"))?;
        Ok(profiles.clone())
    }

    fn take(&self, count: usize) -> Result<Vec<Profile>, StorageError> {
        let profiles = self.profiles.read().map_err(|_| lock_err("profile.take"))?;
        Ok(profiles.iter().take(count).cloned().collect())
    }

    fn random(&self) -> Result<Profile, StorageError> {
        let profiles = self.profiles.read().map_err(|_| lock_err("profile.random"))?;
        profiles
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(StorageError::Empty)
    }

    fn record_like(&self, id: ProfileId) -> Result<Profile, StorageError> {
        let mut profiles = self.profiles.write().map_err(|_| lock_err("profile.record_like"))?;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::ProfileNotFound(id))?;
        profile.likes = profile.likes.saturating_add(1);
        Ok(profile.clone())
    }
}

#[derive(Debug, Default)]
struct ConversationState {
    summaries: Vec<ConversationSummary>,
    threads: HashMap<ConversationId, Vec<Message>>,
}

/// Thread-safe in-memory conversation store.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    state: RwLock<ConversationState>,
}

impl InMemoryConversationStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the fixture conversations.
    ///
    /// Every conversation starts with the canned thread, attributed to
    /// that conversation's peer and stamped relative to `now`.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let summaries = fixtures::conversations();
        let threads = summaries
            .iter()
            .map(|summary| {
                let thread = fixtures::messages(now)
                    .into_iter()
                    .map(|mut message| {
                        if !message.sender.is_you() {
                            message.sender = Sender::peer(summary.name.clone());
                        }
                        message
                    })
                    .collect();
                (summary.id, thread)
            })
            .collect();

        Self {
            state: RwLock::new(ConversationState { summaries, threads }),
        }
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn summaries(&self) -> Result<Vec<ConversationSummary>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("conversation.summaries"))?;
        Ok(state.summaries.clone())
    }

    fn messages(&self, id: ConversationId) -> Result<Vec<Message>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("conversation.messages"))?;
        state
            .threads
            .get(&id)
            .cloned()
            .ok_or(StorageError::ConversationNotFound(id))
    }

    fn append(&self, id: ConversationId, message: Message) -> Result<ConversationSummary, StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("conversation.append"))?;
        let summary_idx = state
            .summaries
            .iter()
            .position(|s| s.id == id)
            .ok_or(StorageError::ConversationNotFound(id))?;

        state.summaries[summary_idx].last_message = message.content.clone();
        state.threads.entry(id).or_default().push(message);
        Ok(state.summaries[summary_idx].clone())
    }

    fn mark_read(&self, id: ConversationId) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("conversation.mark_read"))?;
        let summary = state
            .summaries
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StorageError::ConversationNotFound(id))?;
        summary.unread_count = 0;
        Ok(())
    }
}
