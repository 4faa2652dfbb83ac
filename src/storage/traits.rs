//! Abstract storage traits for Kindling.
//!
//! These traits are the seam a real backend would plug into. The mock
//! service only talks to them, so swapping the in-memory fixtures for a
//! network client does not touch the service or the view state.

use thiserror::Error;

use crate::message::{ConversationId, ConversationSummary, Message};
use crate::profile::{Profile, ProfileId};

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Profile not found.
    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    /// Conversation not found.
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// The store holds no profiles at all.
    #[error("No profiles available")]
    Empty,

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Storage trait for discoverable profiles.
pub trait ProfileStore: Send + Sync {
    /// Get a profile by ID.
    fn get(&self, id: ProfileId) -> Result<Option<Profile>, StorageError>;

    /// All profiles in storage order.
    fn list(&self) -> Result<Vec<Profile>, StorageError>;

    /// The first `count` profiles in storage order.
    fn take(&self, count: usize) -> Result<Vec<Profile>, StorageError>;

    /// A uniformly random profile.
    ///
    /// # Errors
    /// - `Empty`: If the store has no profiles
    fn random(&self) -> Result<Profile, StorageError>;

    /// Count one incoming like on a profile and return the updated record.
    ///
    /// # Errors
    /// - `ProfileNotFound`: If `id` does not exist
    fn record_like(&self, id: ProfileId) -> Result<Profile, StorageError>;
}

/// Storage trait for conversations and their messages.
///
/// # Ordering
/// Messages are returned in insertion order. Appending a message also
/// updates the conversation summary's last message.
pub trait ConversationStore: Send + Sync {
    /// All conversation summaries.
    fn summaries(&self) -> Result<Vec<ConversationSummary>, StorageError>;

    /// Messages of one conversation.
    ///
    /// # Errors
    /// - `ConversationNotFound`: If `id` does not exist
    fn messages(&self, id: ConversationId) -> Result<Vec<Message>, StorageError>;

    /// Append one message and update the summary's last message.
    ///
    /// # Errors
    /// - `ConversationNotFound`: If `id` does not exist
    fn append(&self, id: ConversationId, message: Message) -> Result<ConversationSummary, StorageError>;

    /// Reset the unread counter of a conversation.
    ///
    /// # Errors
    /// - `ConversationNotFound`: If `id` does not exist
    fn mark_read(&self, id: ConversationId) -> Result<(), StorageError>;
}
