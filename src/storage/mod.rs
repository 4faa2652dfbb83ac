//! Storage traits and the fixture-backed in-memory backend.

mod memory;
mod traits;

pub use memory::{InMemoryConversationStore, InMemoryProfileStore};
pub use traits::{ConversationStore, ProfileStore, StorageError};
