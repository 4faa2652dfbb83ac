//! Mock service layer.
//!
//! Each call stands in for a network request: it waits the configured
//! delay, then resolves against the in-memory stores. There is no retry
//! and no ordering between concurrent calls; callers apply their own
//! state optimistically.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::KindlingConfig;
use crate::error::{KindlingError, KindlingResult, ValidationError};
use crate::fixtures;
use crate::message::{ConversationId, ConversationSummary, Message};
use crate::profile::{Profile, ProfileId};
use crate::storage::{
    ConversationStore, InMemoryConversationStore, InMemoryProfileStore, ProfileStore, StorageError,
};

/// Largest blast radius accepted, in kilometres.
pub const MAX_BLAST_RADIUS_KM: u32 = 100;

static TEMPLATE_SLOT: OnceLock<Regex> = OnceLock::new();

fn template_slot_re() -> &'static Regex {
    TEMPLATE_SLOT.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("template slot pattern compiles"))
}

/// A swipe decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Like,
    SuperLike,
    Reject,
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::SuperLike => write!(f, "super_like"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// One resolved swipe call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeRecord {
    pub profile_id: ProfileId,
    pub action: SwipeAction,
    pub at: DateTime<Utc>,
}

/// Which bulk send was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlastKind {
    SuperLike,
    DirectMessage,
}

/// Acknowledgement of a blast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlastReceipt {
    pub kind: BlastKind,
    pub radius_km: u32,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

/// Fixture-backed stand-in for the dating backend.
pub struct MockService {
    profiles: Arc<dyn ProfileStore>,
    conversations: Arc<dyn ConversationStore>,
    config: KindlingConfig,
    actions: Mutex<Vec<SwipeRecord>>,
}

impl fmt::Debug for MockService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MockService {
    /// Create a service over the given stores.
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        conversations: Arc<dyn ConversationStore>,
        config: KindlingConfig,
    ) -> Self {
        Self {
            profiles,
            conversations,
            config,
            actions: Mutex::new(Vec::new()),
        }
    }

    /// Create a service over fresh fixture-seeded in-memory stores.
    #[must_use]
    pub fn seeded(config: KindlingConfig) -> Self {
        Self::new(
            Arc::new(InMemoryProfileStore::seeded()),
            Arc::new(InMemoryConversationStore::seeded(Utc::now())),
            config,
        )
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &KindlingConfig {
        &self.config
    }

    async fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, profile_id: ProfileId, action: SwipeAction) -> KindlingResult<()> {
        let mut actions = self
            .actions
            .lock()
            .map_err(|_| KindlingError::internal("action log lock poisoned"))?;
        actions.push(SwipeRecord {
            profile_id,
            action,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Swipes resolved so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the log lock is poisoned.
    pub fn action_log(&self) -> KindlingResult<Vec<SwipeRecord>> {
        let actions = self
            .actions
            .lock()
            .map_err(|_| KindlingError::internal("action log lock poisoned"))?;
        Ok(actions.clone())
    }

    /// A random profile to show next. Resolves immediately.
    ///
    /// # Errors
    ///
    /// Returns a storage error when no profiles exist.
    pub fn random_profile(&self) -> KindlingResult<Profile> {
        let profile = self.profiles.random()?;
        debug!(profile_id = %profile.id, "random profile fetched");
        Ok(profile)
    }

    /// Looks up one profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ProfileNotFound` for an unknown id.
    pub fn profile(&self, id: ProfileId) -> KindlingResult<Profile> {
        Ok(self.profiles.get(id)?.ok_or(StorageError::ProfileNotFound(id))?)
    }

    /// The first `count` profiles, standing in for likes/matches lists.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store fails.
    pub fn matches(&self, count: usize) -> KindlingResult<Vec<Profile>> {
        Ok(self.profiles.take(count)?)
    }

    /// Every profile in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store fails.
    pub fn all_profiles(&self) -> KindlingResult<Vec<Profile>> {
        Ok(self.profiles.list()?)
    }

    async fn swipe(&self, profile_id: ProfileId, action: SwipeAction) -> KindlingResult<()> {
        self.simulate(self.config.action_latency()).await;
        match action {
            SwipeAction::Like | SwipeAction::SuperLike => {
                self.profiles.record_like(profile_id)?;
            }
            SwipeAction::Reject => {
                if self.profiles.get(profile_id)?.is_none() {
                    return Err(StorageError::ProfileNotFound(profile_id).into());
                }
            }
        }
        self.record(profile_id, action)?;
        info!(profile_id = %profile_id, %action, "swipe resolved");
        Ok(())
    }

    /// Likes a profile after the action delay.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ProfileNotFound` for an unknown id.
    pub async fn like(&self, profile_id: ProfileId) -> KindlingResult<()> {
        self.swipe(profile_id, SwipeAction::Like).await
    }

    /// Super likes a profile after the action delay. Gating is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ProfileNotFound` for an unknown id.
    pub async fn super_like(&self, profile_id: ProfileId) -> KindlingResult<()> {
        self.swipe(profile_id, SwipeAction::SuperLike).await
    }

    /// Rejects a profile after the action delay.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ProfileNotFound` for an unknown id.
    pub async fn reject(&self, profile_id: ProfileId) -> KindlingResult<()> {
        self.swipe(profile_id, SwipeAction::Reject).await
    }

    /// Conversation list. Resolves immediately.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store fails.
    pub fn conversations(&self) -> KindlingResult<Vec<ConversationSummary>> {
        Ok(self.conversations.summaries()?)
    }

    /// Messages of one conversation. Resolves immediately and marks it read.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConversationNotFound` for an unknown id.
    pub fn messages(&self, id: ConversationId) -> KindlingResult<Vec<Message>> {
        let thread = self.conversations.messages(id)?;
        self.conversations.mark_read(id)?;
        debug!(conversation_id = %id, count = thread.len(), "messages fetched");
        Ok(thread)
    }

    /// Sends a message after the action delay and returns the stored record.
    ///
    /// The record's id is its send time in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `BlankField` for blank content or
    /// `ConversationNotFound` for an unknown conversation.
    pub async fn send_message(&self, id: ConversationId, content: &str) -> KindlingResult<Message> {
        if content.trim().is_empty() {
            return Err(ValidationError::blank("content").into());
        }
        self.simulate(self.config.action_latency()).await;
        let message = Message::outgoing(content, Utc::now());
        self.conversations.append(id, message.clone())?;
        info!(conversation_id = %id, message_id = %message.id, "message sent");
        Ok(message)
    }

    fn validate_radius(radius_km: u32) -> Result<(), ValidationError> {
        if radius_km == 0 || radius_km > MAX_BLAST_RADIUS_KM {
            return Err(ValidationError::OutOfRange {
                field: "radius_km".to_string(),
                value: i64::from(radius_km),
                min: 1,
                max: i64::from(MAX_BLAST_RADIUS_KM),
            });
        }
        Ok(())
    }

    async fn blast(&self, kind: BlastKind, radius_km: u32, message: &str) -> KindlingResult<BlastReceipt> {
        Self::validate_radius(radius_km)?;
        if kind == BlastKind::DirectMessage && message.trim().is_empty() {
            return Err(ValidationError::blank("message").into());
        }
        self.simulate(self.config.blast_latency()).await;
        let receipt = BlastReceipt {
            kind,
            radius_km,
            message: message.trim().to_string(),
            sent_at: Utc::now(),
        };
        info!(?kind, radius_km, "blast sent");
        Ok(receipt)
    }

    /// Sends a super like to everyone within `radius_km`, with an optional note.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless the radius is in 1..=100.
    pub async fn super_like_blast(&self, radius_km: u32, message: &str) -> KindlingResult<BlastReceipt> {
        self.blast(BlastKind::SuperLike, radius_km, message).await
    }

    /// Sends the same opening message to everyone within `radius_km`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for a bad radius or `BlankField` for an empty message.
    pub async fn ai_dm_blast(&self, radius_km: u32, message: &str) -> KindlingResult<BlastReceipt> {
        self.blast(BlastKind::DirectMessage, radius_km, message).await
    }

    /// Opening lines for the DM blast, slots filled from `profile` when given.
    #[must_use]
    pub fn dm_blast_suggestions(profile: Option<&Profile>) -> Vec<String> {
        fixtures::dm_blast_templates()
            .into_iter()
            .map(|template| match profile {
                Some(profile) => fill_slots(template, profile),
                None => template.to_string(),
            })
            .collect()
    }

    /// Conversation starters built from `profile` and the latest message.
    ///
    /// Resolves after the suggestion delay.
    pub async fn suggestions(&self, profile: &Profile, conversation: &[Message]) -> Vec<String> {
        self.simulate(self.config.suggestion_latency()).await;

        let mut out = Vec::with_capacity(5);
        if let Some(interest) = profile.interests.first() {
            out.push(format!("I noticed you're interested in {interest}. What's your favorite aspect of it?"));
        }
        if let Some(value) = profile.values.first() {
            out.push(format!(
                "Your profile mentions {value} as one of your values. How does that influence your daily life?"
            ));
        }
        out.push(format!(
            "I see you're from {}. What's your favorite hidden gem in the area?",
            profile.location
        ));
        out.push(format!("Your bio says \"{}\". Can you tell me more about that?", profile.bio));
        if let Some(last) = conversation.last() {
            out.push(format!(
                "Based on our conversation, it seems we both enjoy {}. What else do you like to do for fun?",
                last.trailing_words(3)
            ));
        }
        debug!(profile_id = %profile.id, count = out.len(), "suggestions generated");
        out
    }

    /// Runs the photo check after its delay. Passes when any photo was supplied.
    pub async fn verify_photos(&self, photos: &[String]) -> bool {
        self.simulate(self.config.photo_verification_latency()).await;
        let passed = !photos.is_empty();
        info!(count = photos.len(), passed, "photo verification finished");
        passed
    }
}

/// Replaces `[slot]` placeholders with details from `profile`.
///
/// Detail slots take the first value; interest slots take the first
/// interest. Unknown slots are left as written.
#[must_use]
pub fn fill_slots(template: &str, profile: &Profile) -> String {
    template_slot_re()
        .replace_all(template, |caps: &Captures<'_>| {
            let slot = &caps[1];
            let fill = if slot.contains("detail") {
                profile.values.first()
            } else if slot.contains("interest") {
                profile.interests.first()
            } else {
                None
            };
            fill.map_or_else(|| caps[0].to_string(), |value| value.to_lowercase())
        })
        .into_owned()
}
