//! # Kindling - client-side state for a mock dating app
//!
//! Kindling holds everything a dating-app front end needs without a real
//! backend: seeded fixture data, an async mock service with simulated
//! latency, subscription-tier gating, and per-screen view state.
//!
//! ## Core Concepts
//!
//! - **Tier**: Subscription level that maps to a fixed permission table
//! - **MockService**: Async facade over in-memory stores with artificial delays
//! - **AppSession**: Verification lock, tier and navigation for one user
//! - **Views**: Explore, messaging, hub, leaderboard, settings and profile-editor state, each owning its own data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kindling::{AppSession, ExploreView, KindlingConfig, MockService, Tier, User};
//!
//! let service = Arc::new(MockService::seeded(KindlingConfig::default()));
//! let mut session = AppSession::new(User::new("Alex"));
//! session.apply_verification(9);
//! session.upgrade(Tier::Basic);
//!
//! let mut explore = ExploreView::new(Arc::clone(&service));
//! explore.load()?;
//! explore.super_like(session.tier()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Domain types and fixture data
pub mod dates;
pub mod error;
pub mod fixtures;
pub mod growth;
pub mod message;
pub mod profile;
pub mod subscription;

// Storage and the async mock service
pub mod service;
pub mod storage;

// Feature state
pub mod account;
pub mod alerts;
pub mod icebreaker;
pub mod session;
pub mod verification;

// Ambient
pub mod config;
pub mod logging;

// Re-export primary types at crate root for convenience
pub use account::{
    DiscoveryPreferences, GenderPreference, NotificationKind, NotificationSettings, OwnProfile,
    PrivacySettings, ProfileEditor, ProfileField, ProfileVisibility, SettingsView,
};
pub use alerts::{spawn_alert_ticker, Alert, AlertFeed};
pub use config::KindlingConfig;
pub use dates::{CalendarEvent, DatePlan, DatePlanDraft, DatePlanner, DateType, PostDateFeedback};
pub use error::{ConfigError, GatingError, KindlingError, KindlingResult, ValidationError};
pub use growth::{GoalBook, GrowthGoal};
pub use icebreaker::{
    AnswerFeedback, IcebreakerGame, Judge, JudgedAnswer, Question, RandomJudge, ScriptedJudge,
};
pub use message::{ConversationId, ConversationSummary, Message, MessageId, Sender};
pub use profile::{Gender, IcebreakerAnswer, Profile, ProfileId, User, UserId};
pub use service::{BlastKind, BlastReceipt, MockService, SwipeAction, SwipeRecord};
pub use session::{
    AppSession, CallKind, CallRequest, EliteHubView, ExploreView, GenderFilter, HubView,
    LeaderboardView, MessagingView, Page, VideoChatView,
};
pub use storage::{
    ConversationStore, InMemoryConversationStore, InMemoryProfileStore, ProfileStore,
    StorageError,
};
pub use subscription::{Feature, Permissions, SubscriptionPlan, Tier};
pub use verification::{
    FixedScores, PersonalInfo, RandomScores, ScoreSource, SubmitResult, VerificationForm,
    VerificationOutcome, VerificationStep,
};
