//! Session and per-screen view state.
//!
//! Each view owns its own state and a handle to the mock service. Views
//! never share state with each other; the session only supplies the tier
//! that gates them. A gated call that is denied returns a
//! [`GatingError`](crate::GatingError) and leaves the view untouched.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{GatingError, KindlingError, KindlingResult, ValidationError};
use crate::message::{ConversationId, ConversationSummary, Message};
use crate::profile::{Gender, Profile, ProfileId, User};
use crate::service::{BlastReceipt, MockService};
use crate::subscription::{Feature, Permissions, Tier};
use crate::verification::{VerificationOutcome, DEFAULT_THRESHOLD};

/// Top-level screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Verification,
    #[default]
    Explore,
    Engage,
    Messages,
    Hub,
    EliteHub,
    Leaderboard,
    Profile,
    Settings,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Verification => "verification",
            Self::Explore => "explore",
            Self::Engage => "engage",
            Self::Messages => "messages",
            Self::Hub => "hub",
            Self::EliteHub => "elite_hub",
            Self::Leaderboard => "leaderboard",
            Self::Profile => "profile",
            Self::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// App-wide view flags: who is signed in, at which tier, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSession {
    user: User,
    tier: Tier,
    verified: bool,
    page: Page,
    threshold: u32,
}

impl AppSession {
    /// Creates an unverified free-tier session on the explore page.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self::with_threshold(user, DEFAULT_THRESHOLD)
    }

    /// Creates a session that unlocks at `threshold`.
    #[must_use]
    pub fn with_threshold(user: User, threshold: u32) -> Self {
        Self {
            user,
            tier: Tier::Free,
            verified: false,
            page: Page::Explore,
            threshold,
        }
    }

    /// The signed-in account.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Current tier.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Permissions derived from the current tier.
    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        self.tier.permissions()
    }

    /// Minimum score that unlocks the session.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// True once verification passed.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified
    }

    /// Switches tier and refreshes the tier-derived account fields.
    pub fn upgrade(&mut self, tier: Tier) {
        self.tier = tier;
        self.user.premium = tier.is_paid();
        self.user.invites = tier.invites();
        info!(tier = %tier, invites = self.user.invites, "subscription changed");
    }

    /// Switches tier from a raw string; unknown values become `Free`.
    pub fn upgrade_from_str(&mut self, tier: &str) {
        self.upgrade(Tier::parse_or_free(tier));
    }

    /// Applies a verification score.
    ///
    /// At or above the threshold the session unlocks and the score becomes
    /// the user's hotness score. Below it the session stays locked and the
    /// returned outcome carries the rejection message.
    pub fn apply_verification(&mut self, score: u32) -> VerificationOutcome {
        let outcome = VerificationOutcome::from_score(score, self.threshold);
        if outcome.is_verified() {
            self.verified = true;
            self.user.hotness_score = score;
            info!(score, "session unlocked");
        } else {
            warn!(score, threshold = self.threshold, "verification below threshold");
        }
        outcome
    }

    /// Requests a page. Takes effect once verified.
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        debug!(%page, "navigate");
    }

    /// The page actually shown.
    ///
    /// Unverified sessions always see verification; the hub becomes the
    /// elite hub on the elite tier.
    #[must_use]
    pub fn visible_page(&self) -> Page {
        if !self.verified {
            return Page::Verification;
        }
        match self.page {
            Page::Hub | Page::EliteHub if self.tier == Tier::Elite => Page::EliteHub,
            Page::EliteHub => Page::Hub,
            Page::Verification => Page::Explore,
            page => page,
        }
    }

    /// True when the bottom navigation is shown.
    #[must_use]
    pub const fn shows_navigation(&self) -> bool {
        self.verified
    }
}

/// Swipe-discovery screen.
#[derive(Debug)]
pub struct ExploreView {
    service: Arc<MockService>,
    current: Option<Profile>,
    history: Vec<Profile>,
    filters_open: bool,
}

impl ExploreView {
    /// Creates an empty view. Call [`ExploreView::load`] to show a profile.
    #[must_use]
    pub fn new(service: Arc<MockService>) -> Self {
        Self {
            service,
            current: None,
            history: Vec::new(),
            filters_open: false,
        }
    }

    /// The profile on screen.
    #[must_use]
    pub const fn current(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    /// Profiles already swiped, most recent last.
    #[must_use]
    pub fn history(&self) -> &[Profile] {
        &self.history
    }

    /// Whether the filter panel is open.
    #[must_use]
    pub const fn filters_open(&self) -> bool {
        self.filters_open
    }

    /// Replaces the current profile with a random one.
    ///
    /// # Errors
    ///
    /// Returns a storage error when no profiles exist.
    pub fn load(&mut self) -> KindlingResult<&Profile> {
        let profile = self.service.random_profile()?;
        Ok(self.current.insert(profile))
    }

    fn current_id(&self) -> Result<ProfileId, ValidationError> {
        self.current
            .as_ref()
            .map(|p| p.id)
            .ok_or(ValidationError::NoProfileLoaded)
    }

    fn advance(&mut self) -> KindlingResult<&Profile> {
        if let Some(previous) = self.current.take() {
            self.history.push(previous);
        }
        self.load()
    }

    /// Likes the current profile and shows the next one.
    ///
    /// # Errors
    ///
    /// Returns `NoProfileLoaded` before `load`, or a storage error.
    pub async fn like(&mut self) -> KindlingResult<&Profile> {
        let id = self.current_id()?;
        self.service.like(id).await?;
        self.advance()
    }

    /// Rejects the current profile and shows the next one.
    ///
    /// # Errors
    ///
    /// Returns `NoProfileLoaded` before `load`, or a storage error.
    pub async fn reject(&mut self) -> KindlingResult<&Profile> {
        let id = self.current_id()?;
        self.service.reject(id).await?;
        self.advance()
    }

    /// Super likes the current profile and shows the next one.
    ///
    /// # Errors
    ///
    /// Returns a gating error on the free tier, leaving the view unchanged.
    pub async fn super_like(&mut self, tier: Tier) -> KindlingResult<&Profile> {
        let id = self.current_id()?;
        tier.require(Feature::SuperLike)?;
        self.service.super_like(id).await?;
        self.advance()
    }

    /// Brings back the most recently swiped profile.
    ///
    /// Returns `Ok(None)` when there is nothing to rewind to.
    ///
    /// # Errors
    ///
    /// Returns a gating error on the free tier.
    pub fn rewind(&mut self, tier: Tier) -> Result<Option<&Profile>, GatingError> {
        tier.require(Feature::Rewind)?;
        let Some(previous) = self.history.pop() else {
            return Ok(None);
        };
        debug!(profile_id = %previous.id, "rewind");
        Ok(Some(self.current.insert(previous)))
    }

    /// Opens or closes the filter panel.
    ///
    /// # Errors
    ///
    /// Returns a gating error on the free tier.
    pub fn toggle_filters(&mut self, tier: Tier) -> Result<bool, GatingError> {
        tier.require(Feature::Filters)?;
        self.filters_open = !self.filters_open;
        Ok(self.filters_open)
    }
}

/// Kind of call started from a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Phone,
    Video,
}

/// A call that was allowed to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub kind: CallKind,
    pub peer: String,
}

/// Conversation list plus the open thread.
#[derive(Debug)]
pub struct MessagingView {
    service: Arc<MockService>,
    conversations: Vec<ConversationSummary>,
    selected: Option<ConversationId>,
    messages: Vec<Message>,
    peer: Option<Profile>,
    draft: String,
}

impl MessagingView {
    /// Creates an empty view. Call [`MessagingView::load`] to fill the list.
    #[must_use]
    pub fn new(service: Arc<MockService>) -> Self {
        Self {
            service,
            conversations: Vec::new(),
            selected: None,
            messages: Vec::new(),
            peer: None,
            draft: String::new(),
        }
    }

    /// Fetches the conversation list.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the fetch fails.
    pub fn load(&mut self) -> KindlingResult<&[ConversationSummary]> {
        self.conversations = self.service.conversations()?;
        Ok(&self.conversations)
    }

    /// Conversation rows.
    #[must_use]
    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    /// The open conversation.
    #[must_use]
    pub const fn selected(&self) -> Option<ConversationId> {
        self.selected
    }

    /// Messages of the open conversation.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Profile of the person on the other side, when known.
    #[must_use]
    pub const fn peer(&self) -> Option<&Profile> {
        self.peer.as_ref()
    }

    /// Unsent text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    fn summary(&self, id: ConversationId) -> Option<&ConversationSummary> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Opens a conversation, loading its messages and the peer profile.
    ///
    /// # Errors
    ///
    /// Returns `ConversationNotFound` for an id not in the list.
    pub fn select(&mut self, id: ConversationId) -> KindlingResult<&[Message]> {
        let messages = self.service.messages(id)?;
        let peer_name = self.summary(id).map(|c| c.name.clone());
        let peer = match peer_name {
            Some(name) => self
                .service
                .all_profiles()?
                .into_iter()
                .find(|p| p.first_name() == name),
            None => None,
        };

        self.selected = Some(id);
        self.messages = messages;
        self.peer = peer;
        if let Some(row) = self.conversations.iter_mut().find(|c| c.id == id) {
            row.unread_count = 0;
        }
        Ok(&self.messages)
    }

    /// Sends `content` to the open conversation.
    ///
    /// On success exactly one message is appended and the conversation's
    /// last message is updated.
    ///
    /// # Errors
    ///
    /// Returns `BlankField` for blank content or `NoConversationSelected`;
    /// the view is unchanged on error.
    pub async fn send(&mut self, content: &str) -> KindlingResult<&Message> {
        if content.trim().is_empty() {
            return Err(ValidationError::blank("content").into());
        }
        let id = self.selected.ok_or(ValidationError::NoConversationSelected)?;

        let sent = self.service.send_message(id, content).await?;
        if let Some(row) = self.conversations.iter_mut().find(|c| c.id == id) {
            row.last_message = content.to_string();
        }
        self.messages.push(sent);
        let last = self.messages.len() - 1;
        Ok(&self.messages[last])
    }

    /// Replaces the draft.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Appends an emoji to the draft.
    pub fn push_emoji(&mut self, emoji: &str) {
        self.draft.push_str(emoji);
    }

    /// Uses a suggestion as the draft.
    pub fn apply_suggestion(&mut self, suggestion: &str) {
        self.draft = suggestion.to_string();
    }

    /// Sends the draft, clearing it on success.
    ///
    /// # Errors
    ///
    /// Same as [`MessagingView::send`]; the draft is kept on error.
    pub async fn send_draft(&mut self) -> KindlingResult<&Message> {
        let content = std::mem::take(&mut self.draft);
        let sent = self.send(&content).await.map(|_| ());
        if let Err(e) = sent {
            self.draft = content;
            return Err(e);
        }
        self.messages
            .last()
            .ok_or_else(|| KindlingError::internal("sent message missing"))
    }

    /// Conversation starters for the open conversation.
    ///
    /// # Errors
    ///
    /// Returns `NoConversationSelected` when nothing is open or the peer is unknown.
    pub async fn suggestions(&self) -> KindlingResult<Vec<String>> {
        let peer = self.peer.as_ref().ok_or(ValidationError::NoConversationSelected)?;
        Ok(self.service.suggestions(peer, &self.messages).await)
    }

    /// Starts a phone or video call with the open conversation's peer.
    ///
    /// # Errors
    ///
    /// Returns a gating error below elite, or `NoConversationSelected`.
    pub fn start_call(&self, tier: Tier, kind: CallKind) -> KindlingResult<CallRequest> {
        tier.require(Feature::Calling)?;
        let id = self.selected.ok_or(ValidationError::NoConversationSelected)?;
        let peer = self
            .summary(id)
            .map(|c| c.name.clone())
            .ok_or(ValidationError::NoConversationSelected)?;
        info!(?kind, %peer, "call started");
        Ok(CallRequest { kind, peer })
    }
}

/// Likes and matches lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HubView {
    likes: Vec<Profile>,
    matches: Vec<Profile>,
}

impl HubView {
    /// Number of profiles fetched for the hub.
    pub const FETCH: usize = 10;

    /// Number of fetched profiles shown as likes; the rest are matches.
    pub const LIKES: usize = 5;

    /// Fetches the hub lists.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the fetch fails.
    pub fn load(service: &MockService) -> KindlingResult<Self> {
        let mut fetched = service.matches(Self::FETCH)?;
        let matches = fetched.split_off(fetched.len().min(Self::LIKES));
        Ok(Self {
            likes: fetched,
            matches,
        })
    }

    /// Profiles that liked you.
    ///
    /// # Errors
    ///
    /// Returns a gating error on the free tier.
    pub fn likes(&self, tier: Tier) -> Result<&[Profile], GatingError> {
        tier.require(Feature::SeeLikes)?;
        Ok(&self.likes)
    }

    /// Count of likes, visible to every tier.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Mutual matches.
    #[must_use]
    pub fn matches(&self) -> &[Profile] {
        &self.matches
    }
}

/// Elite hub: bulk super likes and templated DM blasts.
#[derive(Debug)]
pub struct EliteHubView {
    service: Arc<MockService>,
    sent: Vec<BlastReceipt>,
}

impl EliteHubView {
    /// Creates a view with no blasts sent.
    #[must_use]
    pub fn new(service: Arc<MockService>) -> Self {
        Self {
            service,
            sent: Vec::new(),
        }
    }

    /// Blasts sent from this view, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[BlastReceipt] {
        &self.sent
    }

    /// Opening lines for the DM blast, personalised for `profile` when given.
    #[must_use]
    pub fn suggestions(&self, profile: Option<&Profile>) -> Vec<String> {
        MockService::dm_blast_suggestions(profile)
    }

    /// Super likes everyone within `radius_km`.
    ///
    /// # Errors
    ///
    /// Returns a gating error below elite, or `OutOfRange` for a bad radius.
    pub async fn super_like_blast(
        &mut self,
        tier: Tier,
        radius_km: u32,
        message: &str,
    ) -> KindlingResult<&BlastReceipt> {
        tier.require(Feature::Blasts)?;
        let receipt = self.service.super_like_blast(radius_km, message).await?;
        Ok(self.push(receipt))
    }

    /// Sends `message` to everyone within `radius_km`.
    ///
    /// # Errors
    ///
    /// Returns a gating error below elite, `OutOfRange` for a bad radius,
    /// or `BlankField` for an empty message.
    pub async fn ai_dm_blast(
        &mut self,
        tier: Tier,
        radius_km: u32,
        message: &str,
    ) -> KindlingResult<&BlastReceipt> {
        tier.require(Feature::Blasts)?;
        let receipt = self.service.ai_dm_blast(radius_km, message).await?;
        Ok(self.push(receipt))
    }

    fn push(&mut self, receipt: BlastReceipt) -> &BlastReceipt {
        self.sent.push(receipt);
        let last = self.sent.len() - 1;
        &self.sent[last]
    }
}

/// Leaderboard gender filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderFilter {
    #[default]
    All,
    Men,
    Women,
}

impl GenderFilter {
    /// Returns whether `gender` passes the filter.
    #[must_use]
    pub fn matches(self, gender: &Gender) -> bool {
        match self {
            Self::All => true,
            Self::Men => *gender == Gender::Male,
            Self::Women => *gender == Gender::Female,
        }
    }
}

/// Profiles ranked by hotness score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardView {
    leaders: Vec<Profile>,
    filter: GenderFilter,
}

impl LeaderboardView {
    /// Number of profiles fetched for the board.
    pub const FETCH: usize = 50;

    /// Fetches and ranks the board, highest score first. Ties keep storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the fetch fails.
    pub fn load(service: &MockService) -> KindlingResult<Self> {
        let mut leaders = service.matches(Self::FETCH)?;
        leaders.sort_by(|a, b| b.hotness_score.cmp(&a.hotness_score));
        Ok(Self {
            leaders,
            filter: GenderFilter::All,
        })
    }

    /// Sets the gender filter.
    pub fn set_filter(&mut self, filter: GenderFilter) {
        self.filter = filter;
    }

    /// Current filter.
    #[must_use]
    pub const fn filter(&self) -> GenderFilter {
        self.filter
    }

    /// Ranked rows passing the filter, with 1-based positions.
    #[must_use]
    pub fn rows(&self) -> Vec<(usize, &Profile)> {
        self.leaders
            .iter()
            .filter(|p| self.filter.matches(&p.gender))
            .enumerate()
            .map(|(idx, p)| (idx + 1, p))
            .collect()
    }
}

/// Local state of a one-to-one video call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoChatView {
    active: bool,
    muted: bool,
    camera_on: bool,
    elapsed_secs: u64,
}

impl Default for VideoChatView {
    fn default() -> Self {
        Self {
            active: false,
            muted: false,
            camera_on: true,
            elapsed_secs: 0,
        }
    }
}

impl VideoChatView {
    /// Creates an idle view with the camera on and the microphone open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a call is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// True while the microphone is muted.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// True while the camera is sending video.
    #[must_use]
    pub const fn camera_on(&self) -> bool {
        self.camera_on
    }

    /// Starts a call and resets the timer.
    ///
    /// # Errors
    ///
    /// Returns a gating error below premium; the view stays idle.
    pub fn start(&mut self, tier: Tier) -> Result<(), GatingError> {
        tier.require(Feature::VideoChat)?;
        self.active = true;
        self.elapsed_secs = 0;
        info!("video call started");
        Ok(())
    }

    /// Ends the call. The last duration stays readable.
    pub fn end(&mut self) {
        if self.active {
            info!(secs = self.elapsed_secs, "video call ended");
        }
        self.active = false;
    }

    /// Flips the microphone and returns whether it is now muted.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Flips the camera and returns whether it is now on.
    pub fn toggle_camera(&mut self) -> bool {
        self.camera_on = !self.camera_on;
        self.camera_on
    }

    /// Advances the call timer; ignored while idle.
    pub fn tick(&mut self, secs: u64) {
        if self.active {
            self.elapsed_secs += secs;
        }
    }

    /// Call duration as `MM:SS`.
    #[must_use]
    pub fn duration(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KindlingConfig;

    fn service() -> Arc<MockService> {
        Arc::new(MockService::seeded(KindlingConfig::instant()))
    }

    #[test]
    fn test_session_starts_locked() {
        let session = AppSession::new(User::new("John Doe"));
        assert!(!session.is_verified());
        assert_eq!(session.visible_page(), Page::Verification);
        assert!(!session.shows_navigation());
    }

    #[test]
    fn test_verification_threshold() {
        let mut session = AppSession::new(User::new("John Doe"));
        assert_eq!(session.threshold(), 8);
        let outcome = session.apply_verification(7);
        assert!(!outcome.is_verified());
        assert!(!session.is_verified());
        assert_eq!(session.user().hotness_score, 0);
        assert_eq!(session.visible_page(), Page::Verification);

        let outcome = session.apply_verification(8);
        assert!(outcome.is_verified());
        assert!(session.is_verified());
        assert_eq!(session.user().hotness_score, 8);
        assert_eq!(session.visible_page(), Page::Explore);
    }

    #[test]
    fn test_upgrade_updates_account() {
        let mut session = AppSession::new(User::new("John Doe"));
        session.upgrade(Tier::Premium);
        assert!(session.user().premium);
        assert_eq!(session.user().invites, 3);
        assert!(session.permissions().video_chat);

        session.upgrade_from_str("diamond");
        assert_eq!(session.tier(), Tier::Free);
        assert!(!session.user().premium);
        assert_eq!(session.user().invites, 0);
    }

    #[test]
    fn test_hub_page_depends_on_tier() {
        let mut session = AppSession::new(User::new("John Doe"));
        session.apply_verification(9);
        session.navigate(Page::Hub);
        assert_eq!(session.visible_page(), Page::Hub);
        session.upgrade(Tier::Elite);
        assert_eq!(session.visible_page(), Page::EliteHub);
        session.upgrade(Tier::Basic);
        session.navigate(Page::EliteHub);
        assert_eq!(session.visible_page(), Page::Hub);
    }

    #[tokio::test]
    async fn test_explore_like_advances_and_records_history() {
        let mut view = ExploreView::new(service());
        let first = view.load().unwrap().id;
        view.like().await.unwrap();
        assert_eq!(view.history().len(), 1);
        assert_eq!(view.history()[0].id, first);
        assert!(view.current().is_some());
    }

    #[tokio::test]
    async fn test_explore_requires_loaded_profile() {
        let mut view = ExploreView::new(service());
        let err = view.reject().await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_free_super_like_is_denied_without_side_effects() {
        let svc = service();
        let mut view = ExploreView::new(Arc::clone(&svc));
        let shown = view.load().unwrap().id;

        let err = view.super_like(Tier::Free).await.unwrap_err();
        assert!(err.needs_upgrade());
        assert_eq!(view.current().map(|p| p.id), Some(shown));
        assert!(view.history().is_empty());
        assert!(svc.action_log().unwrap().is_empty());

        view.super_like(Tier::Basic).await.unwrap();
        assert_eq!(view.history().len(), 1);
    }

    #[tokio::test]
    async fn test_rewind_and_filters_gated() {
        let mut view = ExploreView::new(service());
        view.load().unwrap();
        let first = view.current().unwrap().id;
        view.reject().await.unwrap();

        assert!(view.rewind(Tier::Free).is_err());
        assert_eq!(view.history().len(), 1);

        let back = view.rewind(Tier::Basic).unwrap().unwrap();
        assert_eq!(back.id, first);
        assert!(view.rewind(Tier::Basic).unwrap().is_none());

        assert!(view.toggle_filters(Tier::Free).is_err());
        assert!(!view.filters_open());
        assert!(view.toggle_filters(Tier::Premium).unwrap());
    }

    #[tokio::test]
    async fn test_send_appends_exactly_one_message() {
        let mut view = MessagingView::new(service());
        view.load().unwrap();
        view.select(ConversationId(2)).unwrap();
        let before = view.messages().len();

        view.send("Coffee on Sunday?").await.unwrap();
        assert_eq!(view.messages().len(), before + 1);
        assert_eq!(view.messages().last().unwrap().content, "Coffee on Sunday?");

        let rows = view.conversations();
        assert_eq!(rows[1].last_message, "Coffee on Sunday?");
        assert_eq!(rows[0].last_message, "Hey, how are you?");
        assert_eq!(rows[2].last_message, "That sounds great!");
    }

    #[tokio::test]
    async fn test_send_rejects_blank_and_unselected() {
        let mut view = MessagingView::new(service());
        view.load().unwrap();
        assert!(view.send("hello").await.is_err());

        view.select(ConversationId(1)).unwrap();
        let before = view.messages().len();
        assert!(view.send("   ").await.is_err());
        assert_eq!(view.messages().len(), before);
        assert_eq!(view.conversations()[0].last_message, "Hey, how are you?");
    }

    #[tokio::test]
    async fn test_draft_flow() {
        let mut view = MessagingView::new(service());
        view.load().unwrap();
        view.select(ConversationId(3)).unwrap();
        assert_eq!(view.peer().map(|p| p.id), Some(ProfileId(3)));

        let suggestions = view.suggestions().await.unwrap();
        view.apply_suggestion(&suggestions[0]);
        view.push_emoji("🙂");
        let sent = view.send_draft().await.unwrap().content.clone();
        assert!(sent.ends_with("🙂"));
        assert!(view.draft().is_empty());
    }

    #[test]
    fn test_calls_are_elite_only() {
        let mut view = MessagingView::new(service());
        view.load().unwrap();
        view.select(ConversationId(1)).unwrap();

        let err = view.start_call(Tier::Premium, CallKind::Video).unwrap_err();
        assert!(err.is_gating());

        let call = view.start_call(Tier::Elite, CallKind::Phone).unwrap();
        assert_eq!(call.peer, "Sarah");
    }

    #[test]
    fn test_hub_likes_gated() {
        let hub = HubView::load(&service()).unwrap();
        assert!(hub.likes(Tier::Free).is_err());
        assert_eq!(hub.likes(Tier::Basic).unwrap().len(), 3);
        assert_eq!(hub.like_count(), 3);
        assert!(hub.matches().is_empty());
    }

    #[test]
    fn test_leaderboard_order_and_filter() {
        let mut board = LeaderboardView::load(&service()).unwrap();
        let names: Vec<&str> = board.rows().into_iter().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["Emily Chen", "Sarah Smith", "Mike Johnson"]);

        board.set_filter(GenderFilter::Men);
        let rows = board.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[0].1.name, "Mike Johnson");
    }

    #[test]
    fn test_video_chat_requires_premium() {
        let mut call = VideoChatView::new();
        for tier in [Tier::Free, Tier::Basic] {
            let err = call.start(tier).unwrap_err();
            assert_eq!(err.upgrade_to(), Tier::Premium);
        }
        assert!(!call.is_active());
        call.tick(5);
        assert_eq!(call.duration(), "00:00");

        call.start(Tier::Premium).unwrap();
        call.tick(61);
        assert_eq!(call.duration(), "01:01");
        assert!(call.toggle_mute());
        assert!(!call.toggle_camera());

        call.end();
        call.tick(10);
        assert!(!call.is_active());
        assert_eq!(call.duration(), "01:01");

        call.start(Tier::Elite).unwrap();
        assert_eq!(call.duration(), "00:00");
        assert!(call.is_muted());
        assert!(!call.camera_on());
    }
}
