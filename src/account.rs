//! Account pages: the settings screen and the own-profile editor.
//!
//! Both back the `profile` and `settings` pages. Setters validate their
//! input and leave the state untouched when they reject it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::profile::{Gender, Profile, User};

/// Youngest age a discovery range may start at.
pub const MIN_AGE: u8 = 18;

/// Oldest age a discovery range may end at.
pub const MAX_AGE: u8 = 100;

/// Largest discovery radius in kilometres.
pub const MAX_DISTANCE_KM: u32 = 100;

/// Notification channels that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Messages,
    Matches,
    Likes,
}

/// Which notifications are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub messages: bool,
    pub matches: bool,
    pub likes: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            messages: true,
            matches: true,
            likes: false,
        }
    }
}

impl NotificationSettings {
    /// Returns whether `kind` is enabled.
    #[must_use]
    pub const fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Messages => self.messages,
            NotificationKind::Matches => self.matches,
            NotificationKind::Likes => self.likes,
        }
    }

    fn slot(&mut self, kind: NotificationKind) -> &mut bool {
        match kind {
            NotificationKind::Messages => &mut self.messages,
            NotificationKind::Matches => &mut self.matches,
            NotificationKind::Likes => &mut self.likes,
        }
    }
}

/// Who can see the profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Matches,
    Private,
}

/// Privacy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub visibility: ProfileVisibility,
    pub show_distance: bool,
    pub show_age: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            visibility: ProfileVisibility::Public,
            show_distance: true,
            show_age: true,
        }
    }
}

/// Genders shown in discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    #[default]
    All,
    Male,
    Female,
    Other,
}

impl GenderPreference {
    /// Returns whether `gender` passes the preference.
    #[must_use]
    pub const fn accepts(self, gender: &Gender) -> bool {
        match self {
            Self::All => true,
            Self::Male => matches!(gender, Gender::Male),
            Self::Female => matches!(gender, Gender::Female),
            Self::Other => matches!(gender, Gender::NonBinary | Gender::Other(_)),
        }
    }
}

/// Discovery preferences: age range, radius and gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryPreferences {
    pub min_age: u8,
    pub max_age: u8,
    pub distance_km: u32,
    pub gender: GenderPreference,
}

impl Default for DiscoveryPreferences {
    fn default() -> Self {
        Self {
            min_age: MIN_AGE,
            max_age: 35,
            distance_km: 50,
            gender: GenderPreference::All,
        }
    }
}

impl DiscoveryPreferences {
    /// Returns whether `profile` falls inside the age range and gender preference.
    ///
    /// Distance is not checked; fixture locations are free text.
    #[must_use]
    pub fn accepts(&self, profile: &Profile) -> bool {
        let ages = u32::from(self.min_age)..=u32::from(self.max_age);
        ages.contains(&profile.age) && self.gender.accepts(&profile.gender)
    }
}

/// State behind the settings page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    notifications: NotificationSettings,
    privacy: PrivacySettings,
    preferences: DiscoveryPreferences,
}

impl SettingsView {
    /// Creates the view with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification switches.
    #[must_use]
    pub const fn notifications(&self) -> &NotificationSettings {
        &self.notifications
    }

    /// Privacy switches.
    #[must_use]
    pub const fn privacy(&self) -> &PrivacySettings {
        &self.privacy
    }

    /// Discovery preferences.
    #[must_use]
    pub const fn preferences(&self) -> &DiscoveryPreferences {
        &self.preferences
    }

    /// Flips one notification switch and returns its new value.
    pub fn toggle_notification(&mut self, kind: NotificationKind) -> bool {
        let slot = self.notifications.slot(kind);
        *slot = !*slot;
        debug!(?kind, enabled = *slot, "notification toggled");
        *slot
    }

    /// Sets who can see the profile.
    pub fn set_visibility(&mut self, visibility: ProfileVisibility) {
        self.privacy.visibility = visibility;
    }

    /// Shows or hides the distance on the profile.
    pub fn set_show_distance(&mut self, show: bool) {
        self.privacy.show_distance = show;
    }

    /// Shows or hides the age on the profile.
    pub fn set_show_age(&mut self, show: bool) {
        self.privacy.show_age = show;
    }

    /// Sets which genders discovery shows.
    pub fn set_gender_preference(&mut self, gender: GenderPreference) {
        self.preferences.gender = gender;
    }

    /// Sets the discovery age range, both ends inclusive.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if either end is outside `MIN_AGE..=MAX_AGE`
    /// - `InvertedRange` if `min > max`
    pub fn set_age_range(&mut self, min: u8, max: u8) -> Result<(), ValidationError> {
        for (field, value) in [("min_age", min), ("max_age", max)] {
            if !(MIN_AGE..=MAX_AGE).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    value: i64::from(value),
                    min: i64::from(MIN_AGE),
                    max: i64::from(MAX_AGE),
                });
            }
        }
        if min > max {
            return Err(ValidationError::InvertedRange {
                field: "age_range".to_string(),
                min: i64::from(min),
                max: i64::from(max),
            });
        }
        self.preferences.min_age = min;
        self.preferences.max_age = max;
        debug!(min, max, "age range updated");
        Ok(())
    }

    /// Sets the discovery radius.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `1 <= km <= MAX_DISTANCE_KM`.
    pub fn set_distance(&mut self, km: u32) -> Result<(), ValidationError> {
        if !(1..=MAX_DISTANCE_KM).contains(&km) {
            return Err(ValidationError::OutOfRange {
                field: "distance_km".to_string(),
                value: i64::from(km),
                min: 1,
                max: i64::from(MAX_DISTANCE_KM),
            });
        }
        self.preferences.distance_km = km;
        Ok(())
    }
}

/// The signed-in user's public profile as shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnProfile {
    pub name: String,
    pub age: u8,
    pub location: String,
    pub gender: String,
    pub occupation: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub relationship_goals: String,
    pub photos: Vec<String>,
}

const GALLERY: [&str; 2] = [
    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d",
    "https://images.unsplash.com/photo-1505503693641-1926193e8d57",
];

impl OwnProfile {
    /// Starting profile for `user`: their name and photo plus placeholder details.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        let photos = user
            .photo
            .iter()
            .cloned()
            .chain(GALLERY.iter().map(ToString::to_string))
            .collect();
        Self {
            name: user.name.clone(),
            age: 28,
            location: "New York, NY".to_string(),
            gender: "Non-binary".to_string(),
            occupation: "Software Engineer".to_string(),
            bio: "Passionate about technology, sustainability, and personal growth. \
                  Looking for meaningful connections and shared experiences."
                .to_string(),
            interests: to_list(&["Coding", "Hiking", "Photography", "Meditation"]),
            values: to_list(&["Honesty", "Empathy", "Growth Mindset"]),
            relationship_goals: "Long-term partnership".to_string(),
            photos,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::blank("name"));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ValidationError::OutOfRange {
                field: "age".to_string(),
                value: i64::from(self.age),
                min: i64::from(MIN_AGE),
                max: i64::from(MAX_AGE),
            });
        }
        Ok(())
    }
}

fn to_list(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Editable fields of [`OwnProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Age,
    Location,
    Gender,
    Occupation,
    Bio,
    /// Comma-separated list.
    Interests,
    /// Comma-separated list.
    Values,
    RelationshipGoals,
}

/// Edit/save flow for the profile page.
///
/// `edit` opens a draft copy. Setters write to the draft only. `save`
/// validates the draft and commits it; a rejected save keeps both the
/// saved profile and the draft as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    saved: OwnProfile,
    draft: Option<OwnProfile>,
}

impl ProfileEditor {
    /// Editor over an existing profile, not in edit mode.
    #[must_use]
    pub const fn new(profile: OwnProfile) -> Self {
        Self {
            saved: profile,
            draft: None,
        }
    }

    /// Editor seeded from the signed-in user.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self::new(OwnProfile::for_user(user))
    }

    /// Last saved profile.
    #[must_use]
    pub const fn profile(&self) -> &OwnProfile {
        &self.saved
    }

    /// Working copy while editing.
    #[must_use]
    pub const fn draft(&self) -> Option<&OwnProfile> {
        self.draft.as_ref()
    }

    /// True between `edit` and a successful `save` or `cancel`.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enters edit mode. A draft already open is kept.
    pub fn edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    /// Leaves edit mode without saving.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Writes `value` into the draft.
    ///
    /// # Errors
    ///
    /// - `NotEditing` outside edit mode
    /// - `InvalidNumber` if `Age` is not a whole number that fits a `u8`
    pub fn set(&mut self, field: ProfileField, value: &str) -> Result<(), ValidationError> {
        let draft = self.draft.as_mut().ok_or(ValidationError::NotEditing)?;
        match field {
            ProfileField::Name => draft.name = value.to_string(),
            ProfileField::Age => {
                draft.age = value.trim().parse().map_err(|_| ValidationError::InvalidNumber {
                    field: "age".to_string(),
                    value: value.to_string(),
                })?;
            }
            ProfileField::Location => draft.location = value.to_string(),
            ProfileField::Gender => draft.gender = value.to_string(),
            ProfileField::Occupation => draft.occupation = value.to_string(),
            ProfileField::Bio => draft.bio = value.to_string(),
            ProfileField::Interests => draft.interests = split_list(value),
            ProfileField::Values => draft.values = split_list(value),
            ProfileField::RelationshipGoals => draft.relationship_goals = value.to_string(),
        }
        Ok(())
    }

    /// Validates and commits the draft, leaving edit mode.
    ///
    /// # Errors
    ///
    /// - `NotEditing` outside edit mode
    /// - `BlankField` for a blank name
    /// - `OutOfRange` for an age outside `MIN_AGE..=MAX_AGE`
    pub fn save(&mut self) -> Result<&OwnProfile, ValidationError> {
        let draft = self.draft.as_ref().ok_or(ValidationError::NotEditing)?;
        draft.validate()?;
        if let Some(draft) = self.draft.take() {
            self.saved = draft;
        }
        info!(name = %self.saved.name, "profile saved");
        Ok(&self.saved)
    }
}
