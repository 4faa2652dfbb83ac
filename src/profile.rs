//! Profile and account records.
//!
//! Profiles are plain records. No uniqueness or referential invariants
//! are enforced; fixture ids are assigned by array position.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::growth::GrowthGoal;

/// Identifier of a discoverable profile (1-based fixture position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProfileId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Gender as shown on a profile card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    /// Free-form self description.
    Other(String),
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
            Self::NonBinary => write!(f, "non-binary"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// A prompt and the profile owner's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcebreakerAnswer {
    pub question: String,
    pub answer: String,
}

impl IcebreakerAnswer {
    /// Creates an answer record.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A discoverable dating profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub location: String,
    pub bio: String,
    pub photos: Vec<String>,
    pub interests: Vec<String>,
    pub values: Vec<String>,
    /// Arbitrary ranking used for gating and leaderboard ordering.
    pub hotness_score: u32,
    pub premium: bool,
    #[serde(default)]
    pub icebreaker_answers: Vec<IcebreakerAnswer>,
    #[serde(default)]
    pub growth_goals: Vec<GrowthGoal>,
    pub likes: u32,
    pub matches: u32,
}

impl Profile {
    /// The photo shown on list rows, if any.
    #[must_use]
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    /// First name, used as the conversation label.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// "Name, age" caption used on cards.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{}, {}", self.name, self.age)
    }
}

/// Identifier of the signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in account and its tier-derived attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub premium: bool,
    /// Set from the verification score once verified.
    pub hotness_score: u32,
    pub photo: Option<String>,
    pub invites: u32,
}

impl User {
    /// Creates an unverified free-tier account.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            premium: false,
            hotness_score: 0,
            photo: None,
            invites: 0,
        }
    }

    /// Sets the profile photo.
    #[must_use]
    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photo = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_profile_helpers() {
        let profile = &fixtures::profiles()[0];
        assert_eq!(profile.first_name(), "Sarah");
        assert_eq!(profile.caption(), "Sarah Smith, 26");
        assert!(profile.primary_photo().is_some());
    }

    #[test]
    fn test_user_defaults() {
        let user = User::new("John Doe");
        assert!(!user.premium);
        assert_eq!(user.hotness_score, 0);
        assert_eq!(user.invites, 0);
        assert!(!user.id.as_uuid().is_nil());
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(Gender::Other("agender".to_string()).to_string(), "agender");
    }

    #[test]
    fn test_profile_serializes_ids_transparently() {
        let profile = &fixtures::profiles()[1];
        let json = serde_json::to_value(profile).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["gender"], "male");
    }
}
