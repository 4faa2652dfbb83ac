//! Profile verification gate.
//!
//! A three-step form (photos, personal info, review) followed by a placeholder
//! rating: one AI score and five community ratings, each in 7..=9. The final
//! score is the rounded mean of the AI score and the community average.
//! Sessions stay locked until a submission scores at or above the threshold.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ValidationError;

/// Lowest passing score unless configured otherwise.
pub const DEFAULT_THRESHOLD: u32 = 8;

/// Number of community ratings drawn per submission.
pub const COMMUNITY_RATERS: usize = 5;

/// Message surfaced when a submission falls below the threshold.
pub const REJECTION_MESSAGE: &str =
    "We're sorry, but your profile doesn't meet our current standards. Please try again later.";

/// Source of the placeholder ratings.
pub trait ScoreSource {
    /// The automated rating.
    fn ai_score(&mut self) -> u32;

    /// One community member's rating.
    fn community_rating(&mut self) -> u32;
}

/// Uniform ratings in 7..=9.
#[derive(Debug)]
pub struct RandomScores<R> {
    rng: R,
}

impl<R: Rng> RandomScores<R> {
    /// Wraps an RNG.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomScores<StdRng> {
    /// Ratings drawn from an entropy-seeded RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ScoreSource for RandomScores<R> {
    fn ai_score(&mut self) -> u32 {
        self.rng.gen_range(7..=9)
    }

    fn community_rating(&mut self) -> u32 {
        self.rng.gen_range(7..=9)
    }
}

/// Replays fixed ratings; the community list is cycled.
#[derive(Debug, Clone)]
pub struct FixedScores {
    ai: u32,
    community: Vec<u32>,
    next: usize,
}

impl FixedScores {
    /// Creates a source that always yields `ai` and cycles `community`.
    #[must_use]
    pub fn new(ai: u32, community: Vec<u32>) -> Self {
        Self {
            ai,
            community,
            next: 0,
        }
    }
}

impl ScoreSource for FixedScores {
    fn ai_score(&mut self) -> u32 {
        self.ai
    }

    fn community_rating(&mut self) -> u32 {
        if self.community.is_empty() {
            return self.ai;
        }
        let rating = self.community[self.next % self.community.len()];
        self.next += 1;
        rating
    }
}

/// Combines the AI score with the community average, rounding half up.
#[must_use]
pub fn final_score(ai: u32, community: &[u32]) -> u32 {
    if community.is_empty() {
        return ai;
    }
    let sum: u32 = community.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let avg = f64::from(sum) / community.len() as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = ((f64::from(ai) + avg) / 2.0).round() as u32;
    score
}

/// Result of a completed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The score met the threshold.
    Verified {
        score: u32,
    },
    /// The score fell short; the session stays locked.
    Rejected {
        score: u32,
        message: String,
    },
}

impl VerificationOutcome {
    /// Classifies `score` against `threshold`.
    #[must_use]
    pub fn from_score(score: u32, threshold: u32) -> Self {
        if score >= threshold {
            Self::Verified { score }
        } else {
            Self::Rejected {
                score,
                message: REJECTION_MESSAGE.to_string(),
            }
        }
    }

    /// The final score either way.
    #[must_use]
    pub const fn score(&self) -> u32 {
        match self {
            Self::Verified { score } | Self::Rejected { score, .. } => *score,
        }
    }

    /// True when the app should unlock.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Step of the verification form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStep {
    Photos,
    PersonalInfo,
    Review,
}

impl VerificationStep {
    /// 1-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Photos => 1,
            Self::PersonalInfo => 2,
            Self::Review => 3,
        }
    }
}

/// Personal details collected on step two. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub birthdate: String,
    pub gender: String,
    pub interests: String,
    pub bio: String,
}

impl PersonalInfo {
    fn first_blank(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("birthdate", &self.birthdate),
            ("gender", &self.gender),
            ("interests", &self.interests),
            ("bio", &self.bio),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Moved to the given step.
    Advanced(VerificationStep),
    /// The last step was rated.
    Completed(VerificationOutcome),
}

/// Multi-step verification form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationForm {
    step: VerificationStep,
    photos: Vec<String>,
    info: PersonalInfo,
    threshold: u32,
}

impl Default for VerificationForm {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl VerificationForm {
    /// Creates a form on the first step.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            step: VerificationStep::Photos,
            photos: Vec::new(),
            info: PersonalInfo::default(),
            threshold,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> VerificationStep {
        self.step
    }

    /// Uploaded photo references.
    #[must_use]
    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    /// Adds uploaded photo references.
    pub fn add_photos<I, S>(&mut self, photos: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photos.extend(photos.into_iter().map(Into::into));
    }

    /// Replaces the personal details.
    pub fn set_personal_info(&mut self, info: PersonalInfo) {
        self.info = info;
    }

    /// Personal details entered so far.
    #[must_use]
    pub const fn personal_info(&self) -> &PersonalInfo {
        &self.info
    }

    /// Submits the current step.
    ///
    /// Steps one and two advance when their input is complete. The review
    /// step draws ratings from `scores` and returns the outcome.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::IncompleteStep` when the current step is
    /// missing required input; the step does not change.
    pub fn submit(&mut self, scores: &mut dyn ScoreSource) -> Result<SubmitResult, ValidationError> {
        match self.step {
            VerificationStep::Photos => {
                if self.photos.is_empty() {
                    return Err(ValidationError::IncompleteStep {
                        step: self.step.number(),
                        reason: "at least one photo is required".to_string(),
                    });
                }
                self.step = VerificationStep::PersonalInfo;
                Ok(SubmitResult::Advanced(self.step))
            }
            VerificationStep::PersonalInfo => {
                if let Some(field) = self.info.first_blank() {
                    return Err(ValidationError::IncompleteStep {
                        step: self.step.number(),
                        reason: format!("'{field}' is required"),
                    });
                }
                self.step = VerificationStep::Review;
                Ok(SubmitResult::Advanced(self.step))
            }
            VerificationStep::Review => Ok(SubmitResult::Completed(self.rate(scores))),
        }
    }

    fn rate(&self, scores: &mut dyn ScoreSource) -> VerificationOutcome {
        let ai = scores.ai_score();
        let community: Vec<u32> = (0..COMMUNITY_RATERS).map(|_| scores.community_rating()).collect();
        let score = final_score(ai, &community);
        let outcome = VerificationOutcome::from_score(score, self.threshold);
        if outcome.is_verified() {
            info!(score, ai, "profile verified");
        } else {
            warn!(score, ai, threshold = self.threshold, "profile rejected");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_info() -> PersonalInfo {
        PersonalInfo {
            name: "John Doe".to_string(),
            birthdate: "1996-04-02".to_string(),
            gender: "male".to_string(),
            interests: "climbing, jazz".to_string(),
            bio: "Here for the coffee.".to_string(),
        }
    }

    fn form_at_review() -> VerificationForm {
        let mut form = VerificationForm::default();
        let mut scores = FixedScores::new(9, vec![9]);
        form.add_photos(["selfie.jpg"]);
        form.submit(&mut scores).unwrap();
        form.set_personal_info(filled_info());
        form.submit(&mut scores).unwrap();
        form
    }

    #[test]
    fn test_final_score_rounding() {
        assert_eq!(final_score(7, &[7, 7, 7, 7, 7]), 7);
        // (7 + 8.4) / 2 = 7.7
        assert_eq!(final_score(7, &[8, 8, 9, 9, 8]), 8);
        // (7 + 8) / 2 = 7.5 rounds up
        assert_eq!(final_score(7, &[8, 8, 8, 8, 8]), 8);
        assert_eq!(final_score(9, &[]), 9);
    }

    #[test]
    fn test_outcome_threshold() {
        assert!(VerificationOutcome::from_score(8, 8).is_verified());
        let rejected = VerificationOutcome::from_score(7, 8);
        assert!(!rejected.is_verified());
        assert!(matches!(
            rejected,
            VerificationOutcome::Rejected { ref message, .. } if message == REJECTION_MESSAGE
        ));
    }

    #[test]
    fn test_photos_required_before_advancing() {
        let mut form = VerificationForm::default();
        let mut scores = FixedScores::new(9, vec![9]);
        let err = form.submit(&mut scores).unwrap_err();
        assert!(matches!(err, ValidationError::IncompleteStep { step: 1, .. }));
        assert_eq!(form.step(), VerificationStep::Photos);
    }

    #[test]
    fn test_personal_info_required_fields() {
        let mut form = VerificationForm::default();
        let mut scores = FixedScores::new(9, vec![9]);
        form.add_photos(["a.jpg", "b.jpg"]);
        assert_eq!(
            form.submit(&mut scores).unwrap(),
            SubmitResult::Advanced(VerificationStep::PersonalInfo)
        );

        let mut info = filled_info();
        info.bio = "  ".to_string();
        form.set_personal_info(info);
        let err = form.submit(&mut scores).unwrap_err();
        assert!(matches!(err, ValidationError::IncompleteStep { step: 2, ref reason } if reason.contains("bio")));
        assert_eq!(form.step(), VerificationStep::PersonalInfo);
    }

    #[test]
    fn test_review_verifies_high_scores() {
        let mut form = form_at_review();
        let mut scores = FixedScores::new(9, vec![8, 9]);
        let result = form.submit(&mut scores).unwrap();
        assert_eq!(
            result,
            SubmitResult::Completed(VerificationOutcome::Verified { score: 9 })
        );
    }

    #[test]
    fn test_review_rejects_low_scores() {
        let mut form = form_at_review();
        let mut scores = FixedScores::new(7, vec![7]);
        let SubmitResult::Completed(outcome) = form.submit(&mut scores).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(outcome.score(), 7);
        assert!(!outcome.is_verified());
    }

    #[test]
    fn test_random_scores_stay_in_band() {
        let mut scores = RandomScores::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            assert!((7..=9).contains(&scores.ai_score()));
            assert!((7..=9).contains(&scores.community_rating()));
        }
    }
}
