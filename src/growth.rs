//! Personal growth goals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GatingError, ValidationError};
use crate::subscription::{Feature, Tier};

/// Upper bound of goal progress.
pub const MAX_PROGRESS: u8 = 100;

/// A personal goal with a 0–100 progress value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthGoal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub progress: u8,
}

impl GrowthGoal {
    /// Creates a goal, clamping `progress` into range.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, description: impl Into<String>, progress: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            progress: clamp_progress(progress),
        }
    }

    /// True once progress reaches 100.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }
}

fn clamp_progress(value: i64) -> u8 {
    // In range after the clamp.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.clamp(0, i64::from(MAX_PROGRESS)) as u8;
    clamped
}

/// An ordered list of goals owned by one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalBook {
    goals: Vec<GrowthGoal>,
}

impl GoalBook {
    /// Number of goals shown on the profile.
    pub const HIGHLIGHTS: usize = 2;

    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a book holding `goals`.
    #[must_use]
    pub fn from_goals(goals: Vec<GrowthGoal>) -> Self {
        Self { goals }
    }

    /// The goals in insertion order.
    #[must_use]
    pub fn goals(&self) -> &[GrowthGoal] {
        &self.goals
    }

    /// Number of goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// True when there are no goals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Looks up a goal by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&GrowthGoal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    /// Adds a goal at zero progress and returns its id.
    ///
    /// The id is `len + 1`, so ids may repeat after a removal.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::BlankField` if title or description is blank.
    pub fn add(&mut self, title: &str, description: &str) -> Result<u64, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::blank("title"));
        }
        if description.trim().is_empty() {
            return Err(ValidationError::blank("description"));
        }

        let id = self.goals.len() as u64 + 1;
        self.goals.push(GrowthGoal::new(id, title.trim(), description.trim(), 0));
        debug!(goal_id = id, "growth goal added");
        Ok(id)
    }

    /// Sets progress on every goal with `id`, clamped to 0..=100.
    ///
    /// Returns false when no goal matched.
    pub fn set_progress(&mut self, id: u64, progress: i64) -> bool {
        let value = clamp_progress(progress);
        let mut matched = false;
        for goal in self.goals.iter_mut().filter(|goal| goal.id == id) {
            goal.progress = value;
            matched = true;
        }
        matched
    }

    /// Removes every goal with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: u64) -> usize {
        let before = self.goals.len();
        self.goals.retain(|goal| goal.id != id);
        before - self.goals.len()
    }

    /// Goals shown on the profile, highest progress first, at most [`GoalBook::HIGHLIGHTS`].
    ///
    /// # Errors
    ///
    /// Returns a gating error on the free tier.
    pub fn highlighted(&self, tier: Tier) -> Result<Vec<&GrowthGoal>, GatingError> {
        tier.require(Feature::GrowthHighlight)?;
        let mut goals: Vec<&GrowthGoal> = self.goals.iter().collect();
        goals.sort_by(|a, b| b.progress.cmp(&a.progress));
        goals.truncate(Self::HIGHLIGHTS);
        Ok(goals)
    }

    /// Mean progress across goals, or zero when empty.
    #[must_use]
    pub fn average_progress(&self) -> f32 {
        if self.goals.is_empty() {
            return 0.0;
        }
        let total: u32 = self.goals.iter().map(|goal| u32::from(goal.progress)).sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = total as f32 / self.goals.len() as f32;
        avg
    }
}
