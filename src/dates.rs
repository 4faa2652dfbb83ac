//! Date planning and post-date feedback.
//!
//! A [`DatePlanDraft`] collects form input; [`DatePlanner::submit`] turns
//! it into a [`DatePlan`] only when every required field is present. A
//! rejected draft never touches the planned list.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GatingError, KindlingResult, ValidationError};
use crate::subscription::{Feature, Tier};

static TIME_OF_DAY: OnceLock<Regex> = OnceLock::new();

fn time_of_day_re() -> &'static Regex {
    TIME_OF_DAY.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time-of-day pattern compiles"))
}

/// Whether a date happens online or in person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    Virtual,
    Physical,
}

impl DateType {
    /// Suggested activities for this kind of date.
    #[must_use]
    pub const fn ideas(self) -> &'static [&'static str] {
        match self {
            Self::Virtual => &[
                "Virtual Movie Night",
                "Online Game Session",
                "Virtual Art Class",
                "Book Club Discussion",
                "Virtual Concert Experience",
            ],
            Self::Physical => &[
                "Coffee Shop Meet",
                "Park Picnic",
                "Museum Visit",
                "Cooking Class",
                "Mini Golf Adventure",
            ],
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Virtual => write!(f, "virtual"),
            Self::Physical => write!(f, "physical"),
        }
    }
}

/// A scheduled date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePlan {
    pub id: u64,
    pub date: NaiveDate,
    /// Time of day, `HH:MM`.
    pub time: String,
    #[serde(rename = "type")]
    pub date_type: DateType,
    pub activity: String,
    pub partner: String,
}

impl DatePlan {
    /// Start of the date in UTC, or midnight when the time cannot be parsed.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").unwrap_or(NaiveTime::MIN);
        self.date.and_time(time).and_utc()
    }

    /// True when the date started before `now`.
    #[must_use]
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at() < now
    }
}

/// Partially filled date form.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use kindling::{DatePlanDraft, DatePlanner, DateType};
///
/// let mut planner = DatePlanner::new();
/// let draft = DatePlanDraft::new()
///     .date(NaiveDate::from_ymd_opt(2030, 2, 14).unwrap())
///     .time("19:30")
///     .date_type(DateType::Physical)
///     .activity("Museum Visit")
///     .partner("Emily");
/// assert_eq!(planner.submit(draft).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePlanDraft {
    date: Option<NaiveDate>,
    time: Option<String>,
    date_type: Option<DateType>,
    activity: Option<String>,
    partner: Option<String>,
}

impl DatePlanDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the calendar date (required).
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the time of day as `HH:MM` (required).
    #[must_use]
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set virtual or physical (required).
    #[must_use]
    pub fn date_type(mut self, date_type: DateType) -> Self {
        self.date_type = Some(date_type);
        self
    }

    /// Set the activity (required).
    #[must_use]
    pub fn activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    /// Set the partner's name (required).
    #[must_use]
    pub fn partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    /// The selected date type, if any.
    #[must_use]
    pub const fn selected_type(&self) -> Option<DateType> {
        self.date_type
    }

    fn into_plan(self, id: u64) -> Result<DatePlan, ValidationError> {
        let date = self.date.ok_or_else(|| ValidationError::missing("date"))?;
        let time = required_text(self.time, "time")?;
        if !time_of_day_re().is_match(&time) {
            return Err(ValidationError::InvalidTimeOfDay { value: time });
        }
        let date_type = self.date_type.ok_or_else(|| ValidationError::missing("type"))?;
        let activity = required_text(self.activity, "activity")?;
        let partner = required_text(self.partner, "partner")?;

        Ok(DatePlan {
            id,
            date,
            time,
            date_type,
            activity,
            partner,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::missing(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::blank(field));
    }
    Ok(trimmed.to_string())
}

/// The planned-dates list of one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePlanner {
    plans: Vec<DatePlan>,
}

impl DatePlanner {
    /// Creates an empty planner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a planner holding `plans`.
    #[must_use]
    pub fn from_plans(plans: Vec<DatePlan>) -> Self {
        Self { plans }
    }

    /// Planned dates in insertion order.
    #[must_use]
    pub fn plans(&self) -> &[DatePlan] {
        &self.plans
    }

    /// Validates `draft` and appends it, returning the new id (`len + 1`).
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the first missing, blank, or
    /// malformed field. The list is left unchanged.
    pub fn submit(&mut self, draft: DatePlanDraft) -> Result<u64, ValidationError> {
        let id = self.plans.len() as u64 + 1;
        let plan = draft.into_plan(id)?;
        info!(plan_id = id, partner = %plan.partner, kind = %plan.date_type, "date planned");
        self.plans.push(plan);
        Ok(id)
    }

    /// Like [`DatePlanner::submit`], but virtual dates need the date planner feature.
    ///
    /// # Errors
    ///
    /// Returns a gating error for virtual dates on tiers without the
    /// planner, otherwise the same errors as `submit`.
    pub fn submit_for(&mut self, tier: Tier, draft: DatePlanDraft) -> KindlingResult<u64> {
        if draft.selected_type() == Some(DateType::Virtual) {
            tier.require(Feature::DatePlanner)?;
        }
        Ok(self.submit(draft)?)
    }

    /// The first date that already happened, used to prompt the post-date poll.
    #[must_use]
    pub fn first_completed(&self, now: DateTime<Utc>) -> Option<&DatePlan> {
        self.plans.iter().find(|plan| plan.is_past(now))
    }

    /// Calendar entries for every upcoming date, soonest first.
    ///
    /// # Errors
    ///
    /// Returns a gating error on the free tier.
    pub fn calendar_sync(&self, tier: Tier, now: DateTime<Utc>) -> Result<Vec<CalendarEvent>, GatingError> {
        tier.require(Feature::CalendarSync)?;
        let events: Vec<CalendarEvent> = self.upcoming(now).into_iter().map(CalendarEvent::from_plan).collect();
        debug!(events = events.len(), "calendar synced");
        Ok(events)
    }

    /// Dates that have not started yet, soonest first.
    #[must_use]
    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<&DatePlan> {
        let mut upcoming: Vec<&DatePlan> = self.plans.iter().filter(|plan| !plan.is_past(now)).collect();
        upcoming.sort_by_key(|plan| plan.starts_at());
        upcoming
    }
}

/// One planned date exported to an external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub plan_id: u64,
    /// "Activity with Partner".
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub date_type: DateType,
}

impl CalendarEvent {
    fn from_plan(plan: &DatePlan) -> Self {
        Self {
            plan_id: plan.id,
            title: format!("{} with {}", plan.activity, plan.partner),
            starts_at: plan.starts_at(),
            date_type: plan.date_type,
        }
    }
}

/// Rating left after a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDateFeedback {
    pub partner: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub feedback: String,
}

impl PostDateFeedback {
    /// Validates and builds a feedback record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` unless `rating` is in 1..=5.
    pub fn new(partner: impl Into<String>, rating: u8, feedback: impl Into<String>) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                value: i64::from(rating),
                min: 1,
                max: 5,
            });
        }
        let feedback = Self {
            partner: partner.into(),
            rating,
            feedback: feedback.into(),
        };
        debug!(partner = %feedback.partner, rating, "post-date feedback recorded");
        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn complete_draft() -> DatePlanDraft {
        DatePlanDraft::new()
            .date(NaiveDate::from_ymd_opt(2031, 6, 1).unwrap())
            .time("18:45")
            .date_type(DateType::Physical)
            .activity("Park Picnic")
            .partner("Mike")
    }

    #[test]
    fn test_submit_complete_draft() {
        let mut planner = DatePlanner::from_plans(fixtures::planned_dates());
        let id = planner.submit(complete_draft()).unwrap();
        assert_eq!(id, 3);
        assert_eq!(planner.plans().len(), 3);
        assert_eq!(planner.plans()[2].partner, "Mike");
    }

    #[test]
    fn test_missing_field_leaves_list_unchanged() {
        let mut planner = DatePlanner::from_plans(fixtures::planned_dates());
        let before = planner.clone();

        let drafts = [
            DatePlanDraft::new()
                .time("18:45")
                .date_type(DateType::Physical)
                .activity("Park Picnic")
                .partner("Mike"),
            complete_draft().time(""),
            complete_draft().activity("   "),
            complete_draft().partner(""),
            DatePlanDraft::new()
                .date(NaiveDate::from_ymd_opt(2031, 6, 1).unwrap())
                .time("18:45")
                .activity("Park Picnic")
                .partner("Mike"),
        ];
        for draft in drafts {
            assert!(planner.submit(draft).is_err());
            assert_eq!(planner, before);
        }
    }

    #[test]
    fn test_bad_time_rejected() {
        let mut planner = DatePlanner::new();
        let err = planner.submit(complete_draft().time("25:00")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeOfDay { .. }));
        assert!(planner.plans().is_empty());
    }

    #[test]
    fn test_virtual_dates_need_planner_feature() {
        let mut planner = DatePlanner::new();
        let draft = complete_draft()
            .date_type(DateType::Virtual)
            .activity("Virtual Movie Night");

        let err = planner.submit_for(Tier::Basic, draft.clone()).unwrap_err();
        assert!(err.is_gating());
        assert!(planner.plans().is_empty());

        assert_eq!(planner.submit_for(Tier::Premium, draft).unwrap(), 1);
        assert_eq!(planner.submit_for(Tier::Free, complete_draft()).unwrap(), 2);
    }

    #[test]
    fn test_first_completed_and_upcoming() {
        let mut planner = DatePlanner::from_plans(fixtures::planned_dates());
        planner.submit(complete_draft()).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        assert_eq!(planner.first_completed(now).unwrap().partner, "Sarah");
        let upcoming = planner.upcoming(now);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].activity, "Park Picnic");
    }

    #[test]
    fn test_calendar_sync_needs_paid_tier() {
        let mut planner = DatePlanner::from_plans(fixtures::planned_dates());
        planner.submit(complete_draft()).unwrap();
        let now = NaiveDate::from_ymd_opt(2023, 5, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        let err = planner.calendar_sync(Tier::Free, now).unwrap_err();
        assert_eq!(err.upgrade_to(), Tier::Basic);

        let events = planner.calendar_sync(Tier::Basic, now).unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Coffee Shop Meet with Mike", "Park Picnic with Mike"]);
        assert_eq!(events[0].plan_id, 2);
        assert_eq!(events[0].starts_at, planner.plans()[1].starts_at());
        assert_eq!(events[1].date_type, DateType::Physical);
    }

    #[test]
    fn test_feedback_rating_bounds() {
        assert!(PostDateFeedback::new("Sarah", 5, "Lovely").is_ok());
        assert!(PostDateFeedback::new("Sarah", 0, "").is_err());
        assert!(PostDateFeedback::new("Sarah", 6, "").is_err());
    }

    #[test]
    fn test_idea_catalogs() {
        assert_eq!(DateType::Virtual.ideas().len(), 5);
        assert!(DateType::Physical.ideas().contains(&"Coffee Shop Meet"));
    }
}
