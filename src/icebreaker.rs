//! Icebreaker mini-game.
//!
//! Players answer scripted prompts; a [`Judge`] decides whether each answer
//! lands. Positive answers earn the tier's reward and extend the streak.
//! Negative answers cost a fixed penalty (never below zero) and reset the
//! streak.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::fixtures;
use crate::subscription::Tier;

/// Points removed for a negatively judged answer.
pub const DEFAULT_PENALTY: u32 = 20;

/// Chance that the random judge likes an answer.
pub const POSITIVE_RATE: f64 = 0.7;

/// A prompt from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
}

/// The full prompt catalog, ids starting at 1.
#[must_use]
pub fn question_catalog() -> Vec<Question> {
    fixtures::icebreaker_questions()
        .into_iter()
        .zip(1u32..)
        .map(|(text, id)| Question {
            id,
            text: text.to_string(),
        })
        .collect()
}

/// Decides whether an answer is received well.
pub trait Judge {
    /// Returns true for a positive outcome.
    fn judge(&mut self, question: &Question, answer: &str) -> bool;
}

/// Positive with probability [`POSITIVE_RATE`], regardless of content.
#[derive(Debug)]
pub struct RandomJudge<R> {
    rng: R,
}

impl<R: Rng> RandomJudge<R> {
    /// Wraps an RNG.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Judge for RandomJudge<R> {
    fn judge(&mut self, _question: &Question, _answer: &str) -> bool {
        self.rng.gen_bool(POSITIVE_RATE)
    }
}

/// Replays a scripted list of verdicts, then repeats the last one.
#[derive(Debug, Clone)]
pub struct ScriptedJudge {
    verdicts: Vec<bool>,
    next: usize,
}

impl ScriptedJudge {
    /// Creates a judge returning `verdicts` in order.
    #[must_use]
    pub fn new(verdicts: Vec<bool>) -> Self {
        Self { verdicts, next: 0 }
    }
}

impl Judge for ScriptedJudge {
    fn judge(&mut self, _question: &Question, _answer: &str) -> bool {
        let Some(last) = self.verdicts.last().copied() else {
            return true;
        };
        let verdict = self.verdicts.get(self.next).copied().unwrap_or(last);
        self.next += 1;
        verdict
    }
}

/// A submitted answer and how it was judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgedAnswer {
    pub question: String,
    pub answer: String,
    pub positive: bool,
}

/// Score change caused by one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub positive: bool,
    /// Points actually added (positive) or removed (negative).
    pub delta: i64,
    pub points: u32,
    pub streak: u32,
}

/// State of one icebreaker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcebreakerGame {
    tier: Tier,
    penalty: u32,
    questions: Vec<Question>,
    started: bool,
    current: Option<Question>,
    answered: Vec<JudgedAnswer>,
    points: u32,
    streak: u32,
}

impl IcebreakerGame {
    /// Creates an idle game for `tier` using the default penalty.
    #[must_use]
    pub fn new(tier: Tier) -> Self {
        Self::with_penalty(tier, DEFAULT_PENALTY)
    }

    /// Creates an idle game with a custom penalty.
    #[must_use]
    pub fn with_penalty(tier: Tier, penalty: u32) -> Self {
        Self {
            tier,
            penalty,
            questions: question_catalog(),
            started: false,
            current: None,
            answered: Vec::new(),
            points: 0,
            streak: 0,
        }
    }

    /// Current point total.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Consecutive positive answers.
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    /// True between `start` and `reset`.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// The prompt awaiting an answer.
    #[must_use]
    pub const fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Answers submitted so far.
    #[must_use]
    pub fn answered(&self) -> &[JudgedAnswer] {
        &self.answered
    }

    /// True when every prompt has an answer.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.unanswered().is_empty()
    }

    /// Starts a fresh round and draws the first prompt.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Question> {
        self.started = true;
        self.answered.clear();
        self.points = 0;
        self.streak = 0;
        self.current = None;
        info!(tier = %self.tier, "icebreaker game started");
        self.next_question(rng)
    }

    fn unanswered(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| !self.answered.iter().any(|a| a.question == q.text))
            .collect()
    }

    /// Draws a random unanswered prompt, or clears the current one when none remain.
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Question> {
        let next = self.unanswered().choose(rng).map(|q| (*q).clone());
        self.current = next;
        self.current.as_ref()
    }

    /// Drops the current prompt without answering and draws another.
    ///
    /// The skipped prompt may come up again.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::GameNotStarted` before `start`.
    pub fn skip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<&Question>, ValidationError> {
        if !self.started {
            return Err(ValidationError::GameNotStarted);
        }
        Ok(self.next_question(rng))
    }

    /// Submits an answer to the current prompt, scores it and draws the next prompt.
    ///
    /// # Errors
    ///
    /// Returns `GameNotStarted`, `NoActiveQuestion`, or `BlankField` for an
    /// empty answer. Score and streak are unchanged on error.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        answer: &str,
        judge: &mut dyn Judge,
        rng: &mut R,
    ) -> Result<AnswerFeedback, ValidationError> {
        if !self.started {
            return Err(ValidationError::GameNotStarted);
        }
        let question = self.current.clone().ok_or(ValidationError::NoActiveQuestion)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::blank("answer"));
        }

        let positive = judge.judge(&question, answer);
        let delta = if positive {
            let reward = self.tier.icebreaker_reward();
            self.points = self.points.saturating_add(reward);
            self.streak += 1;
            i64::from(reward)
        } else {
            let removed = self.points.min(self.penalty);
            self.points -= removed;
            self.streak = 0;
            -i64::from(removed)
        };

        debug!(question_id = question.id, positive, delta, points = self.points, "icebreaker answer judged");
        self.answered.push(JudgedAnswer {
            question: question.text,
            answer: answer.to_string(),
            positive,
        });
        self.next_question(rng);

        Ok(AnswerFeedback {
            positive,
            delta,
            points: self.points,
            streak: self.streak,
        })
    }

    /// Replaces the text of an earlier answer. Its verdict is kept.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` or `BlankField`.
    pub fn edit_answer(&mut self, index: usize, answer: &str) -> Result<(), ValidationError> {
        let len = self.answered.len();
        let entry = self
            .answered
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfBounds { index, len })?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::blank("answer"));
        }
        entry.answer = answer.to_string();
        Ok(())
    }

    /// Returns to the idle state, clearing answers, points and streak.
    pub fn reset(&mut self) {
        self.started = false;
        self.current = None;
        self.answered.clear();
        self.points = 0;
        self.streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn started(tier: Tier) -> (IcebreakerGame, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = IcebreakerGame::new(tier);
        assert!(game.start(&mut rng).is_some());
        (game, rng)
    }

    #[test]
    fn test_positive_answer_adds_tier_reward() {
        let (mut free, mut rng) = started(Tier::Free);
        let mut judge = ScriptedJudge::new(vec![true]);
        let fb = free.submit("da Vinci", &mut judge, &mut rng).unwrap();
        assert_eq!(fb.delta, 10);
        assert_eq!(free.points(), 10);
        assert_eq!(free.streak(), 1);

        let (mut paid, mut rng) = started(Tier::Premium);
        paid.submit("da Vinci", &mut judge, &mut rng).unwrap();
        assert_eq!(paid.points(), 20);
    }

    #[test]
    fn test_negative_answer_floors_at_zero_and_resets_streak() {
        let (mut game, mut rng) = started(Tier::Basic);
        let mut judge = ScriptedJudge::new(vec![true, true, false, false, false]);

        game.submit("a", &mut judge, &mut rng).unwrap();
        game.submit("b", &mut judge, &mut rng).unwrap();
        assert_eq!((game.points(), game.streak()), (40, 2));

        let fb = game.submit("c", &mut judge, &mut rng).unwrap();
        assert_eq!((fb.points, fb.streak, fb.delta), (20, 0, -20));

        game.submit("d", &mut judge, &mut rng).unwrap();
        let fb = game.submit("e", &mut judge, &mut rng).unwrap();
        assert_eq!(fb.points, 0);
        assert_eq!(fb.delta, 0);
    }

    #[test]
    fn test_streak_survives_positive_answers_only() {
        let (mut game, mut rng) = started(Tier::Free);
        let mut judge = ScriptedJudge::new(vec![false, true, true]);
        game.submit("a", &mut judge, &mut rng).unwrap();
        assert_eq!(game.streak(), 0);
        game.submit("b", &mut judge, &mut rng).unwrap();
        game.submit("c", &mut judge, &mut rng).unwrap();
        assert_eq!(game.streak(), 2);
    }

    #[test]
    fn test_blank_answer_changes_nothing() {
        let (mut game, mut rng) = started(Tier::Free);
        let before = game.clone();
        let mut judge = ScriptedJudge::new(vec![true]);
        assert_eq!(
            game.submit("   ", &mut judge, &mut rng),
            Err(ValidationError::blank("answer"))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_submit_requires_started_game() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = IcebreakerGame::new(Tier::Free);
        let mut judge = ScriptedJudge::new(vec![true]);
        assert_eq!(
            game.submit("hi", &mut judge, &mut rng),
            Err(ValidationError::GameNotStarted)
        );
    }

    #[test]
    fn test_questions_are_not_repeated_until_exhausted() {
        let (mut game, mut rng) = started(Tier::Elite);
        let mut judge = ScriptedJudge::new(vec![true]);
        for _ in 0..10 {
            game.submit("answer", &mut judge, &mut rng).unwrap();
        }
        assert!(game.is_exhausted());
        assert!(game.current_question().is_none());

        let mut texts: Vec<&str> = game.answered().iter().map(|a| a.question.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), 10);

        assert_eq!(
            game.submit("more", &mut judge, &mut rng),
            Err(ValidationError::NoActiveQuestion)
        );
    }

    #[test]
    fn test_edit_and_reset() {
        let (mut game, mut rng) = started(Tier::Free);
        let mut judge = ScriptedJudge::new(vec![true]);
        game.submit("first", &mut judge, &mut rng).unwrap();

        game.edit_answer(0, "revised").unwrap();
        assert_eq!(game.answered()[0].answer, "revised");
        assert!(matches!(
            game.edit_answer(3, "x"),
            Err(ValidationError::IndexOutOfBounds { index: 3, len: 1 })
        ));

        game.reset();
        assert!(!game.is_started());
        assert_eq!(game.points(), 0);
        assert!(game.answered().is_empty());
    }

    #[test]
    fn test_random_judge_is_mostly_positive() {
        let mut judge = RandomJudge::new(StdRng::seed_from_u64(9));
        let question = question_catalog().remove(0);
        let positives = (0..1000).filter(|_| judge.judge(&question, "x")).count();
        assert!((600..800).contains(&positives));
    }
}
