use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{
    Answer, AttemptRecord, LearnerId, Module, Question, QuestionBody, SessionSummary,
};
use crate::timing::QuestionTimer;

/// Points awarded per correctly answered question.
pub const REWARD_PER_QUESTION: u32 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("module has no questions")]
    EmptyModule,
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A question is current and awaiting an answer.
    Active,
    /// The current question has an answer; waiting for advance.
    Answered,
    /// All questions are done; the summary is available.
    Summarized,
}

/// What `advance` moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion,
    Summary,
}

/// Aggregated view of session progress, useful for a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's attempt at one module, from load to summary or restart.
///
/// Steps through the module's questions sequentially, keeping only running
/// aggregates (score and consecutive-correct streak). Duplicate UI events
/// (double submit, premature advance) are defensive no-ops, never errors.
pub struct LearningSession {
    module: Module,
    learner: Option<LearnerId>,
    current: usize,
    score: u32,
    streak: u32,
    phase: SessionPhase,
    last_correct: Option<bool>,
    timer: QuestionTimer,
}

impl LearningSession {
    /// Starts a session at question 0 and begins timing it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyModule` if the module has no questions.
    pub fn start(
        module: Module,
        learner: Option<LearnerId>,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if module.total_questions() == 0 {
            return Err(SessionError::EmptyModule);
        }

        Ok(Self {
            module,
            learner,
            current: 0,
            score: 0,
            streak: 0,
            phase: SessionPhase::Active,
            last_correct: None,
            timer: QuestionTimer::start(now),
        })
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    #[must_use]
    pub fn learner(&self) -> Option<LearnerId> {
        self.learner
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Consecutive correct answers since the last miss or session start.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Correctness of the most recent answer, for per-question feedback.
    #[must_use]
    pub fn last_correct(&self) -> Option<bool> {
        self.last_correct
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Summarized => None,
            _ => self.module.question(self.current),
        }
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.module.total_questions();
        let answered = match self.phase {
            SessionPhase::Active => self.current,
            SessionPhase::Answered => self.current + 1,
            SessionPhase::Summarized => total,
        };
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.phase == SessionPhase::Summarized,
        }
    }

    /// Records the learner's first interaction with the current question.
    ///
    /// Hosts forward pointer/touch/keyboard events here; only the first one
    /// per question affects the hesitation measurement.
    pub fn mark_interaction(&mut self, now: DateTime<Utc>) {
        if self.phase == SessionPhase::Active {
            self.timer.mark_interaction(now);
        }
    }

    /// Evaluates an answer to the current question.
    ///
    /// Returns the attempt record for telemetry, or `None` when the call is
    /// a duplicate (already answered) or the session is summarized. Choice
    /// answers are compared to the correct option by exact string equality;
    /// matching questions receive the board's completion signal as a bool.
    /// Correct answers add the fixed reward and extend the streak; incorrect
    /// ones reset the streak and leave the score unchanged.
    pub fn submit_answer(&mut self, answer: &Answer, now: DateTime<Utc>) -> Option<AttemptRecord> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let question = self.module.question(self.current)?;

        // Answering counts as interacting when nothing was recorded earlier,
        // which makes hesitation collapse to the full response duration.
        self.timer.mark_interaction(now);

        let is_correct = match (question.body(), answer) {
            (QuestionBody::Choice { correct_answer, .. }, Answer::Option(value)) => {
                value == correct_answer
            }
            (QuestionBody::Matching { .. }, Answer::MatchOutcome(solved)) => *solved,
            // Answer shape does not fit the question: treat as incorrect.
            _ => false,
        };

        let record = AttemptRecord {
            module_id: self.module.id(),
            question_id: question.id(),
            question_kind: question.kind(),
            difficulty: self.module.difficulty(),
            is_correct,
            response_time: self.timer.elapsed(now),
            hesitation: self.timer.hesitation(now),
        };

        if is_correct {
            self.score = self.score.saturating_add(REWARD_PER_QUESTION);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
        self.last_correct = Some(is_correct);
        self.phase = SessionPhase::Answered;

        Some(record)
    }

    /// Moves past an answered question.
    ///
    /// Returns `None` (no-op) unless the current question has been answered.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Option<AdvanceOutcome> {
        if self.phase != SessionPhase::Answered {
            return None;
        }

        self.last_correct = None;
        if self.current + 1 < self.module.total_questions() {
            self.current += 1;
            self.timer.restart(now);
            self.phase = SessionPhase::Active;
            Some(AdvanceOutcome::NextQuestion)
        } else {
            self.phase = SessionPhase::Summarized;
            Some(AdvanceOutcome::Summary)
        }
    }

    /// Starts the module over from question 0 with score and streak reset.
    ///
    /// Valid only from the summary screen; otherwise a no-op. The restarted
    /// session is indistinguishable from a freshly loaded one.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        if self.phase != SessionPhase::Summarized {
            return;
        }
        self.current = 0;
        self.score = 0;
        self.streak = 0;
        self.last_correct = None;
        self.timer.restart(now);
        self.phase = SessionPhase::Active;
    }

    /// The final summary, available once all questions are answered.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Summarized {
            return None;
        }
        Some(SessionSummary::new(
            self.score,
            self.module.total_questions(),
            REWARD_PER_QUESTION,
            self.learner.is_some(),
        ))
    }
}

impl fmt::Debug for LearningSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LearningSession")
            .field("module_id", &self.module.id())
            .field("learner", &self.learner)
            .field("current", &self.current)
            .field("score", &self.score)
            .field("streak", &self.streak)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DifficultyLevel, MatchPair, ModuleCategory, ModuleId, QuestionId, QuestionKind, Rating,
    };
    use crate::time::fixed_now;
    use chrono::Duration;

    fn choice(correct: &str, other: &str) -> Question {
        Question::choice(
            QuestionId::new(),
            "Pick the right one",
            vec![correct.to_string(), other.to_string()],
            correct,
            None,
        )
        .unwrap()
    }

    fn matching() -> Question {
        Question::matching(
            QuestionId::new(),
            "Match numbers to words",
            vec![MatchPair::new("1", "one"), MatchPair::new("2", "two")],
            None,
        )
        .unwrap()
    }

    fn module(questions: Vec<Question>) -> Module {
        Module::new(
            ModuleId::new(),
            "Numbers",
            "Counting practice",
            ModuleCategory::Counting,
            DifficultyLevel::new(3).unwrap(),
            5,
            questions,
        )
        .unwrap()
    }

    fn start(questions: Vec<Question>) -> LearningSession {
        LearningSession::start(module(questions), Some(LearnerId::new()), fixed_now()).unwrap()
    }

    #[test]
    fn empty_module_cannot_start() {
        let err = LearningSession::start(module(Vec::new()), None, fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::EmptyModule));
    }

    #[test]
    fn full_correct_run_accumulates_score_and_streak() {
        let n = 4;
        let mut session = start((0..n).map(|_| choice("A", "B")).collect());

        for _ in 0..n {
            let record = session
                .submit_answer(&Answer::option("A"), fixed_now())
                .unwrap();
            assert!(record.is_correct);
            session.advance(fixed_now()).unwrap();
        }

        assert_eq!(session.phase(), SessionPhase::Summarized);
        assert_eq!(session.score(), n as u32 * REWARD_PER_QUESTION);
        assert_eq!(session.streak(), n as u32);
        let summary = session.summary().unwrap();
        assert_eq!(summary.percentage(), 100);
        assert_eq!(summary.rating(), Rating::ThreeStars);
    }

    #[test]
    fn incorrect_answer_resets_streak_but_not_score() {
        let mut session = start(vec![choice("A", "B"), choice("A", "B"), choice("A", "B")]);

        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        assert_eq!(session.streak(), 2);

        let record = session
            .submit_answer(&Answer::option("B"), fixed_now())
            .unwrap();
        assert!(!record.is_correct);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.score(), 2 * REWARD_PER_QUESTION);
    }

    #[test]
    fn double_submit_is_a_no_op() {
        let mut session = start(vec![choice("A", "B")]);

        assert!(
            session
                .submit_answer(&Answer::option("A"), fixed_now())
                .is_some()
        );
        let score = session.score();
        let streak = session.streak();

        assert!(
            session
                .submit_answer(&Answer::option("A"), fixed_now())
                .is_none()
        );
        assert_eq!(session.score(), score);
        assert_eq!(session.streak(), streak);
    }

    #[test]
    fn advance_before_answer_is_a_no_op() {
        let mut session = start(vec![choice("A", "B")]);
        assert!(session.advance(fixed_now()).is_none());
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn wrong_single_answer_lands_in_keep_trying_tier() {
        let mut session = start(vec![choice("A", "B")]);

        let record = session
            .submit_answer(&Answer::option("B"), fixed_now())
            .unwrap();
        assert!(!record.is_correct);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.score(), 0);

        assert_eq!(session.advance(fixed_now()), Some(AdvanceOutcome::Summary));
        let summary = session.summary().unwrap();
        assert_eq!(summary.rating(), Rating::KeepTrying);
        assert_eq!(summary.rating().message(), "Let's try again! You can do it!");
    }

    #[test]
    fn matching_answer_forwards_board_outcome() {
        let mut session = start(vec![matching()]);

        let record = session
            .submit_answer(&Answer::MatchOutcome(true), fixed_now())
            .unwrap();
        assert!(record.is_correct);
        assert_eq!(record.question_kind, QuestionKind::Matching);
        assert_eq!(session.score(), REWARD_PER_QUESTION);
    }

    #[test]
    fn mismatched_answer_shape_counts_as_incorrect() {
        let mut session = start(vec![matching()]);
        let record = session
            .submit_answer(&Answer::option("matched"), fixed_now())
            .unwrap();
        assert!(!record.is_correct);
    }

    #[test]
    fn attempt_record_carries_timing() {
        let mut session = start(vec![choice("A", "B")]);
        session.mark_interaction(fixed_now() + Duration::seconds(2));

        let record = session
            .submit_answer(&Answer::option("A"), fixed_now() + Duration::seconds(6))
            .unwrap();
        assert_eq!(record.response_time, Duration::seconds(6));
        assert_eq!(record.hesitation, Duration::seconds(2));
        assert_eq!(record.difficulty.value(), 3);
    }

    #[test]
    fn unseen_question_hesitation_equals_response_time() {
        let mut session = start(vec![choice("A", "B")]);
        let record = session
            .submit_answer(&Answer::option("A"), fixed_now() + Duration::seconds(5))
            .unwrap();
        assert_eq!(record.hesitation, record.response_time);
    }

    #[test]
    fn timer_restarts_on_advance() {
        let mut session = start(vec![choice("A", "B"), choice("A", "B")]);

        session
            .submit_answer(&Answer::option("A"), fixed_now() + Duration::seconds(8))
            .unwrap();
        session.advance(fixed_now() + Duration::seconds(10)).unwrap();

        let record = session
            .submit_answer(&Answer::option("A"), fixed_now() + Duration::seconds(13))
            .unwrap();
        assert_eq!(record.response_time, Duration::seconds(3));
    }

    #[test]
    fn restart_matches_fresh_session() {
        let mut session = start(vec![choice("A", "B"), choice("A", "B")]);
        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        session.submit_answer(&Answer::option("B"), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        assert_eq!(session.phase(), SessionPhase::Summarized);

        session.restart(fixed_now());
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);
        assert!(session.last_correct().is_none());
        assert_eq!(session.progress().answered, 0);
    }

    #[test]
    fn restart_outside_summary_is_a_no_op() {
        let mut session = start(vec![choice("A", "B")]);
        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();

        session.restart(fixed_now());
        assert_eq!(session.phase(), SessionPhase::Answered);
        assert_eq!(session.score(), REWARD_PER_QUESTION);
    }

    #[test]
    fn summary_flags_unsaved_progress_without_learner() {
        let mut session =
            LearningSession::start(module(vec![choice("A", "B")]), None, fixed_now()).unwrap();
        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();

        assert!(!session.summary().unwrap().progress_saved());
    }

    #[test]
    fn progress_view_tracks_phases() {
        let mut session = start(vec![choice("A", "B"), choice("A", "B")]);
        assert_eq!(session.progress().answered, 0);
        assert_eq!(session.progress().remaining, 2);

        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();
        assert_eq!(session.progress().answered, 1);

        session.advance(fixed_now()).unwrap();
        session.submit_answer(&Answer::option("A"), fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        let progress = session.progress();
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.remaining, 0);
        assert!(progress.is_complete);
    }
}
