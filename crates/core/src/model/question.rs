use std::fmt;
use thiserror::Error;
use url::Url;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("choice question needs at least 2 options, got {0}")]
    TooFewOptions(usize),

    #[error("correct answer is not among the options: {0}")]
    CorrectAnswerMissing(String),

    #[error("matching question needs at least 1 pair")]
    NoPairs,
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// The two question types the session engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Choice,
    Matching,
}

impl QuestionKind {
    /// Wire name reported to the analytics service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Choice => "multiple_choice",
            QuestionKind::Matching => "matching",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── MATCH PAIR ────────────────────────────────────────────────────────────────
//

/// One left/right pair of a matching question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

impl MatchPair {
    #[must_use]
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Kind-specific payload. Exactly one shape exists per question, so the
/// "options xor pairs" invariant holds by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionBody {
    Choice {
        options: Vec<String>,
        correct_answer: String,
    },
    Matching {
        pairs: Vec<MatchPair>,
    },
}

/// A single question within a module.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    body: QuestionBody,
    media: Option<Url>,
    hints: Vec<String>,
}

impl Question {
    /// Creates a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two
    /// options are given, or the correct answer is not one of the options.
    pub fn choice(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        media: Option<Url>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        let correct_answer = correct_answer.into();
        if !options.iter().any(|o| *o == correct_answer) {
            return Err(QuestionError::CorrectAnswerMissing(correct_answer));
        }

        Ok(Self {
            id,
            prompt,
            body: QuestionBody::Choice {
                options,
                correct_answer,
            },
            media,
            hints: Vec::new(),
        })
    }

    /// Creates a pair-matching question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank or the pair list is empty.
    pub fn matching(
        id: QuestionId,
        prompt: impl Into<String>,
        pairs: Vec<MatchPair>,
        media: Option<Url>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if pairs.is_empty() {
            return Err(QuestionError::NoPairs);
        }

        Ok(Self {
            id,
            prompt,
            body: QuestionBody::Matching { pairs },
            media,
            hints: Vec::new(),
        })
    }

    /// Attach hint texts shown to the learner on request.
    #[must_use]
    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    #[must_use]
    pub fn media(&self) -> Option<&Url> {
        self.media.as_ref()
    }

    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self.body {
            QuestionBody::Choice { .. } => QuestionKind::Choice,
            QuestionBody::Matching { .. } => QuestionKind::Matching,
        }
    }

    /// Pairs of a matching question, `None` for choice questions.
    #[must_use]
    pub fn matching_pairs(&self) -> Option<&[MatchPair]> {
        match &self.body {
            QuestionBody::Matching { pairs } => Some(pairs),
            QuestionBody::Choice { .. } => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
