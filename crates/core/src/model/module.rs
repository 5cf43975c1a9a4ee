use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::ModuleId;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("difficulty level must be between {min} and {max}, got {got}")]
    InvalidDifficulty { min: u8, max: u8, got: u8 },

    #[error("unknown module category: {0}")]
    UnknownCategory(String),
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Learning domain a module belongs to.
///
/// The content service exposes a fixed set of module types; anything else
/// is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCategory {
    Reading,
    Counting,
    Cognitive,
}

impl ModuleCategory {
    /// Wire name used by the content service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleCategory::Reading => "reading",
            ModuleCategory::Counting => "counting",
            ModuleCategory::Cognitive => "cognitive",
        }
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleCategory {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading" => Ok(ModuleCategory::Reading),
            "counting" => Ok(ModuleCategory::Counting),
            "cognitive" => Ok(ModuleCategory::Cognitive),
            other => Err(ModuleError::UnknownCategory(other.to_string())),
        }
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Bounded ordinal difficulty, 1 (easiest) through 10 (hardest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a difficulty level, rejecting values outside 1..=10.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::InvalidDifficulty` when out of range.
    pub fn new(level: u8) -> Result<Self, ModuleError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ModuleError::InvalidDifficulty {
                min: Self::MIN,
                max: Self::MAX,
                got: level,
            })
        }
    }

    /// Returns the underlying ordinal value
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// A learning module: an ordered sequence of questions plus display metadata.
///
/// Immutable once loaded into a session; the session tracks its own position
/// and never mutates the module.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    id: ModuleId,
    title: String,
    description: String,
    category: ModuleCategory,
    difficulty: DifficultyLevel,
    estimated_duration_minutes: u32,
    questions: Vec<Question>,
}

impl Module {
    /// Creates a module.
    ///
    /// An empty question list is allowed here; starting a session on an
    /// empty module is what fails (see `LearningSession::start`).
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::EmptyTitle` if the title is blank.
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: ModuleCategory,
        difficulty: DifficultyLevel,
        estimated_duration_minutes: u32,
        questions: Vec<Question>,
    ) -> Result<Self, ModuleError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModuleError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            category,
            difficulty,
            estimated_duration_minutes,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> ModuleCategory {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    #[must_use]
    pub fn estimated_duration_minutes(&self) -> u32 {
        self.estimated_duration_minutes
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Total number of questions in this module.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
