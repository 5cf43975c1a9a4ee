//
// ─── RATING ────────────────────────────────────────────────────────────────────
//

/// Qualitative tier shown on the summary screen.
///
/// Derived from the percentage of the maximum possible score. Thresholds are
/// display policy, not computed from difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    ThreeStars,
    TwoStars,
    OneStar,
    KeepTrying,
}

impl Rating {
    pub const THREE_STAR_PERCENT: u32 = 90;
    pub const TWO_STAR_PERCENT: u32 = 70;
    pub const ONE_STAR_PERCENT: u32 = 50;

    /// Maps a score percentage (0..=100) to its tier.
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= Self::THREE_STAR_PERCENT {
            Rating::ThreeStars
        } else if percentage >= Self::TWO_STAR_PERCENT {
            Rating::TwoStars
        } else if percentage >= Self::ONE_STAR_PERCENT {
            Rating::OneStar
        } else {
            Rating::KeepTrying
        }
    }

    /// Star glyphs for the result screen.
    #[must_use]
    pub fn stars(self) -> &'static str {
        match self {
            Rating::ThreeStars => "***",
            Rating::TwoStars => "**",
            Rating::OneStar => "*",
            Rating::KeepTrying => "",
        }
    }

    /// Encouragement line for the result screen.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Rating::ThreeStars => "Amazing! You are a superstar!",
            Rating::TwoStars => "Great job! Keep practicing!",
            Rating::OneStar => "Nice effort! You are getting there!",
            Rating::KeepTrying => "Let's try again! You can do it!",
        }
    }
}

//
// ─── SESSION SUMMARY ───────────────────────────────────────────────────────────
//

/// Final view of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    score: u32,
    max_score: u32,
    total_questions: usize,
    percentage: u32,
    rating: Rating,
    progress_saved: bool,
}

impl SessionSummary {
    /// Builds a summary from the session's running aggregates.
    ///
    /// `progress_saved` is false only when no learner identity was supplied
    /// for the session; transient telemetry failures do not clear it.
    #[must_use]
    pub fn new(score: u32, total_questions: usize, reward_per_question: u32, progress_saved: bool) -> Self {
        let max_score =
            u32::try_from(total_questions).unwrap_or(u32::MAX).saturating_mul(reward_per_question);
        let percentage = if max_score == 0 {
            0
        } else {
            score.saturating_mul(100) / max_score
        };

        Self {
            score,
            max_score,
            total_questions,
            percentage,
            rating: Rating::from_percentage(percentage),
            progress_saved,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn progress_saved(&self) -> bool {
        self.progress_saved
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
