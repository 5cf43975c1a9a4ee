use chrono::{DateTime, Duration, Utc};

/// Per-question response timer.
///
/// Tracks two instants for the current question: when it became visible and
/// when the learner first touched it. Hesitation is the gap between the two;
/// if the question is answered without any recorded interaction, hesitation
/// collapses to the full response duration by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    started_at: DateTime<Utc>,
    first_interaction_at: Option<DateTime<Utc>>,
}

impl QuestionTimer {
    /// Starts timing a question that just became current.
    #[must_use]
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            first_interaction_at: None,
        }
    }

    /// Rebaselines for the next question and clears the interaction mark.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        *self = Self::start(now);
    }

    /// Records the learner's first interaction with the question.
    ///
    /// Only the first call has an effect; duplicate UI events are ignored.
    pub fn mark_interaction(&mut self, now: DateTime<Utc>) {
        if self.first_interaction_at.is_none() {
            self.first_interaction_at = Some(now);
        }
    }

    #[must_use]
    pub fn has_interacted(&self) -> bool {
        self.first_interaction_at.is_some()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the question became current, clamped >= 0 against clock skew.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    /// Time to first interaction, clamped to `[0, elapsed]`.
    ///
    /// With no interaction recorded this equals `elapsed(now)`.
    #[must_use]
    pub fn hesitation(&self, now: DateTime<Utc>) -> Duration {
        let elapsed = self.elapsed(now);
        match self.first_interaction_at {
            Some(first) => (first - self.started_at)
                .max(Duration::zero())
                .min(elapsed),
            None => elapsed,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
