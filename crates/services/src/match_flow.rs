use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use lesson_core::match_game::{
    COMPLETION_DELAY_MS, MISMATCH_COOLDOWN_MS, MatchBoard, MatchConfigError, SelectOutcome, Side,
};
use lesson_core::model::MatchPair;

/// Async host for one matching question's board.
///
/// The board itself is purely event-driven; this driver supplies its two
/// timer events. A mismatch schedules the cool-down resolution, and the
/// final match schedules the completion confirmation, after which `true` is
/// sent on the completion channel exactly once. Handles carry the board
/// generation, so timers that outlive a `reset` die silently instead of
/// clearing fresh question state.
pub struct MatchFlow {
    board: Arc<Mutex<MatchBoard>>,
    cooldown: Duration,
    completion_delay: Duration,
    completion_tx: mpsc::UnboundedSender<bool>,
}

impl MatchFlow {
    /// Builds a flow for the given pairs.
    ///
    /// Returns the flow and the channel on which completion is signalled.
    ///
    /// # Errors
    ///
    /// Returns `MatchConfigError::NoPairs` for an empty pair list.
    pub fn new(
        pairs: &[MatchPair],
    ) -> Result<(Self, mpsc::UnboundedReceiver<bool>), MatchConfigError> {
        let board = MatchBoard::new(pairs)?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok((
            Self {
                board: Arc::new(Mutex::new(board)),
                cooldown: Duration::from_millis(MISMATCH_COOLDOWN_MS),
                completion_delay: Duration::from_millis(COMPLETION_DELAY_MS),
                completion_tx: tx,
            },
            rx,
        ))
    }

    /// Overrides both delays, mainly to keep tests fast.
    #[must_use]
    pub fn with_delays(mut self, cooldown: Duration, completion_delay: Duration) -> Self {
        self.cooldown = cooldown;
        self.completion_delay = completion_delay;
        self
    }

    /// Delivers a click and schedules any timer the outcome requires.
    pub fn select(&self, side: Side, index: usize) -> SelectOutcome {
        let outcome = {
            let Ok(mut board) = self.board.lock() else {
                return SelectOutcome::Ignored;
            };
            board.select(side, index)
        };

        match outcome {
            SelectOutcome::Mismatch(handle) => {
                let board = Arc::clone(&self.board);
                let delay = self.cooldown;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Ok(mut board) = board.lock() {
                        board.resolve_cooldown(handle);
                    }
                });
            }
            SelectOutcome::Matched {
                completion: Some(handle),
            } => {
                let board = Arc::clone(&self.board);
                let tx = self.completion_tx.clone();
                let delay = self.completion_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let confirmed = match board.lock() {
                        Ok(mut board) => board.confirm_completion(handle),
                        Err(_) => false,
                    };
                    if confirmed && tx.send(true).is_err() {
                        warn!("match completion receiver dropped");
                    }
                });
            }
            _ => {}
        }
        outcome
    }

    /// Installs fresh pairs, invalidating all pending timers.
    ///
    /// # Errors
    ///
    /// Returns `MatchConfigError::NoPairs` for an empty pair list.
    pub fn reset(&self, pairs: &[MatchPair]) -> Result<(), MatchConfigError> {
        let Ok(mut board) = self.board.lock() else {
            return Ok(());
        };
        board.reset(pairs, &mut rand::rng())
    }

    /// Reads the board state, e.g. for rendering.
    pub fn with_board<R>(&self, f: impl FnOnce(&MatchBoard) -> R) -> Option<R> {
        self.board.lock().ok().map(|board| f(&board))
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.with_board(MatchBoard::is_solved).unwrap_or(false)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
