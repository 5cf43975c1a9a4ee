use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::MatchPair;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchConfigError {
    #[error("match board needs at least 1 pair")]
    NoPairs,
}

//
// ─── ITEMS ─────────────────────────────────────────────────────────────────────
//

/// Which column an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Render state of a single board item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemVisibility {
    Idle,
    Selected,
    Matched,
}

/// One clickable tile on the board.
///
/// `pair_index` is the originating pair's position in the question's pair
/// list; matches are decided by it, never by display text, so duplicate
/// texts across pairs behave correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardItem {
    pair_index: usize,
    text: String,
    matched: bool,
}

impl BoardItem {
    #[must_use]
    pub fn pair_index(&self) -> usize {
        self.pair_index
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

//
// ─── TIMER HANDLES ─────────────────────────────────────────────────────────────
//

/// Token for the pending mismatch cool-down.
///
/// Carries the board generation at issue time; a reset invalidates it, so a
/// late timer callback can never clear selections on new question state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownHandle {
    generation: u64,
}

/// Token for the pending completion display delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionHandle {
    generation: u64,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of a single click delivered to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Click on a matched item, during cool-down, or after solve.
    Ignored,
    Selected,
    Deselected,
    /// Both selections named the same pair. When this was the final pair,
    /// `completion` holds the handle the host confirms after the display
    /// delay.
    Matched { completion: Option<CompletionHandle> },
    /// Selections named different pairs; they stay held (with the wrong
    /// flash) until the host resolves the cool-down.
    Mismatch(CooldownHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoardPhase {
    Active,
    Cooldown,
    Solved,
}

//
// ─── BOARD ─────────────────────────────────────────────────────────────────────
//

/// Self-contained state machine for one pair-matching question.
///
/// Purely event-driven: clicks arrive via [`MatchBoard::select`]; the two
/// timer-driven transitions (mismatch cool-down, completion display delay)
/// are delivered by the host through the issued handles. All transitions are
/// synchronous, which keeps the machine fully deterministic under test.
#[derive(Debug, Clone)]
pub struct MatchBoard {
    left: Vec<BoardItem>,
    right: Vec<BoardItem>,
    selected_left: Option<usize>,
    selected_right: Option<usize>,
    phase: BoardPhase,
    generation: u64,
    completion_fired: bool,
}

/// Mismatch cool-down before held selections clear, in milliseconds.
pub const MISMATCH_COOLDOWN_MS: u64 = 1_000;

/// Delay between the final match and the completion signal, so the last
/// pair is visibly rendered before control returns to the host.
pub const COMPLETION_DELAY_MS: u64 = 500;

impl MatchBoard {
    /// Builds a board from the question's pairs, shuffling the right column.
    ///
    /// # Errors
    ///
    /// Returns `MatchConfigError::NoPairs` for an empty pair list.
    pub fn new(pairs: &[MatchPair]) -> Result<Self, MatchConfigError> {
        Self::with_rng(pairs, &mut rand::rng())
    }

    /// Same as [`MatchBoard::new`] with a caller-supplied rng for
    /// deterministic shuffles in tests.
    ///
    /// # Errors
    ///
    /// Returns `MatchConfigError::NoPairs` for an empty pair list.
    pub fn with_rng<R: Rng + ?Sized>(
        pairs: &[MatchPair],
        rng: &mut R,
    ) -> Result<Self, MatchConfigError> {
        let mut board = Self {
            left: Vec::new(),
            right: Vec::new(),
            selected_left: None,
            selected_right: None,
            phase: BoardPhase::Active,
            generation: 0,
            completion_fired: false,
        };
        board.install_pairs(pairs, rng)?;
        Ok(board)
    }

    /// Replaces the pairs and restarts the board.
    ///
    /// Bumps the generation, so every outstanding cool-down or completion
    /// handle becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `MatchConfigError::NoPairs` for an empty pair list; the board
    /// is left unchanged in that case.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        pairs: &[MatchPair],
        rng: &mut R,
    ) -> Result<(), MatchConfigError> {
        self.install_pairs(pairs, rng)
    }

    fn install_pairs<R: Rng + ?Sized>(
        &mut self,
        pairs: &[MatchPair],
        rng: &mut R,
    ) -> Result<(), MatchConfigError> {
        if pairs.is_empty() {
            return Err(MatchConfigError::NoPairs);
        }

        self.left = pairs
            .iter()
            .enumerate()
            .map(|(i, p)| BoardItem {
                pair_index: i,
                text: p.left.clone(),
                matched: false,
            })
            .collect();
        self.right = pairs
            .iter()
            .enumerate()
            .map(|(i, p)| BoardItem {
                pair_index: i,
                text: p.right.clone(),
                matched: false,
            })
            .collect();
        self.right.shuffle(rng);

        self.selected_left = None;
        self.selected_right = None;
        self.phase = BoardPhase::Active;
        self.generation += 1;
        self.completion_fired = false;
        Ok(())
    }

    /// Delivers a click on the item at `index` in the given column.
    pub fn select(&mut self, side: Side, index: usize) -> SelectOutcome {
        if self.phase != BoardPhase::Active {
            return SelectOutcome::Ignored;
        }
        let Some(item) = self.items(side).get(index) else {
            return SelectOutcome::Ignored;
        };
        if item.matched {
            return SelectOutcome::Ignored;
        }

        let slot = self.selection_mut(side);
        if *slot == Some(index) {
            *slot = None;
            return SelectOutcome::Deselected;
        }
        *slot = Some(index);

        match (self.selected_left, self.selected_right) {
            (Some(l), Some(r)) => self.check_pair(l, r),
            _ => SelectOutcome::Selected,
        }
    }

    fn check_pair(&mut self, l: usize, r: usize) -> SelectOutcome {
        if self.left[l].pair_index == self.right[r].pair_index {
            self.left[l].matched = true;
            self.right[r].matched = true;
            self.selected_left = None;
            self.selected_right = None;

            if self.left.iter().all(|i| i.matched) {
                self.phase = BoardPhase::Solved;
                return SelectOutcome::Matched {
                    completion: Some(CompletionHandle {
                        generation: self.generation,
                    }),
                };
            }
            SelectOutcome::Matched { completion: None }
        } else {
            self.phase = BoardPhase::Cooldown;
            SelectOutcome::Mismatch(CooldownHandle {
                generation: self.generation,
            })
        }
    }

    /// Ends the mismatch cool-down: clears both held selections.
    ///
    /// Returns false (and does nothing) for a stale handle or when no
    /// cool-down is pending.
    pub fn resolve_cooldown(&mut self, handle: CooldownHandle) -> bool {
        if self.phase != BoardPhase::Cooldown || handle.generation != self.generation {
            return false;
        }
        self.selected_left = None;
        self.selected_right = None;
        self.phase = BoardPhase::Active;
        true
    }

    /// Confirms the completion signal after the display delay.
    ///
    /// Returns true exactly once per solved board; stale handles and
    /// repeated calls return false.
    pub fn confirm_completion(&mut self, handle: CompletionHandle) -> bool {
        if self.phase != BoardPhase::Solved
            || self.completion_fired
            || handle.generation != self.generation
        {
            return false;
        }
        self.completion_fired = true;
        true
    }

    fn items(&self, side: Side) -> &[BoardItem] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn selection_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.selected_left,
            Side::Right => &mut self.selected_right,
        }
    }

    /// Left column, in pair order.
    #[must_use]
    pub fn left_items(&self) -> &[BoardItem] {
        &self.left
    }

    /// Right column, in shuffled display order.
    #[must_use]
    pub fn right_items(&self) -> &[BoardItem] {
        &self.right
    }

    /// Render state for the item at `index` in the given column.
    #[must_use]
    pub fn visibility(&self, side: Side, index: usize) -> ItemVisibility {
        let selected = match side {
            Side::Left => self.selected_left == Some(index),
            Side::Right => self.selected_right == Some(index),
        };
        match self.items(side).get(index) {
            Some(item) if item.matched => ItemVisibility::Matched,
            Some(_) if selected => ItemVisibility::Selected,
            _ => ItemVisibility::Idle,
        }
    }

    /// True while a held selection should flash its wrong indicator.
    #[must_use]
    pub fn is_wrong_flash(&self, side: Side, index: usize) -> bool {
        self.phase == BoardPhase::Cooldown
            && match side {
                Side::Left => self.selected_left == Some(index),
                Side::Right => self.selected_right == Some(index),
            }
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.left.len()
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.left.iter().filter(|i| i.matched).count()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.phase == BoardPhase::Solved
    }

    /// True while a mismatch cool-down holds the board.
    #[must_use]
    pub fn in_cooldown(&self) -> bool {
        self.phase == BoardPhase::Cooldown
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pairs(n: usize) -> Vec<MatchPair> {
        (0..n)
            .map(|i| MatchPair::new(format!("L{i}"), format!("R{i}")))
            .collect()
    }

    fn board(n: usize, seed: u64) -> MatchBoard {
        MatchBoard::with_rng(&pairs(n), &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    /// Right-column index of the item originating from `pair_index`.
    fn right_of(board: &MatchBoard, pair_index: usize) -> usize {
        board
            .right_items()
            .iter()
            .position(|i| i.pair_index() == pair_index)
            .unwrap()
    }

    #[test]
    fn empty_pair_list_is_a_config_error() {
        let err = MatchBoard::new(&[]).unwrap_err();
        assert!(matches!(err, MatchConfigError::NoPairs));
    }

    #[test]
    fn right_column_is_a_permutation_of_pair_indices() {
        let board = board(5, 42);
        let mut indices: Vec<usize> = board.right_items().iter().map(BoardItem::pair_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn shuffle_eventually_departs_from_left_order() {
        // Probabilistic property pinned by seeds: across many seeded builds
        // at least one right column differs from the identity order.
        let departed = (0..20).any(|seed| {
            let board = board(4, seed);
            board
                .right_items()
                .iter()
                .enumerate()
                .any(|(pos, item)| item.pair_index() != pos)
        });
        assert!(departed);
    }

    #[test]
    fn matching_pair_marks_both_items() {
        let mut board = board(2, 1);
        assert_eq!(board.select(Side::Left, 0), SelectOutcome::Selected);
        let r = right_of(&board, 0);
        assert_eq!(
            board.select(Side::Right, r),
            SelectOutcome::Matched { completion: None }
        );
        assert_eq!(board.visibility(Side::Left, 0), ItemVisibility::Matched);
        assert_eq!(board.visibility(Side::Right, r), ItemVisibility::Matched);
        assert_eq!(board.matched_count(), 1);
        assert!(!board.is_solved());
    }

    #[test]
    fn mismatch_holds_selections_until_cooldown_resolves() {
        let mut board = board(2, 1);
        board.select(Side::Left, 0);
        let wrong = right_of(&board, 1);
        let outcome = board.select(Side::Right, wrong);
        let SelectOutcome::Mismatch(handle) = outcome else {
            panic!("expected mismatch, got {outcome:?}");
        };

        assert!(board.in_cooldown());
        assert!(board.is_wrong_flash(Side::Left, 0));
        assert!(board.is_wrong_flash(Side::Right, wrong));
        assert_eq!(board.matched_count(), 0);

        // Clicks during cool-down are ignored.
        assert_eq!(board.select(Side::Left, 1), SelectOutcome::Ignored);

        assert!(board.resolve_cooldown(handle));
        assert!(!board.in_cooldown());
        assert_eq!(board.visibility(Side::Left, 0), ItemVisibility::Idle);
        assert_eq!(board.visibility(Side::Right, wrong), ItemVisibility::Idle);
    }

    #[test]
    fn reclicking_selection_deselects() {
        let mut board = board(2, 1);
        assert_eq!(board.select(Side::Left, 0), SelectOutcome::Selected);
        assert_eq!(board.select(Side::Left, 0), SelectOutcome::Deselected);
        assert_eq!(board.visibility(Side::Left, 0), ItemVisibility::Idle);
    }

    #[test]
    fn switching_selection_on_same_side_replaces_it() {
        let mut board = board(3, 1);
        board.select(Side::Left, 0);
        assert_eq!(board.select(Side::Left, 1), SelectOutcome::Selected);
        assert_eq!(board.visibility(Side::Left, 0), ItemVisibility::Idle);
        assert_eq!(board.visibility(Side::Left, 1), ItemVisibility::Selected);
    }

    #[test]
    fn matched_items_are_inert() {
        let mut board = board(2, 1);
        board.select(Side::Left, 0);
        let r = right_of(&board, 0);
        board.select(Side::Right, r);

        assert_eq!(board.select(Side::Left, 0), SelectOutcome::Ignored);
        assert_eq!(board.select(Side::Right, r), SelectOutcome::Ignored);
    }

    #[test]
    fn completion_fires_exactly_once_after_all_pairs() {
        let mut board = board(2, 1);
        board.select(Side::Left, 0);
        board.select(Side::Right, right_of(&board, 0));

        board.select(Side::Left, 1);
        let outcome = board.select(Side::Right, right_of(&board, 1));
        let SelectOutcome::Matched {
            completion: Some(handle),
        } = outcome
        else {
            panic!("expected solving match, got {outcome:?}");
        };

        assert!(board.is_solved());
        assert!(board.confirm_completion(handle));
        assert!(!board.confirm_completion(handle));
    }

    #[test]
    fn clicks_after_solve_are_ignored() {
        let mut board = board(1, 1);
        board.select(Side::Left, 0);
        board.select(Side::Right, 0);
        assert!(board.is_solved());
        assert_eq!(board.select(Side::Left, 0), SelectOutcome::Ignored);
    }

    #[test]
    fn duplicate_display_text_matches_by_pair_identity() {
        let pairs = vec![MatchPair::new("cat", "animal"), MatchPair::new("dog", "animal")];
        let mut board = MatchBoard::with_rng(&pairs, &mut StdRng::seed_from_u64(3)).unwrap();

        board.select(Side::Left, 0);
        let r = right_of(&board, 0);
        assert_eq!(
            board.select(Side::Right, r),
            SelectOutcome::Matched { completion: None }
        );
        // The identically-labelled item from the other pair stays unmatched.
        let other = right_of(&board, 1);
        assert_eq!(board.visibility(Side::Right, other), ItemVisibility::Idle);
    }

    #[test]
    fn reset_invalidates_pending_cooldown() {
        let mut board = board(2, 1);
        board.select(Side::Left, 0);
        let wrong = right_of(&board, 1);
        let SelectOutcome::Mismatch(handle) = board.select(Side::Right, wrong) else {
            panic!("expected mismatch");
        };

        board.reset(&pairs(2), &mut StdRng::seed_from_u64(9)).unwrap();
        board.select(Side::Left, 0);

        // The stale timer must not clear the fresh selection.
        assert!(!board.resolve_cooldown(handle));
        assert_eq!(board.visibility(Side::Left, 0), ItemVisibility::Selected);
    }

    #[test]
    fn reset_invalidates_pending_completion() {
        let mut board = board(1, 1);
        board.select(Side::Left, 0);
        let SelectOutcome::Matched {
            completion: Some(handle),
        } = board.select(Side::Right, 0)
        else {
            panic!("expected solving match");
        };

        board.reset(&pairs(1), &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(!board.confirm_completion(handle));
        assert!(!board.is_solved());
    }

    #[test]
    fn single_selection_scenario_from_both_directions() {
        // Pairs 1/one and 2/two: picking "1" then "two" is a mismatch that
        // leaves nothing matched; "1" then "one" matches immediately.
        let pairs = vec![MatchPair::new("1", "one"), MatchPair::new("2", "two")];
        let mut board = MatchBoard::with_rng(&pairs, &mut StdRng::seed_from_u64(7)).unwrap();

        board.select(Side::Left, 0);
        let two = board
            .right_items()
            .iter()
            .position(|i| i.text() == "two")
            .unwrap();
        let SelectOutcome::Mismatch(handle) = board.select(Side::Right, two) else {
            panic!("expected mismatch");
        };
        assert!(board.resolve_cooldown(handle));
        assert_eq!(board.matched_count(), 0);

        board.select(Side::Left, 0);
        let one = board
            .right_items()
            .iter()
            .position(|i| i.text() == "one")
            .unwrap();
        assert_eq!(
            board.select(Side::Right, one),
            SelectOutcome::Matched { completion: None }
        );
        assert_eq!(board.matched_count(), 1);
    }
}
