//! The move-selection surface consumed by front ends.
//!
//! An `AiPlayer` bundles the opening book, the searcher, and its RNG behind
//! the three calls a GUI, CLI, or test harness needs: a fixed-depth search,
//! a time-budgeted iterative search, and a book lookup.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game_state::chess_types::GameState;
use crate::move_generation::legal_move_generator::MoveGenResult;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, TaperedScorer};
use crate::search::iterative_deepening::{
    Searcher, DEFAULT_MAX_DEPTH, DEFAULT_TIME_LIMIT_MS,
};
use crate::tables::opening_book::{BookError, OpeningBook};

pub struct AiPlayer<S: BoardScorer> {
    searcher: Searcher<S>,
    book: Option<OpeningBook>,
    rng: StdRng,
}

impl AiPlayer<TaperedScorer> {
    /// Engine with the full evaluator and no opening book.
    pub fn new() -> Self {
        Self::with_scorer(TaperedScorer)
    }

    /// Engine with the full evaluator and a book loaded from `path`.
    ///
    /// A missing book file fails construction; callers that can run without
    /// a book should use [`AiPlayer::new`] and attach one when available.
    pub fn with_book_file(path: &str) -> Result<Self, BookError> {
        let book = OpeningBook::from_file(path)?;
        let mut player = Self::new();
        player.attach_book(book);
        Ok(player)
    }
}

impl Default for AiPlayer<TaperedScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> AiPlayer<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            searcher: Searcher::new(scorer),
            book: None,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn attach_book(&mut self, book: OpeningBook) {
        self.book = Some(book);
    }

    /// Weighted-random book continuation for the position, if known.
    pub fn find_book_move(&mut self, game_state: &GameState) -> Option<Move> {
        self.book.as_ref()?.book_move(game_state, &mut self.rng)
    }

    /// Fixed-depth search; `None` when the position has no legal moves.
    pub fn find_best_move(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
    ) -> MoveGenResult<Option<Move>> {
        self.searcher.find_best_move(game_state, depth)
    }

    /// Time-budgeted iterative deepening search.
    pub fn find_best_move_iterative(
        &mut self,
        game_state: &mut GameState,
        time_limit_ms: u64,
        max_depth: u8,
    ) -> MoveGenResult<Option<Move>> {
        Ok(self
            .searcher
            .find_best_move_iterative(game_state, time_limit_ms, max_depth)?
            .best_move)
    }

    /// Book move when available, otherwise the default iterative search.
    pub fn choose_move(&mut self, game_state: &mut GameState) -> MoveGenResult<Option<Move>> {
        if let Some(book_move) = self.find_book_move(game_state) {
            return Ok(Some(book_move));
        }
        self.find_best_move_iterative(game_state, DEFAULT_TIME_LIMIT_MS, DEFAULT_MAX_DEPTH)
    }
}
