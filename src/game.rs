//! Headless game session: placement, movement, status and undo/redo.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::{
    Board, BoardConfig, BoardSnapshot, CollisionReport, Direction, GameStatus, History, PieceId,
    PlayError, Pos, SnapshotError,
};

/// What one call to [`Game::play`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The piece just placed. It may have been removed again by a collision.
    pub piece: PieceId,
    /// Pieces moved at the end of this turn.
    pub moved: bool,
    pub halfway: CollisionReport,
    pub full: CollisionReport,
    pub status: GameStatus,
}

/// A game in progress with its history.
///
/// The random source is only consulted when the configuration asks for a
/// random starting player, at creation and on [`reset`](Game::reset).
pub struct Game<R: Rng> {
    board: Board,
    history: History,
    status: GameStatus,
    config: BoardConfig,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: BoardConfig, mut rng: R) -> Game<R> {
        let board = Board::with_config(&config, &mut rng);
        let history = History::new(&board);
        Game { board, history, status: GameStatus::InProgress, config, rng }
    }

    // ========== Accessors ==========

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ========== Playing ==========

    /// Place a piece for the player to move and finish the turn.
    ///
    /// Status is checked right after placement; a finished game does not
    /// move. Otherwise pieces move if the round is complete and status is
    /// checked again. Nothing changes when the move is rejected.
    #[instrument(skip(self), fields(player = %self.board.turn()))]
    pub fn play(
        &mut self,
        row: u8,
        col: u8,
        dir_v: i8,
        dir_h: i8,
    ) -> Result<TurnOutcome, PlayError> {
        if self.status.is_over() {
            return Err(PlayError::GameOver);
        }
        let pos = Pos::try_from_row_col(row, col).ok_or(PlayError::OffGrid { row, column: col })?;
        let direction = Direction::new(dir_v, dir_h)
            .ok_or(PlayError::InvalidDirection { vertical: dir_v, horizontal: dir_h })?;
        if !self.board.space(pos).is_empty() {
            return Err(PlayError::Occupied { row, column: col });
        }

        self.board.make_piece(pos.row(), pos.col());
        let Some(piece) = self.board.new_piece(direction).map(|p| p.id()) else {
            debug_assert!(false, "placement at a validated empty cell failed");
            return Err(PlayError::Occupied { row, column: col });
        };

        // A line completed by the placement counts before anything moves.
        self.status = self.board.status();
        let moved = !self.status.is_over() && self.board.will_move();
        let (halfway, full) = if moved {
            self.board.run_movement()
        } else {
            (CollisionReport::default(), CollisionReport::default())
        };

        self.board.next_turn();
        if moved {
            self.status = self.board.status();
        }
        self.history.record(&self.board);

        if self.status.is_over() {
            info!(status = ?self.status, pieces = self.board.piece_count(), "game over");
        }
        Ok(TurnOutcome { piece, moved, halfway, full, status: self.status })
    }

    // ========== History ==========

    /// Step back one turn. Returns `false` at the start of the game.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(board) => {
                self.load(board);
                true
            }
            None => false,
        }
    }

    /// Step forward one turn. Returns `false` at the latest turn.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(board) => {
                self.load(board);
                true
            }
            None => false,
        }
    }

    /// Jump to any recorded turn. Returns `false` if `index` is out of range.
    pub fn goto(&mut self, index: usize) -> bool {
        match self.history.goto(index) {
            Some(board) => {
                self.load(board);
                true
            }
            None => false,
        }
    }

    /// Start a new game with the same configuration. A random starting
    /// player is drawn again.
    pub fn reset(&mut self) {
        let board = Board::with_config(&self.config, &mut self.rng);
        self.history.reset(&board);
        self.load(board);
    }

    /// Replace the game with a restored position. History restarts from it.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) -> Result<(), SnapshotError> {
        let board = Board::restore(snapshot)?;
        self.history.reset(&board);
        self.load(board);
        Ok(())
    }

    fn load(&mut self, board: Board) {
        self.board = board;
        self.status = self.board.status();
        debug!(index = self.history.index(), status = ?self.status, "board loaded");
    }
}
