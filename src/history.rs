//! Undo/redo log of board states.

use crate::Board;

/// Linear history of board states with a cursor.
///
/// Index 0 is the starting position. Recording after stepping back drops
/// every state past the cursor, so a new move discards the redo branch.
/// The cursor always points at a recorded state.
#[derive(Clone, Debug)]
pub struct History {
    states: Vec<Board>,
    index: usize,
}

impl History {
    /// Start a history whose first state is `initial`.
    pub fn new(initial: &Board) -> History {
        History { states: vec![initial.clone()], index: 0 }
    }

    /// Truncate past the cursor, append a copy of `board`, and move to it.
    pub fn record(&mut self, board: &Board) {
        self.states.truncate(self.index + 1);
        self.states.push(board.clone());
        self.index = self.states.len() - 1;
    }

    /// Step back one state and return a copy of it. `None` at the start.
    pub fn undo(&mut self) -> Option<Board> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current().clone())
    }

    /// Step forward one state and return a copy of it. `None` at the end.
    pub fn redo(&mut self) -> Option<Board> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current().clone())
    }

    /// Jump to any recorded state. `None` if `index` is out of range.
    pub fn goto(&mut self, index: usize) -> Option<Board> {
        if index >= self.states.len() {
            return None;
        }
        self.index = index;
        Some(self.current().clone())
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: &Board) {
        self.states.clear();
        self.states.push(initial.clone());
        self.index = 0;
    }

    pub fn current(&self) -> &Board {
        &self.states[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a history holds at least its starting state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.states.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Player};

    fn board_with(pieces: u8) -> Board {
        let mut board = Board::new(Player::X);
        for col in 0..pieces {
            board.make_piece(2, col);
            board.new_piece(Direction::UP);
        }
        board
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = History::new(&board_with(0));
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_undo_redo_walks_states() {
        let mut history = History::new(&board_with(0));
        history.record(&board_with(1));
        history.record(&board_with(2));
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);

        assert_eq!(history.undo().unwrap().piece_count(), 1);
        assert_eq!(history.undo().unwrap().piece_count(), 0);
        assert!(history.undo().is_none());
        assert_eq!(history.redo().unwrap().piece_count(), 1);
        assert_eq!(history.redo().unwrap().piece_count(), 2);
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 2);
    }

    #[test]
    fn test_record_after_undo_discards_redo_branch() {
        let mut history = History::new(&board_with(0));
        history.record(&board_with(1));
        history.record(&board_with(2));
        history.undo();
        history.record(&board_with(3));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.current().piece_count(), 3);
    }

    #[test]
    fn test_returned_board_is_independent() {
        let mut history = History::new(&board_with(0));
        history.record(&board_with(1));
        let mut restored = history.undo().unwrap();
        restored.make_piece(0, 0);
        restored.new_piece(Direction::DOWN);
        assert_eq!(history.current().piece_count(), 0);
    }

    #[test]
    fn test_goto_and_reset() {
        let mut history = History::new(&board_with(0));
        history.record(&board_with(1));
        history.record(&board_with(2));
        assert_eq!(history.goto(1).unwrap().piece_count(), 1);
        assert!(history.goto(3).is_none());
        assert_eq!(history.index(), 1);

        history.reset(&board_with(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.is_empty());
    }
}
