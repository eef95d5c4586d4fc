//! TicTacGo game logic: directional pieces on a wrapping 3x3 grid.
//!
//! # Rules in brief
//!
//! ```text
//! - Players X and O alternate placing a piece on an empty cell, choosing one
//!   of the 8 compass directions for it.
//! - Once both players have placed (one round), every piece steps one cell in
//!   its direction, wrapping around the edges.
//! - Two pieces whose paths cross mid-step, or which land in the same cell,
//!   swap owners. Three or more collide and are all removed.
//! - A player sweeps a line when every cell in it holds one of their pieces.
//!   Cells may hold an X and an O at once, so both players can sweep a line.
//! ```
//!
//! # Cell indices (row-major order)
//!
//! ```text
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! # Packed piece encoding (16-bit)
//!
//! ```text
//! Bits 0-1:  row (0-2)
//! Bits 2-3:  column (0-2)
//! Bits 4-5:  vertical direction + 1 (0-2)
//! Bits 6-7:  horizontal direction + 1 (0-2)
//! Bit 8:     owner (0 = X, 1 = O)
//! Bits 9-15: unused (zero)
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod piece;
pub mod snapshot;
pub mod space;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use board::{Board, CollisionReport, GameStatus, Resolution, SpaceRef, WinLine, Winners};
pub use config::{BoardConfig, StartingPlayer};
pub use error::{PlayError, SnapshotError};
pub use game::{Game, TurnOutcome};
pub use history::History;
pub use piece::{Piece, PieceId};
pub use snapshot::{BoardSnapshot, PackedPiece, PieceRecord};
pub use space::Space;

/// Side length of the grid.
pub const SIDE: u8 = 3;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Signed tag used by the cell summary (+1 for X, -1 for O).
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Single-bit encoding (0 = X, 1 = O).
    #[inline]
    pub fn to_bit(self) -> u16 {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// Decode the single-bit encoding. Only the low bit is read.
    #[inline]
    pub fn from_bit(bit: u16) -> Player {
        if bit & 1 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Both players, X first.
    pub fn both() -> impl Iterator<Item = Player> {
        [Player::X, Player::O].into_iter()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => f.write_str("X"),
            Player::O => f.write_str("O"),
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < SIDE && col < SIDE);
        Pos(row * SIDE + col)
    }

    /// Checked variant of [`Pos::from_row_col`].
    #[inline]
    pub fn try_from_row_col(row: u8, col: u8) -> Option<Pos> {
        if row < SIDE && col < SIDE {
            Some(Pos(row * SIDE + col))
        } else {
            None
        }
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / SIDE
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % SIDE
    }

    /// Array index of this cell.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < SIDE * SIDE
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..SIDE * SIDE).map(Pos)
    }

    /// One step along `dir`, wrapping around the edges.
    #[inline]
    pub fn step(self, dir: Direction) -> Pos {
        Pos::from_row_col(wrap(self.row(), dir.vertical()), wrap(self.col(), dir.horizontal()))
    }

    /// One step against `dir`, wrapping around the edges.
    #[inline]
    pub fn step_back(self, dir: Direction) -> Pos {
        Pos::from_row_col(wrap(self.row(), -dir.vertical()), wrap(self.col(), -dir.horizontal()))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}

#[inline]
fn wrap(coord: u8, delta: i8) -> u8 {
    (coord as i8 + delta).rem_euclid(SIDE as i8) as u8
}

/// Movement direction of a piece: one of the 8 compass directions.
///
/// Components are `(vertical, horizontal)`, each in {-1, 0, 1}; positive
/// vertical is down the board, positive horizontal is to the right. The
/// zero vector is not a direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
pub struct Direction {
    vertical: i8,
    horizontal: i8,
}

impl Direction {
    pub const RIGHT: Direction = Direction::unchecked(0, 1);
    pub const DOWN_RIGHT: Direction = Direction::unchecked(1, 1);
    pub const DOWN: Direction = Direction::unchecked(1, 0);
    pub const DOWN_LEFT: Direction = Direction::unchecked(1, -1);
    pub const LEFT: Direction = Direction::unchecked(0, -1);
    pub const UP_LEFT: Direction = Direction::unchecked(-1, -1);
    pub const UP: Direction = Direction::unchecked(-1, 0);
    pub const UP_RIGHT: Direction = Direction::unchecked(-1, 1);

    /// All 8 directions, clockwise from right.
    pub const ALL: [Direction; 8] = [
        Direction::RIGHT,
        Direction::DOWN_RIGHT,
        Direction::DOWN,
        Direction::DOWN_LEFT,
        Direction::LEFT,
        Direction::UP_LEFT,
        Direction::UP,
        Direction::UP_RIGHT,
    ];

    const fn unchecked(vertical: i8, horizontal: i8) -> Direction {
        Direction { vertical, horizontal }
    }

    /// Build a direction from its components.
    ///
    /// Returns `None` for the zero vector (the picker's "clear" button) or for
    /// components outside {-1, 0, 1}.
    pub fn new(vertical: i8, horizontal: i8) -> Option<Direction> {
        let in_range = (-1..=1).contains(&vertical) && (-1..=1).contains(&horizontal);
        if in_range && (vertical, horizontal) != (0, 0) {
            Some(Direction::unchecked(vertical, horizontal))
        } else {
            None
        }
    }

    #[inline]
    pub fn vertical(self) -> i8 {
        self.vertical
    }

    #[inline]
    pub fn horizontal(self) -> i8 {
        self.horizontal
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Direction {
        Direction::unchecked(-self.vertical, -self.horizontal)
    }

    /// Drawing rotation in degrees, clockwise from pointing right.
    pub fn angle(self) -> u16 {
        match (self.vertical, self.horizontal) {
            (0, 1) => 0,
            (1, 1) => 45,
            (1, 0) => 90,
            (1, -1) => 135,
            (0, -1) => 180,
            (-1, -1) => 225,
            (-1, 0) => 270,
            _ => 315,
        }
    }

    /// Arrow glyph, used by the text rendering.
    pub fn arrow(self) -> char {
        match (self.vertical, self.horizontal) {
            (0, 1) => '→',
            (1, 1) => '↘',
            (1, 0) => '↓',
            (1, -1) => '↙',
            (0, -1) => '←',
            (-1, -1) => '↖',
            (-1, 0) => '↑',
            _ => '↗',
        }
    }
}

impl TryFrom<(i8, i8)> for Direction {
    type Error = SnapshotError;

    fn try_from((vertical, horizontal): (i8, i8)) -> Result<Self, Self::Error> {
        Direction::new(vertical, horizontal)
            .ok_or(SnapshotError::InvalidDirection { vertical, horizontal })
    }
}

impl From<Direction> for (i8, i8) {
    fn from(dir: Direction) -> Self {
        (dir.vertical, dir.horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }

    #[test]
    fn test_player_bit_roundtrip() {
        for player in Player::both() {
            assert_eq!(Player::from_bit(player.to_bit()), player);
        }
    }

    #[test]
    fn test_pos_from_row_col() {
        assert_eq!(Pos::from_row_col(0, 0), Pos(0));
        assert_eq!(Pos::from_row_col(0, 2), Pos(2));
        assert_eq!(Pos::from_row_col(1, 1), Pos(4));
        assert_eq!(Pos::from_row_col(2, 2), Pos(8));
        assert_eq!(Pos::try_from_row_col(3, 0), None);
        assert_eq!(Pos::try_from_row_col(0, 3), None);
    }

    #[test]
    fn test_pos_row_col() {
        for pos in Pos::all() {
            assert_eq!(Pos::from_row_col(pos.row(), pos.col()), pos);
        }
    }

    #[test]
    fn test_step_wraps_edges() {
        assert_eq!(Pos::from_row_col(0, 2).step(Direction::RIGHT), Pos::from_row_col(0, 0));
        assert_eq!(Pos::from_row_col(0, 0).step(Direction::UP), Pos::from_row_col(2, 0));
        assert_eq!(Pos::from_row_col(2, 0).step(Direction::DOWN_LEFT), Pos::from_row_col(0, 2));
        assert_eq!(Pos::from_row_col(1, 1).step(Direction::UP_RIGHT), Pos::from_row_col(0, 2));
    }

    #[test]
    fn test_step_back_inverts_step() {
        for pos in Pos::all() {
            for dir in Direction::ALL {
                assert_eq!(pos.step(dir).step_back(dir), pos);
                assert_eq!(pos.step(dir).step(dir.reversed()), pos);
            }
        }
    }

    #[test]
    fn test_direction_rejects_zero_and_out_of_range() {
        assert_eq!(Direction::new(0, 0), None);
        assert_eq!(Direction::new(2, 0), None);
        assert_eq!(Direction::new(0, -2), None);
        assert_eq!(Direction::new(-1, 1), Some(Direction::UP_RIGHT));
    }

    #[test]
    fn test_direction_angles_are_distinct() {
        let mut angles: Vec<u16> = Direction::ALL.iter().map(|d| d.angle()).collect();
        assert_eq!(angles, vec![0, 45, 90, 135, 180, 225, 270, 315]);
        angles.dedup();
        assert_eq!(angles.len(), 8);
    }

    #[test]
    fn test_direction_serde_rejects_zero() {
        let ok: Direction = serde_json::from_str("[1,-1]").unwrap();
        assert_eq!(ok, Direction::DOWN_LEFT);
        assert!(serde_json::from_str::<Direction>("[0,0]").is_err());
        assert_eq!(serde_json::to_string(&Direction::UP).unwrap(), "[-1,0]");
    }
}
