//! A single directional piece.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Direction, Player, Pos};

/// Board-assigned identity of a piece.
///
/// Pieces are never compared by value: two X pieces at the same cell moving
/// the same way are still different pieces. Every lookup, swap and removal
/// goes through this id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece on the board.
///
/// The direction is fixed at creation. The owner changes when a two-way
/// collision swaps it. The position is always on the grid.
#[derive(Clone, Debug)]
pub struct Piece {
    id: PieceId,
    pos: Pos,
    direction: Direction,
    owner: Player,
}

impl Piece {
    pub fn new(id: PieceId, pos: Pos, direction: Direction, owner: Player) -> Piece {
        debug_assert!(pos.is_valid());
        Piece { id, pos, direction, owner }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn owner(&self) -> Player {
        self.owner
    }

    /// Reassign ownership (collision swap).
    #[inline]
    pub fn set_owner(&mut self, owner: Player) {
        self.owner = owner;
    }

    /// Move one cell along the direction, wrapping around the edges.
    ///
    /// Exactly one call per movement round.
    #[inline]
    pub fn advance(&mut self) {
        self.pos = self.pos.step(self.direction);
    }

    /// The cell this piece would have come from: current position minus
    /// direction, wrapped. Always derived from the current position.
    #[inline]
    pub fn previous_position(&self) -> Pos {
        self.pos.step_back(self.direction)
    }

    /// Whether this piece and `other` passed through each other halfway
    /// through the last step.
    ///
    /// Three crossings count, comparing previous and current cells:
    /// - rows unchanged relative to each other, columns swapped
    /// - columns unchanged relative to each other, rows swapped
    /// - rows and columns both swapped (diagonal crossing)
    pub fn crossed(&self, other: &Piece) -> bool {
        let (prev_a, cur_a) = (self.previous_position(), self.pos);
        let (prev_b, cur_b) = (other.previous_position(), other.pos);

        let same_rows = cur_a.row() == cur_b.row() && prev_a.row() == prev_b.row();
        let same_cols = cur_a.col() == cur_b.col() && prev_a.col() == prev_b.col();
        let rows_swapped = prev_a.row() == cur_b.row() && cur_a.row() == prev_b.row();
        let cols_swapped = prev_a.col() == cur_b.col() && cur_a.col() == prev_b.col();

        (same_rows && cols_swapped) || (same_cols && rows_swapped) || (rows_swapped && cols_swapped)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}@{}", self.owner, self.direction.arrow(), self.id, self.pos)
    }
}
