//! Occupancy index for one grid cell.

use crate::{Piece, PieceId, Player};

/// The pieces currently occupying one cell.
///
/// Holds ids only; the [`Board`](crate::Board) owns the pieces. Stable
/// states hold at most two ids, but nothing here enforces that: between a
/// movement step and collision resolution a cell may briefly hold more.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Space {
    members: Vec<PieceId>,
}

impl Space {
    pub fn new() -> Space {
        Space { members: Vec::with_capacity(2) }
    }

    pub fn add(&mut self, id: PieceId) {
        self.members.push(id);
    }

    /// Remove `id` if present. Returns whether it was a member.
    pub fn remove(&mut self, id: PieceId) -> bool {
        match self.members.iter().position(|&m| m == id) {
            Some(idx) => {
                self.members.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn contains(&self, id: PieceId) -> bool {
        self.members.contains(&id)
    }

    /// More than one piece shares this cell.
    #[inline]
    pub fn has_collision(&self) -> bool {
        self.members.len() > 1
    }

    pub fn ids(&self) -> &[PieceId] {
        &self.members
    }

    /// Iterate over the member pieces, resolved against the board's piece list.
    pub fn pieces<'a>(&'a self, pieces: &'a [Piece]) -> impl Iterator<Item = &'a Piece> + 'a {
        self.members
            .iter()
            .filter_map(move |&id| pieces.iter().find(|p| p.id() == id))
    }

    /// Any member is owned by `player`.
    pub fn has_player(&self, player: Player, pieces: &[Piece]) -> bool {
        self.pieces(pieces).any(|p| p.owner() == player)
    }

    /// Compact summary of the cell.
    ///
    /// ```text
    ///  0        empty
    ///  1 / -1   a single X / O
    ///  10 + Σ   two or more pieces: 10 plus the sum of owner signs
    ///           (12 = two X, 10 = one each, 8 = two O)
    /// ```
    pub fn code(&self, pieces: &[Piece]) -> i8 {
        let sum: i8 = self.pieces(pieces).map(|p| p.owner().sign()).sum();
        match self.members.len() {
            0 => 0,
            1 => sum,
            _ => 10 + sum,
        }
    }
}
