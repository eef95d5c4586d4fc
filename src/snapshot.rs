//! Flat board representation for persistence.
//!
//! A snapshot keeps only what the rules need: whose turn it is, who started,
//! and each piece's cell, direction and owner. Spaces are rebuilt from piece
//! positions on restore, and pieces receive fresh ids in record order.
//!
//! # Packed form
//!
//! ```text
//! Word 0:   header
//!   Bit 0:  turn (0 = X, 1 = O)
//!   Bit 1:  start turn
//! Word 1..: one PackedPiece per piece (see crate docs)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Board, Direction, Piece, Player, Pos, SnapshotError};

/// One piece in a [`BoardSnapshot`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PieceRecord {
    pub row: u8,
    pub column: u8,
    pub dir_v: i8,
    pub dir_h: i8,
    pub owner: Player,
}

impl PieceRecord {
    fn from_piece(piece: &Piece) -> PieceRecord {
        PieceRecord {
            row: piece.pos().row(),
            column: piece.pos().col(),
            dir_v: piece.direction().vertical(),
            dir_h: piece.direction().horizontal(),
            owner: piece.owner(),
        }
    }

    fn validate(self) -> Result<(Pos, Direction), SnapshotError> {
        let pos = Pos::try_from_row_col(self.row, self.column)
            .ok_or(SnapshotError::OffGrid { row: self.row, column: self.column })?;
        let direction = Direction::new(self.dir_v, self.dir_h).ok_or(
            SnapshotError::InvalidDirection { vertical: self.dir_v, horizontal: self.dir_h },
        )?;
        Ok((pos, direction))
    }
}

/// Serializable state of a [`Board`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub turn: Player,
    pub start_turn: Player,
    #[serde(default)]
    pub cell_size: u32,
    pub pieces: Vec<PieceRecord>,
}

impl BoardSnapshot {
    /// Encode as a header word followed by one [`PackedPiece`] per piece.
    pub fn to_packed(&self) -> Vec<u16> {
        let header = self.turn.to_bit() | (self.start_turn.to_bit() << 1);
        let mut words = Vec::with_capacity(self.pieces.len() + 1);
        words.push(header);
        words.extend(self.pieces.iter().map(|r| PackedPiece::from_record(r).0));
        words
    }

    /// Decode the packed form. `cell_size` is not part of it and comes back 0.
    pub fn from_packed(words: &[u16]) -> Result<BoardSnapshot, SnapshotError> {
        let (&header, rest) = words.split_first().ok_or(SnapshotError::MissingHeader)?;
        if header & !0b11 != 0 {
            return Err(SnapshotError::MalformedWord(header));
        }
        let pieces = rest
            .iter()
            .map(|&w| PackedPiece::try_from(w).map(PackedPiece::to_record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BoardSnapshot {
            turn: Player::from_bit(header),
            start_turn: Player::from_bit(header >> 1),
            cell_size: 0,
            pieces,
        })
    }
}

/// Packed piece (16 bits).
///
/// Encoding:
/// - Bits 0-1: row
/// - Bits 2-3: column
/// - Bits 4-5: vertical direction + 1
/// - Bits 6-7: horizontal direction + 1
/// - Bit 8:    owner (0 = X, 1 = O)
/// - Bits 9-15: unused
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct PackedPiece(pub u16);

impl PackedPiece {
    const UNUSED_MASK: u16 = !0x01FF;

    pub fn from_record(record: &PieceRecord) -> PackedPiece {
        let v = record.dir_v.wrapping_add(1) as u16 & 0b11;
        let h = record.dir_h.wrapping_add(1) as u16 & 0b11;
        PackedPiece(
            (record.row as u16 & 0b11)
                | ((record.column as u16 & 0b11) << 2)
                | (v << 4)
                | (h << 6)
                | (record.owner.to_bit() << 8),
        )
    }

    #[inline]
    pub const fn row(self) -> u8 {
        (self.0 & 0b11) as u8
    }

    #[inline]
    pub const fn column(self) -> u8 {
        ((self.0 >> 2) & 0b11) as u8
    }

    #[inline]
    pub const fn dir_v(self) -> i8 {
        ((self.0 >> 4) & 0b11) as i8 - 1
    }

    #[inline]
    pub const fn dir_h(self) -> i8 {
        ((self.0 >> 6) & 0b11) as i8 - 1
    }

    #[inline]
    pub fn owner(self) -> Player {
        Player::from_bit(self.0 >> 8)
    }

    pub fn to_record(self) -> PieceRecord {
        PieceRecord {
            row: self.row(),
            column: self.column(),
            dir_v: self.dir_v(),
            dir_h: self.dir_h(),
            owner: self.owner(),
        }
    }
}

impl TryFrom<u16> for PackedPiece {
    type Error = SnapshotError;

    /// Only checks the unused bits; field ranges are checked on restore.
    fn try_from(word: u16) -> Result<Self, Self::Error> {
        if word & Self::UNUSED_MASK != 0 {
            Err(SnapshotError::MalformedWord(word))
        } else {
            Ok(PackedPiece(word))
        }
    }
}

impl Board {
    /// Capture the flat state of this board.
    ///
    /// A pending placement cell is transient and not captured.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            turn: self.turn(),
            start_turn: self.start_turn(),
            cell_size: self.cell_size(),
            pieces: self.pieces().iter().map(PieceRecord::from_piece).collect(),
        }
    }

    /// Rebuild a board from a snapshot, validating every record.
    pub fn restore(snapshot: &BoardSnapshot) -> Result<Board, SnapshotError> {
        let validated = snapshot
            .pieces
            .iter()
            .map(|r| r.validate().map(|(pos, dir)| (pos, dir, r.owner)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut board = Board::new(snapshot.start_turn);
        board.set_turns(snapshot.turn, snapshot.start_turn);
        board.set_cell_size(snapshot.cell_size);
        for (pos, direction, owner) in validated {
            board.insert(pos, direction, owner);
        }
        debug!(pieces = board.piece_count(), turn = %board.turn(), "board restored");
        Ok(board)
    }
}
