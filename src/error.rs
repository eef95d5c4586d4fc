//! Error types for the outer surfaces of the engine.
//!
//! Rule-level contract violations (placing off the grid, moving out of turn)
//! are assertions on [`Board`](crate::Board). These types cover input that
//! arrives from outside: restored snapshots and session moves.

use derive_more::{Display, Error};

/// A flat board snapshot could not be turned back into a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    /// A piece record points outside the 3x3 grid.
    #[display("piece at ({row}, {column}) is off the grid")]
    OffGrid { row: u8, column: u8 },
    /// A piece record carries the zero vector or a component outside {-1, 0, 1}.
    #[display("invalid direction ({vertical}, {horizontal})")]
    InvalidDirection { vertical: i8, horizontal: i8 },
    /// A packed word has bits set outside its layout.
    #[display("malformed packed word {_0:#06x}")]
    MalformedWord(#[error(not(source))] u16),
    /// The packed stream is empty.
    #[display("packed snapshot has no header")]
    MissingHeader,
}

/// A session move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlayError {
    /// The game already has a result.
    #[display("game is already over")]
    GameOver,
    /// The chosen cell is not on the grid.
    #[display("cell ({row}, {column}) is off the grid")]
    OffGrid { row: u8, column: u8 },
    /// The chosen cell already holds a piece.
    #[display("cell ({row}, {column}) is occupied")]
    Occupied { row: u8, column: u8 },
    /// The chosen direction is the zero vector or out of range.
    #[display("invalid direction ({vertical}, {horizontal})")]
    InvalidDirection { vertical: i8, horizontal: i8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SnapshotError::OffGrid { row: 3, column: 1 }.to_string(),
            "piece at (3, 1) is off the grid"
        );
        assert_eq!(SnapshotError::MalformedWord(0x0200).to_string(), "malformed packed word 0x0200");
        assert_eq!(
            PlayError::Occupied { row: 1, column: 2 }.to_string(),
            "cell (1, 2) is occupied"
        );
        assert_eq!(PlayError::GameOver.to_string(), "game is already over");
    }
}
