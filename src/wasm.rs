//! WASM bindings for tictacgo-core
//!
//! Provides a JavaScript-friendly API over the game session.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::{BoardConfig, BoardSnapshot, Game, GameStatus, Player, Pos, StartingPlayer};

/// WASM-friendly wrapper around a game session
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game<StdRng>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game. `starting_player`: 0 (random), 1 (X), 2 (O).
    /// `seed` drives the random start.
    #[wasm_bindgen(constructor)]
    pub fn new(starting_player: u8, seed: u64) -> WasmGame {
        let start = match starting_player {
            1 => StartingPlayer::X,
            2 => StartingPlayer::O,
            _ => StartingPlayer::Random,
        };
        let config = BoardConfig::new(start, 0);
        WasmGame { inner: Game::new(config, StdRng::seed_from_u64(seed)) }
    }

    /// Place a piece and finish the turn. Returns true if the move was accepted.
    pub fn play(&mut self, row: u8, col: u8, dir_v: i8, dir_h: i8) -> bool {
        self.inner.play(row, col, dir_v, dir_h).is_ok()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    pub fn reset(&mut self) {
        self.inner.reset()
    }

    /// Player to move (1 = X, 2 = O)
    pub fn turn(&self) -> u8 {
        player_code(self.inner.board().turn())
    }

    /// Pieces move after this turn
    #[wasm_bindgen(js_name = willMove)]
    pub fn will_move(&self) -> bool {
        self.inner.board().will_move()
    }

    /// Get game result: "ongoing", "x_wins", "o_wins", or "draw"
    pub fn status(&self) -> String {
        match self.inner.status() {
            GameStatus::InProgress => "ongoing",
            GameStatus::Won(Player::X) => "x_wins",
            GameStatus::Won(Player::O) => "o_wins",
            GameStatus::Draw => "draw",
        }
        .to_string()
    }

    /// Lines swept by each player as [x, o]
    pub fn winners(&self) -> Vec<u8> {
        let winners = self.inner.board().winners();
        vec![winners.x, winners.o]
    }

    /// Every cell in row-major order as an array of piece lists.
    /// Each piece is { owner: 1|2, dir: [v, h], angle: degrees }
    pub fn cells(&self) -> JsValue {
        let board = self.inner.board();
        let cells: Vec<Vec<WasmPiece>> = Pos::all()
            .map(|pos| board.space(pos).pieces().map(WasmPiece::from).collect())
            .collect();
        serde_wasm_bindgen::to_value(&cells).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Packed snapshot of the current board
    #[wasm_bindgen(js_name = exportState)]
    pub fn export_state(&self) -> Vec<u16> {
        self.inner.board().snapshot().to_packed()
    }

    /// Load a packed snapshot. Returns false and leaves the game untouched if
    /// it does not decode to a valid board.
    #[wasm_bindgen(js_name = importState)]
    pub fn import_state(&mut self, words: &[u16]) -> bool {
        match BoardSnapshot::from_packed(words) {
            Ok(snapshot) => self.inner.restore(&snapshot).is_ok(),
            Err(_) => false,
        }
    }
}

fn player_code(player: Player) -> u8 {
    match player {
        Player::X => 1,
        Player::O => 2,
    }
}

/// Serializable piece for JavaScript
#[derive(serde::Serialize)]
struct WasmPiece {
    owner: u8,
    dir: [i8; 2],
    angle: u16,
}

impl From<&crate::Piece> for WasmPiece {
    fn from(piece: &crate::Piece) -> Self {
        let dir = piece.direction();
        WasmPiece {
            owner: player_code(piece.owner()),
            dir: [dir.vertical(), dir.horizontal()],
            angle: dir.angle(),
        }
    }
}
