//! The board: spaces, live pieces, turn order, movement and win detection.
//!
//! # Turn structure
//!
//! ```text
//! make_piece(row, col)     pending cell recorded (AwaitingDirection)
//! new_piece(direction)     piece inserted for the current player
//! will_move()?             true once per round, when the next player to
//!                          move is the one who started the game
//!   advance_pieces()       every piece steps; halfway crossings resolved
//!   resolve_full_collisions()
//! next_turn()              turn flips
//! status()                 win / draw / in progress
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{BoardConfig, Direction, Piece, PieceId, Player, Pos, Space, SIDE};

/// A swept line: its first cell and the direction it runs in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct WinLine {
    pub start: Pos,
    pub direction: Direction,
}

impl WinLine {
    /// The three cells of the line.
    pub fn cells(self) -> [Pos; 3] {
        let second = self.start.step(self.direction);
        [self.start, second, second.step(self.direction)]
    }
}

/// Number of lines each player sweeps.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Winners {
    pub x: u8,
    pub o: u8,
}

impl Winners {
    pub fn get(self, player: Player) -> u8 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Neither player sweeps anything.
    pub fn is_none(self) -> bool {
        self.x == 0 && self.o == 0
    }
}

/// Result of the game so far.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// What applying the collision rule to one group did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Fewer than two pieces: nothing to do.
    Unchanged,
    /// Two pieces exchanged owners.
    Swapped,
    /// Three or more pieces were removed; holds how many.
    Exploded(usize),
}

impl Resolution {
    /// The group shrank the piece list.
    pub fn removed(self) -> bool {
        matches!(self, Resolution::Exploded(_))
    }
}

/// Collisions resolved during one movement phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Pairs that exchanged owners.
    pub swaps: Vec<(PieceId, PieceId)>,
    /// Pieces removed from the board.
    pub explosions: Vec<PieceId>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty() && self.explosions.is_empty()
    }

    pub fn removed_any(&self) -> bool {
        !self.explosions.is_empty()
    }
}

/// Read-only view of one cell with its pieces resolved.
#[derive(Clone, Copy)]
pub struct SpaceRef<'a> {
    pos: Pos,
    space: &'a Space,
    pieces: &'a [Piece],
}

impl<'a> SpaceRef<'a> {
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }

    pub fn len(&self) -> usize {
        self.space.len()
    }

    pub fn has_collision(&self) -> bool {
        self.space.has_collision()
    }

    pub fn has_player(&self, player: Player) -> bool {
        self.space.has_player(player, self.pieces)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &'a Piece> + 'a {
        self.space.pieces(self.pieces)
    }

    pub fn code(&self) -> i8 {
        self.space.code(self.pieces)
    }
}

/// Full game board.
///
/// Owns the nine spaces and the flat list of live pieces. The list is
/// authoritative; each space indexes the ids sitting on it and is kept in
/// step by explicit add/remove around every position change.
#[derive(Clone, Debug)]
pub struct Board {
    spaces: [Space; 9],
    pieces: Vec<Piece>,
    turn: Player,
    start_turn: Player,
    pending: Option<Pos>,
    next_id: u32,
    cell_size: u32,
}

impl Board {
    /// Winning lines: rows, columns, main diagonal, anti-diagonal.
    #[rustfmt::skip]
    const WIN_LINES: [WinLine; 8] = [
        WinLine { start: Pos(0), direction: Direction::RIGHT }, // Row 0
        WinLine { start: Pos(3), direction: Direction::RIGHT }, // Row 1
        WinLine { start: Pos(6), direction: Direction::RIGHT }, // Row 2
        WinLine { start: Pos(0), direction: Direction::DOWN },  // Col 0
        WinLine { start: Pos(1), direction: Direction::DOWN },  // Col 1
        WinLine { start: Pos(2), direction: Direction::DOWN },  // Col 2
        WinLine { start: Pos(0), direction: Direction::DOWN_RIGHT }, // Main diagonal
        WinLine { start: Pos(2), direction: Direction::DOWN_LEFT },  // Anti-diagonal
    ];

    /// Create an empty board with `start` to move.
    pub fn new(start: Player) -> Board {
        Board {
            spaces: Default::default(),
            pieces: Vec::with_capacity(9),
            turn: start,
            start_turn: start,
            pending: None,
            next_id: 0,
            cell_size: 0,
        }
    }

    /// Create an empty board from a configuration, drawing the first player
    /// from `rng` when the configuration asks for a random start.
    pub fn with_config<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Board {
        let start = config.starting_player.resolve(rng);
        debug!(%start, cell_size = config.cell_size, "new board");
        let mut board = Board::new(start);
        board.cell_size = config.cell_size;
        board
    }

    // ========== Accessors ==========

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn start_turn(&self) -> Player {
        self.start_turn
    }

    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = cell_size;
    }

    /// Cell chosen by [`make_piece`](Board::make_piece) and not yet consumed.
    #[inline]
    pub fn pending(&self) -> Option<Pos> {
        self.pending
    }

    /// All live pieces, in placement order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn space(&self, pos: Pos) -> SpaceRef<'_> {
        SpaceRef { pos, space: &self.spaces[pos.index()], pieces: &self.pieces }
    }

    pub fn space_at(&self, row: u8, col: u8) -> SpaceRef<'_> {
        self.space(Pos::from_row_col(row, col))
    }

    /// Every cell holds at least one piece.
    pub fn is_full(&self) -> bool {
        self.spaces.iter().all(|s| !s.is_empty())
    }

    // ========== Placement ==========

    /// Record the cell for the next piece. A later call before
    /// [`new_piece`](Board::new_piece) overwrites it.
    pub fn make_piece(&mut self, row: u8, col: u8) {
        let Some(pos) = Pos::try_from_row_col(row, col) else {
            debug_assert!(false, "make_piece({row}, {col}) is off the grid");
            warn!(row, col, "ignoring placement off the grid");
            return;
        };
        self.pending = Some(pos);
    }

    /// Drop the pending cell without placing anything.
    pub fn cancel_placement(&mut self) {
        self.pending = None;
    }

    /// Place a piece for the current player at the pending cell.
    ///
    /// Returns the new piece, or `None` if no cell was pending.
    pub fn new_piece(&mut self, direction: Direction) -> Option<&Piece> {
        let Some(pos) = self.pending.take() else {
            debug_assert!(false, "new_piece called without make_piece");
            warn!("ignoring new_piece without a pending cell");
            return None;
        };
        let id = self.insert(pos, direction, self.turn);
        debug!(piece = %id, player = %self.turn, %pos, angle = direction.angle(), "placed");
        self.piece(id)
    }

    /// Insert a piece into both the flat list and its space.
    pub(crate) fn insert(&mut self, pos: Pos, direction: Direction, owner: Player) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(id, pos, direction, owner));
        self.spaces[pos.index()].add(id);
        id
    }

    pub(crate) fn set_turns(&mut self, turn: Player, start_turn: Player) {
        self.turn = turn;
        self.start_turn = start_turn;
    }

    // ========== Turn order ==========

    /// Flip the turn to the other player.
    pub fn next_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    /// Pieces move at the end of this turn: the next player to move is the
    /// one who started, so both players have placed this round.
    pub fn will_move(&self) -> bool {
        self.turn != self.start_turn
    }

    // ========== Movement ==========

    /// First movement phase: step every piece and resolve halfway crossings.
    pub fn advance_pieces(&mut self) -> CollisionReport {
        if !self.will_move() {
            debug_assert!(false, "advance_pieces called mid-round");
            warn!(turn = %self.turn, "ignoring movement before the round is complete");
            return CollisionReport::default();
        }

        for piece in &mut self.pieces {
            let from = piece.pos();
            self.spaces[from.index()].remove(piece.id());
            piece.advance();
            self.spaces[piece.pos().index()].add(piece.id());
            trace!(piece = %piece.id(), %from, to = %piece.pos(), "advanced");
        }

        let mut report = CollisionReport::default();
        for group in self.halfway_groups() {
            self.apply_collision(&group, &mut report);
        }
        debug!(
            swaps = report.swaps.len(),
            explosions = report.explosions.len(),
            "halfway collisions resolved"
        );
        report
    }

    /// Second movement phase: resolve every cell holding more than one piece.
    pub fn resolve_full_collisions(&mut self) -> CollisionReport {
        let groups: Vec<Vec<PieceId>> = self
            .spaces
            .iter()
            .filter(|s| s.has_collision())
            .map(|s| s.ids().to_vec())
            .collect();

        let mut report = CollisionReport::default();
        for group in &groups {
            self.apply_collision(group, &mut report);
        }
        debug!(
            swaps = report.swaps.len(),
            explosions = report.explosions.len(),
            "full collisions resolved"
        );
        report
    }

    /// Both movement phases back to back, for callers with nothing to
    /// animate in between.
    pub fn run_movement(&mut self) -> (CollisionReport, CollisionReport) {
        let halfway = self.advance_pieces();
        let full = self.resolve_full_collisions();
        (halfway, full)
    }

    /// Group pieces whose paths crossed during the last step.
    ///
    /// Groups grow transitively: each newly added member is tested against
    /// the remaining pool, so three pieces meeting at one crossing point end
    /// up in one group. Only groups of two or more are returned.
    pub fn halfway_groups(&self) -> Vec<Vec<PieceId>> {
        let mut pool: Vec<&Piece> = self.pieces.iter().collect();
        let mut groups = Vec::new();

        while !pool.is_empty() {
            let seed = pool.remove(0);
            let mut group = vec![seed];
            let mut k = 0;
            while k < group.len() {
                let member = group[k];
                let mut i = 0;
                while i < pool.len() {
                    if member.crossed(pool[i]) {
                        group.push(pool.remove(i));
                    } else {
                        i += 1;
                    }
                }
                k += 1;
            }
            if group.len() > 1 {
                groups.push(group.iter().map(|p| p.id()).collect());
            }
        }
        groups
    }

    /// Apply the collision rule to one group of piece ids.
    ///
    /// Two pieces swap owners. Three or more are removed from the board and
    /// from their spaces. Ids not on the board are ignored.
    pub fn resolve_group(&mut self, group: &[PieceId]) -> Resolution {
        let mut report = CollisionReport::default();
        self.apply_collision(group, &mut report)
    }

    fn apply_collision(&mut self, group: &[PieceId], report: &mut CollisionReport) -> Resolution {
        let live: Vec<(PieceId, Player)> = self
            .pieces
            .iter()
            .filter(|p| group.contains(&p.id()))
            .map(|p| (p.id(), p.owner()))
            .collect();

        match live.as_slice() {
            [] | [_] => Resolution::Unchanged,
            &[(a, owner_a), (b, owner_b)] => {
                for piece in &mut self.pieces {
                    if piece.id() == a {
                        piece.set_owner(owner_b);
                    } else if piece.id() == b {
                        piece.set_owner(owner_a);
                    }
                }
                debug!(a = %a, b = %b, "swapped owners");
                report.swaps.push((a, b));
                Resolution::Swapped
            }
            _ => {
                let ids: Vec<PieceId> = live.iter().map(|&(id, _)| id).collect();
                for piece in self.pieces.iter().filter(|p| ids.contains(&p.id())) {
                    self.spaces[piece.pos().index()].remove(piece.id());
                }
                self.pieces.retain(|p| !ids.contains(&p.id()));
                debug!(count = ids.len(), "pieces exploded");
                report.explosions.extend_from_slice(&ids);
                Resolution::Exploded(ids.len())
            }
        }
    }

    // ========== Win detection ==========

    /// Lines `player` sweeps, in the order rows, columns, diagonals.
    ///
    /// A cell counts for every player with a piece in it, so a cell holding
    /// an X and an O serves both.
    pub fn winning_lines(&self, player: Player) -> Vec<WinLine> {
        Self::WIN_LINES
            .iter()
            .copied()
            .filter(|line| line.cells().iter().all(|&pos| self.space(pos).has_player(player)))
            .collect()
    }

    /// Number of lines each player sweeps.
    pub fn winners(&self) -> Winners {
        Winners {
            x: self.winning_lines(Player::X).len() as u8,
            o: self.winning_lines(Player::O).len() as u8,
        }
    }

    /// Game result. More lines wins; equal nonzero counts draw; a full board
    /// with no line draws.
    pub fn status(&self) -> GameStatus {
        let winners = self.winners();
        if winners.is_none() {
            return if self.is_full() { GameStatus::Draw } else { GameStatus::InProgress };
        }
        match winners.x.cmp(&winners.o) {
            std::cmp::Ordering::Greater => GameStatus::Won(Player::X),
            std::cmp::Ordering::Less => GameStatus::Won(Player::O),
            std::cmp::Ordering::Equal => GameStatus::Draw,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                let space = self.space_at(row, col);
                let cell = match space.len() {
                    0 => ". ".to_string(),
                    1 | 2 => {
                        let mut owners: Vec<Player> = space.pieces().map(Piece::owner).collect();
                        owners.sort_by_key(|p| p.to_bit());
                        let mut s: String = owners.iter().map(|p| p.to_string()).collect();
                        if s.len() < 2 {
                            s.push(' ');
                        }
                        s
                    }
                    _ => "**".to_string(),
                };
                f.write_str(&cell)?;
                if col < SIDE - 1 {
                    f.write_str("|")?;
                }
            }
            if row < SIDE - 1 {
                f.write_str("\n--+--+--\n")?;
            }
        }
        Ok(())
    }
}
