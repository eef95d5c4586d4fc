//! Session-level behaviour: turn cadence, history navigation, configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tictacgo_core::{BoardConfig, Game, GameStatus, PlayError, Player, StartingPlayer};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn game(start: Player) -> Game<StdRng> {
    init_tracing();
    Game::new(BoardConfig::new(start, 0), StdRng::seed_from_u64(0))
}

#[test]
fn test_pieces_move_every_second_turn() {
    let mut g = game(Player::O);
    // Downward movers in the outer columns never meet.
    let pattern: Vec<bool> = [(0, 0), (0, 2), (0, 0), (0, 2)]
        .iter()
        .map(|&(row, col)| g.play(row, col, 1, 0).unwrap().moved)
        .collect();
    assert_eq!(pattern, vec![false, true, false, true]);
    assert_eq!(g.board().piece_count(), 4);
    assert!(g.board().space_at(2, 0).has_player(Player::O));
    assert!(g.board().space_at(1, 2).has_player(Player::X));
    assert_eq!(g.status(), GameStatus::InProgress);
}

#[test]
fn test_starting_player_alternates_with_opponent() {
    let mut g = game(Player::O);
    assert_eq!(g.board().turn(), Player::O);
    g.play(0, 0, 1, 0).unwrap();
    assert_eq!(g.board().turn(), Player::X);
    g.play(0, 2, 1, 0).unwrap();
    assert_eq!(g.board().turn(), Player::O);
    assert_eq!(g.board().start_turn(), Player::O);
}

#[test]
fn test_undo_and_redo_at_boundaries() {
    let mut g = game(Player::X);
    assert!(!g.can_undo());
    assert!(!g.undo());
    assert!(!g.redo());

    g.play(1, 1, 0, 1).unwrap();
    assert!(g.can_undo());
    assert!(!g.can_redo());
    assert!(!g.redo());

    assert!(g.undo());
    assert_eq!(g.board().piece_count(), 0);
    assert!(!g.undo());
    assert!(g.redo());
    assert_eq!(g.board().piece_count(), 1);
    assert_eq!(g.history().index(), 1);
}

#[test]
fn test_undo_out_of_finished_game_reopens_it() {
    let mut g = game(Player::X);
    for &(row, col, dv, dh) in &[(0, 0, 0, 1), (2, 0, 0, 1), (0, 0, 0, 1), (1, 0, 1, 0), (0, 0, 1, 0)]
    {
        g.play(row, col, dv, dh).unwrap();
    }
    assert_eq!(g.status(), GameStatus::Won(Player::X));
    assert_eq!(g.play(1, 1, 1, 0), Err(PlayError::GameOver));

    assert!(g.undo());
    assert_eq!(g.status(), GameStatus::InProgress);
    g.play(1, 1, 1, 0).unwrap();
    assert!(!g.can_redo());
}

#[test]
fn test_config_from_json_drives_session() {
    init_tracing();
    let config: BoardConfig =
        serde_json::from_str(r#"{"starting_player":"o","cell_size":150}"#).unwrap();
    let g = Game::new(config, StdRng::seed_from_u64(3));
    assert_eq!(g.board().turn(), Player::O);
    assert_eq!(g.board().cell_size(), 150);
    assert_eq!(g.config().starting_player, StartingPlayer::O);
}

#[test]
fn test_random_start_is_reproducible_per_seed() {
    init_tracing();
    let starts = |seed| {
        let mut g = Game::new(BoardConfig::default(), StdRng::seed_from_u64(seed));
        let mut out = vec![g.board().start_turn()];
        for _ in 0..7 {
            g.reset();
            out.push(g.board().start_turn());
        }
        out
    };
    assert_eq!(starts(11), starts(11));
}

#[test]
fn test_board_display_after_collision() {
    let mut g = game(Player::O);
    g.play(0, 1, 1, 0).unwrap();
    g.play(1, 0, 0, 1).unwrap();
    assert_eq!(g.board().to_string(), ". |. |. \n--+--+--\n. |XO|. \n--+--+--\n. |. |. ");
}
