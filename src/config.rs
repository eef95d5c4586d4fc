//! Game setup options.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Player;

/// Who places the first piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingPlayer {
    X,
    O,
    /// Coin flip at board creation.
    #[default]
    Random,
}

impl StartingPlayer {
    /// Pick the concrete first player, drawing from `rng` only for `Random`.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Player {
        match self {
            StartingPlayer::X => Player::X,
            StartingPlayer::O => Player::O,
            StartingPlayer::Random => {
                if rng.random_bool(0.5) {
                    Player::O
                } else {
                    Player::X
                }
            }
        }
    }
}

impl From<Player> for StartingPlayer {
    fn from(player: Player) -> Self {
        match player {
            Player::X => StartingPlayer::X,
            Player::O => StartingPlayer::O,
        }
    }
}

/// Options for a new board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub starting_player: StartingPlayer,
    /// Pixel side length of one cell, carried for the presentation layer.
    /// The rules never read it.
    pub cell_size: u32,
}

impl BoardConfig {
    pub fn new(starting_player: impl Into<StartingPlayer>, cell_size: u32) -> BoardConfig {
        BoardConfig { starting_player: starting_player.into(), cell_size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_start_ignores_rng() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(StartingPlayer::X.resolve(&mut rng), Player::X);
            assert_eq!(StartingPlayer::O.resolve(&mut rng), Player::O);
        }
    }

    #[test]
    fn test_random_start_is_deterministic_per_seed() {
        let first: Vec<Player> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..32).map(|_| StartingPlayer::Random.resolve(&mut rng)).collect()
        };
        let second: Vec<Player> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..32).map(|_| StartingPlayer::Random.resolve(&mut rng)).collect()
        };
        assert_eq!(first, second);
        assert!(first.contains(&Player::X));
        assert!(first.contains(&Player::O));
    }

    #[test]
    fn test_config_from_json() {
        let config: BoardConfig =
            serde_json::from_str(r#"{"starting_player":"o","cell_size":120}"#).unwrap();
        assert_eq!(config, BoardConfig::new(Player::O, 120));

        let defaults: BoardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults.starting_player, StartingPlayer::Random);
        assert_eq!(defaults.cell_size, 0);
    }
}
