use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};
use crate::types::seats_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_count: usize,
    /// Seeds every seat's deck shuffle.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            seed: 0x00C0_FFEE,
        }
    }
}

impl GameConfig {
    #[inline]
    pub const fn new(player_count: usize, seed: u64) -> Self {
        Self { player_count, seed }
    }

    /// Board section for each player, in turn order.
    pub fn seats(&self) -> Result<&'static [u8], GameError> {
        seats_for(self.player_count).ok_or(GameError::InvalidPlayerCount(self.player_count))
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.seats().map(|_| ())
    }
}

/// Load a match configuration from a JSON file. Missing fields take defaults.
pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let config: GameConfig = serde_json::from_str(&data)?;
    config.validate()?;
    Ok(config)
}
