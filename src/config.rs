/// Game configuration: screen size, pacing and timer cadences.
///
/// Everything has a default matching the reference game, so an empty (or
/// absent) config file yields an 800×700 screen at 15/120 ticks per second.
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Spawn and recycle x positions are drawn from [MARGIN, width − MARGIN].
pub const SPAWN_MARGIN: i32 = 50;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig { width: 800, height: 700 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Ticks per second on the menu and game-over screens.
    pub menu_tick_rate: u32,
    /// Ticks per second while playing.
    pub play_tick_rate: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig { menu_tick_rate: 15, play_tick_rate: 120 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub spawn_interval_ms: u64,
    pub explosion_frame_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig { spawn_interval_ms: 2000, explosion_frame_ms: 40 }
    }
}

impl TimerConfig {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn explosion_frame(&self) -> Duration {
        Duration::from_millis(self.explosion_frame_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    /// Maximum live enemies; the spawn timer skips its turn at the cap.
    pub cap: usize,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig { cap: 5 }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub pacing: PacingConfig,
    pub timers: TimerConfig,
    pub enemies: EnemyConfig,
    /// Fixed RNG seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ScreenConfig { width, height } = self.screen;
        if width <= 2 * SPAWN_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "screen width {width} leaves no room for spawns (needs > {})",
                2 * SPAWN_MARGIN
            )));
        }
        if height <= 0 {
            return Err(ConfigError::Invalid(format!("screen height {height} must be positive")));
        }
        if self.pacing.menu_tick_rate == 0 || self.pacing.play_tick_rate == 0 {
            return Err(ConfigError::Invalid("tick rates must be non-zero".into()));
        }
        Ok(())
    }
}
