use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

use crate::collision::WallPolicy;
use crate::error::ConfigError;
use crate::food::{BonusRule, DEFAULT_MAX_SPAWN_ATTEMPTS};
use crate::grid::{Grid, PixelRect, Position, TileArea};
use crate::obstacle::ObstacleSet;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default playfield width in pixels.
pub const DEFAULT_WIDTH_PX: u32 = 640;

/// Default playfield height in pixels.
pub const DEFAULT_HEIGHT_PX: u32 = 440;

/// Default tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u16 = 20;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Score deducted when resuming after an obstacle hit.
pub const DEFAULT_OBSTACLE_PENALTY: u32 = 10;

/// Score step that spawns bonus food.
pub const DEFAULT_BONUS_INTERVAL: u32 = 5;

/// Bonus food lifetime in milliseconds.
pub const DEFAULT_BONUS_DURATION_MS: u64 = 7000;

/// Delay between game over and the automatic restart.
pub const DEFAULT_RESET_DELAY_MS: u64 = 1500;

/// How long an uneaten apple stays put in the endless preset.
pub const ENDLESS_FOOD_RELOCATE_MS: u64 = 4000;

/// What a self hit does.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfCollisionPolicy {
    #[default]
    GameOver,
    /// Report the score and start over at once, without a game-over phase.
    Reset,
}

/// What happens once a game is over.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverAction {
    #[default]
    Exit,
    Restart,
}

/// Bonus food settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct BonusConfig {
    pub interval: u32,
    pub duration_ms: u64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_BONUS_INTERVAL,
            duration_ms: DEFAULT_BONUS_DURATION_MS,
        }
    }
}

/// Built-in session presets.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum Variant {
    /// Lethal walls, one apple.
    #[default]
    Classic,
    /// Classic plus two bars that pause the game when hit.
    Obstacles,
    /// Walls wrap around to the opposite edge.
    Wrap,
    /// Large field with timed bonus food.
    Bonus,
    /// Self hits restart the game silently; apples wander.
    Endless,
}

/// Session parameters, fixed once a game starts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    pub width_px: u32,
    pub height_px: u32,
    pub tile_size: u16,
    pub wall_policy: WallPolicy,
    pub self_collision: SelfCollisionPolicy,
    pub on_game_over: GameOverAction,
    pub reset_delay_ms: u64,
    pub tick_interval_ms: u64,
    /// Start tile; the grid centre when unset.
    pub start: Option<Position>,
    pub obstacles: Vec<PixelRect>,
    pub bonus: Option<BonusConfig>,
    /// Food only appears on tiles completely inside this rectangle.
    pub spawn_area: Option<PixelRect>,
    /// Uneaten normal food moves after this many milliseconds.
    pub food_relocate_ms: Option<u64>,
    pub obstacle_penalty: u32,
    pub max_spawn_attempts: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Classic)
    }
}

impl GameConfig {
    /// Returns the preset for `variant`.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        let classic = Self {
            width_px: DEFAULT_WIDTH_PX,
            height_px: DEFAULT_HEIGHT_PX,
            tile_size: DEFAULT_TILE_SIZE,
            wall_policy: WallPolicy::Fatal,
            self_collision: SelfCollisionPolicy::GameOver,
            on_game_over: GameOverAction::Exit,
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            start: None,
            obstacles: Vec::new(),
            bonus: None,
            spawn_area: None,
            food_relocate_ms: None,
            obstacle_penalty: DEFAULT_OBSTACLE_PENALTY,
            max_spawn_attempts: DEFAULT_MAX_SPAWN_ATTEMPTS,
            seed: None,
        };

        match variant {
            Variant::Classic => classic,
            Variant::Obstacles => {
                let (w, h) = (DEFAULT_WIDTH_PX, DEFAULT_HEIGHT_PX);
                let tile = u32::from(DEFAULT_TILE_SIZE);
                Self {
                    start: Some(Position::new(0, (h / 2 / tile) as i32)),
                    obstacles: vec![
                        PixelRect::new((w / 4) as i32, (h / 4) as i32, tile * 5, tile),
                        PixelRect::new((w / 2) as i32, (h / 2) as i32, tile, tile * 5),
                    ],
                    ..classic
                }
            }
            Variant::Wrap => Self {
                wall_policy: WallPolicy::Wrap,
                ..classic
            },
            Variant::Bonus => Self {
                width_px: 1080,
                height_px: 720,
                tick_interval_ms: 100,
                start: Some(Position::new(3, 3)),
                bonus: Some(BonusConfig::default()),
                // Leaves a band for the score along the bottom edge.
                spawn_area: Some(PixelRect::new(20, 60, 1040, 560)),
                ..classic
            },
            Variant::Endless => Self {
                self_collision: SelfCollisionPolicy::Reset,
                on_game_over: GameOverAction::Restart,
                food_relocate_ms: Some(ENDLESS_FOOD_RELOCATE_MS),
                ..classic
            },
        }
    }

    /// Checks every parameter that would make the session unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        let tile = u32::from(self.tile_size);
        let max_px = i32::MAX.unsigned_abs();
        let max_tiles = u32::from(u16::MAX);
        if self.width_px > max_px
            || self.height_px > max_px
            || self.width_px / tile > max_tiles
            || self.height_px / tile > max_tiles
        {
            return Err(ConfigError::GridTooLarge {
                width: self.width_px,
                height: self.height_px,
            });
        }

        if self.width_px % tile != 0 || self.height_px % tile != 0 {
            return Err(ConfigError::UnalignedGrid {
                width: self.width_px,
                height: self.height_px,
                tile_size: self.tile_size,
            });
        }

        let grid = self.grid();
        if grid.size().total_cells() == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.bonus.is_some_and(|bonus| bonus.interval == 0) {
            return Err(ConfigError::ZeroBonusInterval);
        }

        let start = self.start_tile();
        if !grid.contains(start) {
            return Err(ConfigError::StartOutsideGrid {
                x: start.x,
                y: start.y,
            });
        }

        if self.obstacle_set().covers(start) {
            return Err(ConfigError::StartOnObstacle {
                x: start.x,
                y: start.y,
            });
        }

        if self.spawn_tiles().is_some_and(TileArea::is_empty) {
            return Err(ConfigError::EmptySpawnArea);
        }

        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::from_pixels(self.width_px, self.height_px, self.tile_size)
    }

    #[must_use]
    pub fn obstacle_set(&self) -> ObstacleSet {
        ObstacleSet::new(self.obstacles.clone(), self.grid())
    }

    #[must_use]
    pub fn start_tile(&self) -> Position {
        self.start.unwrap_or_else(|| {
            let size = self.grid().size();
            Position::new(i32::from(size.width / 2), i32::from(size.height / 2))
        })
    }

    /// Tiles food may appear on; the whole grid when unset.
    #[must_use]
    pub fn spawn_tiles(&self) -> Option<TileArea> {
        self.spawn_area.map(|rect| self.grid().area_within(rect))
    }

    #[must_use]
    pub fn food_relocate_interval(&self) -> Option<Duration> {
        self.food_relocate_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    #[must_use]
    pub fn bonus_rule(&self) -> Option<BonusRule> {
        self.bonus.map(|bonus| BonusRule {
            interval: bonus.interval,
            duration: Duration::from_millis(bonus.duration_ms),
        })
    }

    /// Applies every field set in `overrides`.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            width_px,
            height_px,
            tile_size,
            wall_policy,
            self_collision,
            on_game_over,
            reset_delay_ms,
            tick_interval_ms,
            start,
            obstacles,
            bonus,
            spawn_area,
            food_relocate_ms,
            obstacle_penalty,
            max_spawn_attempts,
            seed,
        } = overrides;

        set_if_some(&mut self.width_px, width_px);
        set_if_some(&mut self.height_px, height_px);
        set_if_some(&mut self.tile_size, tile_size);
        set_if_some(&mut self.wall_policy, wall_policy);
        set_if_some(&mut self.self_collision, self_collision);
        set_if_some(&mut self.on_game_over, on_game_over);
        set_if_some(&mut self.reset_delay_ms, reset_delay_ms);
        set_if_some(&mut self.tick_interval_ms, tick_interval_ms);
        set_if_some(&mut self.obstacles, obstacles);
        set_if_some(&mut self.obstacle_penalty, obstacle_penalty);
        set_if_some(&mut self.max_spawn_attempts, max_spawn_attempts);

        if start.is_some() {
            self.start = start;
        }
        if let Some(bonus) = bonus {
            self.bonus = bonus.into_config();
        }
        if spawn_area.is_some() {
            self.spawn_area = spawn_area;
        }
        // Zero turns relocation off.
        if let Some(ms) = food_relocate_ms {
            self.food_relocate_ms = (ms > 0).then_some(ms);
        }
        if seed.is_some() {
            self.seed = seed;
        }
    }
}

fn set_if_some<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Bonus setting in a config file: `false` disables bonus food, `true`
/// enables the defaults, an object sets both values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BonusSetting {
    Enabled(bool),
    Custom(BonusConfig),
}

impl BonusSetting {
    fn into_config(self) -> Option<BonusConfig> {
        match self {
            Self::Enabled(false) => None,
            Self::Enabled(true) => Some(BonusConfig::default()),
            Self::Custom(bonus) => Some(bonus),
        }
    }
}

/// Partial configuration layered over a preset.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
    pub tile_size: Option<u16>,
    pub wall_policy: Option<WallPolicy>,
    pub self_collision: Option<SelfCollisionPolicy>,
    pub on_game_over: Option<GameOverAction>,
    pub reset_delay_ms: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub start: Option<Position>,
    pub obstacles: Option<Vec<PixelRect>>,
    pub bonus: Option<BonusSetting>,
    pub spawn_area: Option<PixelRect>,
    pub food_relocate_ms: Option<u64>,
    pub obstacle_penalty: Option<u32>,
    pub max_spawn_attempts: Option<u32>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Parses overrides from a JSON document.
    pub fn from_json(path: &Path, raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads overrides from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &raw)
    }
}

/// Returns the platform-specific default config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
