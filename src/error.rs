use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Session configuration rejected before a game is created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tile size must be greater than zero")]
    ZeroTileSize,
    #[error("grid of {width}×{height} px is not a whole number of {tile_size} px tiles")]
    UnalignedGrid {
        width: u32,
        height: u32,
        tile_size: u16,
    },
    #[error("grid must be at least one tile wide and high")]
    EmptyGrid,
    #[error("grid of {width}×{height} px is too large")]
    GridTooLarge { width: u32, height: u32 },
    #[error("food spawn area holds no whole tile")]
    EmptySpawnArea,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("bonus milestone interval must be greater than zero")]
    ZeroBonusInterval,
    #[error("start tile ({x}, {y}) is outside the grid")]
    StartOutsideGrid { x: i32, y: i32 },
    #[error("start tile ({x}, {y}) is covered by an obstacle")]
    StartOnObstacle { x: i32, y: i32 },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Food placement failed.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SpawnError {
    #[error("no free tile found after {attempts} attempts; grid too small for the snake")]
    NoFreeTile { attempts: u32 },
}

/// Any failure surfaced by a running session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("collaborator I/O failed: {0}")]
    Io(#[from] io::Error),
}
