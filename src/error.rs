//! Configuration errors
//!
//! The only fallible path in the game: bad settings are rejected before a
//! game state is ever built.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroGridDimension { width: u32, height: u32 },
    #[error("grid {width}x{height} has no room for both snake and food")]
    BoardTooSmall { width: u32, height: u32 },
    #[error("grid dimension {0} exceeds the coordinate range")]
    GridTooLarge(u32),
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
    #[error("cannot read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}
