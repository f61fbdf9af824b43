//! Level configuration.
//!
//! A level bundles everything the caller layers on top of
//! `MatchEngine::start_round(size)`:
//! - Board size (card count)
//! - Time limit for the round
//! - Grid layout hint (column count)
//! - How long a non-matching pair stays face up
//!
//! The engine itself only ever sees `card_count`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Position;
use crate::error::ConfigError;

/// Default time a revealed pair stays face up before resolution.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

/// Configuration for a single level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Human-readable name (for menus/display).
    pub name: String,

    /// Total cards on the board. Must be positive and even.
    pub card_count: usize,

    /// Round time limit in seconds.
    pub time_limit_secs: u64,

    /// Cards per grid row.
    pub columns: usize,

    /// Delay before a revealed pair is resolved, in milliseconds.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

fn default_reveal_delay_ms() -> u64 {
    DEFAULT_REVEAL_DELAY_MS
}

impl LevelConfig {
    /// Create a level with a five minute limit laid out ten cards per row.
    pub fn new(name: impl Into<String>, card_count: usize) -> Self {
        Self {
            name: name.into(),
            card_count,
            time_limit_secs: 5 * 60,
            columns: 10,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }

    /// Level 1: 50 cards, 5 minutes.
    pub fn level_1() -> Self {
        Self::new("Level 1", 50).with_time_limit_secs(5 * 60).with_columns(10)
    }

    /// Level 2: 100 cards, 10 minutes.
    pub fn level_2() -> Self {
        Self::new("Level 2", 100).with_time_limit_secs(10 * 60).with_columns(15)
    }

    /// Level 3: 160 cards, 15 minutes.
    pub fn level_3() -> Self {
        Self::new("Level 3", 160).with_time_limit_secs(15 * 60).with_columns(20)
    }

    /// All built-in levels, easiest first.
    pub fn presets() -> Vec<Self> {
        vec![Self::level_1(), Self::level_2(), Self::level_3()]
    }

    #[must_use]
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_reveal_delay_ms(mut self, ms: u64) -> Self {
        self.reveal_delay_ms = ms;
        self
    }

    /// Check the level can be played.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.card_count == 0 || self.card_count % 2 != 0 {
            return Err(ConfigError::InvalidCardCount {
                name: self.name.clone(),
                count: self.card_count,
            });
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns(self.name.clone()));
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit(self.name.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Number of grid rows, the last one possibly partial.
    ///
    /// Zero when `columns` is zero.
    #[must_use]
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            return 0;
        }
        self.card_count.div_ceil(self.columns)
    }

    /// Grid cell `(row, column)` of a position, row-major.
    ///
    /// Returns `None` for positions off the board or when `columns` is zero.
    #[must_use]
    pub fn grid_cell(&self, position: Position) -> Option<(usize, usize)> {
        if self.columns == 0 || !position.is_on_board(self.card_count) {
            return None;
        }
        Some((position.index() / self.columns, position.index() % self.columns))
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::level_1()
    }
}
