use super::driver::SpeedTier;
use std::time::Duration;
use thiserror::Error;

/// How long a held directional key waits between successive unit moves of
/// the selected instance.
pub const DEFAULT_MOVE_REPEAT: Duration = Duration::from_millis(50);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Parameters of one sandbox session. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub speed: SpeedTier,
    pub move_repeat: Duration,
}

#[derive(Default)]
pub struct SessionConfigBuilder {
    rows: Option<usize>,
    cols: Option<usize>,
    speed: Option<SpeedTier>,
    move_repeat: Option<Duration>,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn speed(mut self, speed: SpeedTier) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn move_repeat(mut self, delay: Duration) -> Self {
        self.move_repeat = Some(delay);
        self
    }

    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig {
            rows: self.rows.ok_or(ConfigError::MissingParameter("rows"))?,
            cols: self.cols.ok_or(ConfigError::MissingParameter("cols"))?,
            speed: self.speed.ok_or(ConfigError::MissingParameter("speed"))?,
            move_repeat: self.move_repeat.unwrap_or(DEFAULT_MOVE_REPEAT),
        })
    }
}
