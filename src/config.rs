use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_STEP_DELAY_MS: u64 = 50;

/// Fixed settings of a [Pathfinder](crate::Pathfinder). Dimensions cannot change
/// once a grid has been built from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PathfinderConfig {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Pause between two visitation events when a search is replayed.
    pub step_delay_ms: u64,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        PathfinderConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
        }
    }
}

impl PathfinderConfig {
    pub fn new(rows: usize, cols: usize) -> PathfinderConfig {
        PathfinderConfig {
            rows,
            cols,
            ..Default::default()
        }
    }

    pub fn with_step_delay_ms(mut self, step_delay_ms: u64) -> PathfinderConfig {
        self.step_delay_ms = step_delay_ms;
        self
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_board() {
        let config = PathfinderConfig::default();
        assert_eq!((config.rows, config.cols), (20, 20));
        assert_eq!(config.step_delay(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            PathfinderConfig::new(0, 5).validate(),
            Err(ConfigError::ZeroDimension { rows: 0, cols: 5 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PathfinderConfig = serde_json::from_str(r#"{"rows": 8}"#).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.step_delay_ms, DEFAULT_STEP_DELAY_MS);
    }
}
