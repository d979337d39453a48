use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GanttError, GanttResult};

pub const DEFAULT_LOD_THRESHOLD: f64 = 0.9;
pub const MIN_LOD_THRESHOLD: f64 = 0.8;
pub const MAX_LOD_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderStrategy {
    /// Full-detail retained shapes.
    Vector,
    /// Simplified immediate-mode dots.
    Raster,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LodConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Dead band around the threshold; `0.0` disables it.
    #[serde(default)]
    pub hysteresis: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_LOD_THRESHOLD
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_LOD_THRESHOLD,
            hysteresis: 0.0,
        }
    }
}

impl LodConfig {
    pub fn validate(self) -> GanttResult<Self> {
        if !self.threshold.is_finite()
            || !(MIN_LOD_THRESHOLD..=MAX_LOD_THRESHOLD).contains(&self.threshold)
        {
            return Err(GanttError::InvalidData(format!(
                "lod threshold must be in [{MIN_LOD_THRESHOLD}, {MAX_LOD_THRESHOLD}]"
            )));
        }
        if !self.hysteresis.is_finite()
            || self.hysteresis < 0.0
            || self.hysteresis >= self.threshold
        {
            return Err(GanttError::InvalidData(
                "lod hysteresis must be finite, >= 0 and below the threshold".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// `k < threshold` selects `Raster`, otherwise `Vector`.
#[must_use]
pub fn select_strategy(k: f64, threshold: f64) -> RenderStrategy {
    if k < threshold {
        RenderStrategy::Raster
    } else {
        RenderStrategy::Vector
    }
}

/// Outcome of one LOD evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodDecision {
    pub strategy: RenderStrategy,
    pub changed: bool,
}

/// Tracks the active strategy across zoom updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodSelector {
    config: LodConfig,
    current: RenderStrategy,
}

impl LodSelector {
    pub fn new(config: LodConfig, initial_k: f64) -> GanttResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            current: select_strategy(initial_k, config.threshold),
        })
    }

    #[must_use]
    pub fn config(&self) -> LodConfig {
        self.config
    }

    #[must_use]
    pub fn current(&self) -> RenderStrategy {
        self.current
    }

    /// Strategy for `k` given the current one.
    ///
    /// With a dead band, Vector holds until `k < threshold - hysteresis` and
    /// Raster holds until `k >= threshold + hysteresis`.
    #[must_use]
    pub fn decide(&self, k: f64) -> RenderStrategy {
        let LodConfig {
            threshold,
            hysteresis,
        } = self.config;
        if hysteresis == 0.0 {
            return select_strategy(k, threshold);
        }
        match self.current {
            RenderStrategy::Vector => select_strategy(k, threshold - hysteresis),
            RenderStrategy::Raster => select_strategy(k, threshold + hysteresis),
        }
    }

    pub fn update(&mut self, k: f64) -> LodDecision {
        let strategy = self.decide(k);
        let changed = strategy != self.current;
        if changed {
            debug!(from = ?self.current, to = ?strategy, k, "lod strategy switch");
            self.current = strategy;
        }
        LodDecision { strategy, changed }
    }
}

#[cfg(test)]
mod tests {
    use super::{LodConfig, LodSelector, RenderStrategy};

    #[test]
    fn dead_band_holds_current_strategy() {
        let config = LodConfig {
            threshold: 0.9,
            hysteresis: 0.05,
        };
        let mut selector = LodSelector::new(config, 1.0).expect("selector");
        assert_eq!(selector.update(0.87).strategy, RenderStrategy::Vector);
        assert_eq!(selector.update(0.84).strategy, RenderStrategy::Raster);
        assert_eq!(selector.update(0.92).strategy, RenderStrategy::Raster);
        assert_eq!(selector.update(0.95).strategy, RenderStrategy::Vector);
    }

    #[test]
    fn threshold_outside_range_is_rejected() {
        let config = LodConfig {
            threshold: 0.5,
            hysteresis: 0.0,
        };
        assert!(config.validate().is_err());
    }
}
