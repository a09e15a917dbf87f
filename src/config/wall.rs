use crate::animation::ease::Ease;
use crate::animation::scheduler::SchedulerTimings;
use crate::config::params::WallParams;
use crate::foundation::error::{WallError, WallResult};
use crate::layout::calc::{LayoutParams, MAX_GRID_AXIS};

/// Engine configuration.
///
/// Every field has a default, so `{}` is a valid JSON config. Values coming from
/// hash parameters are merged in with [`WallConfig::with_params`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WallConfig {
    /// Tile width divided by tile height.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
    /// Gap between tiles and around the grid, in pixels.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Fixed row count; derived from the viewport when unset.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Preferred tile height used to derive the row count.
    #[serde(default = "default_target_item_height")]
    pub target_item_height: u32,
    /// Base delay between flips.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Random extra delay per flip, exclusive upper bound.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
    /// Length of one flip transition.
    #[serde(default = "default_flip_duration_ms")]
    pub flip_duration_ms: u64,
    /// Easing of the flip rotation.
    #[serde(default)]
    pub flip_ease: Ease,
    /// Seed for shuffling and tile picking; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_aspect_ratio() -> f64 {
    2.0 / 3.0
}

fn default_padding() -> u32 {
    6
}

fn default_target_item_height() -> u32 {
    240
}

fn default_interval_ms() -> u64 {
    3_000
}

fn default_jitter_ms() -> u64 {
    500
}

fn default_flip_duration_ms() -> u64 {
    800
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            padding: default_padding(),
            rows: None,
            target_item_height: default_target_item_height(),
            interval_ms: default_interval_ms(),
            jitter_ms: default_jitter_ms(),
            flip_duration_ms: default_flip_duration_ms(),
            flip_ease: Ease::default(),
            seed: None,
        }
    }
}

impl WallConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> WallResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> WallResult<()> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(WallError::config(format!(
                "aspect_ratio must be a positive number, got {}",
                self.aspect_ratio
            )));
        }
        if let Some(rows) = self.rows
            && !(1..=MAX_GRID_AXIS).contains(&rows)
        {
            return Err(WallError::config(format!(
                "rows must be in 1..={MAX_GRID_AXIS} when set, got {rows}"
            )));
        }
        if self.target_item_height == 0 {
            return Err(WallError::config("target_item_height must be > 0"));
        }
        if self.interval_ms == 0 {
            return Err(WallError::config("interval_ms must be > 0"));
        }
        if self.flip_duration_ms == 0 {
            return Err(WallError::config("flip_duration_ms must be > 0"));
        }
        Ok(())
    }

    /// Override layout fields with the ones present in `params`.
    pub fn with_params(mut self, params: &WallParams) -> Self {
        if let Some(ratio) = params.aspect_ratio {
            self.aspect_ratio = ratio;
        }
        if let Some(rows) = params.rows {
            self.rows = Some(rows);
        }
        if let Some(padding) = params.padding {
            self.padding = padding;
        }
        self
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            padding: self.padding,
            target_item_height: self.target_item_height,
            aspect_ratio: self.aspect_ratio,
            rows: self.rows,
        }
    }

    pub fn timings(&self) -> SchedulerTimings {
        SchedulerTimings {
            interval_ms: self.interval_ms,
            jitter_ms: self.jitter_ms,
            flip_duration_ms: self.flip_duration_ms,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/wall.rs"]
mod tests;
