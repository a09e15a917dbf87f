/// Easing curve of the flip rotation.
///
/// `Linear` turns at constant speed, `OutCubic` snaps over and slows into the new
/// face, `InOutCubic` (the default) starts and lands softly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Ease {
    /// Map linear progress `t` to eased progress. `t` is clamped to `0..=1`; NaN reads as 0.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - cube(1.0 - t),
            Self::InOutCubic if t < 0.5 => 4.0 * cube(t),
            Self::InOutCubic => 1.0 - 4.0 * cube(1.0 - t),
        }
    }

    /// Eased progress of a transition that started `elapsed_ms` ago and lasts `duration_ms`.
    pub fn progress(self, elapsed_ms: u64, duration_ms: u64) -> f64 {
        if duration_ms == 0 {
            return 1.0;
        }
        self.apply(elapsed_ms as f64 / duration_ms as f64)
    }
}

fn cube(x: f64) -> f64 {
    x * x * x
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
