use crate::foundation::core::Viewport;

/// Upper bound for rows and for columns, so a grid never exceeds
/// `MAX_GRID_AXIS * MAX_GRID_AXIS` tiles however large the viewport is.
pub const MAX_GRID_AXIS: u32 = 512;

/// Inputs of the layout calculator that do not come from the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutParams {
    /// Gap between tiles and around the grid, in pixels.
    pub padding: u32,
    /// Height a tile should have when the row count is derived from the viewport.
    pub target_item_height: u32,
    /// Tile width divided by tile height.
    pub aspect_ratio: f64,
    /// Fixed row count; values below 1 are ignored, values above [`MAX_GRID_AXIS`]
    /// are capped.
    pub rows: Option<u32>,
}

/// Number of rows and columns of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GridShape {
    /// Row count, in `1..=MAX_GRID_AXIS`.
    pub rows: u32,
    /// Column count, in `1..=MAX_GRID_AXIS`.
    pub columns: u32,
}

impl GridShape {
    /// Total tile count (`rows * columns`), saturating.
    pub fn tile_count(self) -> usize {
        (self.rows as usize).saturating_mul(self.columns as usize)
    }
}

/// Computed grid layout for one viewport/config pair.
///
/// Layouts are recomputed wholesale whenever the viewport or configuration changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    /// Row count, in `1..=MAX_GRID_AXIS`.
    pub rows: u32,
    /// Column count, in `1..=MAX_GRID_AXIS`.
    pub columns: u32,
    /// Tile width divided by tile height.
    pub item_aspect_ratio: f64,
    /// Gap between tiles and around the grid, in pixels.
    pub padding: u32,
    /// Rendered tile width in pixels (0 when the viewport is too small).
    pub item_width: f64,
    /// Rendered tile height in pixels (0 when the viewport is too small).
    pub item_height: f64,
}

impl Layout {
    /// Row/column pair of this layout.
    pub fn shape(&self) -> GridShape {
        GridShape {
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Total tile count.
    pub fn tile_count(&self) -> usize {
        self.shape().tile_count()
    }
}

/// Fit as many tiles of the target height and aspect ratio as the viewport allows.
///
/// One extra column is always added so a partially visible column covers the right
/// edge instead of leaving a gap. Degenerate inputs (empty viewport, non-positive
/// tile width, non-finite ratios) clamp both axes to 1; huge viewports or row
/// overrides clamp them to [`MAX_GRID_AXIS`].
pub fn compute_layout(viewport: Viewport, params: &LayoutParams) -> Layout {
    let vp = viewport.sanitized();
    let pad = f64::from(params.padding);
    let target = f64::from(params.target_item_height.max(1));

    let usable_h = vp.height - 2.0 * pad;
    let rows = match params.rows {
        Some(fixed) if fixed >= 1 => fixed.min(MAX_GRID_AXIS),
        _ => clamp_axis(((usable_h + pad) / (target + pad)).round()),
    };

    let item_h = ((usable_h - pad * f64::from(rows - 1)) / f64::from(rows)).floor();
    let item_w = (item_h * params.aspect_ratio).floor();

    let usable_w = vp.width - 2.0 * pad;
    let columns = if item_w > 0.0 {
        clamp_axis((usable_w / item_w).floor() + 1.0)
    } else {
        1
    };

    Layout {
        rows,
        columns,
        item_aspect_ratio: params.aspect_ratio,
        padding: params.padding,
        item_width: if item_w.is_finite() { item_w.max(0.0) } else { 0.0 },
        item_height: item_h.max(0.0),
    }
}

fn clamp_axis(v: f64) -> u32 {
    if !v.is_finite() || v < 1.0 {
        1
    } else if v >= f64::from(MAX_GRID_AXIS) {
        MAX_GRID_AXIS
    } else {
        v as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/calc.rs"]
mod tests;
