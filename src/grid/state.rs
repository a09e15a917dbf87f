use std::sync::Arc;

use crate::animation::ease::Ease;
use crate::foundation::core::Millis;
use crate::item::{Item, ItemId};

/// Positional key of a tile.
///
/// `index` runs `0..N` inside one grid; `generation` changes on every rebuild, so a
/// key is never reused across rebuilds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TileKey {
    pub generation: u64,
    pub index: usize,
}

/// One grid cell with two faces.
#[derive(Clone, Debug)]
pub struct Tile {
    pub key: TileKey,
    pub front: Option<Arc<Item>>,
    pub back: Option<Arc<Item>>,
    pub is_flipped: bool,
    pub is_transitioning: bool,
    /// Start of the running (or last) flip.
    pub flip_started: Option<Millis>,
    /// Incremented on every flip; deferred completions must match it.
    pub flip_serial: u64,
}

impl Tile {
    fn new(key: TileKey, front: Option<Arc<Item>>) -> Self {
        Self {
            key,
            front,
            back: None,
            is_flipped: false,
            is_transitioning: false,
            flip_started: None,
            flip_serial: 0,
        }
    }

    /// The face currently shown: `back` when flipped, otherwise `front`.
    pub fn visible(&self) -> Option<&Arc<Item>> {
        if self.is_flipped {
            self.back.as_ref()
        } else {
            self.front.as_ref()
        }
    }

    fn hidden_slot(&mut self) -> &mut Option<Arc<Item>> {
        if self.is_flipped {
            &mut self.front
        } else {
            &mut self.back
        }
    }
}

/// What a flip did to a tile.
#[derive(Clone, Debug)]
pub struct FlipOutcome {
    /// The item that was visible before the flip, if any.
    pub outgoing: Option<Arc<Item>>,
    /// Serial the deferred completion must present.
    pub serial: u64,
}

/// Ordered tiles of one grid generation; the single render source.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    generation: u64,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a fresh grid: one tile per front, keys `0..fronts.len()`, flags cleared.
    pub fn from_fronts(generation: u64, fronts: Vec<Option<Arc<Item>>>) -> Self {
        let tiles = fronts
            .into_iter()
            .enumerate()
            .map(|(index, front)| Tile::new(TileKey { generation, index }, front))
            .collect();
        Self { generation, tiles }
    }

    /// A grid with no tiles.
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            tiles: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Ids shown right now, one per tile that has a visible item.
    pub fn visible_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.tiles
            .iter()
            .filter_map(|t| t.visible().map(|item| &item.id))
    }

    /// Stage `incoming` on the hidden face and turn the tile over in one update.
    ///
    /// Returns `None` when `index` is out of range.
    pub(crate) fn flip(
        &mut self,
        index: usize,
        incoming: Arc<Item>,
        now: Millis,
    ) -> Option<FlipOutcome> {
        let tile = self.tiles.get_mut(index)?;
        let outgoing = tile.visible().cloned();
        *tile.hidden_slot() = Some(incoming);
        tile.is_flipped = !tile.is_flipped;
        tile.is_transitioning = true;
        tile.flip_started = Some(now);
        tile.flip_serial = tile.flip_serial.wrapping_add(1);
        Some(FlipOutcome {
            outgoing,
            serial: tile.flip_serial,
        })
    }

    /// Finish a flip: clear `is_transitioning` and drop the face that turned away.
    ///
    /// No-op (returns `false`) when the completion belongs to another generation,
    /// the tile has flipped again since, or the flip is already settled.
    pub(crate) fn settle(&mut self, generation: u64, index: usize, serial: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        let Some(tile) = self.tiles.get_mut(index) else {
            return false;
        };
        if tile.flip_serial != serial || !tile.is_transitioning {
            return false;
        }
        tile.is_transitioning = false;
        *tile.hidden_slot() = None;
        true
    }

    /// Render views of every tile at `now`.
    pub fn views(&self, now: Millis, style: FlipStyle) -> Vec<TileView<'_>> {
        self.tiles.iter().map(|t| TileView::of(t, now, style)).collect()
    }
}

/// Presentation parameters needed to derive per-tile render state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipStyle {
    pub aspect_ratio: f64,
    pub duration_ms: u64,
    pub ease: Ease,
}

/// Everything a presentation layer needs to draw one tile.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TileView<'a> {
    pub key: TileKey,
    pub front: Option<&'a Item>,
    pub back: Option<&'a Item>,
    pub visible: Option<&'a Item>,
    pub is_flipped: bool,
    pub is_transitioning: bool,
    pub aspect_ratio: f64,
    /// Y-axis rotation of the card: 0 shows the front, 180 shows the back.
    pub rotation_deg: f64,
}

impl<'a> TileView<'a> {
    fn of(tile: &'a Tile, now: Millis, style: FlipStyle) -> Self {
        let settled = if tile.is_flipped { 180.0 } else { 0.0 };
        let rotation_deg = match (tile.is_transitioning, tile.flip_started) {
            (true, Some(started)) => {
                let p = style.ease.progress(now.since(started), style.duration_ms);
                if tile.is_flipped { 180.0 * p } else { 180.0 * (1.0 - p) }
            }
            _ => settled,
        };
        Self {
            key: tile.key,
            front: tile.front.as_deref(),
            back: tile.back.as_deref(),
            visible: tile.visible().map(Arc::as_ref),
            is_flipped: tile.is_flipped,
            is_transitioning: tile.is_transitioning,
            aspect_ratio: style.aspect_ratio,
            rotation_deg,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/state.rs"]
mod tests;
