use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animation::scheduler::{AnimationScheduler, Due, TickOutcome};
use crate::config::wall::WallConfig;
use crate::foundation::core::{Millis, Viewport, Visibility};
use crate::foundation::error::WallResult;
use crate::grid::state::{FlipStyle, Grid, TileKey, TileView};
use crate::item::{Item, dedup_items};
use crate::layout::calc::{Layout, compute_layout};
use crate::pool::reserve::{self, ReservePool};
use crate::wall::events::{WallEvent, WallEventKind};

/// The flip-tile wall: layout, grid, reserve pool and flip scheduler behind one
/// single-threaded owner.
///
/// Every mutating call carries the current timeline position. The wall first runs
/// whatever timer work fell due up to that point (flip completions before a tick
/// due at the same instant), then applies the call. Calls with a `now` earlier than
/// the last one seen do not move time backwards.
#[derive(Debug)]
pub struct Wall {
    config: WallConfig,
    viewport: Viewport,
    visibility: Visibility,
    layout: Layout,
    items: Vec<Arc<Item>>,
    grid: Grid,
    pool: ReservePool,
    scheduler: AnimationScheduler,
    rng: StdRng,
    now: Millis,
    events: Vec<WallEvent>,
}

/// Serializable render state of the whole wall at one instant.
#[derive(Clone, Debug, serde::Serialize)]
pub struct WallSnapshot<'a> {
    pub at: Millis,
    pub generation: u64,
    pub layout: Layout,
    pub visibility: Visibility,
    pub reserve: usize,
    pub tiles: Vec<TileView<'a>>,
}

impl Wall {
    /// Create an empty wall for `viewport`. The layout is computed immediately; the
    /// grid stays empty until items arrive.
    pub fn new(config: WallConfig, viewport: Viewport) -> WallResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let layout = compute_layout(viewport, &config.layout_params());
        tracing::debug!(rows = layout.rows, columns = layout.columns, "initial layout");

        Ok(Self {
            scheduler: AnimationScheduler::new(config.timings()),
            config,
            viewport,
            visibility: Visibility::Visible,
            layout,
            items: Vec::new(),
            grid: Grid::empty(0),
            pool: ReservePool::new(),
            rng,
            now: Millis::ZERO,
            events: Vec::new(),
        })
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pool(&self) -> &ReservePool {
        &self.pool
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Unique items the current grid was built from.
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<WallEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render state at the wall's current time.
    pub fn snapshot(&self) -> WallSnapshot<'_> {
        WallSnapshot {
            at: self.now,
            generation: self.grid.generation(),
            layout: self.layout,
            visibility: self.visibility,
            reserve: self.pool.len(),
            tiles: self.grid.views(self.now, self.flip_style()),
        }
    }

    fn flip_style(&self) -> FlipStyle {
        FlipStyle {
            aspect_ratio: self.layout.item_aspect_ratio,
            duration_ms: self.config.flip_duration_ms,
            ease: self.config.flip_ease,
        }
    }

    /// Run timer work due up to `now` and move the clock there.
    pub fn advance_to(&mut self, now: Millis) {
        if now < self.now {
            tracing::debug!(now = now.0, current = self.now.0, "ignoring earlier timestamp");
            return;
        }
        while let Some(due) = self.scheduler.next_due(now) {
            self.now = due.at();
            match due {
                Due::Completion(_) => self.run_completion(),
                Due::Tick(at) => self.run_tick(at),
            }
        }
        self.now = now;
    }

    fn run_completion(&mut self) {
        let Some(c) = self.scheduler.pop_completion() else {
            return;
        };
        if self.grid.settle(c.generation, c.index, c.serial) {
            tracing::debug!(index = c.index, at = c.due.0, "flip settled");
            self.push(WallEventKind::FlipSettled {
                key: TileKey {
                    generation: c.generation,
                    index: c.index,
                },
            });
        }
    }

    fn run_tick(&mut self, at: Millis) {
        let outcome = self
            .scheduler
            .tick(at, &mut self.grid, &mut self.pool, &mut self.rng);
        match outcome {
            TickOutcome::EmptyGrid => tracing::debug!(at = at.0, "tick skipped: empty grid"),
            TickOutcome::Aborted => tracing::debug!(at = at.0, "tick skipped: reserve underflow"),
            TickOutcome::Halted => {
                tracing::warn!(
                    generation = self.grid.generation(),
                    "reserve exhausted; cannot sustain flip animation"
                );
                self.push(WallEventKind::AnimationHalted {
                    generation: self.grid.generation(),
                });
            }
            TickOutcome::Flipped {
                key,
                shown,
                returned,
            } => self.push(WallEventKind::Flipped {
                key,
                shown,
                returned,
            }),
        }
    }

    /// Replace the item source. Always rebuilds the grid and reserve.
    #[tracing::instrument(skip(self, items))]
    pub fn replace_items(&mut self, items: Vec<Item>, now: Millis) {
        self.advance_to(now);
        let (items, dropped) = dedup_items(items);
        if dropped > 0 {
            tracing::debug!(dropped, "dropped items with repeated ids");
        }
        self.items = items;
        self.rebuild();
    }

    /// Viewport resized: recompute the layout, rebuild only if rows or columns changed.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport, now: Millis) {
        self.advance_to(now);
        self.viewport = viewport;
        self.relayout();
    }

    /// Install a new configuration. Layout is recomputed; the grid is rebuilt only if
    /// the shape changed.
    ///
    /// A `seed` that differs from the current one re-seeds the random source before
    /// any rebuild. Clearing the seed keeps the current random source.
    pub fn set_config(&mut self, config: WallConfig, now: Millis) -> WallResult<()> {
        config.validate()?;
        self.advance_to(now);
        if let Some(seed) = config.seed
            && config.seed != self.config.seed
        {
            tracing::debug!(seed, "random source reseeded");
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.scheduler.set_timings(config.timings());
        self.config = config;
        self.relayout();
        Ok(())
    }

    /// Hidden stops the flip timer; visible restarts it from a fresh interval.
    pub fn set_visibility(&mut self, visibility: Visibility, now: Millis) {
        self.advance_to(now);
        if visibility == self.visibility {
            return;
        }
        self.visibility = visibility;
        match visibility {
            Visibility::Hidden => self.scheduler.stop(),
            Visibility::Visible => {
                if !self.grid.is_empty() {
                    self.scheduler.restart(self.now, &mut self.rng);
                }
            }
        }
        tracing::debug!(?visibility, "visibility changed");
        self.push(WallEventKind::VisibilityChanged { visibility });
    }

    fn relayout(&mut self) {
        let layout = compute_layout(self.viewport, &self.config.layout_params());
        let shape_changed = layout.shape() != self.layout.shape();
        self.layout = layout;
        if shape_changed {
            tracing::debug!(rows = layout.rows, columns = layout.columns, "grid shape changed");
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        let generation = self.grid.generation().wrapping_add(1);
        let tiles = self.layout.tile_count();

        if self.items.is_empty() {
            self.grid = Grid::empty(generation);
            self.pool = ReservePool::new();
        } else {
            let partition = reserve::initialize(&self.items, tiles, &mut self.rng);
            if let Some(shortfall) = partition.shortfall {
                tracing::warn!(
                    items = shortfall.items,
                    tiles = shortfall.tiles,
                    blank_tiles = shortfall.leaves_blank_tiles(),
                    "not enough items to fill the grid and keep one in reserve"
                );
                self.push(WallEventKind::InsufficientItems {
                    items: shortfall.items,
                    tiles: shortfall.tiles,
                });
            }
            self.grid = Grid::from_fronts(generation, partition.fronts);
            self.pool = partition.reserve;
        }

        self.scheduler.reset_for_new_grid();
        if self.visibility.is_visible() && !self.grid.is_empty() {
            self.scheduler.restart(self.now, &mut self.rng);
        }

        tracing::info!(
            generation,
            rows = self.layout.rows,
            columns = self.layout.columns,
            reserve = self.pool.len(),
            "wall rebuilt"
        );
        self.push(WallEventKind::Rebuilt {
            generation,
            rows: self.layout.rows,
            columns: self.layout.columns,
            tiles: self.grid.len(),
            reserve: self.pool.len(),
        });
    }

    fn push(&mut self, kind: WallEventKind) {
        self.events.push(WallEvent { at: self.now, kind });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wall/engine.rs"]
mod tests;
