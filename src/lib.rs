//! tilewall renders a viewport-filling grid of collection images and keeps it alive
//! by turning one random tile over every few seconds.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: `Viewport + WallConfig -> Layout` (rows, columns, tile size)
//! 2. **Partition**: shuffled items -> one front per tile + a reserve pool
//! 3. **Flip loop**: a jittered timer swaps a reserved item onto a random tile and
//!    settles the transition after the flip duration
//! 4. **Render**: `Wall::snapshot` exposes per-tile faces, flags and rotation
//!
//! The engine is single-threaded and clock-free: callers pass the current timeline
//! position ([`Millis`]) into every mutating call, which makes sessions reproducible
//! given a seed.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod foundation;
mod grid;
mod item;
mod layout;
mod pool;
mod source;
mod wall;

pub use animation::ease::Ease;
pub use animation::scheduler::{
    AnimationScheduler, Completion, Due, SchedulerTimings, TickOutcome,
};
pub use config::params::{WallParams, parse_number};
pub use config::wall::WallConfig;
pub use foundation::core::{Millis, Viewport, Visibility};
pub use foundation::error::{WallError, WallResult};
pub use grid::state::{FlipOutcome, FlipStyle, Grid, Tile, TileKey, TileView};
pub use item::{Item, ItemId, dedup_items};
pub use layout::calc::{GridShape, Layout, LayoutParams, MAX_GRID_AXIS, compute_layout};
pub use pool::reserve::{Partition, ReservePool, Shortfall, initialize as partition_items};
pub use source::collection::{
    CollectionPage, CollectionQuery, CollectionType, DEFAULT_LIMIT, SubjectType,
    parse_collection_response, parse_item_list, subject_url,
};
pub use wall::engine::{Wall, WallSnapshot};
pub use wall::events::{WallEvent, WallEventKind};
pub use wall::watch::{ScriptedEvent, WatchEvent, WatchScript};
