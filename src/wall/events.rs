use crate::foundation::core::{Millis, Visibility};
use crate::grid::state::TileKey;
use crate::item::ItemId;

/// Something observable that happened on the wall, stamped with its timeline position.
///
/// Events queue up inside the [`crate::Wall`] and are handed out by
/// [`crate::Wall::drain_events`]; nothing is replayed after a drain.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WallEvent {
    pub at: Millis,
    #[serde(flatten)]
    pub kind: WallEventKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WallEventKind {
    /// Grid and reserve were rebuilt from scratch.
    Rebuilt {
        generation: u64,
        rows: u32,
        columns: u32,
        tiles: usize,
        reserve: usize,
    },
    /// The item source cannot fill every tile and keep one item in reserve.
    InsufficientItems { items: usize, tiles: usize },
    /// A tile was turned over to show `shown`; `returned` went back to the reserve.
    Flipped {
        key: TileKey,
        shown: ItemId,
        returned: Option<ItemId>,
    },
    /// The transition of a flipped tile finished.
    FlipSettled { key: TileKey },
    /// The reserve is empty; no more flips until the grid is rebuilt.
    AnimationHalted { generation: u64 },
    /// Document visibility changed; the flip timer stopped or restarted.
    VisibilityChanged { visibility: Visibility },
}
