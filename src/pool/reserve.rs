use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::item::{Item, ItemId};

/// Items that are not visible on any tile and can be swapped in.
///
/// Entries are keyed by [`ItemId`]; iteration and [`ReservePool::take_one`] follow
/// insertion order, so a pool filled from a shuffled list hands items out in that
/// shuffled order and returned items queue up behind it.
#[derive(Clone, Debug, Default)]
pub struct ReservePool {
    order: VecDeque<Arc<Item>>,
    ids: HashSet<ItemId>,
}

impl ReservePool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the first available item.
    pub fn take_one(&mut self) -> Option<Arc<Item>> {
        let item = self.order.pop_front()?;
        self.ids.remove(&item.id);
        Some(item)
    }

    /// Put an item back. Returns `false` (and changes nothing) if its id is already
    /// in the pool.
    pub fn give_back(&mut self, item: Arc<Item>) -> bool {
        if !self.ids.insert(item.id.clone()) {
            return false;
        }
        self.order.push_back(item);
        true
    }

    /// Number of reserved items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Return `true` when nothing can be swapped in.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Return `true` when `id` is reserved.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Reserved ids in hand-out order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.order.iter().map(|item| &item.id)
    }
}

/// Result of splitting an item list into initial tile fronts and the reserve pool.
#[derive(Clone, Debug)]
pub struct Partition {
    /// One entry per tile, in tile order. `None` when the source ran out.
    pub fronts: Vec<Option<Arc<Item>>>,
    /// Everything that did not land on a tile.
    pub reserve: ReservePool,
    /// Set when the source cannot both fill every tile and keep one item in reserve.
    pub shortfall: Option<Shortfall>,
}

/// How far the item source falls short of sustaining the wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Shortfall {
    /// Unique items available.
    pub items: usize,
    /// Tiles to fill.
    pub tiles: usize,
}

impl Shortfall {
    /// Return `true` when some tiles start without an item.
    pub fn leaves_blank_tiles(&self) -> bool {
        self.items < self.tiles
    }
}

/// Shuffle `items` uniformly and split them into `visible_count` fronts plus a reserve.
///
/// Tiles past the end of the item list get `None`; no item is ever placed twice.
pub fn initialize<R: Rng + ?Sized>(
    items: &[Arc<Item>],
    visible_count: usize,
    rng: &mut R,
) -> Partition {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);

    let shortfall = (shuffled.len() < visible_count.saturating_add(1)).then_some(Shortfall {
        items: shuffled.len(),
        tiles: visible_count,
    });

    let split = visible_count.min(shuffled.len());
    let rest = shuffled.split_off(split);

    let mut fronts: Vec<Option<Arc<Item>>> = shuffled.into_iter().map(Some).collect();
    fronts.resize(visible_count, None);

    let mut reserve = ReservePool::new();
    for item in rest {
        reserve.give_back(item);
    }

    Partition {
        fronts,
        reserve,
        shortfall,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/reserve.rs"]
mod tests;
