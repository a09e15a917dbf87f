use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::Rng;

use crate::foundation::core::Millis;
use crate::grid::state::{Grid, TileKey};
use crate::item::ItemId;
use crate::pool::reserve::ReservePool;

/// Timing knobs of the flip loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchedulerTimings {
    /// Base delay between two ticks.
    pub interval_ms: u64,
    /// Upper bound (exclusive) of the random delay added to every interval.
    pub jitter_ms: u64,
    /// Time between a flip and the clearing of its transitioning flag.
    pub flip_duration_ms: u64,
}

impl Default for SchedulerTimings {
    fn default() -> Self {
        Self {
            interval_ms: 3_000,
            jitter_ms: 500,
            flip_duration_ms: 800,
        }
    }
}

/// Deferred "flip finished" task for one tile of one grid generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Completion {
    /// When the flip's transition ends.
    pub due: Millis,
    /// Grid generation the flipped tile belongs to.
    pub generation: u64,
    /// Tile index inside that generation.
    pub index: usize,
    /// Tile `flip_serial` right after the flip.
    pub serial: u64,
}

/// Next thing the scheduler wants to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Due {
    Completion(Completion),
    Tick(Millis),
}

impl Due {
    pub fn at(&self) -> Millis {
        match self {
            Self::Completion(c) => c.due,
            Self::Tick(at) => *at,
        }
    }
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No tiles to animate; the timer was re-armed.
    EmptyGrid,
    /// The reserve was empty at guard time; the scheduler stopped for this grid.
    Halted,
    /// The reserve ran dry between guard and take; nothing changed this tick.
    Aborted,
    /// A tile was turned over.
    Flipped {
        key: TileKey,
        shown: ItemId,
        returned: Option<ItemId>,
    },
}

/// Repeating flip timer plus its deferred completions.
///
/// All timer state lives here and is only touched through explicit calls: the
/// armed deadline, the index animated by the previous tick, and whether the
/// scheduler gave up because the reserve ran out.
#[derive(Clone, Debug)]
pub struct AnimationScheduler {
    timings: SchedulerTimings,
    deadline: Option<Millis>,
    last_index: Option<usize>,
    halted: bool,
    pending: BinaryHeap<Reverse<Completion>>,
}

impl AnimationScheduler {
    /// Stopped scheduler with no pending completions.
    pub fn new(timings: SchedulerTimings) -> Self {
        Self {
            timings,
            deadline: None,
            last_index: None,
            halted: false,
            pending: BinaryHeap::new(),
        }
    }

    /// Timings used by the next re-arm.
    pub fn timings(&self) -> SchedulerTimings {
        self.timings
    }

    /// Replace the timings. An armed deadline keeps its value; the next re-arm and
    /// the next flip's completion use the new ones.
    pub fn set_timings(&mut self, timings: SchedulerTimings) {
        self.timings = timings;
    }

    /// Armed deadline of the next tick, if running.
    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Return `true` while a tick is armed.
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Return `true` once the reserve ran dry for the current grid.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Tile index flipped by the previous tick.
    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Forget everything tied to the previous grid. Pending completions stay queued;
    /// their generation no longer matches, so they resolve as no-ops.
    pub fn reset_for_new_grid(&mut self) {
        self.deadline = None;
        self.last_index = None;
        self.halted = false;
    }

    /// Stop and re-arm from a clean interval. Stays stopped once halted.
    pub fn restart<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) {
        self.stop();
        if self.halted {
            tracing::debug!("flip scheduler halted; not restarting");
            return;
        }
        self.arm(now, rng);
    }

    /// Clear the repeating timer. Deferred completions are left alone.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    fn arm<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) {
        let jitter = if self.timings.jitter_ms == 0 {
            0
        } else {
            rng.random_range(0..self.timings.jitter_ms)
        };
        let at = now.after(self.timings.interval_ms.saturating_add(jitter));
        self.deadline = Some(at);
    }

    /// Earliest due item at or before `now`. Completions win ties with a tick.
    pub fn next_due(&self, now: Millis) -> Option<Due> {
        let completion = self.pending.peek().map(|Reverse(c)| *c);
        let next = match (completion, self.deadline) {
            (Some(c), Some(t)) if t < c.due => Due::Tick(t),
            (Some(c), _) => Due::Completion(c),
            (None, Some(t)) => Due::Tick(t),
            (None, None) => return None,
        };
        (next.at() <= now).then_some(next)
    }

    /// Remove a completion returned by [`AnimationScheduler::next_due`].
    pub fn pop_completion(&mut self) -> Option<Completion> {
        self.pending.pop().map(|Reverse(c)| c)
    }

    pub fn pending_completions(&self) -> usize {
        self.pending.len()
    }

    /// Run the tick armed for `at`: pick a tile, swap in a reserved item, schedule the
    /// completion, and re-arm.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        at: Millis,
        grid: &mut Grid,
        pool: &mut ReservePool,
        rng: &mut R,
    ) -> TickOutcome {
        if grid.is_empty() {
            self.arm(at, rng);
            return TickOutcome::EmptyGrid;
        }
        if pool.is_empty() {
            self.stop();
            self.halted = true;
            return TickOutcome::Halted;
        }

        let index = self.pick_index(grid.len(), rng);
        self.last_index = Some(index);
        self.arm(at, rng);

        let Some(incoming) = pool.take_one() else {
            return TickOutcome::Aborted;
        };
        let shown = incoming.id.clone();
        let Some(flip) = grid.flip(index, incoming.clone(), at) else {
            pool.give_back(incoming);
            return TickOutcome::Aborted;
        };
        let returned = flip.outgoing.map(|item| {
            let id = item.id.clone();
            pool.give_back(item);
            id
        });

        self.pending.push(Reverse(Completion {
            due: at.after(self.timings.flip_duration_ms),
            generation: grid.generation(),
            index,
            serial: flip.serial,
        }));

        tracing::debug!(index, shown = %shown, at = at.0, "tile flipped");
        TickOutcome::Flipped {
            key: TileKey {
                generation: grid.generation(),
                index,
            },
            shown,
            returned,
        }
    }

    /// Uniform index in `0..len`, never the previous tick's index unless `len <= 1`.
    fn pick_index<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> usize {
        if len <= 1 {
            return 0;
        }
        match self.last_index {
            Some(last) if last < len => {
                let r = rng.random_range(0..len - 1);
                if r >= last { r + 1 } else { r }
            }
            _ => rng.random_range(0..len),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
