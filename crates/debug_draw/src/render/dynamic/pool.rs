//! Duration-based drawable pool
//!
//! Core storage behind every drawer. Slots hold a backing render object and a
//! countdown; the active slots always form the prefix `[0, active_count)`.
//!
//! # Lifecycle
//!
//! - **Acquire**: takes the slot at `active_count`, growing the pool first if
//!   every slot is in use. New slots are created with `T::default()`.
//! - **Configure**: sets the countdown and hands out the object so the caller
//!   can set its appearance.
//! - **Tick**: once per frame, subtracts the frame time from every active slot
//!   and swap-removes those at or below zero. A duration of `0` therefore lasts
//!   exactly one frame.
//!
//! Swap-removal moves entries, so [`DrawHandle::index`] is only a hint. Every
//! acquisition gets a fresh generation stamp and handles resolve by it.
//!
//! # Usage
//!
//! ```
//! use debug_draw::render::dynamic::{DrawablePool, PooledDrawable};
//!
//! #[derive(Default)]
//! struct Label { text: String, visible: bool }
//!
//! impl PooledDrawable for Label {
//!     fn set_visible(&mut self, visible: bool) { self.visible = visible; }
//!     fn is_visible(&self) -> bool { self.visible }
//! }
//!
//! let mut pool = DrawablePool::<Label>::new("labels", 4);
//! let handle = pool.acquire().unwrap();
//! if let Some(label) = pool.configure(handle, 1.5) {
//!     label.text = String::from("hello");
//! }
//! pool.tick(1.0);
//! assert_eq!(pool.active_count(), 1);
//! pool.tick(1.0);
//! assert_eq!(pool.active_count(), 0);
//! ```

/// Smallest capacity a pool grows to
pub const DEFAULT_MIN_GROWTH: usize = 4;

/// Backing render object managed by a [`DrawablePool`]
///
/// `Default` must produce a usable, hidden object.
pub trait PooledDrawable: Default {
    /// Show or hide the object
    fn set_visible(&mut self, visible: bool);

    /// Whether the object is currently shown
    fn is_visible(&self) -> bool;
}

/// Handle to an active pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle {
    /// Slot the entry occupied when last seen
    pub index: u32,
    /// Stamp assigned at acquisition, unique within the pool
    pub generation: u32,
}

/// Statistics for a drawable pool
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Entries handed out
    pub total_acquired: u64,
    /// Entries removed because their countdown ran out
    pub total_expired: u64,
    /// Entries removed through [`DrawablePool::release`]
    pub total_released: u64,
    /// Current active count
    pub current_active: usize,
    /// Peak active count
    pub peak_active: usize,
    /// Times the backing storage grew
    pub growth_events: u64,
}

#[derive(Debug)]
struct PoolSlot<T> {
    object: T,
    remaining: f32,
    generation: u32,
}

/// Growable pool of drawables with per-entry countdowns
#[derive(Debug)]
pub struct DrawablePool<T> {
    label: &'static str,
    slots: Vec<PoolSlot<T>>,
    active_count: usize,
    next_generation: u32,
    min_growth: usize,
    enabled: bool,
    stats: PoolStats,
}

impl<T: PooledDrawable> DrawablePool<T> {
    /// Create a pool with `capacity` hidden objects
    pub fn new(label: &'static str, capacity: usize) -> Self {
        let mut pool = Self {
            label,
            slots: Vec::with_capacity(capacity),
            active_count: 0,
            next_generation: 1,
            min_growth: DEFAULT_MIN_GROWTH,
            enabled: true,
            stats: PoolStats::default(),
        };
        pool.instantiate(capacity);
        pool
    }

    /// Set the smallest capacity the pool grows to
    pub fn with_min_growth(mut self, min_growth: usize) -> Self {
        self.min_growth = min_growth.max(1);
        self
    }

    fn instantiate(&mut self, new_capacity: usize) {
        self.slots.resize_with(new_capacity, || {
            let mut object = T::default();
            object.set_visible(false);
            PoolSlot {
                object,
                remaining: 0.0,
                generation: 0,
            }
        });
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = (2 * old_capacity).max(self.min_growth);
        log::debug!("Growing {} pool from {} to {} slots", self.label, old_capacity, new_capacity);
        self.instantiate(new_capacity);
        self.stats.growth_events += 1;
    }

    /// Take the next free slot, growing the pool if needed
    ///
    /// The entry becomes active and visible with a zero countdown. Its object
    /// keeps whatever the slot held before, so callers overwrite every field
    /// they care about. Returns `None` only while the pool is disabled.
    pub fn acquire(&mut self) -> Option<DrawHandle> {
        if !self.enabled {
            return None;
        }
        if self.active_count == self.slots.len() {
            self.grow();
        }

        let index = self.active_count;
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1).max(1);

        let slot = &mut self.slots[index];
        slot.generation = generation;
        slot.remaining = 0.0;
        slot.object.set_visible(true);
        self.active_count += 1;

        self.stats.total_acquired += 1;
        self.stats.current_active = self.active_count;
        self.stats.peak_active = self.stats.peak_active.max(self.active_count);

        Some(DrawHandle {
            index: index as u32,
            generation,
        })
    }

    fn resolve(&self, handle: DrawHandle) -> Option<usize> {
        let hint = handle.index as usize;
        if hint < self.active_count && self.slots[hint].generation == handle.generation {
            return Some(hint);
        }
        self.slots[..self.active_count]
            .iter()
            .position(|slot| slot.generation == handle.generation)
    }

    /// Arm the countdown of an active entry and return its object
    ///
    /// Negative and NaN durations count as zero, so the entry still expires on
    /// the next tick.
    pub fn configure(&mut self, handle: DrawHandle, duration: f32) -> Option<&mut T> {
        let index = self.resolve(handle)?;
        let slot = &mut self.slots[index];
        slot.remaining = duration.max(0.0);
        Some(&mut slot.object)
    }

    /// Acquire and configure in one step
    pub fn spawn(&mut self, duration: f32) -> Option<(DrawHandle, &mut T)> {
        let handle = self.acquire()?;
        let index = self.active_count - 1;
        let slot = &mut self.slots[index];
        slot.remaining = duration.max(0.0);
        Some((handle, &mut slot.object))
    }

    /// Object of an active entry
    pub fn get(&self, handle: DrawHandle) -> Option<&T> {
        self.resolve(handle).map(|index| &self.slots[index].object)
    }

    /// Mutable object of an active entry
    pub fn get_mut(&mut self, handle: DrawHandle) -> Option<&mut T> {
        let index = self.resolve(handle)?;
        Some(&mut self.slots[index].object)
    }

    /// Seconds left on an active entry
    pub fn remaining(&self, handle: DrawHandle) -> Option<f32> {
        self.resolve(handle).map(|index| self.slots[index].remaining)
    }

    /// Whether the handle still refers to an active entry
    pub fn is_active(&self, handle: DrawHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Deactivate an entry before its countdown runs out
    pub fn release(&mut self, handle: DrawHandle) -> bool {
        match self.resolve(handle) {
            Some(index) => {
                self.deactivate(index);
                self.stats.total_released += 1;
                true
            }
            None => false,
        }
    }

    fn deactivate(&mut self, index: usize) {
        let last = self.active_count - 1;
        self.slots[index].object.set_visible(false);
        self.slots.swap(index, last);
        self.active_count = last;
        self.stats.current_active = self.active_count;
    }

    /// Advance every countdown by `delta_time`; returns how many entries expired
    pub fn tick(&mut self, delta_time: f32) -> usize {
        let mut expired = 0;
        let mut i = 0;
        while i < self.active_count {
            self.slots[i].remaining -= delta_time;
            if self.slots[i].remaining <= 0.0 {
                // the swapped-in entry is checked at the same index
                self.deactivate(i);
                expired += 1;
            } else {
                i += 1;
            }
        }
        self.stats.total_expired += expired as u64;
        expired
    }

    /// Deactivate every entry
    pub fn clear(&mut self) {
        while self.active_count > 0 {
            self.deactivate(self.active_count - 1);
        }
    }

    /// Objects of all active entries
    pub fn active(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.active_count].iter().map(|slot| &slot.object)
    }

    /// Number of active entries
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of slots, active or not
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether [`acquire`](Self::acquire) hands out entries
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume acquisition; active entries keep counting down
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Name used in log output
    pub fn label(&self) -> &'static str {
        self.label
    }
}
