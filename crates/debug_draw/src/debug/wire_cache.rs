//! Least-recently-used cache of split-triangle wireframe meshes
//!
//! Hosts that cannot draw wireframes natively need every triangle to own its
//! three vertices. Splitting is linear in the index count, so the result is
//! kept per source mesh. Entries are keyed by the address of the shared mesh
//! and hold a weak reference to it, so a dropped mesh whose address is later
//! reused is detected instead of served stale.
//!
//! A mesh behind an `Rc` cannot be mutated while the cache holds a weak
//! reference to it, so a cached split can never go out of date.

use crate::render::{MeshBuffer, MeshError};
use log::trace;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

#[derive(Debug)]
struct CacheEntry {
    source: Weak<MeshBuffer>,
    split: Rc<MeshBuffer>,
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to split the source
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
}

/// Split-mesh cache with a fixed number of entries
#[derive(Debug)]
pub struct WireMeshCache {
    capacity: usize,
    entries: HashMap<usize, CacheEntry>,
    /// Keys from least to most recently used
    order: VecDeque<usize>,
    stats: CacheStats,
}

fn cache_key(source: &Rc<MeshBuffer>) -> usize {
    Rc::as_ptr(source) as usize
}

impl WireMeshCache {
    /// Create a cache holding at most `capacity` split meshes
    ///
    /// A capacity of zero disables caching; every lookup splits afresh.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Split version of `source`, from the cache when possible
    pub fn get_or_split(&mut self, source: &Rc<MeshBuffer>) -> Result<Rc<MeshBuffer>, MeshError> {
        let key = cache_key(source);
        let cached = self.entries.get(&key).map(|entry| {
            let live = entry.source.upgrade().is_some_and(|mesh| Rc::ptr_eq(&mesh, source));
            (live, Rc::clone(&entry.split))
        });

        match cached {
            Some((true, split)) => {
                self.stats.hits += 1;
                self.touch(key);
                return Ok(split);
            }
            Some((false, _)) => self.remove(key),
            None => {}
        }

        self.stats.misses += 1;
        let split = Rc::new(source.split_triangles()?);
        if self.capacity == 0 {
            return Ok(split);
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            trace!("Evicted split wire mesh {oldest:#x}");
        }
        self.entries.insert(
            key,
            CacheEntry {
                source: Rc::downgrade(source),
                split: Rc::clone(&split),
            },
        );
        self.order.push_back(key);
        Ok(split)
    }

    fn touch(&mut self, key: usize) {
        if let Some(position) = self.order.iter().position(|&k| k == key) {
            self.order.remove(position);
        }
        self.order.push_back(key);
    }

    fn remove(&mut self, key: usize) {
        self.entries.remove(&key);
        self.order.retain(|&k| k != key);
    }

    /// True when a live split of `source` is cached
    pub fn contains(&self, source: &Rc<MeshBuffer>) -> bool {
        self.entries
            .get(&cache_key(source))
            .and_then(|entry| entry.source.upgrade())
            .is_some_and(|mesh| Rc::ptr_eq(&mesh, source))
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of cached meshes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached meshes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hit and miss counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
