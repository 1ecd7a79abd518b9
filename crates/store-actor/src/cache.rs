//! # Read-Through Entity Cache
//!
//! A TTL-bounded cache for one entity type's read responses, with
//! coarse-grained invalidation: any write to the entity type flushes every
//! cached response for that type.
//!
//! # Epoch Invalidation
//! Each cache key embeds an epoch counter. [`EntityCache::invalidate_all`]
//! bumps the epoch, so every previously cached response becomes unreachable
//! at once. Callers capture the epoch *before* reading the backing store and
//! pass it back when populating; a population racing an invalidation then
//! lands under the dead epoch and can never serve stale data after the
//! write that bumped it.
//!
//! # Segments
//! Point lookups and page listings are cached in separate segments because
//! their value types differ, but both segments share the one epoch: they
//! always invalidate together.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;

use crate::config::CacheConfig;
use crate::page::{PageRequest, SortField};

/// Cache for one entity type's read responses.
///
/// `Id` is the entity id, `S` its sort field, and `V` the view type that
/// read operations return.
pub struct EntityCache<Id, S, V>
where
    Id: Copy + Eq + Hash + Send + Sync + 'static,
    S: SortField,
    V: Clone + Send + Sync + 'static,
{
    by_id: Cache<(u64, Id), V>,
    pages: Cache<(u64, PageRequest<S>), Vec<V>>,
    epoch: AtomicU64,
}

impl<Id, S, V> EntityCache<Id, S, V>
where
    Id: Copy + Eq + Hash + Send + Sync + 'static,
    S: SortField,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: &CacheConfig) -> Self {
        let by_id = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        let pages = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();

        Self {
            by_id,
            pages,
            epoch: AtomicU64::new(0),
        }
    }

    /// The current epoch. Capture it once per read, before consulting the
    /// cache or the backing store, and pass the same value to the matching
    /// `store_*` call.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Cached view for one id under the given epoch.
    pub async fn entry(&self, epoch: u64, id: Id) -> Option<V> {
        self.by_id.get(&(epoch, id)).await
    }

    /// Populates the point-lookup segment. `epoch` must be the value
    /// captured before the backing read; if an invalidation ran in between,
    /// the entry lands under the dead epoch and is never served.
    pub async fn store_entry(&self, epoch: u64, id: Id, view: V) {
        self.by_id.insert((epoch, id), view).await;
    }

    /// Cached listing for one page request under the given epoch.
    pub async fn page(&self, epoch: u64, page: PageRequest<S>) -> Option<Vec<V>> {
        self.pages.get(&(epoch, page)).await
    }

    /// Populates the listing segment. Same epoch rule as
    /// [`store_entry`](Self::store_entry).
    pub async fn store_page(&self, epoch: u64, page: PageRequest<S>, views: Vec<V>) {
        self.pages.insert((epoch, page), views).await;
    }

    /// Flushes every cached response for this entity type by bumping the
    /// epoch. Old entries are also marked invalid in moka so they stop
    /// occupying capacity.
    pub fn invalidate_all(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.by_id.invalidate_all();
        self.pages.invalidate_all();
    }
}
