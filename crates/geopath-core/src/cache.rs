// crates/geopath-core/src/cache.rs

//! # Lookup Cache
//!
//! Memoizes collections fetched through a [`Lookup`], keyed by parent:
//! all countries, all categories, states per country, cities per state.
//!
//! Entries are written once and never invalidated; the cache lives as
//! long as its owner (one resolver per application session). A failed
//! fetch stores nothing, so a later navigation asks the backend again.

use crate::error::Result;
use crate::lookup::Lookup;
use crate::model::{Category, City, Country, CountryId, State, StateId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Snapshot of cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Number of stored collections across all keys.
    pub entries: usize,
}

/// One write-once map from parent key to child collection.
#[derive(Debug)]
struct Memo<K, T> {
    map: Mutex<HashMap<K, Arc<[T]>>>,
}

impl<K: Eq + Hash, T> Memo<K, T> {
    fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<Arc<[T]>> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores `fresh` unless another fetch for `key` finished first, in
    /// which case the earlier value is kept and returned.
    fn insert_once(&self, key: K, fresh: Vec<T>) -> Arc<[T]> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(|| fresh.into())
            .clone()
    }

    fn len(&self) -> usize {
        self.map.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Resolver-owned memo of every collection the resolver has needed.
#[derive(Debug)]
pub struct LookupCache {
    countries: Memo<(), Country>,
    categories: Memo<(), Category>,
    states: Memo<CountryId, State>,
    cities: Memo<StateId, City>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache {
    pub fn new() -> Self {
        Self {
            countries: Memo::new(),
            categories: Memo::new(),
            states: Memo::new(),
            cities: Memo::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn countries<L: Lookup + ?Sized>(&self, lookup: &L) -> Result<Arc<[Country]>> {
        self.get_or_fetch(&self.countries, (), "countries", || lookup.countries())
            .await
    }

    pub async fn categories<L: Lookup + ?Sized>(&self, lookup: &L) -> Result<Arc<[Category]>> {
        self.get_or_fetch(&self.categories, (), "categories", || lookup.categories())
            .await
    }

    pub async fn states<L: Lookup + ?Sized>(
        &self,
        lookup: &L,
        country: &CountryId,
    ) -> Result<Arc<[State]>> {
        self.get_or_fetch(&self.states, country.clone(), "states", || {
            lookup.states_for_country(country)
        })
        .await
    }

    pub async fn cities<L: Lookup + ?Sized>(
        &self,
        lookup: &L,
        state: &StateId,
    ) -> Result<Arc<[City]>> {
        self.get_or_fetch(&self.cities, state.clone(), "cities", || {
            lookup.cities_for_state(state)
        })
        .await
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.countries.len()
                + self.categories.len()
                + self.states.len()
                + self.cities.len(),
        }
    }

    async fn get_or_fetch<K, T, F, Fut>(
        &self,
        memo: &Memo<K, T>,
        key: K,
        collection: &'static str,
        fetch: F,
    ) -> Result<Arc<[T]>>
    where
        K: Eq + Hash + Debug,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        if let Some(hit) = memo.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(collection, ?key, "cache hit");
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(collection, ?key, "cache miss, fetching");

        let fresh = fetch().await.inspect_err(|err| {
            tracing::warn!(collection, ?key, error = %err, "lookup failed");
        })?;
        Ok(memo.insert_once(key, fresh))
    }
}
