//! Cached access to raw price observations.
//!
//! The upstream feed updates once a day, so repeated forecasts for the same
//! commodity reuse the last fetch until the TTL runs out. Only raw
//! observations are cached; forecasts are always recomputed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::sources::DataGovClient;
use crate::types::PriceObservation;

struct CachedObservations {
    observations: Arc<Vec<PriceObservation>>,
    fetched_at: Instant,
}

/// Per-commodity TTL cache of raw observations.
pub struct ObservationCache {
    entries: DashMap<String, CachedObservations>,
    ttl: Duration,
}

impl ObservationCache {
    /// A zero TTL disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cache key for a commodity name.
    pub fn key(commodity: &str) -> String {
        commodity.trim().to_lowercase()
    }

    /// Fresh observations for a commodity, if any.
    pub fn get(&self, commodity: &str) -> Option<Arc<Vec<PriceObservation>>> {
        let key = Self::key(commodity);
        if let Some(entry) = self.entries.get(&key) {
            if entry.fetched_at.elapsed() < self.ttl {
                return Some(entry.observations.clone());
            }
        }
        self.evict_if_stale(&key);
        None
    }

    /// Remove `key` only if its entry is still expired, so a refresh that
    /// lands after the stale read is kept.
    fn evict_if_stale(&self, key: &str) {
        let ttl = self.ttl;
        self.entries
            .remove_if(key, |_, entry| entry.fetched_at.elapsed() >= ttl);
    }

    pub fn insert(&self, commodity: &str, observations: Vec<PriceObservation>) -> Arc<Vec<PriceObservation>> {
        let observations = Arc::new(observations);
        if self.is_enabled() {
            self.entries.insert(
                Self::key(commodity),
                CachedObservations {
                    observations: observations.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
        observations
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
    }

    /// Number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetches observations from data.gov.in through the cache.
pub struct ObservationService {
    client: DataGovClient,
    cache: ObservationCache,
}

impl ObservationService {
    pub fn new(client: DataGovClient, cache_ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            client,
            cache: ObservationCache::new(cache_ttl),
        })
    }

    pub fn cache(&self) -> &ObservationCache {
        &self.cache
    }

    /// Raw observations for a commodity. Failed fetches are not cached.
    pub async fn observations(&self, commodity: &str) -> Result<Arc<Vec<PriceObservation>>> {
        if let Some(cached) = self.cache.get(commodity) {
            debug!("Observation cache hit for {}", commodity);
            return Ok(cached);
        }

        let observations = self.client.fetch_observations(commodity).await?;
        Ok(self.cache.insert(commodity, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawPrice;

    fn sample() -> Vec<PriceObservation> {
        vec![PriceObservation::new(
            "01/01/2024",
            Some(RawPrice::from("1500")),
            Some("Azadpur".to_string()),
        )]
    }

    #[test]
    fn test_cache_insert_and_get() {
        let cache = ObservationCache::new(Duration::from_secs(60));
        cache.insert("Onion", sample());

        assert_eq!(cache.get("Onion").unwrap().len(), 1);
        assert!(cache.get("Potato").is_none());
    }

    #[test]
    fn test_cache_key_normalized() {
        let cache = ObservationCache::new(Duration::from_secs(60));
        cache.insert("  Onion ", sample());

        assert!(cache.get("onion").is_some());
        assert!(cache.get("ONION").is_some());
        assert_eq!(ObservationCache::key(" Green Gram "), "green gram");
    }

    #[test]
    fn test_cache_expiration() {
        let cache = ObservationCache::new(Duration::from_millis(10));
        cache.insert("Onion", sample());

        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("Onion").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stale_eviction_keeps_refreshed_entry() {
        let cache = ObservationCache::new(Duration::from_millis(50));
        cache.insert("Onion", sample());
        cache.insert("Potato", sample());
        std::thread::sleep(Duration::from_millis(60));

        // Refreshed by another request after this one saw the stale entry.
        cache.insert("Onion", sample());

        cache.evict_if_stale(&ObservationCache::key("Onion"));
        cache.evict_if_stale(&ObservationCache::key("Potato"));

        assert!(cache.get("Onion").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_disabled() {
        let cache = ObservationCache::new(Duration::ZERO);
        let returned = cache.insert("Onion", sample());

        assert!(!cache.is_enabled());
        assert_eq!(returned.len(), 1);
        assert!(cache.get("Onion").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cache_purge_expired() {
        let cache = ObservationCache::new(Duration::from_millis(10));
        cache.insert("Onion", sample());
        cache.insert("Potato", sample());
        assert_eq!(cache.len(), 2);

        std::thread::sleep(Duration::from_millis(20));
        cache.purge_expired();
        assert!(cache.is_empty());
    }
}
