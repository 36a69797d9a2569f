//! A caller-owned registry of decoded zones.

use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use zoneinfo_core::{Zoneinfo, ZoneinfoResult};

use crate::source::ZoneinfoSource;

/// Maps time zone identifiers to shared, immutable `Zoneinfo` values,
/// decoding each zone from its source on first use.
///
/// An entry is never replaced once published, so every caller asking for
/// an identifier observes the same `Arc<Zoneinfo>`.
#[derive(Debug)]
pub struct ZoneinfoCache<S> {
    source: S,
    zones: RwLock<HashMap<String, Arc<Zoneinfo>>>,
}

impl<S: ZoneinfoSource> ZoneinfoCache<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            zones: RwLock::default(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the zone for `identifier`, loading and decoding it on a miss.
    ///
    /// Fails with `UnsupportedId` for unknown identifiers and with the
    /// decoder's error for data that does not decode; failures are not
    /// cached.
    pub fn get(&self, identifier: &str) -> ZoneinfoResult<Arc<Zoneinfo>> {
        if let Some(zone) = self.lookup(identifier) {
            return Ok(zone);
        }

        #[cfg(feature = "log")]
        log::debug!("{identifier}: not cached, loading from source");
        let bytes = self.source.load(identifier)?;
        let zone = Zoneinfo::from_tzif_bytes(identifier, &bytes).inspect_err(|_err| {
            #[cfg(feature = "log")]
            log::warn!("{identifier}: source data failed to decode: {_err}");
        })?;

        Ok(self.publish(identifier, zone))
    }

    /// Returns the zone for `identifier` only if it is already cached.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<Arc<Zoneinfo>> {
        self.zones
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identifier)
            .cloned()
    }

    /// Publishes an already decoded zone under its own identifier and
    /// returns the cached entry, which is the earlier one if the
    /// identifier was already present.
    pub fn insert_preloaded(&self, zoneinfo: Zoneinfo) -> Arc<Zoneinfo> {
        let identifier = String::from(zoneinfo.identifier());
        self.publish(&identifier, zoneinfo)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn publish(&self, identifier: &str, zoneinfo: Zoneinfo) -> Arc<Zoneinfo> {
        let mut zones = self.zones.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have published the zone since our lookup.
        zones
            .entry(String::from(identifier))
            .or_insert_with(|| Arc::new(zoneinfo))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemorySource;
    use std::thread;
    use zoneinfo_core::{ErrorCode, LocalTimeDescriptor, ZoneinfoBuilder, MIN_EPOCH_SECONDS};

    fn source() -> InMemorySource {
        let mut source = InMemorySource::new();
        for identifier in ["America/New_York", "Europe/Paris"] {
            let (_, data) = jiff_tzdb::get(identifier).unwrap();
            source.insert(identifier, data);
        }
        source.insert("Test/Garbage", b"TZif2 definitely not tzif".as_slice());
        source
    }

    #[test]
    fn loads_lazily_and_shares_entries() {
        let cache = ZoneinfoCache::new(source());
        assert!(cache.is_empty());
        assert!(cache.lookup("America/New_York").is_none());

        let first = cache.get("America/New_York").unwrap();
        assert_eq!(first.identifier(), "America/New_York");
        assert_eq!(cache.len(), 1);
        let second = cache.get("America/New_York").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &cache.lookup("America/New_York").unwrap()));
    }

    #[test]
    fn failures_are_reported_and_not_cached() {
        let cache = ZoneinfoCache::new(source());
        let err = cache.get("Nowhere/Special").unwrap_err();
        assert_eq!(err.kind(), ErrorCode::UnsupportedId);

        let err = cache.get("Test/Garbage").unwrap_err();
        assert_eq!(err.kind(), ErrorCode::TruncatedData);
        assert!(cache.is_empty());
    }

    #[test]
    fn preloaded_entries_are_never_replaced() {
        let cache = ZoneinfoCache::new(source());
        let utc = LocalTimeDescriptor::try_new(0, false, "UTC").unwrap();
        let fake = ZoneinfoBuilder::new("Europe/Paris")
            .add_transition(MIN_EPOCH_SECONDS, utc)
            .build()
            .unwrap();
        let published = cache.insert_preloaded(fake.clone());
        assert_eq!(*published, fake);

        let loaded = cache.get("Europe/Paris").unwrap();
        assert!(Arc::ptr_eq(&published, &loaded));

        let again = cache.insert_preloaded(fake);
        assert!(Arc::ptr_eq(&published, &again));
    }

    #[test]
    fn concurrent_readers_observe_one_entry() {
        let cache = ZoneinfoCache::new(source());
        let zones: Vec<Arc<Zoneinfo>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get("America/New_York").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for zone in &zones[1..] {
            assert!(Arc::ptr_eq(&zones[0], zone));
        }
        assert_eq!(cache.len(), 1);
    }
}
