//! Read-through cache for resource bodies.
//!
//! Bodies are treated as immutable for the lifetime of the process. The
//! first successful load for a uri is kept forever, stamped with its load
//! time; failures are not cached, so a later request retries. The only way to publish new content is to
//! register it under a new uri.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use vitrine_contracts::{
    error::{EntityKind, VitrineError, VitrineResult},
    resource::{ResourceContent, ResourceContents, ResourceDescriptor},
};

use crate::traits::ContentProvider;

/// A memoized resource body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
    /// When the body entered the cache (UTC).
    pub loaded_at: DateTime<Utc>,
}

impl CachedContent {
    pub fn to_contents(&self) -> ResourceContents {
        ResourceContents {
            uri: self.uri.clone(),
            mime_type: self.mime_type.clone(),
            text: self.text.clone(),
        }
    }
}

/// Provider used when a deployment registers inline content only.
struct NoContentProvider;

impl ContentProvider for NoContentProvider {
    fn load_content(&self, key: &str) -> VitrineResult<Vec<u8>> {
        Err(VitrineError::NotFound {
            kind: EntityKind::Resource,
            key: key.to_string(),
        })
    }
}

/// One uri's body, filled by the first successful load.
type Slot = Mutex<Option<Arc<CachedContent>>>;

/// Resource bodies keyed by resource uri, populated at most once per uri.
///
/// The outer map lock is held only to find or create a uri's slot. Loads run
/// under that slot's own lock, so a slow provider delays readers of the same
/// uri and nobody else.
pub struct ContentCache {
    provider: Box<dyn ContentProvider>,
    slots: RwLock<HashMap<String, Arc<Slot>>>,
}

impl ContentCache {
    pub fn new(provider: Box<dyn ContentProvider>) -> Self {
        Self {
            provider,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that can only serve inline content.
    pub fn inline_only() -> Self {
        Self::new(Box::new(NoContentProvider))
    }

    fn slot(&self, uri: &str) -> VitrineResult<Arc<Slot>> {
        {
            let slots = self.slots.read().map_err(|e| lock_error(uri, e))?;
            if let Some(slot) = slots.get(uri) {
                return Ok(Arc::clone(slot));
            }
        }
        let mut slots = self.slots.write().map_err(|e| lock_error(uri, e))?;
        Ok(Arc::clone(slots.entry(uri.to_string()).or_default()))
    }

    /// Return the body of `resource`, loading it on first use.
    ///
    /// Concurrent first requests for the same uri wait on that uri's slot,
    /// so the provider is still reached exactly once.
    pub fn fetch(&self, resource: &ResourceDescriptor) -> VitrineResult<Arc<CachedContent>> {
        let slot = self.slot(&resource.uri)?;
        let mut body = slot.lock().map_err(|e| lock_error(&resource.uri, e))?;
        if let Some(hit) = body.as_ref() {
            debug!(uri = %resource.uri, loaded_at = %hit.loaded_at, "resource content cache hit");
            return Ok(Arc::clone(hit));
        }

        let text = match &resource.content {
            ResourceContent::Inline { text } => text.clone(),
            ResourceContent::Provided { key } => {
                debug!(uri = %resource.uri, key = %key, "loading resource content");
                let bytes = self.provider.load_content(key)?;
                String::from_utf8(bytes).map_err(|e| VitrineError::ContentUnavailable {
                    key: key.clone(),
                    reason: format!("content is not valid UTF-8: {e}"),
                })?
            }
        };

        let cached = Arc::new(CachedContent {
            uri: resource.uri.clone(),
            mime_type: resource.mime_type.clone(),
            text,
            loaded_at: Utc::now(),
        });
        info!(
            uri = %resource.uri,
            bytes = cached.text.len(),
            loaded_at = %cached.loaded_at,
            "resource content cached"
        );
        *body = Some(Arc::clone(&cached));
        Ok(cached)
    }

    /// The cached body for `uri`, if one has been loaded.
    pub fn get(&self, uri: &str) -> Option<Arc<CachedContent>> {
        let slot = self.slots.read().ok()?.get(uri).cloned()?;
        let body = slot.lock().ok()?;
        body.clone()
    }

    /// Whether a body for `uri` has been loaded.
    pub fn is_cached(&self, uri: &str) -> bool {
        self.get(uri).is_some()
    }

    /// Number of uris with a loaded body.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .map(|slots| {
                slots
                    .values()
                    .filter(|slot| slot.lock().map(|b| b.is_some()).unwrap_or(false))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(uri: &str, e: impl std::fmt::Display) -> VitrineError {
    VitrineError::ContentUnavailable {
        key: uri.to_string(),
        reason: format!("content cache lock poisoned: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            mpsc, Arc, Barrier,
        },
        time::Duration,
    };

    use chrono::Utc;

    use vitrine_contracts::{
        error::{VitrineError, VitrineResult},
        resource::{ResourceContent, ResourceDescriptor},
    };

    use super::ContentCache;
    use crate::{test_support::resource, traits::ContentProvider};

    /// Counts loads; fails for keys starting with "missing".
    struct CountingProvider {
        loads: Arc<AtomicUsize>,
    }

    impl ContentProvider for CountingProvider {
        fn load_content(&self, key: &str) -> VitrineResult<Vec<u8>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if key.starts_with("missing") {
                return Err(VitrineError::ContentUnavailable {
                    key: key.to_string(),
                    reason: "no such asset".to_string(),
                });
            }
            Ok(format!("<html>{key}</html>").into_bytes())
        }
    }

    fn provided(uri: &str, key: &str) -> ResourceDescriptor {
        ResourceDescriptor {
            content: ResourceContent::Provided {
                key: key.to_string(),
            },
            ..resource(uri)
        }
    }

    fn counting() -> (ContentCache, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let cache = ContentCache::new(Box::new(CountingProvider {
            loads: Arc::clone(&loads),
        }));
        (cache, loads)
    }

    #[test]
    fn provided_content_loads_once() {
        let (cache, loads) = counting();
        let widget = provided("ui://w/1", "solar.html");

        let before = Utc::now();
        let first = cache.fetch(&widget).unwrap();
        for _ in 0..5 {
            let body = cache.fetch(&widget).unwrap();
            assert_eq!(body.text, "<html>solar.html</html>");
            assert_eq!(body.mime_type, "text/html+skybridge");
            assert_eq!(body.loaded_at, first.loaded_at);
        }
        assert!(first.loaded_at >= before && first.loaded_at <= Utc::now());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(cache.is_cached("ui://w/1"));
        assert_eq!(cache.get("ui://w/1").unwrap().loaded_at, first.loaded_at);
    }

    #[test]
    fn new_uri_is_the_refresh_lever() {
        let (cache, loads) = counting();
        cache.fetch(&provided("ui://w/1", "solar.html")).unwrap();
        cache.fetch(&provided("ui://w/2", "solar.html")).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let (cache, loads) = counting();
        let broken = provided("ui://w/broken", "missing.html");

        assert!(cache.fetch(&broken).is_err());
        assert!(cache.fetch(&broken).is_err());
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
        assert!(!cache.is_cached("ui://w/broken"));
    }

    #[test]
    fn inline_content_never_reaches_the_provider() {
        let (cache, loads) = counting();
        let body = cache.fetch(&resource("ui://w/inline")).unwrap();
        assert!(body.text.contains("ui://w/inline"));
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn inline_only_cache_rejects_provided_content() {
        let cache = ContentCache::inline_only();
        assert!(matches!(
            cache.fetch(&provided("ui://w/1", "solar.html")),
            Err(VitrineError::NotFound { .. })
        ));
    }

    #[test]
    fn concurrent_first_reads_load_once() {
        let (cache, loads) = counting();
        let widget = provided("ui://w/1", "solar.html");

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| cache.fetch(&widget).unwrap());
            }
        });
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    /// Blocks loads of "slow" keys until released.
    struct GatedProvider {
        gate: Arc<Barrier>,
    }

    impl ContentProvider for GatedProvider {
        fn load_content(&self, key: &str) -> VitrineResult<Vec<u8>> {
            if key == "slow.html" {
                self.gate.wait();
                self.gate.wait();
            }
            Ok(key.as_bytes().to_vec())
        }
    }

    #[test]
    fn slow_load_does_not_block_other_uris() {
        let gate = Arc::new(Barrier::new(2));
        let cache = ContentCache::new(Box::new(GatedProvider {
            gate: Arc::clone(&gate),
        }));
        let slow = provided("ui://w/slow", "slow.html");
        let fast = provided("ui://w/fast", "fast.html");

        std::thread::scope(|s| {
            let loader = s.spawn(|| cache.fetch(&slow).unwrap());
            // The slow load is now in progress.
            gate.wait();

            let (tx, rx) = mpsc::channel();
            let (cache, fast) = (&cache, &fast);
            s.spawn(move || {
                let body = cache.fetch(fast).unwrap();
                tx.send(body.text.clone()).unwrap();
            });
            let served = rx.recv_timeout(Duration::from_secs(5));

            gate.wait();
            loader.join().unwrap();
            assert_eq!(served.unwrap(), "fast.html");
        });
        assert_eq!(cache.len(), 2);
    }
}
