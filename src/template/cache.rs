//! Process-wide template parse cache.
//!
//! Parsing is pure, so results are shared by raw string. The cache is a
//! bounded LRU: reads take the shared lock and stamp an access counter,
//! inserts take the exclusive lock and evict the stalest entry when full.

use super::MessageTemplate;
use crate::error::Error;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, RwLock};

const CAPACITY: usize = 1000;

struct Entry {
    template: Arc<MessageTemplate>,
    last_used: AtomicU64,
}

struct TemplateCache {
    map: RwLock<HashMap<String, Entry>>,
    clock: AtomicU64,
}

static CACHE: LazyLock<TemplateCache> = LazyLock::new(|| TemplateCache {
    map: RwLock::new(HashMap::new()),
    clock: AtomicU64::new(0),
});

/// Parses a template through the shared cache.
///
/// # Errors
/// Same failures as [`MessageTemplate::parse`]; errors are not cached.
pub fn parse_cached(raw: &str) -> Result<Arc<MessageTemplate>, Error> {
    let cache = &*CACHE;
    {
        let map = cache.map.read().expect("template cache poisoned");
        if let Some(entry) = map.get(raw) {
            entry
                .last_used
                .store(cache.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
            return Ok(Arc::clone(&entry.template));
        }
    }

    let template = Arc::new(MessageTemplate::parse(raw)?);
    let mut map = cache.map.write().expect("template cache poisoned");
    if map.len() >= CAPACITY
        && !map.contains_key(raw)
        && let Some(stalest) = map
            .iter()
            .min_by_key(|(_, e)| e.last_used.load(Ordering::Relaxed))
            .map(|(k, _)| k.clone())
    {
        map.remove(&stalest);
    }
    let entry = map.entry(raw.to_string()).or_insert_with(|| Entry {
        template: Arc::clone(&template),
        last_used: AtomicU64::new(0),
    });
    entry
        .last_used
        .store(cache.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
    Ok(Arc::clone(&entry.template))
}

/// Empties the cache. Intended for tests.
pub fn clear_template_cache() {
    CACHE
        .map
        .write()
        .expect("template cache poisoned")
        .clear();
}
