//! Type-derived source-context names.
//!
//! `extract_type_name::<T>` turns `std::any::type_name` output into a
//! presentable component name: references stripped, module paths shortened
//! to a configurable depth, closure noise simplified. Derivation is cached
//! in a process-wide LRU because `for_type` sits on logger-construction
//! paths that can run per request.

use crate::value::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{LazyLock, RwLock};

/// Environment variable seeding the cache size; `0` disables caching.
/// [`configure_type_name_cache`] (reachable through the `[type_name]` config
/// section) overrides it at runtime.
pub const TYPE_NAME_CACHE_SIZE_ENV: &str = "MTLOG_TYPE_NAME_CACHE_SIZE";

const DEFAULT_CAPACITY: usize = 10_000;

/// Controls how a raw type name becomes a source-context string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameOptions {
    /// How many module segments to keep ahead of the type: `0` yields
    /// `User`, `1` yields `orders::User`, and so on.
    pub module_depth: usize,
    /// Prepended verbatim.
    pub prefix: String,
    /// Appended verbatim.
    pub suffix: String,
    /// Collapse compiler-generated `{{closure}}` markers to `closure`.
    pub simplify_anonymous: bool,
}

impl Default for TypeNameOptions {
    fn default() -> Self {
        Self {
            module_depth: 0,
            prefix: String::new(),
            suffix: String::new(),
            simplify_anonymous: true,
        }
    }
}

struct Entry {
    name: String,
    last_used: AtomicU64,
}

struct TypeNameCache {
    map: RwLock<HashMap<String, Entry>>,
    capacity: AtomicUsize,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

static CACHE: LazyLock<TypeNameCache> = LazyLock::new(|| TypeNameCache {
    map: RwLock::new(HashMap::new()),
    capacity: AtomicUsize::new(
        std::env::var(TYPE_NAME_CACHE_SIZE_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CAPACITY),
    ),
    clock: AtomicU64::new(0),
    hits: AtomicU64::new(0),
    misses: AtomicU64::new(0),
});

fn evict_stalest(map: &mut HashMap<String, Entry>) -> bool {
    let Some(stalest) = map
        .iter()
        .min_by_key(|(_, e)| e.last_used.load(Ordering::Relaxed))
        .map(|(k, _)| k.clone())
    else {
        return false;
    };
    map.remove(&stalest);
    true
}

/// Resizes the shared cache; zero disables caching and drops all entries.
///
/// The environment variable seeds the initial capacity; this call overrides
/// it, shrinking the cache immediately when the new bound is smaller.
pub fn configure_type_name_cache(capacity: usize) {
    CACHE.capacity.store(capacity, Ordering::Relaxed);
    let mut map = CACHE.map.write().expect("type-name cache poisoned");
    if capacity == 0 {
        map.clear();
        return;
    }
    while map.len() > capacity {
        if !evict_stalest(&mut map) {
            break;
        }
    }
}

/// The cache's current entry bound; zero means caching is off.
#[must_use]
pub fn type_name_cache_capacity() -> usize {
    CACHE.capacity.load(Ordering::Relaxed)
}

/// Derives the source-context name for `T` using the shared cache.
#[must_use]
pub fn extract_type_name<T: ?Sized>(options: &TypeNameOptions) -> String {
    extract_with_tenant::<T>(options, None)
}

/// Like [`extract_type_name`] but cached in a tenant-keyed partition, so
/// per-tenant naming schemes cannot poison each other's entries.
#[must_use]
pub fn extract_type_name_with_cache_key<T: ?Sized>(
    options: &TypeNameOptions,
    tenant: &str,
) -> String {
    extract_with_tenant::<T>(options, Some(tenant))
}

fn extract_with_tenant<T: ?Sized>(options: &TypeNameOptions, tenant: Option<&str>) -> String {
    let raw = std::any::type_name::<T>();
    let cache = &*CACHE;
    let capacity = cache.capacity.load(Ordering::Relaxed);
    if capacity == 0 {
        return derive(raw, options);
    }

    let key = format!(
        "{}|{}|{}|{}|{}|{raw}",
        tenant.unwrap_or(""),
        options.module_depth,
        options.prefix,
        options.suffix,
        options.simplify_anonymous
    );

    {
        let map = cache.map.read().expect("type-name cache poisoned");
        if let Some(entry) = map.get(&key) {
            entry
                .last_used
                .store(cache.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
            cache.hits.fetch_add(1, Ordering::Relaxed);
            return entry.name.clone();
        }
    }
    cache.misses.fetch_add(1, Ordering::Relaxed);

    let name = derive(raw, options);
    let mut map = cache.map.write().expect("type-name cache poisoned");
    if !map.contains_key(&key) {
        while map.len() >= capacity {
            if !evict_stalest(&mut map) {
                break;
            }
        }
    }
    let entry = map.entry(key).or_insert_with(|| Entry {
        name: name.clone(),
        last_used: AtomicU64::new(0),
    });
    entry
        .last_used
        .store(cache.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
    entry.name.clone()
}

/// `(hits, misses)` since process start or the last reset.
#[must_use]
pub fn type_name_cache_stats() -> (u64, u64) {
    (
        CACHE.hits.load(Ordering::Relaxed),
        CACHE.misses.load(Ordering::Relaxed),
    )
}

/// Empties the cache and zeroes its stats. Intended for tests.
pub fn reset_type_name_cache() {
    CACHE
        .map
        .write()
        .expect("type-name cache poisoned")
        .clear();
    CACHE.hits.store(0, Ordering::Relaxed);
    CACHE.misses.store(0, Ordering::Relaxed);
}

/// Source-context property value for `T`; what `Logger::for_type` attaches.
#[must_use]
pub fn source_context_value<T: ?Sized>() -> Value {
    Value::Str(extract_type_name::<T>(&TypeNameOptions::default()))
}

fn derive(raw: &str, options: &TypeNameOptions) -> String {
    // `&T` and `&mut T` name the same component as `T`.
    let mut stripped = raw;
    loop {
        if let Some(rest) = stripped.strip_prefix('&') {
            stripped = rest;
        } else if let Some(rest) = stripped.strip_prefix("mut ") {
            stripped = rest;
        } else {
            break;
        }
    }

    let cleaned = if options.simplify_anonymous {
        stripped.replace("{{closure}}", "closure")
    } else {
        stripped.to_string()
    };

    let shortened = shorten_paths(&cleaned, options.module_depth);
    format!("{}{}{}", options.prefix, shortened, options.suffix)
}

/// Reduces every `a::b::C` path in the name (including ones inside generic
/// arguments) to its last `depth + 1` segments.
fn shorten_paths(name: &str, depth: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut path = String::new();
    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            flush_path(&mut out, &mut path, depth);
            out.push(c);
        }
    }
    flush_path(&mut out, &mut path, depth);
    out
}

fn flush_path(out: &mut String, path: &mut String, depth: usize) {
    if path.is_empty() {
        return;
    }
    let segments: Vec<&str> = path.split("::").filter(|s| !s.is_empty()).collect();
    let keep = segments.len().min(depth + 1);
    out.push_str(&segments[segments.len() - keep..].join("::"));
    path.clear();
}
