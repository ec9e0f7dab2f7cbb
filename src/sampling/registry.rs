//! Process-wide registry of named sampling profiles.
//!
//! A profile maps a name plus optional version to a factory producing a
//! fresh strategy. Deployments register profiles at startup, optionally
//! freeze the registry, and resolve by name thereafter; version drift is
//! handled by the configured migration policy.

use super::SamplingFilter;
use crate::error::Error;
use crate::selflog;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, RwLock};

/// Produces a fresh strategy instance per resolution.
pub type ProfileFactory = Arc<dyn Fn() -> Arc<dyn SamplingFilter> + Send + Sync>;

/// What happens when a requested profile version is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrationPolicy {
    /// Refuse resolution with an error.
    Deny,
    /// Resolve to the nearest version and report through selflog.
    #[default]
    Warn,
    /// Resolve to the nearest version silently.
    Auto,
}

struct ProfileEntry {
    factory: ProfileFactory,
    replaced_by: Option<String>,
}

struct Inner {
    profiles: HashMap<String, BTreeMap<u32, ProfileEntry>>,
    policy: MigrationPolicy,
    max_version_distance: u32,
}

/// Named profile registry; use [`ProfileRegistry::global`] for the shared
/// instance.
pub struct ProfileRegistry {
    inner: RwLock<Inner>,
    frozen: AtomicBool,
}

static GLOBAL: LazyLock<ProfileRegistry> = LazyLock::new(ProfileRegistry::new);

impl ProfileRegistry {
    fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                profiles: HashMap::new(),
                policy: MigrationPolicy::default(),
                max_version_distance: 1,
            }),
            frozen: AtomicBool::new(false),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// A private registry, independent of the process-wide one. Useful for
    /// embedding scenarios and tests that must not disturb global state.
    #[must_use]
    pub fn standalone() -> Self {
        Self::new()
    }

    fn ensure_mutable(&self) -> Result<(), Error> {
        if self.frozen.load(Ordering::Acquire) {
            return Err(Error::RegistryFrozen);
        }
        Ok(())
    }

    /// Registers a profile version.
    ///
    /// # Errors
    /// Fails when the registry is frozen or the exact name/version pair is
    /// already present.
    pub fn register(&self, name: &str, version: u32, factory: ProfileFactory) -> Result<(), Error> {
        self.ensure_mutable()?;
        let mut inner = self.inner.write().expect("profile registry poisoned");
        let versions = inner.profiles.entry(name.to_string()).or_default();
        if versions.contains_key(&version) {
            return Err(Error::Registry(format!(
                "profile '{name}' version {version} already registered"
            )));
        }
        versions.insert(
            version,
            ProfileEntry {
                factory,
                replaced_by: None,
            },
        );
        Ok(())
    }

    /// Flags a profile version as deprecated, with a replacement hint.
    ///
    /// # Errors
    /// Fails when the registry is frozen or the pair is unknown.
    pub fn deprecate(&self, name: &str, version: u32, replaced_by: &str) -> Result<(), Error> {
        self.ensure_mutable()?;
        let mut inner = self.inner.write().expect("profile registry poisoned");
        let entry = inner
            .profiles
            .get_mut(name)
            .and_then(|versions| versions.get_mut(&version))
            .ok_or_else(|| {
                Error::Registry(format!("unknown profile '{name}' version {version}"))
            })?;
        entry.replaced_by = Some(replaced_by.to_string());
        Ok(())
    }

    /// Sets the version-migration policy and the furthest version distance
    /// it may bridge.
    ///
    /// # Errors
    /// Fails when the registry is frozen.
    pub fn set_migration_policy(
        &self,
        policy: MigrationPolicy,
        max_version_distance: u32,
    ) -> Result<(), Error> {
        self.ensure_mutable()?;
        let mut inner = self.inner.write().expect("profile registry poisoned");
        inner.policy = policy;
        inner.max_version_distance = max_version_distance;
        Ok(())
    }

    /// Resolves a profile to a fresh strategy instance.
    ///
    /// With no version, the highest registered version wins. A missing
    /// version migrates to the nearest registered one when the policy and
    /// distance allow it.
    ///
    /// # Errors
    /// Unknown names, denied migrations, and out-of-distance versions fail.
    pub fn resolve(
        &self,
        name: &str,
        version: Option<u32>,
    ) -> Result<Arc<dyn SamplingFilter>, Error> {
        let inner = self.inner.read().expect("profile registry poisoned");
        let versions = inner
            .profiles
            .get(name)
            .ok_or_else(|| Error::Registry(format!("unknown profile '{name}'")))?;

        let (resolved_version, entry) = match version {
            None => {
                let (&latest, entry) = versions.iter().next_back().ok_or_else(|| {
                    Error::Registry(format!("profile '{name}' has no versions"))
                })?;
                (latest, entry)
            }
            Some(wanted) => {
                if let Some(entry) = versions.get(&wanted) {
                    (wanted, entry)
                } else {
                    let nearest = versions
                        .keys()
                        .min_by_key(|&&v| v.abs_diff(wanted))
                        .copied()
                        .ok_or_else(|| {
                            Error::Registry(format!("profile '{name}' has no versions"))
                        })?;
                    let distance = nearest.abs_diff(wanted);
                    if distance > inner.max_version_distance {
                        return Err(Error::Registry(format!(
                            "profile '{name}' version {wanted} is {distance} versions from nearest {nearest}, beyond the allowed distance"
                        )));
                    }
                    match inner.policy {
                        MigrationPolicy::Deny => {
                            return Err(Error::Registry(format!(
                                "profile '{name}' version {wanted} not registered and migration is denied"
                            )));
                        }
                        MigrationPolicy::Warn => {
                            if selflog::is_enabled() {
                                selflog::report(
                                    "sampling",
                                    &format!(
                                        "profile '{name}' version {wanted} migrated to {nearest}"
                                    ),
                                );
                            }
                        }
                        MigrationPolicy::Auto => {}
                    }
                    (nearest, versions.get(&nearest).expect("nearest came from this map"))
                }
            }
        };

        if let Some(replacement) = &entry.replaced_by
            && selflog::is_enabled()
        {
            selflog::report(
                "sampling",
                &format!(
                    "profile '{name}' version {resolved_version} is deprecated; use '{replacement}'"
                ),
            );
        }
        Ok((entry.factory)())
    }

    /// Refuses all further mutation.
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    /// Whether the registry has been frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Clears all profiles and unfreezes. Intended for tests.
    pub fn reset_for_tests(&self) {
        let mut inner = self.inner.write().expect("profile registry poisoned");
        inner.profiles.clear();
        inner.policy = MigrationPolicy::default();
        inner.max_version_distance = 1;
        drop(inner);
        self.frozen.store(false, Ordering::Release);
    }
}
