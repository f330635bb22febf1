//! Namespace Registry
//!
//! Groups the three independently configured caches (general/API, user,
//! file) behind one façade. The registry is built explicitly at startup and
//! handed to whatever needs it; nothing here is global.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{Cache, CacheConfig, CacheStatsSnapshot, SizeEstimate};
use crate::error::CacheError;

// == Namespace ==
/// One of the registry's independent caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// General/API results
    Api,
    /// Per-user data
    User,
    /// File-derived artifacts
    File,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Api, Namespace::User, Namespace::File];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Api => "api",
            Namespace::User => "user",
            Namespace::File => "file",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(Namespace::Api),
            "user" => Ok(Namespace::User),
            "file" => Ok(Namespace::File),
            other => Err(CacheError::UnknownNamespace(other.to_string())),
        }
    }
}

// == Registry Config ==
/// Limits for each namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub api: CacheConfig,
    pub user: CacheConfig,
    pub file: CacheConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api: CacheConfig::api(),
            user: CacheConfig::user(),
            file: CacheConfig::file(),
        }
    }
}

// == Registry Stats ==
/// Aggregate over all namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalStats {
    pub size: usize,
    pub memory_usage: usize,
}

/// Per-namespace statistics plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub api: CacheStatsSnapshot,
    pub user: CacheStatsSnapshot,
    pub file: CacheStatsSnapshot,
    pub total: TotalStats,
}

// == Cache Registry ==
/// Façade over the three namespace caches.
///
/// Flat `get`/`set`/`delete`/`has` operate on the API namespace; `user()` and
/// `file()` expose the other two. Each namespace owns a disjoint map, so the
/// same key can live in all three independently.
#[derive(Debug)]
pub struct CacheRegistry<V> {
    api: Cache<V>,
    user: Cache<V>,
    file: Cache<V>,
}

impl<V> Clone for CacheRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            user: self.user.clone(),
            file: self.file.clone(),
        }
    }
}

impl<V> CacheRegistry<V>
where
    V: SizeEstimate + Send + 'static,
{
    // == Lifecycle ==
    /// Builds all three caches and starts their cleanup tasks.
    pub fn init(config: RegistryConfig) -> Self {
        let registry = Self {
            api: Cache::new(Namespace::Api.as_str(), config.api),
            user: Cache::new(Namespace::User.as_str(), config.user),
            file: Cache::new(Namespace::File.as_str(), config.file),
        };
        info!("Cache registry initialized");
        registry
    }

    /// Stops every cleanup task and discards all entries.
    pub async fn destroy(&self) {
        for namespace in Namespace::ALL {
            self.namespace(namespace).destroy().await;
        }
        info!("Cache registry destroyed");
    }

    // == Namespaces ==
    pub fn api(&self) -> &Cache<V> {
        &self.api
    }

    pub fn user(&self) -> &Cache<V> {
        &self.user
    }

    pub fn file(&self) -> &Cache<V> {
        &self.file
    }

    /// Selects a namespace by name.
    pub fn namespace(&self, namespace: Namespace) -> &Cache<V> {
        match namespace {
            Namespace::Api => &self.api,
            Namespace::User => &self.user,
            Namespace::File => &self.file,
        }
    }

    // == API Namespace Shortcuts ==
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.api.get(key)
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.api.set(key, value, ttl);
    }

    pub fn delete(&self, key: &str) -> bool {
        self.api.delete(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.api.has(key)
    }

    // == Aggregates ==
    /// Statistics for every namespace, with size and memory summed in `total`.
    pub fn stats(&self) -> RegistryStats {
        let api = self.api.stats();
        let user = self.user.stats();
        let file = self.file.stats();

        let total = TotalStats {
            size: api.size + user.size + file.size,
            memory_usage: api.memory_usage + user.memory_usage + file.memory_usage,
        };

        RegistryStats {
            api,
            user,
            file,
            total,
        }
    }

    /// Clears all three namespaces.
    pub fn clear_all(&self) {
        for namespace in Namespace::ALL {
            self.namespace(namespace).clear();
        }
        info!("All cache namespaces cleared");
    }
}

impl<V> Default for CacheRegistry<V>
where
    V: SizeEstimate + Send + 'static,
{
    fn default() -> Self {
        Self::init(RegistryConfig::default())
    }
}
