//! Redis-or-memory cache
//!
//! Best-effort accelerator in front of the document store. The authoritative
//! data always lives in the store; losing cache entries only costs latency,
//! never correctness. Every cache failure is logged and swallowed.
//!
//! Backed by Redis when a URL is configured and reachable, otherwise by an
//! in-process map. TTL handling is delegated to Redis (`SET .. EX`); the
//! memory backend checks expiry lazily on read.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Connection timeout for the initial Redis handshake
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-command response timeout
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

#[derive(Clone)]
enum Backend {
    Redis(ConnectionManager),
    Memory(Arc<Mutex<HashMap<String, MemoryEntry>>>),
}

/// Cache handle, cheap to clone and share across handlers
#[derive(Clone)]
pub struct Cache {
    backend: Backend,
}

impl Cache {
    /// In-process cache with no external dependency
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    /// Connect to Redis, falling back to the memory backend on any failure
    pub async fn connect(redis_url: &str) -> Self {
        match Self::try_connect(redis_url).await {
            Ok(manager) => {
                tracing::info!("Redis cache connected");
                Self {
                    backend: Backend::Redis(manager),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis connection failed, using memory cache");
                Self::memory()
            }
        }
    }

    async fn try_connect(redis_url: &str) -> Result<ConnectionManager, redis::RedisError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(CONNECT_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT);

        let client = Client::open(redis_url)?;
        let mut manager = client.get_connection_manager_with_config(config).await?;

        // Verify the connection before trusting it
        redis::cmd("PING")
            .query_async::<String>(&mut manager)
            .await?;

        Ok(manager)
    }

    /// Get a raw value from the cache
    pub async fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                match conn.get::<_, Option<String>>(key).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(key, error = %e, "Cache get failed");
                        None
                    }
                }
            }
            Backend::Memory(map) => {
                let mut map = map.lock().expect("cache mutex poisoned");
                match map.get(key) {
                    Some(entry) => {
                        if entry.expires_at.is_some_and(|at| Instant::now() >= at) {
                            map.remove(key);
                            None
                        } else {
                            Some(entry.value.clone())
                        }
                    }
                    None => None,
                }
            }
        }
    }

    /// Set a raw value with a TTL
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> bool {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                match conn
                    .set_ex::<_, _, ()>(key, value, ttl.as_secs())
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(key, error = %e, "Cache set failed");
                        false
                    }
                }
            }
            Backend::Memory(map) => {
                let mut map = map.lock().expect("cache mutex poisoned");
                map.insert(
                    key.to_string(),
                    MemoryEntry {
                        value: value.to_string(),
                        expires_at: Instant::now().checked_add(ttl),
                    },
                );
                true
            }
        }
    }

    /// Delete a key
    pub async fn delete(&self, key: &str) -> bool {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                match conn.del::<_, ()>(key).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(key, error = %e, "Cache delete failed");
                        false
                    }
                }
            }
            Backend::Memory(map) => {
                map.lock().expect("cache mutex poisoned").remove(key);
                true
            }
        }
    }

    /// Drop every cached entry
    pub async fn clear(&self) -> bool {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                match redis::cmd("FLUSHDB").query_async::<()>(&mut conn).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(error = %e, "Cache clear failed");
                        false
                    }
                }
            }
            Backend::Memory(map) => {
                map.lock().expect("cache mutex poisoned").clear();
                true
            }
        }
    }

    /// Get a JSON-encoded value
    ///
    /// Undecodable entries are treated as a miss and evicted.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache entry undecodable, evicting");
                self.delete(key).await;
                None
            }
        }
    }

    /// Set a JSON-encoded value
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw, ttl).await,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache encode failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let cache = Cache::memory();
        assert!(cache.get("missing").await.is_none());

        cache.set("k", "v", Duration::from_secs(60)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        cache.delete("k").await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_expiry() {
        let cache = Cache::memory();
        cache.set("k", "v", Duration::from_secs(0)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_clear() {
        let cache = Cache::memory();
        cache.set("a", "1", Duration::from_secs(60)).await;
        cache.set("b", "2", Duration::from_secs(60)).await;
        cache.clear().await;
        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_none());
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let cache = Cache::memory();
        let values = vec!["one".to_string(), "two".to_string()];
        cache
            .set_json("list", &values, Duration::from_secs(60))
            .await;

        let back: Vec<String> = cache.get_json("list").await.unwrap();
        assert_eq!(back, values);
    }

    #[tokio::test]
    async fn test_json_undecodable_is_miss() {
        let cache = Cache::memory();
        cache.set("bad", "not json", Duration::from_secs(60)).await;

        let back: Option<Vec<String>> = cache.get_json("bad").await;
        assert!(back.is_none());
        // Entry was evicted
        assert!(cache.get("bad").await.is_none());
    }
}
