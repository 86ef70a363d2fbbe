//! Redis-backed key-value store.

use std::sync::LazyLock;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::config::mask_connection_string;
use crate::domain::store::{KeyValueStore, Reservation, StoreError, StoreResult};

/// Check-claim-link in one server-side step.
///
/// KEYS[1] = candidate code, KEYS[2] = reverse key,
/// ARGV[1] = url, ARGV[2] = candidate code.
///
/// Replies `{1, code}` when claimed, `{0, ''}` when the code is taken and
/// `{2, winner}` when the URL already has a code.
static RESERVE_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
local winner = redis.call('GET', KEYS[2])
if winner then
    return {2, winner}
end
if redis.call('SETNX', KEYS[1], ARGV[1]) == 0 then
    return {0, ''}
end
redis.call('SET', KEYS[2], ARGV[2])
return {1, ARGV[2]}
",
    )
});

/// Redis store for forward and reverse mappings.
///
/// Uses `ConnectionManager`, which multiplexes commands over one connection
/// and reconnects on failure. Command errors are not swallowed: every failure
/// surfaces as [`StoreError::Unavailable`].
///
/// Keys are written without a namespace prefix, so the store shares its
/// keyspace layout with other deployments of the same service.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// Connection establishment is retried with jittered exponential backoff,
    /// `retries` times after the first attempt.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established or the PING fails.
    pub async fn connect(redis_url: &str, retries: usize) -> StoreResult<Self> {
        info!(
            "Connecting to Redis at {}",
            mask_connection_string(redis_url)
        );

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(std::time::Duration::from_secs(2))
            .map(jitter)
            .take(retries);

        let manager = Retry::start(strategy, || {
            let client = client.clone();
            async move {
                ConnectionManager::new(client).await.inspect_err(|e| {
                    warn!("Redis connection attempt failed: {}", e);
                })
            }
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

/// Maps the `{status, value}` reply of [`RESERVE_SCRIPT`] to a [`Reservation`].
fn decode_reservation(status: i64, value: String) -> StoreResult<Reservation> {
    match status {
        0 => Ok(Reservation::CodeTaken),
        1 => Ok(Reservation::Claimed),
        2 if !value.is_empty() => Ok(Reservation::Superseded(value)),
        2 => Err(StoreError::UnexpectedReply(
            "reserve script reported a winner without a code".to_string(),
        )),
        other => Err(StoreError::UnexpectedReply(format!(
            "reserve script returned status {}",
            other
        ))),
    }
}

fn unavailable(op: &str, key: &str, e: redis::RedisError) -> StoreError {
    error!("Redis {} error for {}: {}", op, key, e);
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| unavailable("GET", key, e))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| unavailable("SET", key, e))
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        conn.set_nx::<_, _, bool>(key, value)
            .await
            .map_err(|e| unavailable("SETNX", key, e))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        let deleted = conn
            .del::<_, i64>(key)
            .await
            .map_err(|e| unavailable("DEL", key, e))?;
        debug!("Redis DEL {} removed {} key(s)", key, deleted);
        Ok(())
    }

    async fn reserve(&self, code: &str, url: &str, reverse_key: &str) -> StoreResult<Reservation> {
        let mut conn = self.client.clone();
        let mut invocation = RESERVE_SCRIPT.prepare_invoke();
        invocation.key(code).key(reverse_key).arg(url).arg(code);

        let (status, value): (i64, String) = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(|e| unavailable("EVALSHA", code, e))?;

        decode_reservation(status, value)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
