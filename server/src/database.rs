//! # Redis
//!
//! Persistence for the pending-submission queue.
//!
//! The queue is deliberately tiny: one key holding a JSON list (see
//! [`crate::pending`]). Redis is overkill for the data volume but gives us
//! persistence across restarts and the same connection handling the rest of
//! the deployment already uses.
//!
//! The connection manager is configured with a short timeout and a single
//! retry so an unreachable Redis degrades into the queue's best-effort
//! semantics instead of hanging requests.
use std::time::Duration;

use redis::{
    Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();
    let connection_manager = client
        .get_connection_manager_with_config(config)
        .await
        .unwrap();

    connection_manager
}
