use botpulse_shared_models::{InteractionType, ResponseType, StatisticsSnapshot};
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use tracing::info;

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";

/// Hash holding one field per counter.
pub const METRICS_KEY: &str = "botpulse:counters";

/// Redis-backed store for the counters served on `/api/stats`.
#[derive(Debug, Clone)]
pub struct MetricsStore {
    client: Client,
}

impl MetricsStore {
    pub fn open(redis_url: &str) -> redis::RedisResult<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }

    async fn connection(&self) -> redis::RedisResult<redis::aio::Connection> {
        self.client.get_async_connection().await
    }

    pub async fn set_snapshot(&self, snapshot: &StatisticsSnapshot) -> redis::RedisResult<()> {
        let mut con = self.connection().await?;
        con.hset_multiple(METRICS_KEY, &snapshot.counters()[..]).await
    }

    pub async fn get_snapshot(&self) -> redis::RedisResult<StatisticsSnapshot> {
        let mut con = self.connection().await?;
        let fields: HashMap<String, u64> = con.hgetall(METRICS_KEY).await?;
        Ok(decode(fields))
    }

    /// Both increments and the read-back run server side in one MULTI/EXEC.
    pub async fn record_interaction(
        &self,
        interaction: InteractionType,
        response: ResponseType,
    ) -> redis::RedisResult<StatisticsSnapshot> {
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (field, by) in increments(interaction, response) {
            pipe.hincr(METRICS_KEY, field, by).ignore();
        }
        pipe.hgetall(METRICS_KEY);

        let mut con = self.connection().await?;
        let (fields,): (HashMap<String, u64>,) = pipe.query_async(&mut con).await?;

        info!(%interaction, %response, "interaction recorded");
        Ok(decode(fields))
    }
}

/// Counters touched by one interaction, with the amount to add.
pub(crate) fn increments(
    interaction: InteractionType,
    response: ResponseType,
) -> Vec<(&'static str, u64)> {
    let mut delta = StatisticsSnapshot::default();
    delta.record(interaction, response);
    delta
        .counters()
        .into_iter()
        .filter(|(_, by)| *by > 0)
        .collect()
}

/// Missing fields, including a missing key, read as zero.
pub(crate) fn decode(fields: HashMap<String, u64>) -> StatisticsSnapshot {
    let mut snapshot = StatisticsSnapshot::default();
    for (field, value) in fields {
        if let Some(counter) = snapshot.counter_mut(&field) {
            *counter = value;
        }
    }
    snapshot
}
