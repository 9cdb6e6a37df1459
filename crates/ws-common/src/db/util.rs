#![allow(async_fn_in_trait)]

use std::sync::OnceLock;
use std::time::Instant;

use deadpool_postgres::GenericClient;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Row, ToStatement};
use tracing::warn;

pub const SLOW_QUERY_ENV: &str = "WS_DB_LOG_MIN_DURATION_MS";

fn parse_threshold(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map(|ms| ms.max(0) as u64)
        .filter(|ms| *ms > 0)
}

fn slow_query_threshold_ms() -> Option<u64> {
    static CACHE: OnceLock<Option<u64>> = OnceLock::new();
    *CACHE.get_or_init(|| parse_threshold(std::env::var(SLOW_QUERY_ENV).ok().as_deref()))
}

fn log_if_slow(label: &str, started_at: Instant, rows: Option<usize>) {
    let Some(threshold_ms) = slow_query_threshold_ms() else {
        return;
    };
    let elapsed_ms = started_at.elapsed().as_millis() as u64;
    if elapsed_ms >= threshold_ms {
        warn!(query = label, elapsed_ms, rows, "slow_query_detected");
    }
}

/// Query helpers that warn when a statement exceeds `WS_DB_LOG_MIN_DURATION_MS`.
pub trait TimedClientExt: GenericClient {
    async fn timed_query<S>(
        &self,
        statement: &S,
        params: &[&(dyn ToSql + Sync)],
        label: &str,
    ) -> Result<Vec<Row>, tokio_postgres::Error>
    where
        S: ToStatement + Sync + Send + ?Sized,
    {
        let started = Instant::now();
        let result = self.query(statement, params).await;
        log_if_slow(label, started, result.as_ref().ok().map(Vec::len));
        result
    }

    async fn timed_query_opt<S>(
        &self,
        statement: &S,
        params: &[&(dyn ToSql + Sync)],
        label: &str,
    ) -> Result<Option<Row>, tokio_postgres::Error>
    where
        S: ToStatement + Sync + Send + ?Sized,
    {
        let started = Instant::now();
        let result = self.query_opt(statement, params).await;
        log_if_slow(label, started, None);
        result
    }
}

impl<T: GenericClient + ?Sized> TimedClientExt for T {}
