pub mod operations;

pub use operations::{DEFAULT_REDIS_URL, METRICS_KEY, MetricsStore};
