use crate::method::Method0;
use botpulse_shared_models::StatisticsSnapshot;

pub struct Stats;

impl Method0 for Stats {
    const PATH: &'static str = "/api/stats";
    type Response = StatisticsSnapshot;
}
