//! Per-influencer revenue rollup over tracking events.

use influencer_core::types::{InfluencerId, TrackingEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueTotals {
    pub total_revenue: f64,
    pub total_orders: u64,
}

/// Sum revenue and orders per influencer. Influencers without events are
/// absent from the result; the performance view zero-fills them.
pub fn aggregate_revenue(events: &[TrackingEvent]) -> HashMap<InfluencerId, RevenueTotals> {
    let mut totals: HashMap<InfluencerId, RevenueTotals> = HashMap::new();
    for event in events {
        let entry = totals.entry(event.influencer_id).or_default();
        entry.total_revenue += event.revenue;
        entry.total_orders += event.orders;
    }
    totals
}
