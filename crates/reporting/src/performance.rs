//! Denormalized per-influencer performance view.
//!
//! Influencers are left-joined with payouts and with the revenue rollup.
//! A missing join side means no activity, so every numeric field it would
//! have supplied is zero rather than unknown.

use crate::aggregator::aggregate_revenue;
use influencer_core::types::{InfluencerId, Payout, PayoutBasis};
use influencer_core::DataStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One influencer with spend, revenue, and ROAS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub influencer_id: InfluencerId,
    pub name: String,
    pub category: String,
    pub gender: String,
    pub follower_count: u64,
    pub platform: String,
    /// `None` when the influencer has no payout row.
    pub basis: Option<PayoutBasis>,
    pub rate: f64,
    /// Orders recorded on the payout row.
    pub orders: u64,
    pub total_payout: f64,
    pub total_revenue: f64,
    /// Orders counted from tracking events.
    pub total_orders: u64,
    pub roas: f64,
}

/// Return on ad spend rounded to two decimals (ties to even); zero when
/// nothing was spent.
pub fn roas(revenue: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        round2(revenue / spend)
    } else {
        0.0
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// The base view: one record per influencer, in influencer file order.
/// Never mutated after `build`.
#[derive(Debug, Clone, Default)]
pub struct PerformanceView {
    records: Vec<PerformanceRecord>,
}

impl PerformanceView {
    pub fn build(store: &DataStore) -> Self {
        let payouts: HashMap<InfluencerId, &Payout> = store
            .payouts
            .iter()
            .map(|p| (p.influencer_id, p))
            .collect();
        let revenue = aggregate_revenue(&store.tracking);

        let records: Vec<PerformanceRecord> = store
            .influencers
            .iter()
            .map(|inf| {
                let payout = payouts.get(&inf.influencer_id);
                let totals = revenue.get(&inf.influencer_id).copied().unwrap_or_default();
                let total_payout = payout.map_or(0.0, |p| p.total_payout);

                PerformanceRecord {
                    influencer_id: inf.influencer_id,
                    name: inf.name.clone(),
                    category: inf.category.clone(),
                    gender: inf.gender.clone(),
                    follower_count: inf.follower_count,
                    platform: inf.platform.clone(),
                    basis: payout.map(|p| p.basis),
                    rate: payout.map_or(0.0, |p| p.rate),
                    orders: payout.map_or(0, |p| p.orders),
                    total_payout,
                    total_revenue: totals.total_revenue,
                    total_orders: totals.total_orders,
                    roas: roas(totals.total_revenue, total_payout),
                }
            })
            .collect();

        debug!(
            records = records.len(),
            with_payout = records.iter().filter(|r| r.basis.is_some()).count(),
            "Performance view built"
        );
        Self { records }
    }

    pub fn records(&self) -> &[PerformanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, influencer_id: InfluencerId) -> Option<&PerformanceRecord> {
        self.records
            .iter()
            .find(|r| r.influencer_id == influencer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{event, influencer, payout, sample_store};

    #[test]
    fn test_roas_division_guard() {
        assert!((roas(2500.0, 1000.0) - 2.5).abs() < f64::EPSILON);
        assert_eq!(roas(1234.0, 0.0), 0.0);
        assert_eq!(roas(0.0, 0.0), 0.0);
        assert!((roas(1000.0, 3000.0) - 0.33).abs() < f64::EPSILON);
        assert!((roas(2000.0, 3000.0) - 0.67).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roas_half_cent_rounds_to_even() {
        assert_eq!(roas(1.0, 8.0), 0.12);
        assert_eq!(roas(5.0, 8.0), 0.62);
        assert_eq!(roas(3.0, 8.0), 0.38);
    }

    #[test]
    fn test_one_record_per_influencer_in_order() {
        let view = PerformanceView::build(&sample_store());
        let ids: Vec<_> = view.records().iter().map(|r| r.influencer_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_roas_from_joined_sides() {
        let view = PerformanceView::build(&sample_store());
        let asha = view.get(1).unwrap();
        assert!((asha.total_revenue - 2500.0).abs() < f64::EPSILON);
        assert!((asha.total_payout - 1000.0).abs() < f64::EPSILON);
        assert_eq!(asha.total_orders, 2);
        assert!((asha.roas - 2.5).abs() < f64::EPSILON);
        assert_eq!(asha.basis, Some(PayoutBasis::PerPost));
    }

    #[test]
    fn test_missing_sides_zero_filled() {
        let view = PerformanceView::build(&sample_store());
        let rohan = view.get(4).unwrap();
        assert_eq!(rohan.basis, None);
        assert_eq!(rohan.rate, 0.0);
        assert_eq!(rohan.orders, 0);
        assert_eq!(rohan.total_payout, 0.0);
        assert_eq!(rohan.total_revenue, 0.0);
        assert_eq!(rohan.total_orders, 0);
        assert_eq!(rohan.roas, 0.0);
    }

    #[test]
    fn test_zero_payout_gives_zero_roas() {
        let view = PerformanceView::build(&sample_store());
        let kabir = view.get(5).unwrap();
        assert!((kabir.total_revenue - 300.0).abs() < f64::EPSILON);
        assert_eq!(kabir.roas, 0.0);
    }

    #[test]
    fn test_revenue_conserved_across_view() {
        let store = sample_store();
        let view = PerformanceView::build(&store);
        let view_total: f64 = view.records().iter().map(|r| r.total_revenue).sum();
        let event_total: f64 = store.tracking.iter().map(|e| e.revenue).sum();
        assert!((view_total - event_total).abs() < 1e-9);
    }

    #[test]
    fn test_events_for_unknown_influencer_not_joined() {
        let store = DataStore::from_parts(
            vec![influencer(1, "Asha Rao", "Fitness", "Instagram")],
            vec![],
            vec![event(1, "Gritzo_Kids", 400.0), event(99, "Gritzo_Kids", 800.0)],
            vec![payout(1, PayoutBasis::PerPost, 200.0)],
        )
        .unwrap();
        let view = PerformanceView::build(&store);

        assert_eq!(view.len(), 1);
        assert!((view.records()[0].roas - 2.0).abs() < f64::EPSILON);
    }
}
