//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use influencer_core::types::{Influencer, InfluencerId, Payout, PayoutBasis, TrackingEvent};
use influencer_core::DataStore;

pub fn influencer(id: InfluencerId, name: &str, category: &str, platform: &str) -> Influencer {
    Influencer {
        influencer_id: id,
        name: name.into(),
        category: category.into(),
        gender: "Female".into(),
        follower_count: 50_000 * id,
        platform: platform.into(),
    }
}

pub fn event(influencer_id: InfluencerId, campaign: &str, revenue: f64) -> TrackingEvent {
    TrackingEvent {
        source: "Instagram".into(),
        campaign: campaign.into(),
        influencer_id,
        user_id: format!("user-{influencer_id}-{campaign}"),
        product: "Whey Protein".into(),
        timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        orders: 1,
        revenue,
    }
}

pub fn payout(influencer_id: InfluencerId, basis: PayoutBasis, total_payout: f64) -> Payout {
    Payout {
        influencer_id,
        basis,
        rate: total_payout,
        orders: 0,
        total_payout,
    }
}

/// Five influencers:
/// 1 Fitness/Instagram, paid 1000, revenue 2500 (roas 2.5)
/// 2 Yoga/YouTube, paid 500, revenue 750 (roas 1.5)
/// 3 Fitness/YouTube, paid 2000, revenue 1000 (roas 0.5)
/// 4 Nutrition/Instagram, no payout, no events
/// 5 Yoga/Instagram, paid 0, revenue 300 (roas 0)
pub fn sample_store() -> DataStore {
    DataStore::from_parts(
        vec![
            influencer(1, "Asha Rao", "Fitness", "Instagram"),
            influencer(2, "Vik Mehta", "Yoga", "YouTube"),
            influencer(3, "Meera Iyer", "Fitness", "YouTube"),
            influencer(4, "Rohan Das", "Nutrition", "Instagram"),
            influencer(5, "Kabir Sen", "Yoga", "Instagram"),
        ],
        vec![],
        vec![
            event(1, "MuscleBlaze_Whey", 1000.0),
            event(2, "Gritzo_Kids", 750.0),
            event(1, "HKVitals_Vitamins", 1500.0),
            event(3, "MuscleBlaze_Whey", 1000.0),
            event(5, "HKVitals_Vitamins", 300.0),
        ],
        vec![
            payout(1, PayoutBasis::PerPost, 1000.0),
            payout(2, PayoutBasis::PerOrder, 500.0),
            payout(3, PayoutBasis::PerPost, 2000.0),
            payout(5, PayoutBasis::PerOrder, 0.0),
        ],
    )
    .unwrap()
}
