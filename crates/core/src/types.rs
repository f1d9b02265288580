use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type InfluencerId = u64;

/// Reference entity: one row of `influencers.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    #[serde(alias = "id")]
    pub influencer_id: InfluencerId,
    pub name: String,
    pub category: String,
    pub gender: String,
    pub follower_count: u64,
    pub platform: String,
}

/// A published post. Loaded and validated but not part of the ROAS rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub influencer_id: InfluencerId,
    pub platform: String,
    #[serde(rename = "date", alias = "timestamp", deserialize_with = "de_timestamp")]
    pub timestamp: NaiveDateTime,
    pub url: String,
    pub caption: String,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
}

/// One attributed order linked to an influencer through a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub source: String,
    pub campaign: String,
    pub influencer_id: InfluencerId,
    pub user_id: String,
    pub product: String,
    #[serde(rename = "date", alias = "timestamp", deserialize_with = "de_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default = "default_orders")]
    pub orders: u64,
    #[serde(deserialize_with = "de_amount")]
    pub revenue: f64,
}

fn default_orders() -> u64 {
    1
}

/// Compensation model of a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutBasis {
    PerPost,
    PerOrder,
}

impl PayoutBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerPost => "per_post",
            Self::PerOrder => "per_order",
        }
    }
}

impl fmt::Display for PayoutBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per influencer in `payouts.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub influencer_id: InfluencerId,
    pub basis: PayoutBasis,
    #[serde(deserialize_with = "de_amount")]
    pub rate: f64,
    /// Only meaningful for `PayoutBasis::PerOrder`.
    pub orders: u64,
    #[serde(deserialize_with = "de_amount")]
    pub total_payout: f64,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse the timestamp layouts produced by common CSV writers.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// Money amounts must be finite and non-negative.
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "amount must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}
