//! Selector-driven filtering of the performance view.
//!
//! The campaign selector is resolved against tracking events: an influencer
//! passes when at least one of their events carries the selected campaign.
//! Platform and category compare directly against the record.

use crate::performance::{PerformanceRecord, PerformanceView};
use influencer_core::types::{InfluencerId, TrackingEvent};
use influencer_core::DataStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Sentinel label meaning "no restriction".
pub const ALL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<Option<String>> for Selector {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, |v| Self::parse(&v))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => f.write_str(value),
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// The three dashboard selectors. Default is all-`All`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub campaign: Selector,
    pub platform: Selector,
    pub category: Selector,
}

impl FilterSelection {
    pub fn active_filters(&self) -> usize {
        [&self.campaign, &self.platform, &self.category]
            .iter()
            .filter(|s| !s.is_all())
            .count()
    }
}

/// Apply `selection` to a copy of the view. Order: campaign, platform,
/// category. Each concrete selector only narrows the working set.
pub fn apply_filters(
    view: &PerformanceView,
    tracking: &[TrackingEvent],
    selection: &FilterSelection,
) -> Vec<PerformanceRecord> {
    let mut working: Vec<PerformanceRecord> = view.records().to_vec();

    if let Selector::Only(campaign) = &selection.campaign {
        let participants = campaign_participants(tracking, campaign);
        working.retain(|r| participants.contains(&r.influencer_id));
    }
    if !selection.platform.is_all() {
        working.retain(|r| selection.platform.matches(&r.platform));
    }
    if !selection.category.is_all() {
        working.retain(|r| selection.category.matches(&r.category));
    }
    working
}

/// Influencers with at least one tracking event under `campaign`.
pub fn campaign_participants(tracking: &[TrackingEvent], campaign: &str) -> HashSet<InfluencerId> {
    tracking
        .iter()
        .filter(|e| e.campaign == campaign)
        .map(|e| e.influencer_id)
        .collect()
}

/// Values offered by each selector: `All` first, then distinct observed
/// values in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub campaigns: Vec<String>,
    pub platforms: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn from_store(store: &DataStore) -> Self {
        Self {
            campaigns: with_all(store.tracking.iter().map(|e| e.campaign.as_str())),
            platforms: with_all(store.influencers.iter().map(|i| i.platform.as_str())),
            categories: with_all(store.influencers.iter().map(|i| i.category.as_str())),
        }
    }
}

fn with_all<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL.to_string()];
    for value in values {
        if seen.insert(value) {
            options.push(value.to_string());
        }
    }
    options
}
