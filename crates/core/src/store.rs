//! CSV-backed data store holding the four source tables.

use crate::config::DataFiles;
use crate::error::{DashboardError, DashboardResult};
use crate::types::{Influencer, InfluencerId, Payout, Post, TrackingEvent};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

// Each entry lists accepted spellings of one required column.
const INFLUENCER_COLUMNS: &[&[&str]] = &[
    &["influencer_id", "id"],
    &["name"],
    &["category"],
    &["gender"],
    &["follower_count"],
    &["platform"],
];
const POST_COLUMNS: &[&[&str]] = &[
    &["post_id"],
    &["influencer_id"],
    &["platform"],
    &["date", "timestamp"],
    &["url"],
    &["caption"],
    &["reach"],
    &["likes"],
    &["comments"],
];
const TRACKING_COLUMNS: &[&[&str]] = &[
    &["source"],
    &["campaign"],
    &["influencer_id"],
    &["user_id"],
    &["product"],
    &["date", "timestamp"],
    &["revenue"],
];
const PAYOUT_COLUMNS: &[&[&str]] = &[
    &["influencer_id"],
    &["basis"],
    &["rate"],
    &["orders"],
    &["total_payout"],
];

/// The four loaded datasets. Immutable once built; a reload produces a new
/// store.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub influencers: Vec<Influencer>,
    pub posts: Vec<Post>,
    pub tracking: Vec<TrackingEvent>,
    pub payouts: Vec<Payout>,
}

impl DataStore {
    /// Load and validate all four files from `dir`.
    pub fn load(dir: &Path, files: &DataFiles) -> DashboardResult<Self> {
        let [influencers_path, posts_path, tracking_path, payouts_path] = files.paths(dir);

        let influencers = read_table(&influencers_path, INFLUENCER_COLUMNS)?;
        let posts = read_table(&posts_path, POST_COLUMNS)?;
        let tracking = read_table(&tracking_path, TRACKING_COLUMNS)?;
        let payouts = read_table(&payouts_path, PAYOUT_COLUMNS)?;

        let store = Self::from_parts(influencers, posts, tracking, payouts)?;
        metrics::counter!("dashboard.store.loads").increment(1);
        info!(
            data_dir = %dir.display(),
            influencers = store.influencers.len(),
            posts = store.posts.len(),
            tracking_events = store.tracking.len(),
            payouts = store.payouts.len(),
            "Data store loaded"
        );
        Ok(store)
    }

    /// Build a store from in-memory tables, applying the same key checks as
    /// `load`.
    pub fn from_parts(
        influencers: Vec<Influencer>,
        posts: Vec<Post>,
        tracking: Vec<TrackingEvent>,
        payouts: Vec<Payout>,
    ) -> DashboardResult<Self> {
        let store = Self {
            influencers,
            posts,
            tracking,
            payouts,
        };
        store.validate()?;
        Ok(store)
    }

    pub fn influencer_ids(&self) -> HashSet<InfluencerId> {
        self.influencers.iter().map(|i| i.influencer_id).collect()
    }

    fn validate(&self) -> DashboardResult<()> {
        ensure_unique("influencers", self.influencers.iter().map(|i| i.influencer_id))?;
        ensure_unique("payouts", self.payouts.iter().map(|p| p.influencer_id))?;

        let known = self.influencer_ids();
        let orphans = [
            ("posts", count_orphans(&known, self.posts.iter().map(|p| p.influencer_id))),
            (
                "tracking",
                count_orphans(&known, self.tracking.iter().map(|t| t.influencer_id)),
            ),
            (
                "payouts",
                count_orphans(&known, self.payouts.iter().map(|p| p.influencer_id)),
            ),
        ];
        for (table, count) in orphans {
            if count > 0 {
                warn!(table, rows = count, "Rows reference unknown influencer_id");
            }
        }
        Ok(())
    }
}

fn ensure_unique(
    table: &str,
    ids: impl Iterator<Item = InfluencerId>,
) -> DashboardResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DashboardError::DuplicateKey {
                file: table.to_string(),
                id,
            });
        }
    }
    Ok(())
}

fn count_orphans(
    known: &HashSet<InfluencerId>,
    ids: impl Iterator<Item = InfluencerId>,
) -> usize {
    ids.filter(|id| !known.contains(id)).count()
}

fn read_table<T: DeserializeOwned>(
    path: &Path,
    required: &[&[&str]],
) -> DashboardResult<Vec<T>> {
    if !path.is_file() {
        return Err(DashboardError::MissingFile(path.to_path_buf()));
    }
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|names| !names.iter().any(|name| headers.iter().any(|h| h == *name)))
        .map(|names| names.join("|"))
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::MissingColumns {
            file,
            columns: missing,
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|e| DashboardError::Parse {
            file: file.clone(),
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    debug!(file = %file, rows = rows.len(), "Table loaded");
    Ok(rows)
}

/// Modification stamp of every source file. Equal fingerprints mean no
/// source file changed between captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFingerprint {
    stamps: Vec<FileStamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: Option<u64>,
}

impl SourceFingerprint {
    /// Never fails: an unreadable file is recorded as absent so the next
    /// load reports the real error.
    pub fn capture(dir: &Path, files: &DataFiles) -> Self {
        let stamps = files
            .paths(dir)
            .into_iter()
            .map(|path| {
                let meta = std::fs::metadata(&path).ok();
                FileStamp {
                    modified: meta.as_ref().and_then(|m| m.modified().ok()),
                    len: meta.as_ref().map(|m| m.len()),
                    path,
                }
            })
            .collect();
        Self { stamps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PayoutBasis;

    const INFLUENCERS: &str = "influencer_id,name,category,gender,follower_count,platform\n\
        1,Asha Rao,Fitness,Female,120000,Instagram\n\
        2,Vik Mehta,Yoga,Male,45000,YouTube\n";
    const POSTS: &str = "post_id,influencer_id,platform,date,url,caption,reach,likes,comments\n\
        p-1,1,Instagram,2025-01-04 10:00:00.000000,https://example.com/p1,\"Leg day, again\",9000,1200,80\n";
    const TRACKING: &str = "source,campaign,influencer_id,user_id,product,date,orders,revenue\n\
        Instagram,MuscleBlaze_Whey,1,u-1,Whey Protein,2025-01-05 09:30:00.000000,1,1500.5\n\
        Instagram,Gritzo_Kids,1,u-2,Super Gummy,2025-01-06 11:00:00.000000,1,999.5\n";
    const PAYOUTS: &str = "influencer_id,basis,rate,orders,total_payout\n\
        1,per_post,1000.0,0,1000.0\n\
        2,per_order,120.0,0,0.0\n";

    fn write_fixture(
        influencers: &str,
        posts: &str,
        tracking: &str,
        payouts: &str,
    ) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let files = DataFiles::default();
        std::fs::write(dir.path().join(&files.influencers), influencers).unwrap();
        std::fs::write(dir.path().join(&files.posts), posts).unwrap();
        std::fs::write(dir.path().join(&files.tracking), tracking).unwrap();
        std::fs::write(dir.path().join(&files.payouts), payouts).unwrap();
        dir
    }

    #[test]
    fn test_load_all_tables() {
        let dir = write_fixture(INFLUENCERS, POSTS, TRACKING, PAYOUTS);
        let store = DataStore::load(dir.path(), &DataFiles::default()).unwrap();

        assert_eq!(store.influencers.len(), 2);
        assert_eq!(store.posts.len(), 1);
        assert_eq!(store.posts[0].caption, "Leg day, again");
        assert_eq!(store.tracking.len(), 2);
        assert!((store.tracking[0].revenue - 1500.5).abs() < f64::EPSILON);
        assert_eq!(store.payouts[1].basis, PayoutBasis::PerOrder);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = write_fixture(INFLUENCERS, POSTS, TRACKING, PAYOUTS);
        std::fs::remove_file(dir.path().join("payouts.csv")).unwrap();

        let err = DataStore::load(dir.path(), &DataFiles::default()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingFile(p) if p.ends_with("payouts.csv")));
    }

    #[test]
    fn test_missing_columns_are_listed() {
        let tracking = "source,influencer_id,user_id,product,orders\n";
        let dir = write_fixture(INFLUENCERS, POSTS, tracking, PAYOUTS);

        match DataStore::load(dir.path(), &DataFiles::default()).unwrap_err() {
            DashboardError::MissingColumns { file, columns } => {
                assert_eq!(file, "tracking_data.csv");
                assert_eq!(columns, vec!["campaign", "date|timestamp", "revenue"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timestamp_and_id_aliases_accepted() {
        let influencers = "id,name,category,gender,follower_count,platform\n\
            1,Asha Rao,Fitness,Female,120000,Instagram\n";
        let tracking = "source,campaign,influencer_id,user_id,product,timestamp,revenue\n\
            Instagram,MuscleBlaze_Whey,1,u-1,Creatine,2025-01-05,800\n";
        let payouts = "influencer_id,basis,rate,orders,total_payout\n";
        let dir = write_fixture(influencers, POSTS, tracking, payouts);

        let store = DataStore::load(dir.path(), &DataFiles::default()).unwrap();
        assert_eq!(store.influencers[0].influencer_id, 1);
        assert_eq!(store.tracking[0].orders, 1);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let payouts = "influencer_id,basis,rate,orders,total_payout\n\
            1,per_post,1000.0,0,1000.0\n\
            2,per_click,120.0,0,0.0\n";
        let dir = write_fixture(INFLUENCERS, POSTS, TRACKING, payouts);

        match DataStore::load(dir.path(), &DataFiles::default()).unwrap_err() {
            DashboardError::Parse { file, line, .. } => {
                assert_eq!(file, "payouts.csv");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let tracking = "source,campaign,influencer_id,user_id,product,date,orders,revenue\n\
            Instagram,MuscleBlaze_Whey,1,u-1,Whey Protein,2025-01-05 09:30:00,1,-10\n";
        let dir = write_fixture(INFLUENCERS, POSTS, tracking, PAYOUTS);

        let err = DataStore::load(dir.path(), &DataFiles::default()).unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_payout_rejected() {
        let payouts = "influencer_id,basis,rate,orders,total_payout\n\
            1,per_post,1000.0,0,1000.0\n\
            1,per_order,100.0,3,300.0\n";
        let dir = write_fixture(INFLUENCERS, POSTS, TRACKING, payouts);

        let err = DataStore::load(dir.path(), &DataFiles::default()).unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateKey { id: 1, .. }));
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let dir = write_fixture(INFLUENCERS, POSTS, TRACKING, PAYOUTS);
        let files = DataFiles::default();

        let before = SourceFingerprint::capture(dir.path(), &files);
        assert_eq!(before, SourceFingerprint::capture(dir.path(), &files));

        let extra = format!("{TRACKING}Instagram,Gritzo_Kids,2,u-3,Creatine,2025-01-07,1,400\n");
        std::fs::write(dir.path().join(&files.tracking), extra).unwrap();
        assert_ne!(before, SourceFingerprint::capture(dir.path(), &files));
    }
}
