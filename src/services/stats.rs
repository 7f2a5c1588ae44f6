use crate::models::{Series, SeriesSummary};
use crate::services::sort::{self, SortKey};
use crate::services::{auth, catalog, follows, history};
use crate::Database;
use anyhow::Result;
use chrono::{Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_series: i64,
    pub total_views: u64,
    pub total_follows: i64,
    /// Distinct users who read something in the last 24 hours.
    pub active_readers: i64,
    pub recently_updated: Vec<SeriesSummary>,
}

/// Sum of catalog views, saturating on imported counts too large to add.
fn total_views(catalog: &[Series]) -> u64 {
    catalog
        .iter()
        .map(|s| s.views)
        .fold(0u64, u64::saturating_add)
}

pub fn dashboard(db: &Database, recent_count: usize) -> Result<DashboardStats> {
    let mut catalog = catalog::snapshot(db)?;
    let total_views = total_views(&catalog);
    catalog.sort_by(sort::comparator::<Series>(SortKey::Updated));

    Ok(DashboardStats {
        total_users: auth::count_users(db)?,
        total_series: catalog.len() as i64,
        total_views,
        total_follows: follows::count_follows(db)?,
        active_readers: history::count_active_readers(db, Utc::now() - Duration::hours(24))?,
        recently_updated: catalog
            .iter()
            .take(recent_count)
            .map(SeriesSummary::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::sample_catalog;

    #[test]
    fn test_total_views_sums_catalog() {
        let catalog = sample_catalog();
        let expected: u64 = catalog.iter().map(|s| s.views).sum();
        assert_eq!(total_views(&catalog), expected);
        assert_eq!(total_views(&[]), 0);
    }

    #[test]
    fn test_total_views_saturates() {
        let mut catalog = sample_catalog();
        for series in &mut catalog {
            series.views = u64::MAX / 2;
        }
        assert_eq!(total_views(&catalog), u64::MAX);
    }
}
