//! Catalog predicate builder.
//!
//! Raw query-string or CLI input is collected in [`FilterParams`] and
//! converted once into a typed [`SeriesFilter`]. The filter then acts as a
//! pure boolean gate over [`Series`] records.

use crate::models::{Series, SeriesStatus, SeriesType};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown series type '{0}'")]
    UnknownType(String),
    #[error("unknown series status '{0}'")]
    UnknownStatus(String),
}

/// Which text fields the free-text query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryScope {
    /// Title, description, author and genre labels.
    #[default]
    Full,
    /// Title and author only.
    TitleAndAuthor,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesFilter {
    pub query: Option<String>,
    pub series_type: Option<SeriesType>,
    pub status: Option<SeriesStatus>,
    pub genres: Vec<String>,
    pub min_chapters: Option<u32>,
    pub min_year: Option<i32>,
    pub scope: QueryScope,
}

impl SeriesFilter {
    pub fn with_scope(mut self, scope: QueryScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.series_type.is_none()
            && self.status.is_none()
            && self.genres.is_empty()
            && self.min_chapters.is_none()
            && self.min_year.is_none()
    }

    /// Returns true when `series` satisfies every configured criterion.
    pub fn matches(&self, series: &Series) -> bool {
        self.matches_query(series)
            && self.series_type.map_or(true, |t| series.series_type == t)
            && self.status.map_or(true, |s| series.status == s)
            && self.genres.iter().all(|g| series.has_genre(g))
            && self.min_chapters.map_or(true, |n| series.total_chapters >= n)
            && self.min_year.map_or(true, |y| series.release_year >= y)
    }

    fn matches_query(&self, series: &Series) -> bool {
        let needle = match self.query.as_deref() {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        match self.scope {
            QueryScope::Full => {
                contains(&series.title)
                    || contains(&series.description)
                    || contains(&series.author)
                    || series.genres.iter().any(|g| contains(g))
            }
            QueryScope::TitleAndAuthor => contains(&series.title) || contains(&series.author),
        }
    }
}

/// Untyped filter input as it arrives from a form or query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default, alias = "search")]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub series_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub min_chapters: Option<String>,
    #[serde(default)]
    pub min_year: Option<String>,
}

impl TryFrom<&FilterParams> for SeriesFilter {
    type Error = FilterError;

    fn try_from(params: &FilterParams) -> Result<Self, Self::Error> {
        let series_type = match selection(params.series_type.as_deref()) {
            Some(raw) => Some(
                raw.parse::<SeriesType>()
                    .map_err(|_| FilterError::UnknownType(raw.to_string()))?,
            ),
            None => None,
        };
        let status = match selection(params.status.as_deref()) {
            Some(raw) => Some(
                raw.parse::<SeriesStatus>()
                    .map_err(|_| FilterError::UnknownStatus(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            query: params.q.clone().filter(|q| !q.is_empty()),
            series_type,
            status,
            genres: parse_genres(params.genres.as_deref()),
            min_chapters: parse_optional_number(params.min_chapters.as_deref()),
            min_year: parse_optional_number(params.min_year.as_deref()),
            scope: QueryScope::Full,
        })
    }
}

/// `None`, `""` and `"all"` all mean "no restriction".
fn selection(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
}

/// Comma separated, trimmed, de-duplicated, order preserved.
pub fn parse_genres(raw: Option<&str>) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in raw.unwrap_or_default().split(',').map(str::trim) {
        if !genre.is_empty() && !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    genres
}

/// Anything that does not parse is treated as "not set", never as zero.
pub fn parse_optional_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::sample_catalog;

    #[test]
    fn test_empty_filter_accepts_everything() {
        let catalog = sample_catalog();
        let filter = SeriesFilter::default();
        assert!(filter.is_empty());
        assert!(catalog.iter().all(|s| filter.matches(s)));
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        let filter = SeriesFilter {
            query: Some("LEVEL".into()),
            ..Default::default()
        };
        let titles: Vec<_> = catalog
            .iter()
            .filter(|s| filter.matches(s))
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Solo Leveling"]);
    }

    #[test]
    fn test_query_matches_genre_and_description() {
        let catalog = sample_catalog();
        let by_genre = SeriesFilter {
            query: Some("myster".into()),
            ..Default::default()
        };
        assert!(catalog.iter().any(|s| s.title == "Tower of God" && by_genre.matches(s)));

        let by_description = SeriesFilter {
            query: Some("treasure".into()),
            ..Default::default()
        };
        assert!(catalog.iter().any(|s| s.title == "One Piece" && by_description.matches(s)));
    }

    #[test]
    fn test_title_and_author_scope_ignores_description() {
        let catalog = sample_catalog();
        let filter = SeriesFilter {
            query: Some("treasure".into()),
            ..Default::default()
        }
        .with_scope(QueryScope::TitleAndAuthor);
        assert!(catalog.iter().all(|s| !filter.matches(s)));
    }

    #[test]
    fn test_genres_use_and_semantics() {
        let catalog = sample_catalog();
        let filter = SeriesFilter {
            genres: vec!["Action".into(), "Mystery".into()],
            ..Default::default()
        };
        let matched: Vec<_> = catalog.iter().filter(|s| filter.matches(s)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Tower of God");
        for series in matched {
            for genre in &filter.genres {
                assert!(series.genres.contains(genre));
            }
        }
    }

    #[test]
    fn test_min_chapters_and_min_year() {
        let catalog = sample_catalog();
        let filter = SeriesFilter {
            min_chapters: Some(500),
            min_year: Some(2000),
            ..Default::default()
        };
        let titles: Vec<_> = catalog
            .iter()
            .filter(|s| filter.matches(s))
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Tower of God"]);
    }

    #[test]
    fn test_params_treat_non_numeric_as_absent() {
        let params = FilterParams {
            min_chapters: Some("lots".into()),
            min_year: Some("".into()),
            ..Default::default()
        };
        let filter = SeriesFilter::try_from(&params).unwrap();
        assert_eq!(filter.min_chapters, None);
        assert_eq!(filter.min_year, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_params_all_means_no_restriction() {
        let params = FilterParams {
            series_type: Some("all".into()),
            status: Some("ALL".into()),
            ..Default::default()
        };
        let filter = SeriesFilter::try_from(&params).unwrap();
        assert_eq!(filter.series_type, None);
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_params_reject_unknown_type() {
        let params = FilterParams {
            series_type: Some("webtoon".into()),
            ..Default::default()
        };
        assert_eq!(
            SeriesFilter::try_from(&params),
            Err(FilterError::UnknownType("webtoon".into()))
        );
    }

    #[test]
    fn test_parse_genres_dedupes() {
        assert_eq!(
            parse_genres(Some("Action, Fantasy,,Action ")),
            vec!["Action".to_string(), "Fantasy".to_string()]
        );
        assert!(parse_genres(None).is_empty());
    }
}
