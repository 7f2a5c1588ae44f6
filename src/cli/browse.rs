use crate::cli::BrowseArgs;
use crate::models::Series;
use crate::services::filter::{FilterParams, SeriesFilter};
use crate::services::pipeline::{self, page_window, Page};
use crate::services::sort::SortKey;
use crate::services::{catalog, format};
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, args: BrowseArgs) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;

    let params = FilterParams {
        q: args.query,
        series_type: args.series_type,
        status: args.status,
        genres: args.genres,
        min_chapters: args.min_chapters,
        min_year: args.min_year,
    };
    let filter = SeriesFilter::try_from(&params)?;
    let sort = SortKey::parse_or(Some(&args.sort), SortKey::Popular);
    let (page, per_page, _) = page_window(
        Some(args.page),
        args.per_page,
        config.catalog.per_page,
        config.catalog.max_per_page,
    );

    let snapshot = catalog::snapshot(&db)?;
    let visible = pipeline::run(&snapshot, &filter, sort);
    print_table(&pipeline::paginate(visible, page, per_page), sort);
    Ok(())
}

fn print_table(page: &Page<Series>, sort: SortKey) {
    println!(
        "{:<24} {:<32} {:<8} {:<10} {:>6} {:>8} {:>6}",
        "ID", "TITLE", "TYPE", "STATUS", "RATING", "FOLLOW", "CH"
    );
    println!("{}", "-".repeat(100));
    for series in &page.items {
        println!(
            "{:<24} {:<32} {:<8} {:<10} {:>6.1} {:>8} {:>6}",
            truncate(&series.id, 24),
            truncate(&series.title, 32),
            series.series_type,
            series.status,
            series.rating,
            format::compact_count(series.followers),
            series.total_chapters
        );
    }
    println!();
    println!(
        "Page {} of {} ({} series, sorted by {})",
        page.page,
        page.total_pages.max(1),
        page.total,
        sort
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
