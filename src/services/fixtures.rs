//! Shared test catalog.

use crate::models::{Chapter, Series, SeriesStatus, SeriesType};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn series(
    id: &str,
    title: &str,
    description: &str,
    series_type: SeriesType,
    status: SeriesStatus,
    genres: &[&str],
    author: &str,
    release_year: i32,
    rating: f64,
    total_chapters: u32,
    views: u64,
    followers: u64,
) -> Series {
    Series {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        cover_image: "/covers/default.webp".to_string(),
        series_type,
        status,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        author: author.to_string(),
        artist: None,
        release_year,
        rating,
        total_chapters,
        total_volumes: None,
        views,
        followers,
        created_at: base_time() - Duration::days(365),
        updated_at: base_time(),
        last_chapter_date: Some(base_time()),
    }
}

pub fn sample_catalog() -> Vec<Series> {
    vec![
        series(
            "1",
            "One Piece",
            "Follow Monkey D. Luffy and his crew as they search for the ultimate treasure known as One Piece.",
            SeriesType::Manga,
            SeriesStatus::Ongoing,
            &["Adventure", "Comedy", "Drama", "Shounen"],
            "Eiichiro Oda",
            1997,
            4.9,
            1095,
            2_500_000,
            850_000,
        ),
        series(
            "2",
            "Solo Leveling",
            "The weakest hunter becomes the strongest through a mysterious system.",
            SeriesType::Manhwa,
            SeriesStatus::Completed,
            &["Action", "Fantasy", "Adventure"],
            "Chugong",
            2018,
            4.8,
            179,
            1_800_000,
            650_000,
        ),
        series(
            "3",
            "Tower of God",
            "A boy enters a mysterious tower to chase after his friend.",
            SeriesType::Manhwa,
            SeriesStatus::Ongoing,
            &["Action", "Adventure", "Mystery", "Supernatural"],
            "SIU",
            2010,
            4.7,
            595,
            1_200_000,
            420_000,
        ),
        series(
            "4",
            "Jujutsu Kaisen",
            "A high school student joins a secret organization of Jujutsu Sorcerers.",
            SeriesType::Manga,
            SeriesStatus::Ongoing,
            &["Action", "Supernatural", "School", "Shounen"],
            "Gege Akutami",
            2018,
            4.6,
            245,
            980_000,
            320_000,
        ),
        series(
            "5",
            "The Beginning After The End",
            "A king reincarnated in a world of magic and monsters.",
            SeriesType::Manhwa,
            SeriesStatus::Ongoing,
            &["Fantasy", "Adventure", "Magic", "Reincarnation"],
            "TurtleMe",
            2018,
            4.5,
            185,
            750_000,
            280_000,
        ),
    ]
}

pub fn three_series() -> Vec<Series> {
    sample_catalog().into_iter().take(3).collect()
}

pub fn chapters_for(series_id: &str, count: u32, pages: usize) -> Vec<Chapter> {
    (1..=count)
        .map(|n| Chapter {
            id: format!("{}-ch{}", series_id, n),
            series_id: series_id.to_string(),
            title: format!("Chapter {}", n),
            chapter_number: n,
            volume_number: None,
            pages: (1..=pages).map(|p| format!("/pages/{}/{}/{}.webp", series_id, n, p)).collect(),
            release_date: base_time() - Duration::days(i64::from(count - n)),
            views: 1000,
            created_at: base_time(),
            updated_at: base_time(),
        })
        .collect()
}
