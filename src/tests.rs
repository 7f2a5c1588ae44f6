#[cfg(test)]
mod tests {

    mod lifetime_tests {
        use crate::services::auth::parse_lifetime;
        use chrono::Duration;

        #[test]
        fn test_parse_lifetime_units() {
            assert_eq!(parse_lifetime("12h").unwrap(), Duration::hours(12));
            assert_eq!(parse_lifetime("30d").unwrap(), Duration::days(30));
            assert_eq!(parse_lifetime("2w").unwrap(), Duration::weeks(2));
        }

        #[test]
        fn test_parse_lifetime_trims_whitespace() {
            assert_eq!(parse_lifetime(" 7d ").unwrap(), Duration::days(7));
        }

        #[test]
        fn test_parse_lifetime_rejects_garbage() {
            assert!(parse_lifetime("").is_err());
            assert!(parse_lifetime("d").is_err());
            assert!(parse_lifetime("10").is_err());
            assert!(parse_lifetime("10y").is_err());
            assert!(parse_lifetime("0d").is_err());
            assert!(parse_lifetime("-3h").is_err());
            assert!(parse_lifetime("5é").is_err());
        }

        #[test]
        fn test_parse_lifetime_overflow() {
            assert!(parse_lifetime("999999999999999w").is_err());
        }
    }

    mod session_token_tests {
        use crate::services::auth::generate_session_token;

        #[test]
        fn test_generate_session_token_length() {
            // 32 bytes, base64 without padding
            assert_eq!(generate_session_token().len(), 43);
        }

        #[test]
        fn test_generate_session_token_unique() {
            assert_ne!(generate_session_token(), generate_session_token());
        }

        #[test]
        fn test_generate_session_token_url_safe() {
            let token = generate_session_token();
            assert!(token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    mod series_type_tests {
        use crate::models::{SeriesStatus, SeriesType};

        #[test]
        fn test_series_type_from_str() {
            assert_eq!("manhwa".parse::<SeriesType>(), Ok(SeriesType::Manhwa));
            assert_eq!("MANGA".parse::<SeriesType>(), Ok(SeriesType::Manga));
            assert!("webtoon".parse::<SeriesType>().is_err());
        }

        #[test]
        fn test_series_type_to_string() {
            for t in SeriesType::ALL {
                assert_eq!(t.to_string().parse::<SeriesType>(), Ok(t));
            }
        }

        #[test]
        fn test_series_type_default() {
            assert_eq!(SeriesType::default(), SeriesType::Manga);
        }

        #[test]
        fn test_series_status_accepts_both_spellings() {
            assert_eq!("canceled".parse::<SeriesStatus>(), Ok(SeriesStatus::Canceled));
            assert_eq!("Cancelled".parse::<SeriesStatus>(), Ok(SeriesStatus::Canceled));
            assert_eq!(SeriesStatus::Canceled.to_string(), "canceled");
        }

        #[test]
        fn test_series_json_uses_type_key() {
            let series = &crate::services::fixtures::sample_catalog()[1];
            let json = serde_json::to_value(series).unwrap();
            assert_eq!(json["type"], "manhwa");
            assert!(json.get("seriesType").is_none());
            assert!(json.get("releaseYear").is_some());
        }
    }

    mod sort_key_tests {
        use crate::services::sort::SortKey;

        #[test]
        fn test_sort_key_parse() {
            assert_eq!("rating".parse::<SortKey>(), Ok(SortKey::Rating));
            assert_eq!(" Title ".parse::<SortKey>(), Ok(SortKey::Title));
        }

        #[test]
        fn test_sort_key_fallback() {
            assert_eq!(SortKey::parse_or(Some("bogus"), SortKey::Recent), SortKey::Recent);
            assert_eq!(SortKey::parse_or(None, SortKey::Popular), SortKey::Popular);
            assert_eq!(SortKey::parse_or(Some("views"), SortKey::Popular), SortKey::Views);
        }
    }

    mod reader_key_tests {
        use crate::services::reader::ReaderAction;

        #[test]
        fn test_key_map() {
            assert_eq!(ReaderAction::from_key("ArrowLeft"), Some(ReaderAction::PreviousPage));
            assert_eq!(ReaderAction::from_key("D"), Some(ReaderAction::NextPage));
            assert_eq!(ReaderAction::from_key("f"), Some(ReaderAction::ToggleFullscreen));
            assert_eq!(ReaderAction::from_key("H"), Some(ReaderAction::ToggleControls));
            assert_eq!(ReaderAction::from_key("]"), Some(ReaderAction::NextChapter));
            assert_eq!(ReaderAction::from_key("p"), Some(ReaderAction::PreviousChapter));
            assert_eq!(ReaderAction::from_key("x"), None);
            assert_eq!(ReaderAction::from_key("ArrowUp"), None);
        }
    }

    mod config_tests {
        use crate::Config;

        #[test]
        fn test_default_config_is_valid() {
            let config = Config::default();
            assert!(config.validate().is_ok());
            assert_eq!(config.catalog.per_page, 24);
            assert_eq!(config.catalog.popular_count, 5);
            assert_eq!(config.session.lifetime, "30d");
            assert_eq!(config.translation.engine, "mock");
        }

        #[test]
        fn test_default_toml_round_trips() {
            let raw = Config::default_toml("My Shelf").unwrap();
            let parsed: Config = toml::from_str(&raw).unwrap();
            assert_eq!(parsed.site.title, "My Shelf");
            assert!(parsed.validate().is_ok());
        }

        #[test]
        fn test_partial_config_uses_defaults() {
            let parsed: Config = toml::from_str(
                r#"
                [site]
                title = "Shelf"

                [catalog]
                per_page = 12
                "#,
            )
            .unwrap();
            assert_eq!(parsed.catalog.per_page, 12);
            assert_eq!(parsed.catalog.max_per_page, 100);
            assert_eq!(parsed.server.port, 3000);
            assert!(parsed.translation.enabled);
        }

        #[test]
        fn test_validate_rejects_zero_per_page() {
            let mut config = Config::default();
            config.catalog.per_page = 0;
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_rejects_max_below_default() {
            let mut config = Config::default();
            config.catalog.max_per_page = 10;
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_rejects_bad_lifetime() {
            let mut config = Config::default();
            config.session.lifetime = "forever".to_string();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_rejects_unknown_engine() {
            let mut config = Config::default();
            config.translation.engine = "babelfish".to_string();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_checks_libre_endpoint() {
            let mut config = Config::default();
            config.translation.engine = "libre".to_string();
            config.translation.endpoint = "not a url".to_string();
            assert!(config.validate().is_err());

            config.translation.endpoint = "ftp://example.com/".to_string();
            assert!(config.validate().is_err());

            config.translation.endpoint = "http://localhost:5000/".to_string();
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_load_missing_file() {
            let err = Config::load(std::path::Path::new("/nonexistent/inkshelf.toml")).unwrap_err();
            assert!(err.to_string().contains("Could not read config file"));
        }
    }

    mod summary_tests {
        use crate::models::SeriesSummary;
        use crate::services::fixtures::sample_catalog;

        #[test]
        fn test_series_summary_compacts_views() {
            let mut series = sample_catalog().remove(0);
            series.views = 1_500_000;
            let summary = SeriesSummary::from(&series);
            assert_eq!(summary.views_label, "1500k");
            assert_eq!(summary.id, series.id);
        }
    }
}
