#[cfg(test)]
mod tests {
    use crate::rules::builtin_rules;
    use crate::services::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rules_accepts_numbers_and_strings() {
        let table = parse_rules(
            r#"{"version": 3, "display": "denomOnly",
                "rules": {"Set A|Gold": 149, "Set A|Blue": " 99 ", "Set A|Red": null}}"#,
        )
        .unwrap();
        assert_eq!(table.version, "3");
        assert_eq!(table.display, crate::rules::DisplayMode::DenomOnly);
        assert_eq!(table.rules.get("Set A|Gold").map(String::as_str), Some("149"));
        assert_eq!(table.rules.get("Set A|Blue").map(String::as_str), Some("99"));
        assert!(!table.rules.contains_key("Set A|Red"));
    }

    #[test]
    fn test_parse_rules_rejects_bad_shapes() {
        assert!(parse_rules("[]").is_err());
        assert!(parse_rules(r#"{"version": "1"}"#).is_err());
        assert!(parse_rules(r#"{"rules": []}"#).is_err());
        assert!(parse_rules("not json").is_err());
    }

    #[test]
    fn test_parse_rules_defaults_display() {
        let table = parse_rules(r#"{"rules": {}, "display": "whatever"}"#).unwrap();
        assert_eq!(table.display, crate::rules::DisplayMode::UnknownNumerator);
        assert_eq!(table.version, "");
    }

    #[test]
    fn test_parse_rules_non_string_display_keeps_rules() {
        for display in ["1", "null", r#"{"mode": "denomOnly"}"#, "[]"] {
            let body = format!(r#"{{"display": {display}, "rules": {{"Set|Gold": "149"}}}}"#);
            let table = parse_rules(&body).unwrap();
            assert_eq!(table.display, crate::rules::DisplayMode::UnknownNumerator);
            assert_eq!(table.rules.len(), 1);
        }
        let table = parse_rules(r#"{"display": "DENOMONLY", "rules": {}}"#).unwrap();
        assert_eq!(table.display, crate::rules::DisplayMode::DenomOnly);
    }

    #[test]
    fn test_cache_busted_url() {
        let url = cache_busted_url("https://example.com/rules.json?v=2", 1700000000000).unwrap();
        assert_eq!(url.as_str(), "https://example.com/rules.json?v=2&_ts=1700000000000");
        assert!(cache_busted_url("not a url", 1).is_err());
    }

    #[test]
    fn test_local_fs_cache_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = LocalFsCache::at(dir.path().join("nested"), DEFAULT_RULES_CACHE_KEY);
        assert!(cache.get().unwrap().is_none());

        cache.set(&builtin_rules()).unwrap();
        assert!(cache.path().ends_with("epack_serial_rules_v1.json"));
        assert_eq!(cache.get().unwrap(), Some(builtin_rules()));

        cache.clear().unwrap();
        assert!(cache.get().unwrap().is_none());
        cache.clear().unwrap();
    }

    #[test]
    fn test_local_fs_cache_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let cache = LocalFsCache::at(dir.path(), "rules");
        std::fs::write(cache.path(), r#"{"no_rules": true}"#).unwrap();
        assert!(cache.get().is_err());
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemoryCache::new();
        assert!(cache.get().unwrap().is_none());
        cache.set(&builtin_rules()).unwrap();
        assert_eq!(cache.get().unwrap().map(|t| t.version), Some("fallback".to_string()));
        cache.clear().unwrap();
        assert!(cache.get().unwrap().is_none());
    }

    #[test]
    fn test_activity_logger_appends_newest_first() {
        let dir = TempDir::new().unwrap();
        let logger = ActivityLogger::at(dir.path().join("activity.log"));
        assert!(logger.read_logs(false).unwrap().is_empty());

        logger.info(Some("collection"), "export", Some("succeeded in 3ms")).unwrap();
        logger.error(Some("checklist"), "export", Some("no cards")).unwrap();

        let all = logger.read_logs(false).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].contains("checklist"));
        assert!(all[1].contains("succeeded in 3ms"));

        let errors = logger.read_logs(true).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no cards"));
    }

    #[tokio::test]
    async fn test_fetch_rules_sends_no_store() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rules.json")
                .query_param_exists("_ts")
                .header("cache-control", "no-store")
                .header("pragma", "no-cache");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"version":"r1","rules":{"Set|Gold":"50"}}"#);
        });

        let client = build_client(5_000).unwrap();
        let table = fetch_rules(&client, &server.url("/rules.json")).await.unwrap();
        mock.assert();
        assert_eq!(table.version, "r1");
    }

    #[tokio::test]
    async fn test_fetch_rules_status_error() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rules.json");
            then.status(503);
        });

        let client = build_client(5_000).unwrap();
        let err = fetch_rules(&client, &server.url("/rules.json")).await.unwrap_err();
        assert!(matches!(err, crate::ExportError::HttpStatus { status: 503, .. }));
    }
}
