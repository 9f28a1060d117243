//! Tests for catalogue parsing, rejection reporting and file loading

#[cfg(test)]
mod tests {
    use playcorner::PlayError;
    use playcorner::content::repository::{Catalog, ContentRepository};
    use playcorner::io::logging::{LogLevel, Logger, MemorySink};
    use std::sync::Arc;

    const CATALOG: &str = r#"{
        "coloring": [
            {"id": "1", "title": "Cat", "slug": "cat", "category": "Animals",
             "subcategory": "Cats", "imageUrl": "/c/cat.png"},
            {"id": "2", "title": "No image", "slug": "broken", "category": "Animals"}
        ],
        "puzzles": [
            {"id": "owl", "sourceUrl": "owl.png", "label": "Owl", "gridSize": 4}
        ],
        "audio": [
            {"id": "a", "title": "Story", "slug": "story", "audioUrl": "/a.mp3"}
        ]
    }"#;

    // Tests valid records load and invalid ones are reported, not fatal
    // Verified by failing the whole document on one bad record
    #[test]
    fn test_partial_catalog_loads() {
        let catalog = Catalog::from_json_str(CATALOG, "inline", &Logger::disabled())
            .unwrap_or_else(|e| panic!("parse: {e}"));

        assert_eq!(catalog.coloring_list().map(|l| l.len()).ok(), Some(1));
        assert_eq!(catalog.puzzle_list().map(|l| l.len()).ok(), Some(1));
        assert_eq!(catalog.audio_stories().map(|l| l.len()).ok(), Some(1));
        assert_eq!(catalog.books().map(|l| l.len()).ok(), Some(0));
        assert_eq!(catalog.games().map(|l| l.len()).ok(), Some(0));

        assert_eq!(catalog.rejections().len(), 1);
        assert!(matches!(
            catalog.rejections().first(),
            Some(PlayError::MalformedRecord {
                collection: "coloring",
                position: 1,
                field: "imageUrl"
            })
        ));
    }

    // Tests rejections and the load summary are logged
    // Verified by logging rejections below warn
    #[test]
    fn test_loading_is_logged() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::from_shared(sink.clone(), LogLevel::Info);
        Catalog::from_json_str(CATALOG, "inline", &logger).ok();

        let events = sink.events();
        let rejected: Vec<_> = events
            .iter()
            .filter(|e| e.message == "record rejected")
            .collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected.first().map(|e| e.level), Some(LogLevel::Warn));

        let summary = events.iter().find(|e| e.message == "catalogue loaded");
        let coloring = summary.and_then(|e| e.fields.get("coloring")).cloned();
        assert_eq!(coloring, Some(serde_json::json!(1)));
    }

    // Tests malformed documents fail with the catalogue origin
    // Verified by returning an empty catalogue on parse errors
    #[test]
    fn test_invalid_json() {
        let result = Catalog::from_json_str("{\"coloring\": 5}", "bad.json", &Logger::disabled());
        match result {
            Err(PlayError::Catalog { origin, .. }) => assert_eq!(origin, "bad.json"),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    // Tests an empty object is an empty, valid catalogue
    // Verified by requiring every collection key
    #[test]
    fn test_empty_document() {
        let catalog = Catalog::from_json_str("{}", "empty", &Logger::disabled());
        assert!(catalog.is_ok_and(|c| c.coloring_list().is_ok_and(|l| l.is_empty())));
    }

    // Tests loading from disk and the missing-file error
    // Verified by reading a relative path
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap_or_else(|e| panic!("write: {e}"));

        let catalog = Catalog::load(&path, &Logger::disabled());
        assert!(catalog.is_ok_and(|c| c.rejections().len() == 1));

        let missing = Catalog::load(&dir.path().join("nope.json"), &Logger::disabled());
        assert!(matches!(missing, Err(PlayError::FileSystem { .. })));
    }

    // Tests builder-style catalogues serve what they were given
    // Verified by cloning an empty collection
    #[test]
    fn test_builder_catalog() {
        use playcorner::content::records::ColoringItem;

        let catalog = Catalog::new().with_coloring(vec![ColoringItem::new("x", "X", "A", None)]);
        let items = catalog.coloring_list().unwrap_or_default();
        assert_eq!(items.len(), 1);
        assert!(catalog.rejections().is_empty());
    }
}
