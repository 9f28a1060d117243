//! Tests for puzzle gallery listing, selection and session start

#[cfg(test)]
mod tests {
    use playcorner::content::records::PuzzleImage;
    use playcorner::content::repository::Catalog;
    use playcorner::puzzle::gallery::PuzzleGallery;
    use playcorner::puzzle::geometry::GridSize;
    use playcorner::puzzle::session::PuzzleEngine;

    fn grid(size: u8) -> GridSize {
        GridSize::new(size).unwrap_or_else(|e| panic!("grid {size}: {e}"))
    }

    fn gallery() -> PuzzleGallery {
        PuzzleGallery::from_images(vec![
            PuzzleImage::new("owl", "owl.png", grid(3)),
            PuzzleImage::new("fox", "fox.png", grid(4)),
        ])
    }

    // Tests fetching keeps repository order
    // Verified by sorting images by id
    #[test]
    fn test_fetch_keeps_order() {
        let catalog = Catalog::new().with_puzzles(gallery().list().to_vec());
        let fetched = PuzzleGallery::fetch(&catalog).unwrap_or_else(|e| panic!("fetch: {e}"));
        let ids: Vec<&str> = fetched.list().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["owl", "fox"]);
        assert!(!fetched.is_empty());
    }

    // Tests an empty repository gives an empty gallery
    // Verified by treating an empty list as an error
    #[test]
    fn test_empty_gallery() {
        let fetched = PuzzleGallery::fetch(&Catalog::new());
        assert!(fetched.is_ok_and(|g| g.is_empty()));
    }

    // Tests selection by id and the NotFound miss
    // Verified by falling back to the first image
    #[test]
    fn test_select() {
        let gallery = gallery();
        assert_eq!(gallery.select("fox").map(|i| i.grid_size).ok(), Some(grid(4)));
        let missing = gallery.select("unknown-id");
        assert!(missing.is_err_and(|e| e.is_not_found()));
    }

    // Tests sessions use the suggested grid unless overridden
    // Verified by ignoring the override
    #[test]
    fn test_start_session_grid() {
        let gallery = gallery();
        let engine = PuzzleEngine::new();

        let session = gallery.start_session(&engine, "fox", None, 1);
        assert_eq!(session.map(|s| s.grid_size()).ok(), Some(grid(4)));

        let session = gallery.start_session(&engine, "fox", Some(grid(5)), 1);
        assert_eq!(session.map(|s| s.grid_size()).ok(), Some(grid(5)));

        let session = gallery.start_session(&engine, "nope", None, 1);
        assert!(session.is_err_and(|e| e.is_not_found()));
    }
}
