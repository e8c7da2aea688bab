//! Tests for thumbnail generation and the palette cache

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use photomosaic::MosaicError;
    use photomosaic::color::Color;
    use photomosaic::io::image::{load_rgba, save_png};
    use photomosaic::io::library::{CachedEntry, PaletteCache, SourceLibrary};
    use photomosaic::matching::ColorIndex;
    use std::fs;
    use std::path::Path;

    fn write_sources(dir: &Path) {
        let green = RgbaImage::from_pixel(20, 10, Rgba([0, 255, 0, 255]));
        save_png(&green, &dir.join("b_green.png")).unwrap();
        let red = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        save_png(&red, &dir.join("a_red.png")).unwrap();
        fs::write(dir.join("readme.txt"), "ignored").unwrap();
    }

    fn channels_near(color: Color, expected: [u8; 3]) -> bool {
        color
            .channels()
            .iter()
            .zip(expected)
            .all(|(&actual, wanted)| actual.abs_diff(wanted) <= 1)
    }

    // Tests layout paths derive from the set name and thumbnail size
    // Verified by swapping width and height in the cache name
    #[test]
    fn test_library_layout() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("pets");
        fs::create_dir(&sources).unwrap();
        let root = workspace.path().join("img_sets");

        let library = SourceLibrary::new(&root, &sources, (30, 20)).unwrap();

        assert_eq!(library.set_name(), "pets");
        assert_eq!(library.cache_path(), root.join("img_jsons/pets_30x20.json"));
        assert_eq!(library.thumbnail_dir(), root.join("pets/thumbnails/30x20"));
        assert!(!library.has_cache());
    }

    // Tests building writes thumbnails and a cache in sorted order
    // Verified by listing sources in directory order
    #[test]
    fn test_load_or_build_generates_palette() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let root = workspace.path().join("lib");
        let library = SourceLibrary::new(&root, &sources, (5, 5)).unwrap();

        let palette = library.load_or_build().unwrap();

        assert_eq!(palette.len(), 2);
        assert!(palette[0].identifier.ends_with("a_red.png_thumbnail.png"));
        assert!(palette[1].identifier.ends_with("b_green.png_thumbnail.png"));
        assert!(channels_near(palette[0].color, [255, 0, 0]));
        assert!(channels_near(palette[1].color, [0, 255, 0]));
        assert_eq!(load_rgba(Path::new(&palette[1].identifier)).unwrap().dimensions(), (5, 5));
        assert!(library.has_cache());
    }

    // Tests sources sharing a stem keep separate thumbnails
    // Verified by naming thumbnails after the file stem only
    #[test]
    fn test_shared_stem_sources_stay_distinct() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("twins");
        let black = RgbaImage::from_pixel(6, 6, Rgba([0, 0, 0, 255]));
        save_png(&black, &sources.join("photo.png")).unwrap();
        RgbImage::from_pixel(6, 6, Rgb([255, 255, 255]))
            .save(sources.join("photo.jpg"))
            .unwrap();
        let root = workspace.path().join("lib");
        let library = SourceLibrary::new(&root, &sources, (4, 4)).unwrap();

        let palette = library.load_or_build().unwrap();

        assert_eq!(palette.len(), 2);
        assert!(palette[0].identifier.ends_with("photo.jpg_thumbnail.png"));
        assert!(palette[1].identifier.ends_with("photo.png_thumbnail.png"));
        assert!(palette[0].color.channels().iter().all(|&channel| channel > 200));
        assert_eq!(palette[1].color, Color::new(0, 0, 0));
        let index = ColorIndex::build(palette, 10).unwrap();
        assert_eq!(index.len(), 2);
    }

    // Tests an existing cache is reused without touching sources
    // Verified by rebuilding whenever sources are listed
    #[test]
    fn test_cache_is_reused() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let root = workspace.path().join("lib");
        let library = SourceLibrary::new(&root, &sources, (5, 5)).unwrap();
        let built = library.load_or_build().unwrap();

        fs::remove_file(sources.join("a_red.png")).unwrap();
        fs::remove_file(sources.join("b_green.png")).unwrap();

        assert_eq!(library.load_or_build().unwrap(), built);
    }

    // Tests cached colors outside the channel range are rejected
    // Verified by wrapping channels into range
    #[test]
    fn test_cache_with_invalid_color() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let root = workspace.path().join("lib");
        let library = SourceLibrary::new(&root, &sources, (5, 5)).unwrap();
        library.load_or_build().unwrap();

        library
            .write_cache(&PaletteCache {
                entries: vec![CachedEntry {
                    thumbnail: "hot.png".to_string(),
                    color: [300, 0, -1],
                }],
            })
            .unwrap();

        let err = library.load_or_build().unwrap_err();
        assert!(matches!(
            err,
            MosaicError::InvalidColor { ref identifier, channels: [300, 0, -1] }
                if identifier == "hot.png"
        ));
    }

    // Tests corrupt caches surface a JSON error
    // Verified by silently rebuilding corrupt caches
    #[test]
    fn test_corrupt_cache() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let root = workspace.path().join("lib");
        let library = SourceLibrary::new(&root, &sources, (5, 5)).unwrap();
        library.load_or_build().unwrap();

        fs::write(library.cache_path(), "{ not json").unwrap();

        assert!(matches!(library.read_cache(), Err(MosaicError::Cache { .. })));
    }

    // Tests a source directory without images cannot build a palette
    // Verified by caching an empty palette
    #[test]
    fn test_build_without_images() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("empty");
        fs::create_dir(&sources).unwrap();
        fs::write(sources.join("notes.txt"), "no images").unwrap();
        let root = workspace.path().join("lib");
        let library = SourceLibrary::new(&root, &sources, (5, 5)).unwrap();

        assert!(matches!(library.build(), Err(MosaicError::InvalidSourceData { .. })));
        assert!(!library.cache_path().exists());
    }

    // Tests invalid library arguments are rejected up front
    // Verified by accepting files as source directories
    #[test]
    fn test_invalid_library_arguments() {
        let workspace = tempfile::tempdir().unwrap();
        let file = workspace.path().join("single.png");
        save_png(&RgbaImage::new(2, 2), &file).unwrap();

        assert!(matches!(
            SourceLibrary::new(workspace.path(), &file, (5, 5)),
            Err(MosaicError::InvalidSourceData { .. })
        ));
        assert!(matches!(
            SourceLibrary::new(workspace.path(), workspace.path(), (0, 5)),
            Err(MosaicError::InvalidDimension { .. })
        ));
    }

    // Tests cache records convert into palette entries
    // Verified by dropping the identifier during conversion
    #[test]
    fn test_cache_into_entries() {
        let cache = PaletteCache {
            entries: vec![CachedEntry {
                thumbnail: "sky.png".to_string(),
                color: [10, 20, 30],
            }],
        };

        let entries = cache.into_entries().unwrap();

        assert_eq!(entries[0].identifier, "sky.png");
        assert_eq!(entries[0].color, Color::new(10, 20, 30));
    }
}
