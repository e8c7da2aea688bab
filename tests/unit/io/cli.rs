//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use photomosaic::io::cli::{Cli, FileProcessor};
    use photomosaic::io::configuration::{
        DEFAULT_LIBRARY_ROOT, DEFAULT_PIECE_HEIGHT, DEFAULT_PIECE_WIDTH, DEFAULT_QUANTUM,
    };
    use photomosaic::io::image::{load_rgba, save_png};
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    fn write_sources(dir: &Path) {
        let red = RgbaImage::from_pixel(12, 8, Rgba([255, 0, 0, 255]));
        save_png(&red, &dir.join("red.png")).unwrap();
        let blue = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
        save_png(&blue, &dir.join("blue.png")).unwrap();
    }

    fn quiet_cli(target: &Path, sources: &Path, library: &Path) -> Cli {
        let args: Vec<OsString> = vec![
            "photomosaic".into(),
            target.into(),
            "-d".into(),
            sources.into(),
            "-l".into(),
            library.into(),
            "-w".into(),
            "4".into(),
            "-H".into(),
            "4".into(),
            "-q".into(),
        ];
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the required arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photo.jpg", "-d", "pets"]);

        assert_eq!(cli.target, PathBuf::from("photo.jpg"));
        assert_eq!(cli.directory, PathBuf::from("pets"));
        assert_eq!(cli.piece_width, DEFAULT_PIECE_WIDTH);
        assert_eq!(cli.piece_height, DEFAULT_PIECE_HEIGHT);
        assert_eq!(cli.quantum, DEFAULT_QUANTUM);
        assert_eq!(cli.library, PathBuf::from(DEFAULT_LIBRARY_ROOT));
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with every option supplied
    // Verified by swapping short flags between options
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program", "photos", "--directory", "pets", "-w", "10", "-H", "20", "--quantum", "16",
            "--library", "cache", "-q", "-n", "-v",
        ]);

        assert_eq!(cli.target, PathBuf::from("photos"));
        assert_eq!(cli.piece_width, 10);
        assert_eq!(cli.piece_height, 20);
        assert_eq!(cli.quantum, 16);
        assert_eq!(cli.library, PathBuf::from("cache"));
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert!(cli.verbose);
    }

    // Tests the source directory is required
    // Verified by giving the directory a default
    #[test]
    fn test_cli_requires_directory() {
        assert!(Cli::try_parse_from(["program", "photo.jpg"]).is_err());
    }

    // Tests output naming places the mosaic beside its input
    // Verified by dropping the set name from the file name
    #[test]
    fn test_get_output_path() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("shots/cat.jpg"), "pets"),
            PathBuf::from("shots/cat_mosaic_pets.png")
        );
        assert_eq!(
            FileProcessor::get_output_path(Path::new("cat.png"), "pets"),
            PathBuf::from("cat_mosaic_pets.png")
        );
    }

    // Tests a single target file is rebuilt from the source set
    // Verified by saving the untouched input instead of the mosaic
    #[test]
    fn test_process_single_file() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let target = workspace.path().join("input.png");
        let warm = RgbaImage::from_pixel(10, 9, Rgba([250, 5, 5, 255]));
        save_png(&warm, &target).unwrap();

        let library = workspace.path().join("lib");
        let mut processor = FileProcessor::new(quiet_cli(&target, &sources, &library));
        processor.process().unwrap();

        let output = load_rgba(&workspace.path().join("input_mosaic_colors.png")).unwrap();
        assert_eq!(output.dimensions(), (8, 8));
        assert_eq!(output.get_pixel(7, 7), &Rgba([255, 0, 0, 255]));
        assert!(workspace.path().join("lib/img_jsons/colors_4x4.json").is_file());
    }

    // Tests directory targets skip existing outputs and previous mosaics
    // Verified by reprocessing files whose output already exists
    #[test]
    fn test_process_directory_skips_outputs() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let photos = workspace.path().join("photos");
        let deep_blue = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 240, 255]));
        save_png(&deep_blue, &photos.join("sea.png")).unwrap();
        let existing = photos.join("sky_mosaic_colors.png");
        let marker = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        save_png(&marker, &existing).unwrap();
        save_png(&deep_blue, &photos.join("sky.png")).unwrap();

        let library = workspace.path().join("lib");
        let mut processor = FileProcessor::new(quiet_cli(&photos, &sources, &library));
        processor.process().unwrap();

        let sea = load_rgba(&photos.join("sea_mosaic_colors.png")).unwrap();
        assert_eq!(sea.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(load_rgba(&existing).unwrap(), marker);
        assert!(!photos.join("sky_mosaic_colors_mosaic_colors.png").exists());
    }

    // Tests unsupported target files are rejected
    // Verified by treating any file as an image
    #[test]
    fn test_process_rejects_unsupported_target() {
        let workspace = tempfile::tempdir().unwrap();
        let sources = workspace.path().join("colors");
        write_sources(&sources);
        let target = workspace.path().join("notes.txt");
        std::fs::write(&target, "not an image").unwrap();

        let library = workspace.path().join("lib");
        let mut processor = FileProcessor::new(quiet_cli(&target, &sources, &library));

        assert!(processor.process().is_err());
    }
}
