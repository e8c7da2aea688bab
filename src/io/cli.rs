//! Command-line interface for building mosaics from one image or a directory of images

use crate::io::configuration::{
    DEFAULT_LIBRARY_ROOT, DEFAULT_PIECE_HEIGHT, DEFAULT_PIECE_WIDTH, DEFAULT_QUANTUM, OUTPUT_INFIX,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{is_supported_image, load_rgba, save_png};
use crate::io::library::SourceLibrary;
use crate::io::progress::ProgressManager;
use crate::matching::ColorIndex;
use crate::mosaic::{FileThumbnails, MosaicBuilder};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild images as mosaics of closest-colored thumbnails"
)]
/// Command-line arguments for the mosaic builder
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image or directory of images to turn into mosaics
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of source images used as mosaic pieces
    #[arg(short, long, value_name = "SOURCES")]
    pub directory: PathBuf,

    /// Width of each mosaic cell in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_PIECE_WIDTH)]
    pub piece_width: u32,

    /// Height of each mosaic cell in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_PIECE_HEIGHT)]
    pub piece_height: u32,

    /// Bucket width for the color index
    #[arg(long, default_value_t = DEFAULT_QUANTUM)]
    pub quantum: u16,

    /// Root directory for generated thumbnails and palette caches
    #[arg(short, long, default_value = DEFAULT_LIBRARY_ROOT)]
    pub library: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log per-stage details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch mosaic builds with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// The palette is prepared once and shared by every input.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, palette preparation or any
    /// mosaic build fails
    pub fn process(&mut self) -> Result<()> {
        let library = SourceLibrary::new(
            &self.cli.library,
            &self.cli.directory,
            (self.cli.piece_width, self.cli.piece_height),
        )?;
        let files = self.collect_files(library.set_name())?;

        if files.is_empty() {
            return Ok(());
        }

        let palette = library.load_or_build()?;
        if palette.is_empty() {
            return Err(MosaicError::EmptyPalette);
        }
        let index = ColorIndex::build_verified(palette, self.cli.quantum, &FileThumbnails)?;
        log::info!(
            "Palette '{}': {} thumbnails in {} buckets",
            library.set_name(),
            index.len(),
            index.bucket_count()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (position, file) in files.iter().enumerate() {
            self.process_file(file, position, &index, library.set_name())?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self, set_name: &str) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target, set_name) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"must be a png or jpg image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_supported_image(&path)
                    && !Self::is_mosaic_output(&path)
                    && self.should_process_file(&path, set_name)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path, set_name: &str) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, set_name);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        position: usize,
        index: &ColorIndex,
        set_name: &str,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path, set_name);

        let builder = MosaicBuilder::new(
            load_rgba(input_path)?,
            self.cli.piece_width,
            self.cli.piece_height,
            FileThumbnails,
        )?;

        if builder.grid().is_empty() {
            log::warn!(
                "Skipping: {} (smaller than one {}x{} piece)",
                input_path.display(),
                self.cli.piece_width,
                self.cli.piece_height
            );
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(position, input_path, builder.grid().cell_count());
        }

        let progress = &mut self.progress_manager;
        let canvas = builder.assemble_with_index(index, |pasted| {
            if let Some(pm) = progress.as_mut() {
                pm.update_cells(position, pasted);
            }
        })?;

        save_png(&canvas, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(position);
        }

        log::info!(
            "Saved {} ({}x{} cells) in {:.2?}",
            output_path.display(),
            builder.grid().columns(),
            builder.grid().rows(),
            start_time.elapsed()
        );

        Ok(())
    }

    fn is_mosaic_output(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().contains(OUTPUT_INFIX))
    }

    /// Output location for an input image: `<stem>_mosaic_<set>.png` beside it
    pub fn get_output_path(input_path: &Path, set_name: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_INFIX}_{set_name}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
