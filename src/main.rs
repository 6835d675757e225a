//! Spritecut CLI
//!
//! Splits a spritesheet into one PNG per sprite, or cuts a single
//! rectangle out of an image.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use spritecut::edit::{CropEditor, CropRect};
use spritecut::export::{decode_image, encode_png};
use spritecut::{EditorSettings, ExtractionSettings, MaskPolicy, SpriteId, Workspace};

/// Spritecut - spritesheet sprite extraction
#[derive(Parser)]
#[command(name = "spritecut")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every sprite from a spritesheet
    Extract {
        /// Input spritesheet (any format the image decoder understands)
        input: PathBuf,

        /// Directory the sprite PNGs are written to
        #[arg(short, long, default_value = "sprites")]
        out_dir: PathBuf,

        /// Extraction settings file (JSON); flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum padded side length (1-100)
        #[arg(long)]
        min_size: Option<u32>,

        /// Transparent border around each sprite (0-10)
        #[arg(long)]
        padding: Option<u32>,

        /// Alpha threshold (0-255), only used with --honor-threshold
        #[arg(long)]
        threshold: Option<u8>,

        /// Treat pixels with alpha above the threshold as opaque instead of alpha above 1
        #[arg(long)]
        honor_threshold: bool,

        /// Also write a JSON manifest of sprite names and bounds
        #[arg(short, long)]
        manifest: bool,
    },

    /// Cut one rectangle out of an image without alpha masking
    Crop {
        /// Input image
        input: PathBuf,

        #[arg(short, long)]
        x: f32,

        #[arg(short, long)]
        y: f32,

        #[arg(long)]
        width: f32,

        #[arg(long)]
        height: f32,

        /// Output PNG
        #[arg(short, long, default_value = "crop.png")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct ManifestEntry {
    id: SpriteId,
    name: String,
    file: String,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!cli.no_color)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract {
            input,
            out_dir,
            config,
            min_size,
            padding,
            threshold,
            honor_threshold,
            manifest,
        } => {
            let mut settings = match config {
                Some(path) => serde_json::from_str::<ExtractionSettings>(&fs::read_to_string(path)?)?,
                None => ExtractionSettings::default(),
            };
            if let Some(min_size) = min_size {
                settings.min_size = min_size;
            }
            if let Some(padding) = padding {
                settings.padding = padding;
            }
            if let Some(threshold) = threshold {
                settings.threshold = threshold;
            }
            if honor_threshold {
                settings.mask_policy = MaskPolicy::Threshold;
            }
            extract(&input, &out_dir, &settings, manifest)?;
        }
        Commands::Crop {
            input,
            x,
            y,
            width,
            height,
            output,
        } => {
            let source = decode_image(&fs::read(&input)?)?;
            let editor = CropEditor::with_initial_rect(
                CropRect::new(x, y, width, height),
                source.width(),
                source.height(),
            )?;
            let sprite = editor.commit(&source, SpriteId(1))?;
            fs::write(&output, encode_png(sprite.raster())?)?;
            info!(output = %output.display(), "Crop written");
        }
    }

    Ok(())
}

fn extract(
    input: &Path,
    out_dir: &Path,
    settings: &ExtractionSettings,
    write_manifest: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let sheet = decode_image(&fs::read(input)?)?;
    info!(
        input = %input.display(),
        width = sheet.width(),
        height = sheet.height(),
        "Spritesheet loaded"
    );

    let mut workspace = Workspace::new(EditorSettings::default());
    workspace.load_sheet(sheet, settings)?;

    fs::create_dir_all(out_dir)?;
    let files = workspace.export_all()?;
    for (file_name, png) in &files {
        fs::write(out_dir.join(file_name), png)?;
    }
    info!(count = files.len(), out_dir = %out_dir.display(), "Sprites written");

    if write_manifest {
        let entries: Vec<ManifestEntry> = workspace
            .sprites()
            .zip(files.iter())
            .enumerate()
            .map(|(index, (sprite, (file_name, _)))| ManifestEntry {
                id: sprite.id,
                name: workspace.name_at(index).unwrap_or_default(),
                file: file_name.clone(),
                x: sprite.bounds.x,
                y: sprite.bounds.y,
                width: sprite.bounds.width,
                height: sprite.bounds.height,
            })
            .collect();
        let path = out_dir.join("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&entries)?)?;
        info!(path = %path.display(), "Manifest written");
    }

    Ok(())
}
