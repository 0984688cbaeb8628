/// CLI argument parsing and command handling.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::color;
use crate::config::Config;
use crate::db::{KeyValueStore, SavedPalettes};
use crate::export::png::{FileWatermark, export_image_blocking};
use crate::export::{self, Downloads};
use crate::types::Palette;

#[derive(Parser)]
#[command(
    name = "palettr",
    version,
    about = "Palettr - A terminal-based color palette generator"
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/palettr/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// SQLite database holding saved palettes
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Directory exports are written to
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,
    /// Watermark image used by image exports
    #[arg(long, global = true)]
    pub watermark: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
        if let Some(watermark) = &self.watermark {
            config.watermark_path = watermark.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the palette derived from a name
    Name {
        name: String,
        #[arg(short = 's', long = "size", default_value_t = color::DEFAULT_RANDOM_SIZE)]
        size: usize,
    },
    /// Print a random palette of 4 to 16 colors
    Random {
        #[arg(short = 's', long = "size", default_value_t = color::DEFAULT_RANDOM_SIZE)]
        size: usize,
    },
    /// Generate a palette and append it to the saved history
    Save {
        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// List saved palettes
    Saved,
    /// Generate a palette and write palette.json and/or the watermarked PNG
    Export {
        #[command(flatten)]
        palette: PaletteArgs,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        image: bool,
    },
}

/// Which palette a command works on: name-based with `--name`, random otherwise.
#[derive(Args, Debug, Clone)]
pub struct PaletteArgs {
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,
    #[arg(short = 's', long = "size", default_value_t = color::DEFAULT_RANDOM_SIZE)]
    pub size: usize,
}

impl PaletteArgs {
    pub fn resolve(&self) -> Result<Palette> {
        match &self.name {
            Some(name) => Ok(color::named_palette(name, self.size)?),
            None => {
                let size = color::validate_random_size(self.size)?;
                Ok(color::random_palette(size, &mut rand::rng()))
            }
        }
    }
}

/// Execute a CLI command (generate, save, list or export).
pub fn run<S: KeyValueStore>(command: Command, config: &Config, store: S) -> Result<()> {
    match command {
        Command::Name { name, size } => print_palette(&color::named_palette(&name, size)?),
        Command::Random { size } => {
            let size = color::validate_random_size(size)?;
            print_palette(&color::random_palette(size, &mut rand::rng()));
        }
        Command::Save { palette } => handle_save(&palette, store)?,
        Command::Saved => handle_saved(store)?,
        Command::Export {
            palette,
            json,
            image,
        } => handle_export(&palette, json, image, config)?,
    }
    Ok(())
}

fn print_palette(palette: &Palette) {
    for color in palette.iter() {
        println!("{color}");
    }
}

fn handle_save<S: KeyValueStore>(args: &PaletteArgs, store: S) -> Result<()> {
    let palette = args.resolve()?;
    let mut saved = SavedPalettes::new(store);
    let count = saved.append(&palette)?;
    print_palette(&palette);
    println!("Palette saved successfully! ({count} saved)");
    Ok(())
}

fn handle_saved<S: KeyValueStore>(store: S) -> Result<()> {
    let palettes = SavedPalettes::new(store).load()?;
    if palettes.is_empty() {
        println!("No saved palettes.");
        return Ok(());
    }
    for (index, palette) in palettes.iter().enumerate() {
        println!("#{}: {}", index + 1, palette.join(", "));
    }
    Ok(())
}

fn handle_export(args: &PaletteArgs, json: bool, image: bool, config: &Config) -> Result<()> {
    let palette = args.resolve()?;
    let downloads = Downloads::new(config.export_dir.clone());
    let (json, image) = if json || image { (json, image) } else { (true, true) };

    if json {
        let path = export::export_json(&downloads, &palette)?;
        println!("Exported {}", path.display());
    }
    if image {
        let source = Arc::new(FileWatermark::new(config.watermark_path.clone()));
        let path =
            export_image_blocking(&palette, source, config.watermark_timeout(), &downloads)?;
        info!(path = %path.display(), "image exported from command line");
        println!("Exported {}", path.display());
    }
    Ok(())
}
