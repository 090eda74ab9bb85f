use autobeat::content::{ContentSlot, EmptyContent};
use autobeat::info::DifficultyParams;
use autobeat::package::{self, ContentPolicy};
use autobeat::{config, naming, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autobeat")]
#[command(about = "Build Info.dat and difficulty stubs for a custom map package")]
#[command(long_about = "\
Build Info.dat and difficulty stubs for a custom map package

The map is described in map.toml: song metadata, preview window,
environment, and one [[difficulties]] block per difficulty.

Package layout:

  Markov/
  ├── Info.dat                     # Song metadata + difficulty sets
  ├── HardStandard.dat             # <Difficulty><Characteristic>.dat
  └── ExpertPlusStandard.dat

Difficulties: Easy (1), Normal (3), Hard (5), Expert (7), ExpertPlus (9).
Within each characteristic they are listed in rank order; characteristics
keep the order they first appear in.

Run 'autobeat gen-config' to print a documented map.toml.")]
#[command(version)]
struct Cli {
    /// Map configuration file
    #[arg(long, default_value = "map.toml", global = true)]
    config: PathBuf,

    /// Package folder (defaults to the song name, made path-safe, for build and the current directory for add)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Keep difficulty files that already exist instead of resetting them
    #[arg(long)]
    keep_content: bool,
}

#[derive(clap::Args)]
struct AddArgs {
    /// Characteristic (game mode), e.g. Standard, OneSaber, Lightshow
    characteristic: String,
    /// Difficulty name: Easy, Normal, Hard, Expert or ExpertPlus
    difficulty: String,
    /// Note jump movement speed (positive)
    #[arg(long)]
    njs: f64,
    /// Note jump start beat offset
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Write Info.dat and every difficulty file from map.toml
    Build(BuildArgs),
    /// Add or replace one difficulty in an existing package
    Add(AddArgs),
    /// Validate map.toml and show the resulting document without writing
    Check,
    /// Print a stock map.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autobeat=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            let map = load_map(&cli.config)?;
            let document = map.to_document()?;
            let folder = match cli.output {
                Some(folder) => folder,
                None => PathBuf::from(naming::package_folder_name(&document.song_name)),
            };
            let policy = if args.keep_content {
                ContentPolicy::KeepExisting
            } else {
                ContentPolicy::Overwrite
            };

            println!("==> Building {}", folder.display());
            output::print_document(&document);
            let summary = package::write_package(&folder, &document, &EmptyContent, policy)?;
            output::print_package_summary(&summary);
            println!("==> Build complete: {}", folder.display());
        }
        Command::Add(args) => {
            let folder = cli.output.unwrap_or_else(|| PathBuf::from("."));
            let mut document = package::read_info(&folder)?;
            let outcome = document.upsert_difficulty(
                &args.characteristic,
                &args.difficulty,
                DifficultyParams::new(args.njs, args.offset),
            )?;
            package::write_info(&folder, &document)?;

            let slot = ContentSlot::new(&args.characteristic, &args.difficulty);
            if folder.join(&slot.filename).exists() {
                info!(file = %slot.filename, "keeping existing content");
            } else {
                package::write_content(&folder, &slot, &EmptyContent)?;
            }
            println!(
                "{}",
                output::format_upsert(&args.characteristic, &args.difficulty, outcome)
            );
            for line in output::format_orphans(&package::find_orphans(&folder, &document)?) {
                println!("{line}");
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let map = load_map(&cli.config)?;
            let document = map.to_document()?;
            output::print_document(&document);
            println!("==> Map is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `map.toml`, warning when it is missing and stock defaults are used.
fn load_map(path: &Path) -> Result<config::MapConfig, config::ConfigError> {
    if !path.exists() {
        warn!(path = %path.display(), "map file not found, using stock defaults");
    }
    config::load_config(path)
}
