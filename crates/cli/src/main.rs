use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dat_carver::commands::{extract_command, scan_command};
use dat_carver::{input_path_or_default, resolve_config, ConfigOverrides};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Carve icons and language labels out of a keyboard-layout data blob.
///
/// This CLI is a thin wrapper around `carver-core` (exposed in code as
/// `carver_core`). Segmentation and naming live in the library; this binary
/// only reads the input, checks the output directory and writes files.
#[derive(Parser, Debug)]
#[command(
    name = "dat-carver",
    version,
    about = "Extract embedded icns icons and language labels from a .dat blob",
    long_about = None
)]
struct Cli {
    /// Verbosity level (0=quiet, 1=warnings, 2=info, 3=debug)
    #[arg(short, long, global = true, default_value_t = 1)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the segments found in the input without writing anything.
    Scan {
        /// Input blob. Defaults to the system AppleKeyboardLayouts-L.dat.
        input: Option<PathBuf>,

        /// Optional config file (.json, .yaml or .yml).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit an all-NUL run before a label as its own unknown segment.
        #[arg(long, default_value_t = false)]
        preserve_padding: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write every segment to its own file in an existing directory.
    ///
    /// Icons are written as `.icns`, labels as `.txt`, everything else as `.dat`.
    /// An icon that follows a label is named `<index>-<name> (<code>).icns`.
    Extract {
        /// Input blob. Defaults to the system AppleKeyboardLayouts-L.dat.
        input: Option<PathBuf>,

        /// Output directory. Must already exist.
        #[arg(short, long)]
        output: PathBuf,

        /// Optional config file (.json, .yaml or .yml).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit an all-NUL run before a label as its own unknown segment.
        #[arg(long, default_value_t = false)]
        preserve_padding: bool,

        /// Write a manifest describing every extracted file.
        #[arg(long, default_value_t = false)]
        manifest: bool,

        /// Manifest format: json or yaml.
        #[arg(long)]
        manifest_format: Option<String>,

        /// Do not write `.dat` files for unrecognized bytes.
        #[arg(long, default_value_t = false)]
        skip_unknown: bool,

        /// Print what would be written without touching the output directory.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbosity);

    match cli.command {
        Command::Scan { input, config, preserve_padding, json } => {
            let overrides = ConfigOverrides { preserve_padding, ..Default::default() };
            let config = resolve_config(config.as_deref(), &overrides)?;
            scan_command(&input_path_or_default(input), &config, json)?
        }
        Command::Extract {
            input,
            output,
            config,
            preserve_padding,
            manifest,
            manifest_format,
            skip_unknown,
            dry_run,
        } => {
            let overrides =
                ConfigOverrides { preserve_padding, manifest, manifest_format, skip_unknown };
            let config = resolve_config(config.as_deref(), &overrides)?;
            extract_command(&input_path_or_default(input), &output, &config, dry_run)?
        }
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        _ => Level::DEBUG,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).ok();
}
