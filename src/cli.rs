//! Command-line interface implementation
//!
//! Parses arguments, installs logging, and drives a single conversion:
//! palette → image → sprite → output file.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::error::Result;
use crate::mapper::{convert_file, SpriteOptions};
use crate::output::write_sprite;
use crate::palette::load_palette;
use crate::progress::{LogProgress, NullProgress, ProgressReporter};
use crate::source::ResizeFilter;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// charsprite - Convert images to character sprites using a color palette
#[derive(Parser, Debug)]
#[command(name = "charsprite")]
#[command(about = "Convert images to character sprites using a color palette")]
#[command(version)]
#[command(after_help = "Examples:
  charsprite photo.jpg palette.txt sprite.txt
  charsprite photo.jpg palette.txt output.txt -w 64 -y 64
  charsprite photo.jpg palette.txt output.txt -w 128 --preserve-aspect")]
pub struct Cli {
    /// Input image file
    pub image: PathBuf,

    /// Palette file (format: "char #hexcolor")
    pub palette: PathBuf,

    /// Output sprite file
    pub output: PathBuf,

    /// Target width in characters
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Target height in characters
    #[arg(short = 'y', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Preserve aspect ratio when resizing
    #[arg(long)]
    pub preserve_aspect: bool,

    /// Resampling filter used when resizing
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Config file (default: nearest charsprite.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            width: self.width,
            height: self.height,
            preserve_aspect: self.preserve_aspect.then_some(true),
            filter: self.filter,
        }
    }
}

/// Install the stderr logging subscriber.
///
/// `RUST_LOG` wins over the default filter.
fn init_logging(quiet: bool) {
    let default_filter = if quiet { "charsprite=warn" } else { "charsprite=info" };
    // try_init: a subscriber may already be installed when embedded
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_ansi(atty::is(atty::Stream::Stderr))
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Build conversion options from the config file and CLI flags.
fn resolve_options(cli: &Cli) -> Result<SpriteOptions> {
    let mut config = load_config(cli.config.as_deref())?;
    merge_cli_overrides(&mut config, &cli.overrides());
    Ok(config.sprite_options())
}

/// Run one conversion.
pub fn execute(
    image: &Path,
    palette: &Path,
    output: &Path,
    options: &SpriteOptions,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let parsed = load_palette(palette)?;
    let sprite = convert_file(image, &parsed.palette, options, reporter)?;

    write_sprite(&sprite, output)?;
    tracing::info!("Sprite saved to {}", output.display());
    tracing::info!("Dimensions: {}x{}", sprite.width(), sprite.height());
    Ok(())
}

/// Parse the process arguments and run.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            let code = if e.use_stderr() { EXIT_INVALID_ARGS } else { EXIT_SUCCESS };
            return ExitCode::from(code);
        }
    };
    init_logging(cli.quiet);

    let result = resolve_options(&cli).and_then(|options| {
        let reporter: Box<dyn ProgressReporter> =
            if cli.quiet { Box::new(NullProgress::new()) } else { Box::new(LogProgress::new()) };
        execute(&cli.image, &cli.palette, &cli.output, &options, reporter.as_ref())
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
