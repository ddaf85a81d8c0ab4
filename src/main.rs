//! Hardware RNG CLI
//!
//! Command-line interface for probing the generator and drawing random
//! output through every generation path.

use clap::{Parser, Subcommand, ValueEnum};
use hwrng::{GeneratedOutput, GeneratorSettings, HardwareRng, OutputMode, SecurityPreset};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hwrng", version, about = "Hardware RNG front-end")]
struct Cli {
    /// TOML settings file for custom generation.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report generator and threading availability.
    Probe {
        /// Initialize threading before the second probe.
        #[arg(long)]
        init: bool,
    },
    /// Raw bytes, printed as hex.
    Bytes {
        size: usize,
        /// Use tiered generation with this complexity (1-10).
        #[arg(long, conflicts_with = "threadsafe")]
        complexity: Option<i32>,
        /// Use thread-safe generation (complexity 1-5, default 1).
        #[arg(long, value_name = "COMPLEXITY", num_args = 0..=1, default_missing_value = "1")]
        threadsafe: Option<i32>,
    },
    /// Random bytes encoded as hex.
    Hex { size: usize },
    /// Random bytes encoded as base64.
    Base64 { size: usize },
    /// Custom generation from a preset or the settings file.
    Custom {
        size: usize,
        /// Preset used when no settings file is given.
        #[arg(long, default_value = "balanced")]
        preset: SecurityPreset,
        /// Output encoding override.
        #[arg(long)]
        output: Option<OutputMode>,
    },
    /// Random unsigned integer.
    Int {
        #[arg(long, value_enum, default_value = "32")]
        bits: Bits,
    },
    /// Random float in [0, 1).
    Float,
    /// Random integers in [START, END).
    Range {
        #[arg(allow_hyphen_values = true)]
        start: i64,
        #[arg(allow_hyphen_values = true)]
        end: i64,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Pick one of the given items.
    Choose { items: Vec<String> },
    /// Shuffle the given items.
    Shuffle { items: Vec<String> },
}

#[derive(Clone, Copy, ValueEnum)]
enum Bits {
    #[value(name = "32")]
    B32,
    #[value(name = "64")]
    B64,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Hardware RNG front-end v{}", hwrng::VERSION);

    let rng = HardwareRng::software();
    if needs_entropy(&cli.command) && !rng.is_available() {
        error!("Entropy source is not available on this host");
        return ExitCode::FAILURE;
    }

    match run(&rng, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(rng: &HardwareRng, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Probe { init } => {
            println!("available: {}", rng.is_available());
            println!("threading: {:?}", rng.threading_state());
            if *init {
                rng.init_threading()?;
                println!("threading after init: {:?}", rng.threading_state());
            }
        }
        Command::Bytes {
            size,
            complexity,
            threadsafe,
        } => {
            let bytes = match (complexity, threadsafe) {
                (Some(c), _) => rng.generate_tiered(*size, *c)?,
                (None, Some(c)) => rng.generate_threadsafe(*size, *c)?,
                (None, None) => rng.generate(*size)?,
            };
            println!("{}", render(GeneratedOutput::Bytes(bytes)));
        }
        Command::Hex { size } => println!("{}", rng.generate_hex(*size)?),
        Command::Base64 { size } => println!("{}", rng.generate_base64(*size)?),
        Command::Custom {
            size,
            preset,
            output,
        } => {
            let output = match &cli.config {
                Some(path) => {
                    let settings = GeneratorSettings::from_file(path)?;
                    info!("Loaded settings from {}", path.display());
                    let config = rng.create_config(settings.preset, settings.overrides());
                    rng.generate_custom(*size, &config, *output)?
                }
                None => rng.generate_with_preset(*size, *preset, *output)?,
            };
            println!("{}", render(output));
        }
        Command::Int { bits } => match bits {
            Bits::B32 => println!("{}", rng.generate_u32()?),
            Bits::B64 => println!("{}", rng.generate_u64()?),
        },
        Command::Float => println!("{:.16}", rng.generate_f64()?),
        Command::Range { start, end, count } => {
            for _ in 0..*count {
                println!("{}", rng.generate_range(*start, *end)?);
            }
        }
        Command::Choose { items } => println!("{}", rng.choose(items)?),
        Command::Shuffle { items } => {
            let mut items = items.clone();
            let shuffled = rng.shuffle(&mut items)?;
            println!("{}", shuffled.join(" "));
        }
    }
    Ok(())
}

/// `probe` must still run to report an unavailable source.
fn needs_entropy(command: &Command) -> bool {
    !matches!(command, Command::Probe { .. })
}

/// Raw output is printed as lowercase hex, text output as-is.
fn render(output: GeneratedOutput) -> String {
    match output {
        GeneratedOutput::Bytes(bytes) => hex::encode(bytes),
        GeneratedOutput::Text(text) => text,
    }
}
