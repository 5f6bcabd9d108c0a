use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod availability;
mod config;
mod parse;
mod sieve;

pub use config::Config;

/// gwchannel - Interferometer data channel metadata tool
#[derive(Parser)]
#[command(name = "gwchannel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse channel names and show their components
    Parse {
        /// Channel names; each argument may hold several comma-separated names
        #[arg(value_name = "NAMES", required = true)]
        names: Vec<String>,

        /// Print the parsed channels as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter a list of channels
    Sieve {
        /// JSON channel list to filter (as written by `parse --json`)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Channel names to filter, in addition to any read from --input
        #[arg(value_name = "NAMES")]
        names: Vec<String>,

        /// Regular expression the channel name must match
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Require the pattern to match the whole name
        #[arg(long)]
        exact: bool,

        /// Exact sample rate in Hz
        #[arg(long)]
        sample_rate: Option<f64>,

        /// Lowest sample rate in Hz
        #[arg(long, requires = "max_rate")]
        min_rate: Option<f64>,

        /// Highest sample rate in Hz
        #[arg(long, requires = "min_rate")]
        max_rate: Option<f64>,

        /// Interferometer prefix (e.g. H1)
        #[arg(long)]
        ifo: Option<String>,

        /// Storage type (e.g. raw, m-trend)
        #[arg(short = 't', long = "type")]
        channel_type: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report when data are available for channels
    Availability {
        /// Channel names; each argument may hold several comma-separated names
        #[arg(value_name = "NAMES", required = true)]
        names: Vec<String>,

        /// GPS start time or UTC date
        #[arg(short, long)]
        start: String,

        /// GPS end time or UTC date
        #[arg(short, long)]
        end: String,

        /// Data server host (defaults to the config file value)
        #[arg(short = 'n', long)]
        host: Option<String>,

        /// Data server port
        #[arg(short, long)]
        port: Option<u16>,

        /// Availability tool program
        #[arg(long)]
        program: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { names, json } => parse::run(&names, json),
        Commands::Sieve {
            input,
            names,
            name,
            exact,
            sample_rate,
            min_rate,
            max_rate,
            ifo,
            channel_type,
            json,
        } => sieve::run(sieve::SieveArgs {
            input,
            names,
            name,
            exact,
            sample_rate,
            sample_range: min_rate.zip(max_rate),
            ifo,
            channel_type,
            json,
        }),
        Commands::Availability {
            names,
            start,
            end,
            host,
            port,
            program,
            json,
        } => availability::run(
            &config, &names, &start, &end, host, port, program, json,
        ),
    }
}
