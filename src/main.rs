//! # gwchannel
//!
//! A command-line tool for inspecting interferometer data channel names and
//! querying data availability.
//!
//! ## Usage
//!
//! ```bash
//! # Show the components of channel names
//! gwchannel parse "H1:LSC-DARM_ERR,m-trend" L1:PSL-ISS_PDA_OUT_DQ
//!
//! # Filter a saved channel list
//! gwchannel parse --json H1:LSC-DARM_ERR L1:LSC-DARM_ERR > channels.json
//! gwchannel sieve --input channels.json --ifo H1
//!
//! # When are data available?
//! gwchannel availability H1:LSC-DARM_ERR -s 1126259446 -e 1126259478 --host nds.ligo.caltech.edu
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
