use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use gwchannel::channel::{AttributeFilter, ChannelList, Sieve};
use gwchannel::types::ChannelType;

/// Options of the sieve command
pub struct SieveArgs {
    pub input: Option<PathBuf>,
    pub names: Vec<String>,
    pub name: Option<String>,
    pub exact: bool,
    pub sample_rate: Option<f64>,
    pub sample_range: Option<(f64, f64)>,
    pub ifo: Option<String>,
    pub channel_type: Option<String>,
    pub json: bool,
}

/// Filter channels read from a JSON file and/or the command line
pub fn run(args: SieveArgs) -> Result<()> {
    let mut list = match &args.input {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read channel list: {}", path.display()))?;
            ChannelList::from_json(&content)
                .with_context(|| format!("Invalid channel list: {}", path.display()))?
        }
        None => ChannelList::new(),
    };
    list.extend(ChannelList::from_names(&args.names));

    if list.is_empty() {
        anyhow::bail!("No channels given; pass names or --input");
    }

    let sieve = build_sieve(&args)?;
    let found = list.sieve(&sieve).context("Failed to apply filter")?;
    info!("{} of {} channel(s) matched", found.len(), list.len());

    if args.json {
        println!("{}", found.to_json().context("Failed to serialize channels")?);
    } else {
        for channel in &found {
            println!("{}", channel.ndsname());
        }
    }

    Ok(())
}

fn build_sieve(args: &SieveArgs) -> Result<Sieve> {
    let mut sieve = Sieve::new().exact_match(args.exact);

    if let Some(pattern) = &args.name {
        sieve = sieve.name(pattern.as_str());
    }
    if let Some(rate) = args.sample_rate {
        sieve = sieve.sample_rate(rate);
    }
    if let Some((low, high)) = args.sample_range {
        sieve = sieve.sample_range(low, high);
    }
    if let Some(ifo) = &args.ifo {
        sieve = sieve.attribute(AttributeFilter::Ifo(ifo.clone()));
    }
    if let Some(text) = &args.channel_type {
        let channel_type: ChannelType = text
            .parse()
            .with_context(|| format!("Invalid --type value '{}'", text))?;
        sieve = sieve.attribute(AttributeFilter::ChannelType(channel_type));
    }

    Ok(sieve)
}
