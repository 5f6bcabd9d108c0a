use anyhow::{Context, Result};
use log::info;

use gwchannel::availability::AvailabilityResolver;
use gwchannel::channel::ChannelList;

use super::Config;

/// Query data availability for the given channel names
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &Config,
    names: &[String],
    start: &str,
    end: &str,
    host: Option<String>,
    port: Option<u16>,
    program: Option<String>,
    json: bool,
) -> Result<()> {
    let section = &config.availability;
    let host = host
        .or_else(|| section.host.clone())
        .context("No data server given; pass --host or set availability.host")?;
    let port = port.or(section.port);

    let channels = ChannelList::from_names(names);
    let resolver = AvailabilityResolver::new(section.tool_config(program));

    info!(
        "Querying availability of {} channel(s) on {}",
        channels.len(),
        host
    );

    let report = resolver
        .query(&channels, start, end, &host, port)
        .context("Availability query failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
        return Ok(());
    }

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    Ok(())
}
