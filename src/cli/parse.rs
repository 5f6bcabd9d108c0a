use anyhow::{Context, Result};

use gwchannel::channel::{Channel, ChannelList};

/// Parse channel names and print their components
pub fn run(names: &[String], json: bool) -> Result<()> {
    let list = ChannelList::from_names(names);

    if json {
        println!("{}", list.to_json().context("Failed to serialize channels")?);
        return Ok(());
    }

    println!("Parsed Channels");
    println!("===============");
    for channel in &list {
        print_channel(channel);
    }
    println!();
    println!("{} channel(s)", list.len());

    Ok(())
}

fn print_channel(channel: &Channel) {
    let show = |value: Option<&str>| value.unwrap_or("-").to_string();

    println!();
    println!("{}", channel.name());
    println!("  IFO:       {}", show(channel.ifo()));
    println!("  System:    {}", show(channel.system()));
    println!("  Subsystem: {}", show(channel.subsystem()));
    println!("  Signal:    {}", show(channel.signal()));
    println!(
        "  Type:      {}",
        channel
            .channel_type()
            .map_or_else(|| "-".to_string(), |t| t.to_string())
    );
    println!("  NDS name:  {}", channel.ndsname());
}
