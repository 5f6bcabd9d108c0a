#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing never fails, so it must also never panic
    let _ = gwchannel::name::parse_channel_name(text);

    let list = gwchannel::channel::ChannelList::from_names([text]);
    for channel in &list {
        // Components are derived from the stored name
        assert_eq!(
            channel.name_parts(),
            &gwchannel::name::parse_channel_name(channel.name())
        );
        let _ = channel.ndsname();
    }
});
