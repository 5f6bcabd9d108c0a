use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Index;

use crate::types::CHANNEL_TYPE_ALIASES;

use super::{Channel, ChannelError, Sieve};

/// Characters stripped from both ends of every name token
const QUOTE_CHARS: &[char] = &['"', '\'', ' ', '\t', '\n', '\r'];

/// An ordered collection of [`Channel`]s.
///
/// Duplicates are allowed. The list only changes through [`push`](Self::push)
/// and [`extend`](Self::extend); filtering and queries build new lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelList {
    channels: Vec<Channel>,
}

impl ChannelList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one or more comma-separated strings of channel names.
    ///
    /// Each string may hold several names, optionally carrying a `,<type>`
    /// suffix, e.g. `"H1:A-B, H1:C-D,raw"` yields `H1:A-B` and `H1:C-D`
    /// (type raw). See [`split_names`] for the splitting rules.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .flat_map(|s| split_names(s.as_ref()))
            .map(|token| Channel::new(&token))
            .collect()
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if the list holds no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Iterate over the channels in order
    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Channel at `index`
    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// The channels as a slice
    pub fn as_slice(&self) -> &[Channel] {
        &self.channels
    }

    /// Append a channel
    pub fn push(&mut self, channel: Channel) {
        self.channels.push(channel);
    }

    /// Append every channel from `channels`
    pub fn extend<I: IntoIterator<Item = Channel>>(&mut self, channels: I) {
        self.channels.extend(channels);
    }

    /// Names of all channels, in order
    pub fn names(&self) -> Vec<&str> {
        self.channels.iter().map(Channel::name).collect()
    }

    /// Set of distinct interferometer prefixes
    pub fn ifos(&self) -> BTreeSet<String> {
        self.channels
            .iter()
            .filter_map(|c| c.ifo().map(str::to_string))
            .collect()
    }

    /// Position of the first channel whose name equals `name`
    pub fn find(&self, name: &str) -> Result<usize, ChannelError> {
        self.channels
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| ChannelError::NotFound(name.to_string()))
    }

    /// Channels matching every criterion of `sieve`, in their original order
    pub fn sieve(&self, sieve: &Sieve) -> Result<ChannelList, ChannelError> {
        Ok(Self {
            channels: sieve.apply(&self.channels)?,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, ChannelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, ChannelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Split a comma-separated string of channel names into name tokens.
///
/// The string is stripped of surrounding quotes and whitespace, then tokens
/// are cut from the front until no comma remains:
///
/// - if the segment after the first comma is a storage-type alias (aliases
///   are tried in [`CHANNEL_TYPE_ALIASES`] order), the `name,alias` pair is
///   one token;
/// - otherwise the text before the first comma is a bare name token.
///
/// The remainder is the final token. Empty tokens are dropped.
///
/// This is a best-effort heuristic: a channel name that itself contains a
/// comma followed by an alias cannot be told apart from a typed name.
pub fn split_names(names: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = names.trim_matches(QUOTE_CHARS);

    while let Some((head, tail)) = rest.split_once(',') {
        let (second, after) = tail.split_once(',').unwrap_or((tail, ""));
        let second = second.trim_matches(QUOTE_CHARS);

        let typed = CHANNEL_TYPE_ALIASES
            .iter()
            .any(|(alias, _)| second.eq_ignore_ascii_case(alias));

        if typed {
            push_token(&mut out, &format!("{},{}", head.trim_matches(QUOTE_CHARS), second));
            rest = after;
        } else {
            push_token(&mut out, head);
            rest = tail;
        }
        rest = rest.trim_matches(QUOTE_CHARS);
    }

    push_token(&mut out, rest);
    out
}

fn push_token(out: &mut Vec<String>, token: &str) {
    let token = token.trim_matches(QUOTE_CHARS);
    if !token.is_empty() {
        out.push(token.to_string());
    }
}

impl Index<usize> for ChannelList {
    type Output = Channel;

    fn index(&self, index: usize) -> &Channel {
        &self.channels[index]
    }
}

impl FromIterator<Channel> for ChannelList {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        Self {
            channels: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ChannelList {
    type Item = Channel;
    type IntoIter = std::vec::IntoIter<Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChannelList {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

impl From<Vec<Channel>> for ChannelList {
    fn from(channels: Vec<Channel>) -> Self {
        Self { channels }
    }
}
