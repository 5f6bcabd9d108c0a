//! Channel resolution against the remote metadata services.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::services::{CatalogQueryOptions, ChannelCatalog, ConnectionFactory, DiscoveryConnection};
use crate::types::ChannelType;

use super::{Channel, ChannelError, ChannelList};

impl Channel {
    /// Look up the single catalog entry matching `name`.
    ///
    /// Fails with [`ChannelError::NotFound`] when the catalog has no match and
    /// [`ChannelError::Ambiguous`] when it has more than one.
    pub fn query<C: ChannelCatalog + ?Sized>(
        name: &str,
        catalog: &C,
        options: &CatalogQueryOptions,
    ) -> Result<Channel, ChannelError> {
        let found = ChannelList::query(name, catalog, options)?;
        exactly_one(name, found)
    }

    /// Resolve `name` on a discovery connection, requiring a unique match.
    ///
    /// See [`ChannelList::query_batch`] for the matching rules.
    pub fn query_unique<D: DiscoveryConnection + ?Sized>(
        name: &str,
        connection: &mut D,
        channel_type: Option<ChannelType>,
    ) -> Result<Channel, ChannelError> {
        ChannelList::query_batch([name], connection, channel_type, true)?
            .into_iter()
            .next()
            .ok_or_else(|| ChannelError::NotFound(name.to_string()))
    }
}

impl ChannelList {
    /// All catalog entries whose name matches `pattern`
    pub fn query<C: ChannelCatalog + ?Sized>(
        pattern: &str,
        catalog: &C,
        options: &CatalogQueryOptions,
    ) -> Result<ChannelList, ChannelError> {
        debug!("querying channel catalog for '{}'", pattern);
        catalog
            .query(pattern, options)?
            .iter()
            .map(Channel::from_catalog_record)
            .collect()
    }

    /// Resolve each of `names` on an open discovery connection.
    ///
    /// For every name a probe channel is built (carrying `channel_type` when
    /// given, or a `,<type>` suffix from the name) and the connection is asked
    /// for matching channels.
    ///
    /// With `unique` set, each name must resolve to exactly one channel
    /// identity (`ndsname`): zero identities is [`ChannelError::NotFound`],
    /// several is [`ChannelError::Ambiguous`]. One identity recorded at
    /// several sample rates logs a warning and keeps the first. Without
    /// `unique`, every match is appended in request order.
    pub fn query_batch<I, S, D>(
        names: I,
        connection: &mut D,
        channel_type: Option<ChannelType>,
        unique: bool,
    ) -> Result<ChannelList, ChannelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        D: DiscoveryConnection + ?Sized,
    {
        let mut out = ChannelList::new();

        for name in names {
            let name = name.as_ref();
            let mut probe = Channel::new(name);
            if channel_type.is_some() {
                probe.set_channel_type(channel_type);
            }

            let found = match probe.channel_type() {
                Some(t) => connection.find_channels(&probe.ndsname(), Some(t))?,
                None => connection.find_channels(probe.name(), None)?,
            };
            let found: ChannelList = found
                .iter()
                .map(Channel::from_foreign)
                .collect::<Result<_, _>>()?;
            debug!("{} match(es) for '{}'", found.len(), name);

            if !unique {
                out.extend(found);
                continue;
            }

            let identities: BTreeSet<String> = found.iter().map(Channel::ndsname).collect();
            match identities.len() {
                0 => return Err(ChannelError::NotFound(name.to_string())),
                1 => {
                    if found.len() > 1 {
                        warn!(
                            "Multiple instances of '{}' found with different sample rates, returning first",
                            name
                        );
                    }
                    out.extend(found.into_iter().take(1));
                }
                _ => {
                    return Err(ChannelError::Ambiguous {
                        name: name.to_string(),
                        candidates: found.iter().map(Channel::describe).collect(),
                    })
                }
            }
        }

        Ok(out)
    }

    /// Connect to `host` through `factory` and run [`query_batch`](Self::query_batch)
    pub fn query_batch_at<I, S, F>(
        names: I,
        factory: &F,
        host: &str,
        port: Option<u16>,
        channel_type: Option<ChannelType>,
        unique: bool,
    ) -> Result<ChannelList, ChannelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: ConnectionFactory + ?Sized,
    {
        let mut connection = factory.auth_connect(host, port)?;
        Self::query_batch(names, &mut connection, channel_type, unique)
    }
}

fn exactly_one(name: &str, found: ChannelList) -> Result<Channel, ChannelError> {
    match found.len() {
        0 => Err(ChannelError::NotFound(name.to_string())),
        1 => found
            .into_iter()
            .next()
            .ok_or_else(|| ChannelError::NotFound(name.to_string())),
        _ => Err(ChannelError::Ambiguous {
            name: name.to_string(),
            candidates: found.iter().map(Channel::describe).collect(),
        }),
    }
}
