//! Accumulation of decoded sessions into a stable channel set

use std::collections::HashMap;

use crate::protocol::sdp::SessionDescription;

use super::{ChannelRecord, EndpointKey};

/// What an ingest call did to the set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// First sighting of the endpoint, record created
    Added,
    /// Endpoint already known, record overwritten
    Updated,
    /// Withdrawal removed the endpoint
    Removed,
    /// Session unusable, or withdrawal for an unknown endpoint
    Ignored,
}

/// Evolving channel map for one capture window.
///
/// Owned exclusively by the capture task; one record per unique endpoint,
/// announcements refresh rather than append.
#[derive(Debug, Default)]
pub struct ChannelSet {
    channels: HashMap<EndpointKey, ChannelRecord>,
}

impl ChannelSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one decoded session into the set.
    ///
    /// An announcement creates or overwrites the record for its endpoint;
    /// a withdrawal removes it (no-op when absent). Sessions from which no
    /// endpoint can be derived are ignored.
    pub fn ingest(&mut self, session: &SessionDescription, withdrawal: bool) -> IngestOutcome {
        if withdrawal {
            let Some(endpoint) = EndpointKey::from_session(session) else {
                return IngestOutcome::Ignored;
            };
            return match self.channels.remove(&endpoint) {
                Some(_) => IngestOutcome::Removed,
                None => IngestOutcome::Ignored,
            };
        }

        let Some(record) = ChannelRecord::from_session(session) else {
            return IngestOutcome::Ignored;
        };
        match self.channels.insert(record.endpoint, record) {
            Some(_) => IngestOutcome::Updated,
            None => IngestOutcome::Added,
        }
    }

    /// Look up the record for an endpoint
    #[must_use]
    pub fn get(&self, endpoint: &EndpointKey) -> Option<&ChannelRecord> {
        self.channels.get(endpoint)
    }

    /// Number of channels currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the set holds no channels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Freeze the set into the serialization order: by group label, then
    /// display name, then endpoint. The endpoint tie-break makes the order
    /// total, so identical inputs in any arrival order serialize
    /// identically.
    #[must_use]
    pub fn finalize(self) -> Vec<ChannelRecord> {
        let mut records: Vec<ChannelRecord> = self.channels.into_values().collect();
        records.sort_by(|a, b| {
            a.group_title()
                .cmp(b.group_title())
                .then_with(|| a.display_name().cmp(&b.display_name()))
                .then_with(|| a.endpoint.cmp(&b.endpoint))
        });
        records
    }
}
