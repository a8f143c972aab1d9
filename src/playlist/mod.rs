//! Channel aggregation and playlist rendering
//!
//! Decoded sessions become [`ChannelRecord`]s keyed by their stream
//! endpoint; the [`ChannelSet`] accumulates them over the capture window
//! and freezes into an ordered sequence for serialization.

mod aggregator;
pub mod m3u;


pub use aggregator::{ChannelSet, IngestOutcome};

use std::net::IpAddr;

use crate::protocol::sdp::SessionDescription;

/// Group label used when an announcement carries none
pub const DEFAULT_GROUP: &str = "General";

/// Display name used when an announcement carries an empty session name
pub const UNNAMED_CHANNEL: &str = "Unknown Stream";

/// Stream endpoint: the (address, port) pair identifying one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointKey {
    /// Connection address of the stream
    pub address: IpAddr,
    /// Port of the first media entry
    pub port: u16,
}

impl EndpointKey {
    /// Derive the endpoint from a parsed session.
    ///
    /// Needs a connection address that is an IP literal and at least one
    /// media entry; returns `None` otherwise, which drops the session.
    #[must_use]
    pub fn from_session(session: &SessionDescription) -> Option<Self> {
        let address = session.connection_address()?.parse().ok()?;
        let port = session.first_media()?.port;
        Some(Self { address, port })
    }

    /// Deterministic channel identifier, stable across runs.
    ///
    /// Derived from the endpoint alone so downstream players can persist
    /// per-channel state against it.
    #[must_use]
    pub fn tvg_id(&self) -> String {
        format!("{}_{}", self.address, self.port)
    }
}

/// One aggregated channel
#[derive(Debug, Clone)]
pub struct ChannelRecord {
    /// Stream endpoint, the deduplication key
    pub endpoint: EndpointKey,
    /// Session name, possibly empty
    pub name: String,
    /// Session description, if announced
    pub description: Option<String>,
    /// Group label from `x-plgroup`, if announced
    pub group: Option<String>,
    /// URL scheme derived from the media protocol
    pub scheme: String,
}

impl ChannelRecord {
    /// Build a record from a usable session.
    ///
    /// Returns `None` when no endpoint can be derived.
    #[must_use]
    pub fn from_session(session: &SessionDescription) -> Option<Self> {
        let endpoint = EndpointKey::from_session(session)?;
        let scheme = scheme_for(&session.first_media()?.protocol);
        Some(Self {
            endpoint,
            name: session.session_name.clone(),
            description: session.session_info.clone(),
            group: session.playlist_group().map(str::to_string),
            scheme,
        })
    }

    /// Channel name with the unnamed fallback applied
    #[must_use]
    pub fn tvg_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_CHANNEL
        } else {
            &self.name
        }
    }

    /// Visible playlist entry name: the channel name, suffixed with the
    /// description when one was announced
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.description.as_deref() {
            Some(info) if !info.is_empty() => format!("{} - {}", self.tvg_name(), info),
            _ => self.tvg_name().to_string(),
        }
    }

    /// Effective group label
    #[must_use]
    pub fn group_title(&self) -> &str {
        match self.group.as_deref() {
            Some(group) if !group.is_empty() => group,
            _ => DEFAULT_GROUP,
        }
    }

    /// Stream URL in `<scheme>://<address>:<port>` form
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.scheme, self.endpoint.address, self.endpoint.port
        )
    }
}

// "RTP/AVP" -> "rtp", "udp" -> "udp"
fn scheme_for(protocol: &str) -> String {
    match protocol.split('/').next() {
        Some(first) if !first.is_empty() => first.to_ascii_lowercase(),
        _ => "rtp".to_string(),
    }
}
