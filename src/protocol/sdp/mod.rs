//! SDP (Session Description Protocol) payloads of SAP announcements
//!
//! Announcement SDP in the wild is loosely structured, so parsing is
//! tolerant: unknown tags and malformed lines are skipped, never fatal.

mod parser;

#[cfg(test)]
mod tests;

pub use parser::SdpParser;

use std::collections::HashMap;

/// Attribute carrying the playlist group label
pub const PLAYLIST_GROUP_ATTR: &str = "x-plgroup";

/// Parsed session description
#[derive(Debug, Clone, Default)]
pub struct SessionDescription {
    /// Session name (s=), may be empty
    pub session_name: String,
    /// Session description (i=)
    pub session_info: Option<String>,
    /// Session URI (u=)
    pub uri: Option<String>,
    /// Connection info (c=)
    pub connection: Option<SdpConnection>,
    /// Media descriptions (m=), in encounter order
    pub media: Vec<MediaDescription>,
    /// Attributes (a=), last occurrence wins per key
    pub attributes: HashMap<String, Option<String>>,
}

/// SDP connection field (c=)
#[derive(Debug, Clone)]
pub struct SdpConnection {
    /// Network type (usually "IN")
    pub net_type: String,
    /// Address type (usually "IP4" or "IP6")
    pub addr_type: String,
    /// Connection address, possibly with a `/ttl` or `/ttl/count` suffix
    pub address: String,
}

/// SDP media description (m=)
#[derive(Debug, Clone)]
pub struct MediaDescription {
    /// Media type (audio, video, etc.)
    pub media_type: String,
    /// Port number
    pub port: u16,
    /// Protocol (RTP/AVP, udp, etc.)
    pub protocol: String,
}

impl SessionDescription {
    /// Get an attribute value
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)?.as_deref()
    }

    /// Playlist group label from the `x-plgroup` attribute
    #[must_use]
    pub fn playlist_group(&self) -> Option<&str> {
        self.get_attribute(PLAYLIST_GROUP_ATTR)
    }

    /// Connection address with any `/ttl` or `/ttl/count` suffix stripped
    #[must_use]
    pub fn connection_address(&self) -> Option<&str> {
        let address = self.connection.as_ref()?.address.as_str();
        let address = address.split('/').next().unwrap_or(address);
        if address.is_empty() { None } else { Some(address) }
    }

    /// First media description, the one the channel endpoint derives from
    #[must_use]
    pub fn first_media(&self) -> Option<&MediaDescription> {
        self.media.first()
    }

    /// Whether this session carries enough to possibly become a channel.
    ///
    /// A session with neither a connection address nor any media entry is
    /// discarded by the aggregator.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.connection.is_some() || !self.media.is_empty()
    }
}
