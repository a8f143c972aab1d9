//! Testing utilities: SAP datagram fixtures and a scripted datagram source.
//!
//! Used by this crate's own tests; exported so downstream users can drive
//! the capture loop without a live multicast network.

use std::collections::VecDeque;
use std::io;
use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use bytes::Bytes;

use crate::capture::DatagramSource;
use crate::protocol::sap::SDP_CONTENT_TYPE;

/// Builder for encoded SAP datagrams.
///
/// Defaults to a version-1 IPv4 announcement with a content-type marker and
/// no authentication data. Every knob can be bent for negative tests.
#[derive(Debug, Clone)]
pub struct SapPacketBuilder {
    version: u8,
    deletion: bool,
    encrypted: bool,
    compressed: bool,
    auth_words: u8,
    msg_id_hash: u16,
    origin: IpAddr,
    payload_type: Option<String>,
}

impl Default for SapPacketBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SapPacketBuilder {
    /// Create a builder with announcement defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: 1,
            deletion: false,
            encrypted: false,
            compressed: false,
            auth_words: 0,
            msg_id_hash: 0x1234,
            origin: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)),
            payload_type: Some(SDP_CONTENT_TYPE.to_string()),
        }
    }

    /// Set the version bits
    #[must_use]
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Mark the message as a deletion
    #[must_use]
    pub fn deletion(mut self) -> Self {
        self.deletion = true;
        self
    }

    /// Set the encrypted flag
    #[must_use]
    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    /// Set the compressed flag
    #[must_use]
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    /// Append `words` 32-bit words of zeroed authentication data
    #[must_use]
    pub fn auth_words(mut self, words: u8) -> Self {
        self.auth_words = words;
        self
    }

    /// Set the message id hash
    #[must_use]
    pub fn msg_id_hash(mut self, hash: u16) -> Self {
        self.msg_id_hash = hash;
        self
    }

    /// Set the originating source address (switches layout for IPv6)
    #[must_use]
    pub fn origin(mut self, origin: IpAddr) -> Self {
        self.origin = origin;
        self
    }

    /// Override the content-type marker; `None` omits it entirely
    #[must_use]
    pub fn payload_type(mut self, payload_type: Option<&str>) -> Self {
        self.payload_type = payload_type.map(str::to_string);
        self
    }

    /// Encode a datagram carrying `sdp` as payload
    #[must_use]
    pub fn build(&self, sdp: &str) -> Vec<u8> {
        let ipv6 = self.origin.is_ipv6();

        // Byte 0: V(3) | A(1) | R(1) | T(1) | E(1) | C(1)
        let mut b0 = (self.version & 0x07) << 5;
        if ipv6 {
            b0 |= 0x10;
        }
        if self.deletion {
            b0 |= 0x04;
        }
        if self.encrypted {
            b0 |= 0x02;
        }
        if self.compressed {
            b0 |= 0x01;
        }

        let mut buf = vec![b0, self.auth_words];
        buf.extend_from_slice(&self.msg_id_hash.to_be_bytes());
        match self.origin {
            IpAddr::V4(v4) => buf.extend_from_slice(&v4.octets()),
            IpAddr::V6(v6) => buf.extend_from_slice(&v6.octets()),
        }
        buf.extend(std::iter::repeat_n(0u8, usize::from(self.auth_words) * 4));
        if let Some(ref t) = self.payload_type {
            buf.extend_from_slice(t.as_bytes());
            buf.push(0);
        }
        buf.extend_from_slice(sdp.as_bytes());
        buf
    }
}

/// Encode a plain announcement datagram carrying `sdp`
#[must_use]
pub fn announcement(sdp: &str) -> Vec<u8> {
    SapPacketBuilder::new().build(sdp)
}

/// Encode a deletion datagram carrying `sdp`
#[must_use]
pub fn deletion(sdp: &str) -> Vec<u8> {
    SapPacketBuilder::new().deletion().build(sdp)
}

/// Scripted datagram source backed by a queue.
///
/// Yields the queued datagrams in order, then reports closure.
#[derive(Debug, Default)]
pub struct MockSource {
    queue: VecDeque<Bytes>,
}

impl MockSource {
    /// Create a source yielding `datagrams` in order
    pub fn new<I>(datagrams: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            queue: datagrams.into_iter().map(Bytes::from).collect(),
        }
    }

    /// Append one datagram to the script
    pub fn push(&mut self, datagram: Vec<u8>) {
        self.queue.push_back(Bytes::from(datagram));
    }
}

#[async_trait]
impl DatagramSource for MockSource {
    async fn recv(&mut self) -> io::Result<Option<Bytes>> {
        Ok(self.queue.pop_front())
    }
}
