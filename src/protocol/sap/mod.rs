//! SAP (Session Announcement Protocol) envelope decoding
//!
//! SAP (RFC 2974) wraps an SDP payload in a small binary header carrying
//! version/flag bits, an authentication-data length, a message-id hash and
//! the originating source address. Announcements are broadcast periodically
//! to a well-known multicast group.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::Bytes;
use thiserror::Error;


/// Well-known IPv4 multicast group for SAP announcements
pub const SAP_MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(224, 2, 127, 254);

/// Well-known SAP port
pub const SAP_PORT: u16 = 9875;

/// Payload content type this decoder accepts
pub const SDP_CONTENT_TYPE: &str = "application/sdp";

/// SAP decode errors
#[derive(Debug, Error)]
pub enum SapDecodeError {
    /// Datagram shorter than the header requires
    #[error("datagram too short: need {needed} bytes, have {have}")]
    TooShort {
        /// Bytes the header (plus at least one payload byte) requires
        needed: usize,
        /// Bytes actually received
        have: usize,
    },

    /// Version field outside the supported set
    #[error("unsupported SAP version: {0}")]
    UnsupportedVersion(u8),

    /// Encrypted flag set; encrypted payloads are not supported
    #[error("encrypted announcement not supported")]
    Encrypted,

    /// Compressed flag set; compressed payloads are not supported
    #[error("compressed announcement not supported")]
    Compressed,

    /// Payload type marker present but not SDP
    #[error("unsupported payload type: {0}")]
    UnsupportedPayloadType(String),
}

/// Message type bit: announce (0) or delete (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Session announcement
    Announcement,
    /// Session withdrawal
    Deletion,
}

/// Decoded SAP header
#[derive(Debug, Clone)]
pub struct SapHeader {
    /// Protocol version (bits 7-5 of byte 0)
    pub version: u8,
    /// Announcement or deletion
    pub message_type: MessageType,
    /// Authentication data length, in 32-bit words
    pub auth_len: u8,
    /// Message id hash, opaque to this decoder
    pub msg_id_hash: u16,
    /// Originating source address
    pub origin: IpAddr,
}

impl SapHeader {
    /// Minimum encoded size: 4 fixed bytes plus an IPv4 source address
    pub const MIN_SIZE: usize = 8;
}

/// A decoded SAP message: header plus SDP payload bytes
#[derive(Debug, Clone)]
pub struct SapMessage {
    /// Decoded envelope
    pub header: SapHeader,
    /// SDP payload, with the content-type marker stripped
    pub payload: Bytes,
}

impl SapMessage {
    /// Decode a raw datagram.
    ///
    /// Skips authentication data and the content-type marker. A payload
    /// with no NUL-terminated marker is taken as bare SDP; some senders
    /// omit the marker entirely.
    ///
    /// # Errors
    ///
    /// Returns `SapDecodeError` if the datagram is truncated, carries an
    /// unsupported version, is encrypted or compressed, or declares a
    /// non-SDP payload type.
    pub fn decode(buf: &[u8]) -> Result<Self, SapDecodeError> {
        if buf.len() < SapHeader::MIN_SIZE {
            return Err(SapDecodeError::TooShort {
                needed: SapHeader::MIN_SIZE,
                have: buf.len(),
            });
        }

        // Byte 0: V(3) | A(1) | R(1) | T(1) | E(1) | C(1)
        let version = (buf[0] >> 5) & 0x07;
        let ipv6 = buf[0] & 0x10 != 0;
        let deletion = buf[0] & 0x04 != 0;
        let encrypted = buf[0] & 0x02 != 0;
        let compressed = buf[0] & 0x01 != 0;

        if version != 1 {
            return Err(SapDecodeError::UnsupportedVersion(version));
        }
        if encrypted {
            return Err(SapDecodeError::Encrypted);
        }
        if compressed {
            return Err(SapDecodeError::Compressed);
        }

        let auth_len = buf[1];
        let msg_id_hash = u16::from_be_bytes([buf[2], buf[3]]);

        let addr_len = if ipv6 { 16 } else { 4 };
        let header_len = 4 + addr_len + usize::from(auth_len) * 4;
        if buf.len() <= header_len {
            return Err(SapDecodeError::TooShort {
                needed: header_len + 1,
                have: buf.len(),
            });
        }

        let origin = if ipv6 {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&buf[4..20]);
            IpAddr::V6(Ipv6Addr::from(octets))
        } else {
            IpAddr::V4(Ipv4Addr::new(buf[4], buf[5], buf[6], buf[7]))
        };

        let header = SapHeader {
            version,
            message_type: if deletion {
                MessageType::Deletion
            } else {
                MessageType::Announcement
            },
            auth_len,
            msg_id_hash,
            origin,
        };

        let body = &buf[header_len..];
        let payload = match body.iter().position(|&b| b == 0) {
            Some(nul) => {
                let content_type = String::from_utf8_lossy(&body[..nul]);
                if !content_type.is_empty() && content_type != SDP_CONTENT_TYPE {
                    return Err(SapDecodeError::UnsupportedPayloadType(
                        content_type.into_owned(),
                    ));
                }
                Bytes::copy_from_slice(&body[nul + 1..])
            }
            // No marker at all: older senders start the payload directly
            None => Bytes::copy_from_slice(body),
        };

        Ok(Self { header, payload })
    }

    /// Whether this message withdraws a previously announced session
    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.header.message_type == MessageType::Deletion
    }
}
