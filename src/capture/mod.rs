//! Bounded capture loop: datagrams in, aggregated channels out
//!
//! One logical task pulls datagrams from a [`DatagramSource`] until the
//! window elapses or the source closes, feeding each through the
//! decode → parse → aggregate chain. Malformed datagrams and unusable
//! sessions are skipped; SAP re-announces periodically, so a missed packet
//! self-heals on the next repetition.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::{Instant, timeout};
use tracing::{debug, info, warn};

use crate::playlist::{ChannelSet, EndpointKey, IngestOutcome};
use crate::protocol::sap::{SapDecodeError, SapMessage};
use crate::protocol::sdp::SdpParser;

#[cfg(test)]
mod tests;

/// Source of raw datagrams.
///
/// The network layer owns socket creation and multicast membership; the
/// capture loop only ever reads. `None` signals the source is closed and
/// no more data will arrive.
#[async_trait]
pub trait DatagramSource {
    /// Receive the next datagram, or `None` once the source is closed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when a receive fails; the capture
    /// loop treats this as per-datagram and keeps going.
    async fn recv(&mut self) -> io::Result<Option<Bytes>>;
}

/// Result of one capture window
#[derive(Debug)]
pub struct CaptureReport {
    /// Aggregated channels, still keyed by endpoint
    pub channels: ChannelSet,
    /// Datagrams received
    pub datagrams: u64,
    /// Datagrams rejected by the SAP decoder
    pub rejected: u64,
}

/// Listen on `source` for `window`, aggregating announcements.
///
/// Returns when the window elapses or the source closes, whichever comes
/// first; records aggregated so far are always preserved.
pub async fn collect<S>(source: &mut S, window: Duration) -> CaptureReport
where
    S: DatagramSource + ?Sized,
{
    let deadline = Instant::now() + window;
    let mut channels = ChannelSet::new();
    let mut datagrams = 0u64;
    let mut rejected = 0u64;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        let datagram = match timeout(remaining, source.recv()).await {
            // Window elapsed mid-receive
            Err(_) => break,
            Ok(Ok(Some(datagram))) => datagram,
            Ok(Ok(None)) => {
                debug!("datagram source closed");
                break;
            }
            Ok(Err(e)) => {
                warn!("receive error: {e}");
                continue;
            }
        };

        datagrams += 1;
        match process(&datagram, &mut channels) {
            Ok((IngestOutcome::Added, Some(endpoint))) => {
                if let Some(record) = channels.get(&endpoint) {
                    info!(name = %record.tvg_name(), url = %record.url(), "found stream");
                }
            }
            Ok((IngestOutcome::Removed, _)) => debug!("announcement withdrawn"),
            Ok(_) => {}
            Err(e) => {
                rejected += 1;
                debug!("skipping datagram: {e}");
            }
        }
    }

    CaptureReport {
        channels,
        datagrams,
        rejected,
    }
}

/// Run one datagram through decode → parse → aggregate
fn process(
    datagram: &[u8],
    channels: &mut ChannelSet,
) -> Result<(IngestOutcome, Option<EndpointKey>), SapDecodeError> {
    let message = SapMessage::decode(datagram)?;
    let sdp = String::from_utf8_lossy(&message.payload);
    let session = SdpParser::parse(&sdp);
    let endpoint = EndpointKey::from_session(&session);
    Ok((channels.ingest(&session, message.is_deletion()), endpoint))
}
