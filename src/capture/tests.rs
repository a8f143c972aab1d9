use std::io;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::{DatagramSource, collect};
use crate::testing::{MockSource, SapPacketBuilder, announcement, deletion};

const ESPN: &str = "v=0\ns=ESPN HD\nc=IN IP4 239.1.1.100\nm=video 5000 RTP/AVP 33\na=x-plgroup:Sports\n";
const RADIO: &str = "v=0\ns=Radio One\nc=IN IP4 239.2.2.2\nm=audio 6000 RTP/AVP 14\n";

#[tokio::test]
async fn aggregates_announcements_until_source_closes() {
    let mut source = MockSource::new([announcement(ESPN), announcement(RADIO)]);
    let report = collect(&mut source, Duration::from_secs(60)).await;

    assert_eq!(report.datagrams, 2);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.channels.len(), 2);
}

#[tokio::test]
async fn repeated_announcements_do_not_duplicate() {
    let mut source = MockSource::new([
        announcement(ESPN),
        announcement(ESPN),
        announcement(ESPN),
    ]);
    let report = collect(&mut source, Duration::from_secs(60)).await;

    assert_eq!(report.datagrams, 3);
    assert_eq!(report.channels.len(), 1);
}

#[tokio::test]
async fn deletion_removes_previously_announced_channel() {
    let mut source = MockSource::new([
        announcement(ESPN),
        announcement(RADIO),
        deletion(ESPN),
    ]);
    let report = collect(&mut source, Duration::from_secs(60)).await;

    let records = report.channels.finalize();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Radio One");
}

#[tokio::test]
async fn deletion_for_unseen_channel_is_noop() {
    let mut source = MockSource::new([deletion(ESPN)]);
    let report = collect(&mut source, Duration::from_secs(60)).await;
    assert!(report.channels.is_empty());
}

#[tokio::test]
async fn malformed_datagrams_are_skipped() {
    let bad_version = SapPacketBuilder::new().version(7).build(ESPN);
    let mut source = MockSource::new([
        vec![0x01, 0x02],
        bad_version,
        announcement(ESPN),
    ]);
    let report = collect(&mut source, Duration::from_secs(60)).await;

    assert_eq!(report.datagrams, 3);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.channels.len(), 1);
}

#[tokio::test]
async fn unusable_sessions_produce_no_channel() {
    let mut source = MockSource::new([announcement("v=0\ns=Nothing Useful\n")]);
    let report = collect(&mut source, Duration::from_secs(60)).await;

    assert_eq!(report.datagrams, 1);
    assert_eq!(report.rejected, 0);
    assert!(report.channels.is_empty());
}

/// Source that never yields: only the window deadline can end the loop
struct SilentSource;

#[async_trait]
impl DatagramSource for SilentSource {
    async fn recv(&mut self) -> io::Result<Option<Bytes>> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn window_expiry_ends_capture() {
    let mut source = SilentSource;
    let report = collect(&mut source, Duration::from_secs(15)).await;
    assert_eq!(report.datagrams, 0);
    assert!(report.channels.is_empty());
}

/// Source that fails once, then serves a queue
struct FlakySource {
    failed: bool,
    inner: MockSource,
}

#[async_trait]
impl DatagramSource for FlakySource {
    async fn recv(&mut self) -> io::Result<Option<Bytes>> {
        if !self.failed {
            self.failed = true;
            return Err(io::Error::other("transient"));
        }
        self.inner.recv().await
    }
}

#[tokio::test]
async fn receive_errors_do_not_end_capture() {
    let mut source = FlakySource {
        failed: false,
        inner: MockSource::new([announcement(ESPN)]),
    };
    let report = collect(&mut source, Duration::from_secs(60)).await;
    assert_eq!(report.channels.len(), 1);
}
