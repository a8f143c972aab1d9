use std::io;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that escalate out of a capture run.
///
/// Per-datagram and per-session failures never reach this type; the
/// capture loop absorbs them and moves on. What remains is the setup of
/// the multicast source and the final playlist write.
#[derive(Debug, Error)]
pub enum SapListError {
    /// Multicast socket could not be created, bound, or joined
    #[error("multicast setup failed for {group}:{port}")]
    SocketSetup {
        /// Multicast group that was being joined
        group: Ipv4Addr,
        /// Port that was being bound
        port: u16,
        /// The underlying source of the error
        #[source]
        source: io::Error,
    },

    /// Playlist file could not be written
    #[error("failed to write playlist to {}", path.display())]
    PlaylistWrite {
        /// Destination path of the playlist
        path: PathBuf,
        /// The underlying source of the error
        #[source]
        source: io::Error,
    },
}
