//! M3U playlist rendering
//!
//! Pure text assembly over an already-finalized record sequence; ordering
//! and deduplication are the aggregator's responsibility.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::SapListError;

use super::ChannelRecord;

/// Playlist format marker, the first line of every playlist
pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Render the channel sequence as extended-M3U text.
///
/// Per channel: a group marker line, a metadata line with the tvg
/// attributes and visible display name, then the stream URL.
#[must_use]
pub fn render(channels: &[ChannelRecord]) -> String {
    let mut out = String::new();
    out.push_str(PLAYLIST_HEADER);
    out.push('\n');

    for channel in channels {
        let _ = writeln!(out, "#EXTGRP:{}", channel.group_title());
        let _ = writeln!(
            out,
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" group-title=\"{}\",{}",
            channel.endpoint.tvg_id(),
            channel.tvg_name(),
            channel.group_title(),
            channel.display_name(),
        );
        let _ = writeln!(out, "{}", channel.url());
    }

    out
}

/// Render and write the playlist in one shot.
///
/// # Errors
///
/// Returns [`SapListError::PlaylistWrite`] when the file cannot be written.
pub fn write_playlist(path: &Path, channels: &[ChannelRecord]) -> Result<(), SapListError> {
    fs::write(path, render(channels)).map_err(|source| SapListError::PlaylistWrite {
        path: path.to_path_buf(),
        source,
    })
}
