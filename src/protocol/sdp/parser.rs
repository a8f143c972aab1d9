use super::{MediaDescription, SdpConnection, SessionDescription};

/// Tolerant SDP parser.
///
/// Never fails: a line that is not `<tag>=<value>`, carries an unknown
/// tag, or has a malformed body is skipped. Worst case the result is a
/// default session, which the aggregator then discards as unusable.
pub struct SdpParser;

impl SdpParser {
    /// Parse SDP text into a session description
    #[must_use]
    pub fn parse(input: &str) -> SessionDescription {
        let mut sdp = SessionDescription::default();

        for line in input.lines() {
            let line = line.trim();
            // Byte-level check keeps multi-byte first characters from
            // slipping past as a `<tag>=` form.
            if line.len() < 2 || line.as_bytes()[1] != b'=' {
                continue;
            }
            let value = &line[2..];

            match line.as_bytes()[0] {
                b's' => sdp.session_name = value.to_string(),
                b'i' => sdp.session_info = Some(value.to_string()),
                b'u' => sdp.uri = Some(value.to_string()),
                b'c' => {
                    if let Some(connection) = Self::parse_connection(value) {
                        sdp.connection = Some(connection);
                    }
                }
                b'm' => {
                    if let Some(media) = Self::parse_media(value) {
                        sdp.media.push(media);
                    }
                }
                b'a' => {
                    let (name, value) = Self::parse_attribute(value);
                    sdp.attributes.insert(name, value);
                }
                _ => {
                    // Unrecognized tag: skip, by contract
                }
            }
        }

        sdp
    }

    // `<nettype> <addrtype> <address>`
    fn parse_connection(value: &str) -> Option<SdpConnection> {
        let mut parts = value.split_whitespace();
        Some(SdpConnection {
            net_type: parts.next()?.to_string(),
            addr_type: parts.next()?.to_string(),
            address: parts.next()?.to_string(),
        })
    }

    // `<media> <port> <proto> ...`
    fn parse_media(value: &str) -> Option<MediaDescription> {
        let mut parts = value.split_whitespace();
        let media_type = parts.next()?.to_string();
        let port = parts.next()?.parse().ok()?;
        let protocol = parts.next()?.to_string();
        Some(MediaDescription {
            media_type,
            port,
            protocol,
        })
    }

    fn parse_attribute(value: &str) -> (String, Option<String>) {
        match value.find(':') {
            Some(colon) => (
                value[..colon].to_string(),
                Some(value[colon + 1..].to_string()),
            ),
            None => (value.to_string(), None),
        }
    }
}
