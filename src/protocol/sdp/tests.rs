use super::*;

#[test]
fn parses_announcement_sdp() {
    let sdp_text = "v=0\r\n\
                    o=- 1234567890 1 IN IP4 192.168.1.10\r\n\
                    s=ESPN HD\r\n\
                    i=Sports coverage\r\n\
                    u=http://example.com/espn\r\n\
                    c=IN IP4 239.1.1.100\r\n\
                    t=0 0\r\n\
                    m=video 5000 RTP/AVP 33\r\n\
                    a=x-plgroup:Sports\r\n";

    let sdp = SdpParser::parse(sdp_text);

    assert_eq!(sdp.session_name, "ESPN HD");
    assert_eq!(sdp.session_info.as_deref(), Some("Sports coverage"));
    assert_eq!(sdp.uri.as_deref(), Some("http://example.com/espn"));
    assert_eq!(sdp.connection_address(), Some("239.1.1.100"));
    assert_eq!(sdp.playlist_group(), Some("Sports"));

    let media = sdp.first_media().unwrap();
    assert_eq!(media.media_type, "video");
    assert_eq!(media.port, 5000);
    assert_eq!(media.protocol, "RTP/AVP");
}

#[test]
fn strips_ttl_suffix_from_connection_address() {
    let sdp = SdpParser::parse("c=IN IP4 239.1.1.100/127\n");
    assert_eq!(sdp.connection_address(), Some("239.1.1.100"));

    let sdp = SdpParser::parse("c=IN IP4 239.1.1.100/127/3\n");
    assert_eq!(sdp.connection_address(), Some("239.1.1.100"));
}

#[test]
fn malformed_connection_leaves_address_unset() {
    let sdp = SdpParser::parse("s=Test\nc=IN IP4\nm=video 5000 RTP/AVP 33\n");
    assert!(sdp.connection.is_none());
    assert_eq!(sdp.connection_address(), None);
    // The rest of the session still parses
    assert_eq!(sdp.session_name, "Test");
    assert_eq!(sdp.media.len(), 1);
}

#[test]
fn malformed_media_line_is_skipped() {
    let sdp = SdpParser::parse("m=video notaport RTP/AVP 33\nm=audio 5002 RTP/AVP 14\n");
    assert_eq!(sdp.media.len(), 1);
    assert_eq!(sdp.media[0].media_type, "audio");
    assert_eq!(sdp.media[0].port, 5002);
}

#[test]
fn media_entries_keep_encounter_order() {
    let sdp = SdpParser::parse("m=video 5000 RTP/AVP 33\nm=audio 5002 RTP/AVP 14\n");
    let kinds: Vec<&str> = sdp.media.iter().map(|m| m.media_type.as_str()).collect();
    assert_eq!(kinds, ["video", "audio"]);
}

#[test]
fn unknown_tags_and_junk_are_ignored() {
    let sdp_text = "s=Test\nz=whatever\nx-custom=1\nnot a line\n=\n\ns\n";
    let sdp = SdpParser::parse(sdp_text);
    assert_eq!(sdp.session_name, "Test");
    assert!(sdp.media.is_empty());
    assert!(sdp.attributes.is_empty());
}

#[test]
fn repeated_fields_last_write_wins() {
    let sdp_text = "s=First\ns=Second\na=x-plgroup:News\na=x-plgroup:Sports\n";
    let sdp = SdpParser::parse(sdp_text);
    assert_eq!(sdp.session_name, "Second");
    assert_eq!(sdp.playlist_group(), Some("Sports"));
}

#[test]
fn flag_attributes_have_no_value() {
    let sdp = SdpParser::parse("a=recvonly\na=rtpmap:33 MP2T/90000\n");
    assert_eq!(sdp.attributes.get("recvonly"), Some(&None));
    assert_eq!(sdp.get_attribute("rtpmap"), Some("33 MP2T/90000"));
}

#[test]
fn empty_input_yields_unusable_default() {
    let sdp = SdpParser::parse("");
    assert_eq!(sdp.session_name, "");
    assert!(!sdp.is_usable());
}

#[test]
fn non_ascii_lines_do_not_panic() {
    let sdp = SdpParser::parse("ä=value\ns=Caf\u{e9} TV\n");
    assert_eq!(sdp.session_name, "Caf\u{e9} TV");
}
