//! Tests for `data:` URL handling, local fetches, and media type sniffing.

use strata_common::net::{DataUrl, NetError, fetch_bytes, sniff_media_type};

#[test]
fn test_data_url_parse_base64() {
    let url = DataUrl::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
    assert_eq!(url.media_type, "image/png");
    assert!(url.base64);
    assert_eq!(url.payload, "iVBORw0KGgo=");
}

#[test]
fn test_data_url_default_media_type() {
    let url = DataUrl::parse("data:,hello").unwrap();
    assert_eq!(url.media_type, "text/plain;charset=US-ASCII");
    assert!(!url.base64);
    assert_eq!(url.decode().unwrap(), b"hello");
}

#[test]
fn test_data_url_percent_decoding() {
    let url = DataUrl::parse("data:text/plain,a%20b%2Cc").unwrap();
    assert_eq!(url.decode().unwrap(), b"a b,c");
}

#[test]
fn test_data_url_bad_percent_escape() {
    let url = DataUrl::parse("data:text/plain,oops%2").unwrap();
    assert!(matches!(url.decode(), Err(NetError::InvalidDataUrl(_))));
}

#[test]
fn test_data_url_percent_escape_needs_two_hex_digits() {
    for payload in ["%+1", "%-1", "% 1", "%1g"] {
        let url = DataUrl::parse(&format!("data:text/plain,{payload}")).unwrap();
        assert!(
            matches!(url.decode(), Err(NetError::InvalidDataUrl(_))),
            "{payload} decoded"
        );
    }
    let url = DataUrl::parse("data:text/plain,%aF").unwrap();
    assert_eq!(url.decode().unwrap(), vec![0xAF]);
}

#[test]
fn test_data_url_missing_comma() {
    assert!(matches!(
        DataUrl::parse("data:image/png;base64"),
        Err(NetError::InvalidDataUrl(_))
    ));
}

#[test]
fn test_data_url_wrong_scheme() {
    assert!(matches!(
        DataUrl::parse("http://example.com/a.png"),
        Err(NetError::InvalidDataUrl(_))
    ));
}

#[test]
fn test_data_url_encode_then_fetch() {
    let bytes = [0x89, b'P', b'N', b'G', 0, 1, 2, 255];
    let encoded = DataUrl::encode("image/png", &bytes);
    assert!(encoded.starts_with("data:image/png;base64,"));
    assert_eq!(fetch_bytes(&encoded).unwrap(), bytes);
}

#[test]
fn test_data_url_base64_tolerates_whitespace() {
    let url = DataUrl::parse("data:text/plain;base64,aGVs\n bG8=").unwrap();
    assert_eq!(url.decode().unwrap(), b"hello");
}

#[test]
fn test_data_url_invalid_base64() {
    let url = DataUrl::parse("data:text/plain;base64,!!!").unwrap();
    assert!(matches!(url.decode(), Err(NetError::Base64(_))));
}

#[test]
fn test_fetch_local_file() {
    let path = std::env::temp_dir().join(format!("strata-net-test-{}.bin", std::process::id()));
    std::fs::write(&path, b"local bytes").unwrap();

    let plain = fetch_bytes(path.to_str().unwrap()).unwrap();
    let with_scheme = fetch_bytes(&format!("file://{}", path.display())).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(plain, b"local bytes");
    assert_eq!(with_scheme, b"local bytes");
}

#[test]
fn test_fetch_missing_file() {
    let result = fetch_bytes("/definitely/not/here/strata.png");
    assert!(matches!(result, Err(NetError::Io { .. })));
}

#[test]
fn test_sniff_magic_bytes() {
    assert_eq!(sniff_media_type(b"\x89PNG\r\n\x1a\nrest", "x"), "image/png");
    assert_eq!(sniff_media_type(&[0xFF, 0xD8, 0xFF, 0xE0], "x"), "image/jpeg");
    assert_eq!(sniff_media_type(b"GIF89a....", "x"), "image/gif");
    assert_eq!(sniff_media_type(b"RIFF\0\0\0\0WEBPVP8 ", "x"), "image/webp");
    assert_eq!(sniff_media_type(b"  \n<svg xmlns=''/>", "x"), "image/svg+xml");
    assert_eq!(
        sniff_media_type(b"<?xml version='1.0'?><svg/>", "x"),
        "image/svg+xml"
    );
}

#[test]
fn test_sniff_falls_back_to_extension() {
    assert_eq!(sniff_media_type(b"????", "photo.JPG?w=100"), "image/jpeg");
    assert_eq!(sniff_media_type(b"????", "icons.svg#globe"), "image/svg+xml");
    assert_eq!(sniff_media_type(b"????", "blob"), "application/octet-stream");
}
