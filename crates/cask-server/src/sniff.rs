//! Content-type detection from leading bytes.
//!
//! Stored files carry no content-type metadata, so downloads sniff a type
//! from the first bytes of the payload: a short magic-number table, then a
//! UTF-8 text fallback.

/// Bytes considered when sniffing, matching common sniffing conventions.
const SNIFF_LEN: usize = 512;

const SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
];

/// Detect a content type from the leading bytes of `data`.
///
/// Falls back to `text/plain` when the sample is valid UTF-8 without
/// control bytes, and to `application/octet-stream` otherwise.
pub fn detect(data: &[u8]) -> &'static str {
    let sample = &data[..data.len().min(SNIFF_LEN)];

    for (magic, content_type) in SIGNATURES {
        if sample.starts_with(magic) {
            return content_type;
        }
    }

    if looks_like_text(sample) {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

fn looks_like_text(sample: &[u8]) -> bool {
    if sample
        .iter()
        .any(|&b| b < 0x09 || (0x0e..0x20).contains(&b) || b == 0x7f)
    {
        return false;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        // A multi-byte sequence cut off by the sample boundary is fine.
        Err(e) => e.error_len().is_none(),
    }
}
