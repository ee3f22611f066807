//! Decoding configuration files into text.
//!
//! Most configuration files are UTF-8, but hand-edited INI and properties
//! files still turn up in legacy code pages. Reading goes:
//! 1. BOM check (UTF-8, UTF-16 LE/BE)
//! 2. Strict UTF-8
//! 3. chardetng detection, decoded with replacement characters

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::io;
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Read a file and decode it to a `String`.
///
/// Only I/O failures are errors; undecodable bytes become U+FFFD.
pub fn read_config_text(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes, stripping any byte-order mark.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let encoding = detect_encoding(bytes);
    tracing::debug!("Decoding config content as {}", encoding.name());
    let (decoded, _had_errors) = encoding.decode_without_bom_handling(bytes);
    decoded.into_owned()
}

/// Guess the encoding of non-UTF-8 bytes from a leading sample.
fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}
