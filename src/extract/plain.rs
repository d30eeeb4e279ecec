// Plain-text decoding: UTF-8 first, Latin-1 when the bytes are not valid
// UTF-8. Latin-1 maps every byte to the code point of the same value, so the
// fallback never fails.

/// Decode plain-text bytes.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
