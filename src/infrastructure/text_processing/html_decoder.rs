use encoding_rs::SHIFT_JIS;

const REPLACEMENT: char = '\u{FFFD}';

/// Decodes converter output as UTF-8, falling back to Shift_JIS.
///
/// Never fails: bytes that are invalid in the fallback encoding are dropped.
pub fn decode_html_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            tracing::debug!(
                valid_up_to = e.valid_up_to(),
                "HTML artifact is not UTF-8, decoding as Shift_JIS"
            );
            let (decoded, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
            if had_errors {
                tracing::warn!("Dropped undecodable bytes from HTML artifact");
                decoded.chars().filter(|&c| c != REPLACEMENT).collect()
            } else {
                decoded.into_owned()
            }
        }
    }
}
