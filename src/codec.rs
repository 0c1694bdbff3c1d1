//! Shared blob codec
//!
//! LZ-String in its base64 flavour, so the blob is plain ASCII that fits
//! both a text file and a LocalStorage value.

/// Compress JSON text into the transport-safe blob form
pub fn compress(text: &str) -> String {
    lz_str::compress_to_base64(text)
}

/// Decompress a blob back to text.
///
/// `None` (no file, no key), invalid base64 and output that is not valid
/// UTF-16 all mean "no data".
pub fn decompress(blob: Option<&str>) -> Option<String> {
    let blob = blob?;
    if blob.is_empty() {
        return None;
    }
    let wide = lz_str::decompress_from_base64(blob)?;
    match String::from_utf16(&wide) {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("Shared blob decompressed to invalid text: {}", e);
            None
        }
    }
}
