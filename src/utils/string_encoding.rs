// src/utils/string_encoding.rs

/// Decode a fixed-width, NUL-padded text field.
///
/// Bytes after the first NUL are ignored. Invalid UTF-8 is replaced rather
/// than rejected, since NEX writers store names in the local code page.
pub fn decode_fixed_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
