use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decodes judge output. Judge0 wraps its base64 at 60 columns, so ASCII
/// whitespace is dropped first. Program output is not guaranteed to be UTF-8.
pub fn decode_text(encoded: &str) -> Result<String, base64::DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
