use crate::error::Result;
use log::debug;
use std::path::Path;

/// Liest eine Textdatei; ungültiges UTF-8 wird als Latin-1 interpretiert
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(bytes))
}

pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("Input is not valid UTF-8, decoding as Latin-1");
            // Latin-1 bildet jedes Byte 1:1 auf U+0000..U+00FF ab
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}
