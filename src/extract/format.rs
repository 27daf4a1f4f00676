use crate::error::{CertError, Result};
use std::fmt;
use std::path::Path;

/// Alle unterstützten Endungen, in Anzeigereihenfolge
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".txt", ".csv", ".docx", ".doc", ".pdf", ".xlsx", ".xls", ".png", ".jpg", ".jpeg", ".tiff",
    ".bmp", ".gif",
];

/// Eingabeformat, bestimmt über die Dateiendung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Delimited,
    Spreadsheet,
    WordDocument,
    Pdf,
    Image,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = extension_of(path);

        match ext.as_str() {
            ".txt" => Ok(Self::Text),
            ".csv" => Ok(Self::Delimited),
            ".xlsx" | ".xls" => Ok(Self::Spreadsheet),
            ".docx" | ".doc" => Ok(Self::WordDocument),
            ".pdf" => Ok(Self::Pdf),
            ".png" | ".jpg" | ".jpeg" | ".tiff" | ".bmp" | ".gif" => Ok(Self::Image),
            "" => Err(CertError::UnsupportedFormat("(no extension)".to_string())),
            _ => Err(CertError::UnsupportedFormat(ext)),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "plain text",
            Self::Delimited => "CSV",
            Self::Spreadsheet => "spreadsheet",
            Self::WordDocument => "Word document",
            Self::Pdf => "PDF",
            Self::Image => "image",
        };
        f.write_str(label)
    }
}

/// Endung in Kleinbuchstaben mit führendem Punkt, sonst ein leerer String
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}
