//! Schülernamen aus Klassenlisten in verschiedenen Dateiformaten.
//!
//! Jeder Leser liefert reinen Text; [`parse_names`] behält davon die Zeilen,
//! die wie Personennamen aussehen.

pub mod docx;
pub mod format;
pub mod names;
pub mod ocr;
pub mod pdf;
pub mod table;
pub mod text;

pub use docx::WordDocument;
pub use format::{SourceFormat, SUPPORTED_EXTENSIONS};
pub use names::{is_candidate_name, parse_names};
pub use ocr::OcrEngine;

use crate::error::{CertError, Result};
use log::{error, info, warn};
use std::path::Path;

/// Eingebaute Liste für den Fall, dass keine Namen gefunden wurden
const DEFAULT_NAMES: [&str; 20] = [
    "Jazmin Badillo Deras",
    "Maislyn Brinkley",
    "Nicolas Bustos Henao",
    "Kinzley Calvin",
    "Emma Falasca Gobbo",
    "Tynslee Fishler",
    "Sebastian Garcia",
    "Elisa Hernandez Teletor",
    "Miller Katsetos",
    "Aiden Kennedy",
    "Adan Lopez",
    "Joshua Primero Avila",
    "Milton Rivera",
    "Julian Schultz",
    "Axel Spain",
    "SaMiyah Turner",
    "Shehzeen Usman",
    "Jameson Weeks",
    "Ryder White",
    "Ryiana White",
];

pub fn default_names() -> Vec<String> {
    DEFAULT_NAMES.iter().map(|n| n.to_string()).collect()
}

/// Ersetzt eine leere Namensliste durch die Standardliste
pub fn names_or_default(names: Vec<String>) -> Vec<String> {
    if names.is_empty() {
        warn!("No names found, using default list");
        default_names()
    } else {
        names
    }
}

/// Extrahiert Schülernamen aus allen unterstützten Dateien
pub struct NameExtractor {
    ocr: OcrEngine,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self::with_ocr(OcrEngine::detect())
    }

    pub fn with_ocr(ocr: OcrEngine) -> Self {
        Self { ocr }
    }

    pub fn ocr(&self) -> &OcrEngine {
        &self.ocr
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        SUPPORTED_EXTENSIONS
    }

    /// Liefert die Namen aus der Datei; jeder Fehler ergibt eine leere Liste.
    pub fn extract_names(&self, path: &Path) -> Vec<String> {
        match self.try_extract_names(path) {
            Ok(names) => {
                if names.is_empty() {
                    warn!("No student names found in {}", path.display());
                } else {
                    info!("Found {} student names", names.len());
                }
                names
            }
            Err(e) => {
                error!("Error extracting names from {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn try_extract_names(&self, path: &Path) -> Result<Vec<String>> {
        info!("File: {}", path.display());
        let format = SourceFormat::from_path(path)?;
        info!("Processing {} file...", format);

        let raw = self.read_text(format, path)?;
        if raw.trim().is_empty() {
            return Err(CertError::NoTextContent(path.display().to_string()));
        }

        Ok(parse_names(&raw))
    }

    /// Dispatch auf den passenden Leser. Dekodierfehler der Formatleser werden
    /// hier geschluckt und als leerer Text weitergegeben.
    fn read_text(&self, format: SourceFormat, path: &Path) -> Result<String> {
        let result = match format {
            SourceFormat::Text => return text::read_text(path),
            SourceFormat::Delimited => return table::read_csv(path),
            SourceFormat::Spreadsheet => table::read_spreadsheet(path),
            SourceFormat::WordDocument => WordDocument::open(path).and_then(|d| d.text()),
            SourceFormat::Pdf => pdf::read_pdf(path),
            SourceFormat::Image => self.ocr.recognize(path),
        };

        Ok(result.unwrap_or_else(|e| {
            warn!("{} reading error: {}", format, e);
            String::new()
        }))
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}
