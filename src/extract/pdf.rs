use crate::error::{CertError, Result};
use log::debug;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Extrahiert den Text aller Seiten in Reihenfolge.
///
/// `pdf_extract` kann bei defekten Dateien in Panik geraten; das wird hier
/// abgefangen und als normaler Extraktionsfehler gemeldet.
pub fn read_pdf(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }))
    .map_err(|_| CertError::TextExtraction(format!("PDF parser panicked on {}", path.display())))?
    .map_err(|e| CertError::TextExtraction(format!("failed to extract text from PDF: {e}")))?;

    debug!("Extracted {} pages from {}", pages.len(), path.display());

    Ok(join_pages(pages))
}

/// Seiten ohne Text tragen nichts bei
fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec![
            "Adan Lopez\n".to_string(),
            "   ".to_string(),
            String::new(),
            "Axel Spain".to_string(),
        ];
        assert_eq!(join_pages(pages), "Adan Lopez\n\nAxel Spain");
    }

    #[test]
    fn test_garbage_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"definitely not a pdf").unwrap();
        assert!(read_pdf(file.path()).is_err());
    }
}
