use crate::error::{CertError, Result};
use image::ColorType;
use log::{debug, warn};
use std::path::Path;
use std::process::Command;

/// OCR-Fähigkeit, einmalig beim Anlegen des Extractors ermittelt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrEngine {
    /// `tesseract` im PATH gefunden (bzw. unter dem angegebenen Kommando)
    Tesseract { command: String },
    Unavailable,
}

impl OcrEngine {
    pub fn detect() -> Self {
        Self::detect_with("tesseract")
    }

    pub fn detect_with(command: &str) -> Self {
        match Command::new(command).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                debug!(
                    "OCR engine: {}",
                    version.lines().next().unwrap_or(command).trim()
                );
                Self::Tesseract {
                    command: command.to_string(),
                }
            }
            _ => {
                debug!("{} not found - install tesseract-ocr for OCR support", command);
                Self::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Tesseract { .. })
    }

    /// Erkennt Text in einer Rasterdatei. Ohne OCR-Engine ist das Ergebnis leer.
    pub fn recognize(&self, path: &Path) -> Result<String> {
        let command = match self {
            Self::Tesseract { command } => command,
            Self::Unavailable => {
                warn!("Tesseract OCR not found. Install the tesseract-ocr system package.");
                return Ok(String::new());
            }
        };

        let image = image::open(path)?;
        if image.color() != ColorType::Rgb8 {
            debug!("Converting {:?} image to RGB", image.color());
        }
        let rgb = image.to_rgb8();

        // tesseract bekommt immer ein sauberes RGB-PNG
        let dir = tempfile::tempdir()?;
        let normalized = dir.path().join("page.png");
        rgb.save(&normalized)?;

        let output = Command::new(command)
            .arg(&normalized)
            .arg("stdout")
            .output()
            .map_err(|e| CertError::Ocr(format!("Failed to run {}: {}", command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CertError::Ocr(format!("{} failed: {}", command, stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
