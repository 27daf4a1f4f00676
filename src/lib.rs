//! # class-certs
//!
//! A library and CLI tool that reads student names from class lists
//! (text, CSV, spreadsheets, Word documents, PDFs, scanned images) and
//! fills one PDF certificate of achievement per student.

pub mod certificate;
pub mod cli;
pub mod error;
pub mod extract;
pub mod interactive;
pub mod printer;

// Re-exports
pub use certificate::{
    CertificateFields, CertificateGenerator, FieldLayout, FieldOverride, GenerationReport,
};
pub use cli::Cli;
pub use error::{CertError, Result};
pub use extract::{default_names, names_or_default, parse_names, NameExtractor, SourceFormat};
pub use printer::{PrinterManager, SpoolerAvailability};
