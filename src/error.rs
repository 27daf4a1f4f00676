use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("No text content found in {0}")]
    NoTextContent(String),

    #[error("Text extraction failed: {0}")]
    TextExtraction(String),

    #[error("Certificate template not found (tried: {0})")]
    TemplateNotFound(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("No student names provided")]
    EmptyNameList,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Print error: {0}")]
    Print(String),
}

pub type Result<T> = std::result::Result<T, CertError>;
