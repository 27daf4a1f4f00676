//! Zertifikate aus einer PDF-Vorlage erzeugen: Textebene berechnen,
//! auf die erste Seite legen, pro Schüler eine Datei schreiben.

pub mod calibration;
pub mod data;
pub mod generator;
pub mod layout;
pub mod metrics;
pub mod overlay;
pub mod template;

pub use calibration::coordinate_overlay;
pub use data::{CertificateFields, DEFAULT_DATE, DEFAULT_SCHOOL_NAME};
pub use generator::{safe_filename, CertificateGenerator, GenerationReport, DEFAULT_OUTPUT_DIR};
pub use layout::{Field, FieldLayout, FieldOverride, FieldPosition, FontFamily};
pub use metrics::{StandardFontMetrics, TextMeasure};
pub use overlay::{Color, Overlay, Shape, TextPlacement};
pub use template::{resolve_template, TemplatePage, DEFAULT_TEMPLATE};
