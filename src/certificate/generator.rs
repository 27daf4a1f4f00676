use crate::certificate::calibration::coordinate_overlay;
use crate::certificate::data::CertificateFields;
use crate::certificate::layout::{FieldLayout, FieldOverride};
use crate::certificate::metrics::{StandardFontMetrics, TextMeasure};
use crate::certificate::overlay::Overlay;
use crate::certificate::template::{resolve_template, TemplatePage};
use crate::error::{CertError, Result};
use crate::printer::{PrinterManager, SpoolerAvailability};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "certificates";

/// Ergebnis eines Bulk-Laufs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub succeeded: usize,
    pub failed: usize,
    /// Tatsächlich geschriebene Dateien, in Reihenfolge
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn counts(&self) -> (usize, usize) {
        (self.succeeded, self.failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

pub struct CertificateGenerator {
    fields: CertificateFields,
    layout: FieldLayout,
    template: Option<PathBuf>,
    measure: Box<dyn TextMeasure>,
}

impl CertificateGenerator {
    pub fn new(fields: CertificateFields) -> Self {
        Self {
            fields,
            layout: FieldLayout::default(),
            template: None,
            measure: Box::new(StandardFontMetrics),
        }
    }

    /// Explizite Vorlage statt der mitgelieferten
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn positioning(&self) -> FieldLayout {
        self.layout.clone()
    }

    pub fn update_positioning(&mut self, field: &str, changes: FieldOverride) -> Result<()> {
        self.layout.update(field, changes)
    }

    /// Textebene für einen Schüler in der angegebenen Seitengröße
    pub fn build_overlay(&self, student_name: &str, width: f32, height: f32) -> Overlay {
        let mut overlay = Overlay::new(width, height);
        for (field, text) in self.fields.entries(student_name) {
            overlay.draw_centered(text, self.layout.get(field), self.measure.as_ref());
        }
        overlay
    }

    /// Erzeugt ein einzelnes Zertifikat. Fehler werden geloggt, nicht weitergegeben.
    pub fn generate_single(&self, student_name: &str, output_path: &Path) -> bool {
        let result = resolve_template(self.template.as_deref())
            .and_then(|template| self.render(&template, student_name, output_path));
        self.report(student_name, result)
    }

    fn report(&self, student_name: &str, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Error generating certificate for {}: {}", student_name, e);
                false
            }
        }
    }

    fn render(&self, template: &Path, student_name: &str, output_path: &Path) -> Result<()> {
        let mut page = TemplatePage::load(template)?;
        let (width, height) = page.size();
        let overlay = self.build_overlay(student_name, width, height);
        page.merge_overlay(&overlay)?;
        page.save(output_path)
    }

    /// Schreibt die erste Vorlagenseite mit Koordinatengitter und den
    /// Ankerpunkten des aktuellen Layouts nach `output_path`.
    pub fn write_coordinate_map(&self, output_path: &Path) -> Result<()> {
        let template = resolve_template(self.template.as_deref())?;
        let mut page = TemplatePage::load(&template)?;
        let (width, height) = page.size();
        info!("Template dimensions: {} x {} points", width, height);

        let overlay = coordinate_overlay(width, height, &self.layout, self.measure.as_ref());
        page.merge_overlay(&overlay)?;
        page.save(output_path)?;

        info!("Coordinate map written to {}", output_path.display());
        Ok(())
    }

    /// Erzeugt ein Zertifikat pro Name in `output_dir` (Standard: `certificates`)
    /// und druckt die Ergebnisse auf Wunsch.
    pub fn generate_bulk(
        &self,
        student_names: &[String],
        output_dir: Option<&Path>,
        print: bool,
        printer: Option<&str>,
    ) -> Result<GenerationReport> {
        if student_names.is_empty() {
            return Err(CertError::EmptyNameList);
        }

        let template = resolve_template(self.template.as_deref())?;
        info!("Using template: {}", template.display());

        let output_dir = output_dir.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR));
        std::fs::create_dir_all(output_dir)?;

        let mut report = GenerationReport::default();
        for name in student_names {
            let output_path = output_dir.join(format!("{}_Certificate.pdf", safe_filename(name)));
            let result = self.render(&template, name, &output_path);

            if self.report(name, result) {
                info!("Generated certificate for: {}", name);
                report.succeeded += 1;
                report.written.push(output_path);
            } else {
                report.failed += 1;
            }
        }

        info!(
            "Generated {} certificates in '{}'",
            report.succeeded,
            output_dir.display()
        );
        if report.has_failures() {
            warn!("Failed to generate {} certificates", report.failed);
        }

        if print && !report.written.is_empty() {
            dispatch_print(&report.written, printer);
        }

        Ok(report)
    }
}

fn dispatch_print(files: &[PathBuf], printer: Option<&str>) {
    let manager = PrinterManager::detect();
    if manager.spooler() == SpoolerAvailability::Unavailable {
        warn!("Printing not available: no lp/lpr found");
        println!("✗ Printing not available (no print spooler found)");
        return;
    }

    if let Some(summary) = manager.print_generated(files, printer) {
        info!(
            "Printed {} of {} certificates",
            summary.succeeded,
            summary.results.len()
        );
    }
}

/// Dateiname aus dem Schülernamen: nur ASCII-Buchstaben, Ziffern, `_` und `-`
pub fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::layout::{Field, FontFamily};

    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn text_width(&self, text: &str, _font: FontFamily, size: f32) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("Adan Lopez"), "Adan_Lopez");
        assert_eq!(safe_filename("O'Brien, Jr."), "O_Brien__Jr_");
        assert_eq!(safe_filename("Mary-Jane Smith_2"), "Mary-Jane_Smith_2");
        assert_eq!(safe_filename("Zoë"), "Zo_");
    }

    #[test]
    fn test_empty_name_list() {
        let generator = CertificateGenerator::new(CertificateFields::default());
        let err = generator.generate_bulk(&[], None, false, None).unwrap_err();
        assert!(matches!(err, CertError::EmptyNameList));
    }

    #[test]
    fn test_update_positioning() {
        let mut generator = CertificateGenerator::new(CertificateFields::default());
        generator
            .update_positioning("teacher", FieldOverride::default().x(600.0))
            .unwrap();
        assert_eq!(generator.positioning().teacher.x, 600.0);
        assert!(generator
            .update_positioning("mascot", FieldOverride::default().x(1.0))
            .is_err());
    }

    #[test]
    fn test_overlay_skips_missing_optional_fields() {
        let generator = CertificateGenerator::new(
            CertificateFields::default().with_teacher(Some("Ms. Rivera".to_string())),
        )
        .with_measure(FixedWidth);

        let overlay = generator.build_overlay("Adan Lopez", 792.0, 612.0);
        let texts: Vec<&str> = overlay.placements().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Adan Lopez", "Andrew Jackson Elementary School", "19 November 2025", "Ms. Rivera"]
        );

        // Lehrkraft zentriert um x=645: 10 Zeichen * 14pt
        let teacher = &overlay.placements()[3];
        let pos = generator.positioning();
        assert_eq!(teacher.x, pos.get(Field::Teacher).x - 70.0);
    }

    #[test]
    fn test_generate_single_without_template() {
        let dir = tempfile::tempdir().unwrap();
        let generator = CertificateGenerator::new(CertificateFields::default())
            .with_template(dir.path().join("missing.pdf"));
        let out = dir.path().join("out.pdf");

        assert!(!generator.generate_single("Adan Lopez", &out));
        assert!(!out.exists());
    }
}
