use crate::certificate::overlay::{font_resource_name, Overlay};
use crate::error::{CertError, Result};
use log::{debug, info};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

/// Mitgelieferte Vorlage, relativ zum Ressourcen- bzw. Arbeitsverzeichnis
pub const DEFAULT_TEMPLATE: &str = "data/E004 Certificate of Achievement.pdf";

/// Sucht die Vorlage: expliziter Pfad, sonst die mitgelieferte Standardvorlage
/// neben der ausführbaren Datei oder im aktuellen Verzeichnis.
pub fn resolve_template(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(CertError::TemplateNotFound(path.display().to_string()));
    }

    let candidates = default_template_candidates();
    candidates
        .iter()
        .find(|c| c.exists())
        .cloned()
        .ok_or_else(|| {
            CertError::TemplateNotFound(
                candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" or "),
            )
        })
}

fn default_template_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(root) = resource_root() {
        candidates.push(root.join(DEFAULT_TEMPLATE));
    }
    candidates.push(PathBuf::from(DEFAULT_TEMPLATE));
    candidates
}

/// Verzeichnis der laufenden Binary (dort liegt `data/` im Release-Paket)
fn resource_root() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Erste Seite einer geladenen Vorlage, bereit zum Überlagern
pub struct TemplatePage {
    doc: Document,
    page_number: u32,
    page_id: ObjectId,
    width: f32,
    height: f32,
}

impl TemplatePage {
    /// Lädt die Vorlage und wählt die erste Seite (einseitige Vorlage angenommen)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CertError::TemplateNotFound(path.display().to_string()));
        }

        debug!("Loading template: {}", path.display());
        let doc = Document::load(path)?;

        let (page_number, page_id) = doc
            .get_pages()
            .into_iter()
            .next()
            .ok_or_else(|| CertError::InvalidTemplate(format!("{} has no pages", path.display())))?;

        let mut page = Self {
            doc,
            page_number,
            page_id,
            width: 0.0,
            height: 0.0,
        };
        let (width, height) = page.media_box()?;
        page.width = width;
        page.height = height;
        Ok(page)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn media_box(&self) -> Result<(f32, f32)> {
        let media_box = self
            .inherited(b"MediaBox")
            .ok_or_else(|| CertError::InvalidTemplate("page has no MediaBox".to_string()))?;

        let values: Vec<f32> = match self.resolve(&media_box) {
            Object::Array(items) => items.iter().filter_map(number).collect(),
            _ => Vec::new(),
        };

        match values.as_slice() {
            [x1, y1, x2, y2] => Ok(((x2 - x1).abs(), (y2 - y1).abs())),
            _ => Err(CertError::InvalidTemplate("malformed MediaBox".to_string())),
        }
    }

    /// Seitenattribut, ggf. vom Seitenbaum geerbt (Resources, MediaBox)
    fn inherited(&self, key: &[u8]) -> Option<Object> {
        let mut current = self.page_id;
        // Tiefe begrenzen, falls der Seitenbaum zyklisch ist
        for _ in 0..32 {
            let dict = self.doc.get_object(current).ok()?.as_dict().ok()?;
            if let Ok(value) = dict.get(key) {
                return Some(value.clone());
            }
            current = dict.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }

    fn resolve(&self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self
                .doc
                .get_object(*id)
                .cloned()
                .unwrap_or(Object::Null),
            other => other.clone(),
        }
    }

    fn resolve_dict(&self, object: &Object) -> Option<Dictionary> {
        match self.resolve(object) {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Legt die Textebene über die Seite: der bisherige Inhalt wird in q/Q
    /// gekapselt, danach folgt der Overlay-Stream.
    pub fn merge_overlay(&mut self, overlay: &Overlay) -> Result<()> {
        let resources = self.merged_resources(overlay);
        let existing = self.existing_contents()?;

        let encoded = overlay.content().encode()?;
        let overlay_id = self.doc.add_object(Stream::new(Dictionary::new(), encoded));
        let save_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let restore_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));

        let mut contents = vec![Object::Reference(save_id)];
        contents.extend(existing);
        contents.push(Object::Reference(restore_id));
        contents.push(Object::Reference(overlay_id));

        let page = self.doc.get_object_mut(self.page_id)?.as_dict_mut()?;
        page.set("Contents", Object::Array(contents));
        page.set("Resources", Object::Dictionary(resources));

        debug!(
            "Merged overlay with {} text items onto page {}",
            overlay.placements().len(),
            self.page_number
        );
        Ok(())
    }

    fn existing_contents(&self) -> Result<Vec<Object>> {
        let page = self.doc.get_object(self.page_id)?.as_dict()?;
        let contents = match page.get(b"Contents") {
            Ok(Object::Reference(id)) => match self.doc.get_object(*id)? {
                Object::Array(items) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(Object::Array(items)) => items.clone(),
            Ok(_) => {
                return Err(CertError::InvalidTemplate(
                    "unexpected page Contents entry".to_string(),
                ))
            }
            Err(_) => Vec::new(),
        };
        Ok(contents)
    }

    /// Ressourcen der Seite (inkl. geerbter) plus die Fonts der Textebene
    fn merged_resources(&self, overlay: &Overlay) -> Dictionary {
        let mut resources = self
            .inherited(b"Resources")
            .and_then(|r| self.resolve_dict(&r))
            .unwrap_or_else(Dictionary::new);

        let mut fonts = resources
            .get(b"Font")
            .ok()
            .and_then(|f| self.resolve_dict(f))
            .unwrap_or_else(Dictionary::new);

        for font in overlay.fonts() {
            fonts.set(
                font_resource_name(font),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => Object::Name(font.base_font().as_bytes().to_vec()),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }

        resources.set("Font", Object::Dictionary(fonts));
        resources
    }

    /// Schreibt nur die (überlagerte) erste Seite als neues Dokument
    pub fn save(mut self, output_path: &Path) -> Result<()> {
        let extra: Vec<u32> = self
            .doc
            .get_pages()
            .keys()
            .copied()
            .filter(|n| *n != self.page_number)
            .collect();
        if !extra.is_empty() {
            debug!("Dropping {} extra template pages", extra.len());
            self.doc.delete_pages(&extra);
        }
        self.doc.prune_objects();

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        self.doc.save(output_path)?;
        info!("Wrote {}", output_path.display());
        Ok(())
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}
