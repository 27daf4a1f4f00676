use crate::error::{CertError, Result};
use log::debug;
use regex::{Captures, Regex};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

static TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:tbl\b.*?</w:tbl>").unwrap());
static ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<w:tr\b.*?</w:tr>").unwrap());
static CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<w:tc\b.*?</w:tc>").unwrap());
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p\b[^>]*?(?:/>|>.*?</w:p>)").unwrap());
static PARAGRAPH_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:pPr\b.*?</w:pPr>").unwrap());
static RUN_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\b[^>]*/>|<w:(?:br|cr)\b[^>]*/>").unwrap()
});
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap());

/// Repräsentiert ein Word-Dokument (.docx, Office Open XML)
pub struct WordDocument {
    path: PathBuf,
}

impl WordDocument {
    /// Öffnet ein Word-Dokument
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Document not found: {}", path.display()),
            )
            .into());
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Liest `word/document.xml` aus dem ZIP-Container
    fn document_xml(&self) -> Result<String> {
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|_| {
            CertError::TextExtraction(format!(
                "{} has no {} part",
                self.path.display(),
                DOCUMENT_PART
            ))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(xml)
    }

    /// Text in Dokumentreihenfolge: erst alle Absätze, dann alle Tabellenzellen.
    /// Leere Einträge werden ausgelassen.
    pub fn text_blocks(&self) -> Result<Vec<String>> {
        let xml = self.document_xml()?;
        Ok(blocks_from_xml(&xml))
    }

    pub fn text(&self) -> Result<String> {
        Ok(self.text_blocks()?.join("\n"))
    }
}

fn blocks_from_xml(xml: &str) -> Vec<String> {
    let tables: Vec<&str> = TABLE.find_iter(xml).map(|m| m.as_str()).collect();
    // Tabellen entfernen, damit deren Absätze nicht doppelt gezählt werden
    let body = TABLE.replace_all(xml, "");

    let mut blocks: Vec<String> = PARAGRAPH
        .find_iter(&body)
        .map(|m| paragraph_text(m.as_str()).trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    debug!(
        "Found {} paragraphs and {} tables",
        blocks.len(),
        tables.len()
    );

    for table in tables {
        for row in ROW.find_iter(table) {
            for cell in CELL.find_iter(row.as_str()) {
                let text = PARAGRAPH
                    .find_iter(cell.as_str())
                    .map(|p| paragraph_text(p.as_str()))
                    .collect::<Vec<_>>()
                    .join("\n");
                let text = text.trim();
                if !text.is_empty() {
                    blocks.push(text.to_string());
                }
            }
        }
    }

    blocks
}

/// Sammelt den sichtbaren Text eines `<w:p>`-Elements
fn paragraph_text(paragraph: &str) -> String {
    // Tabstopp-Definitionen stehen in pPr und dürfen keine Tabs erzeugen
    let paragraph = PARAGRAPH_PROPS.replace_all(paragraph, "");

    let mut text = String::new();
    for caps in RUN_CONTENT.captures_iter(&paragraph) {
        match caps.get(1) {
            Some(t) => text.push_str(&unescape_xml(t.as_str())),
            None if caps[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push('\n'),
        }
    }
    text
}

/// Wandelt XML-Entities zurück in Zeichen
fn unescape_xml(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if entity.starts_with("#x") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ => entity[1..].parse::<u32>().ok().and_then(char::from_u32),
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
