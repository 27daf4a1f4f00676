use crate::error::{CertError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Standard-14-Grundschriften, nutzbar ohne Einbettung
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum FontFamily {
    #[strum(serialize = "Helvetica")]
    Helvetica,
    #[strum(serialize = "Helvetica-Bold")]
    HelveticaBold,
    #[strum(serialize = "Helvetica-Oblique")]
    HelveticaOblique,
    #[strum(serialize = "Times-Roman")]
    TimesRoman,
    #[strum(serialize = "Times-Bold")]
    TimesBold,
    #[strum(serialize = "Times-Italic")]
    TimesItalic,
    #[strum(serialize = "Courier")]
    Courier,
}

impl FontFamily {
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| CertError::UnknownFont(name.to_string()))
    }

    /// Name des Fonts im PDF (`/BaseFont`)
    pub fn base_font(self) -> &'static str {
        self.into()
    }
}

impl TryFrom<String> for FontFamily {
    type Error = CertError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_name(&value)
    }
}

impl From<FontFamily> for String {
    fn from(font: FontFamily) -> Self {
        font.to_string()
    }
}

/// Die Textfelder auf der Zertifikatsvorlage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    StudentName,
    SchoolName,
    Date,
    #[strum(to_string = "volunteer", serialize = "ja_volunteer")]
    Volunteer,
    Teacher,
}

impl Field {
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| CertError::UnknownField(name.to_string()))
    }
}

/// Wo und wie ein Feld gezeichnet wird. Koordinaten in PDF-Punkten, Ursprung unten links;
/// `x` ist die horizontale Mitte des Textes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPosition {
    pub x: f32,
    pub y: f32,
    pub font: FontFamily,
    pub size: f32,
}

impl FieldPosition {
    pub const fn new(x: f32, y: f32, font: FontFamily, size: f32) -> Self {
        Self { x, y, font, size }
    }

    fn apply(&mut self, changes: &FieldOverride) {
        if let Some(x) = changes.x {
            self.x = x;
        }
        if let Some(y) = changes.y {
            self.y = y;
        }
        if let Some(font) = changes.font {
            self.font = font;
        }
        if let Some(size) = changes.size {
            self.size = size;
        }
    }
}

/// Teiländerung einer [`FieldPosition`]; nicht gesetzte Werte bleiben erhalten
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOverride {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub font: Option<FontFamily>,
    pub size: Option<f32>,
}

impl FieldOverride {
    pub fn x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn font(mut self, font: FontFamily) -> Self {
        self.font = Some(font);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.font.is_none() && self.size.is_none()
    }
}

/// Positionen aller Felder. Die Standardwerte passen zur E004-Vorlage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub student_name: FieldPosition,
    pub school_name: FieldPosition,
    pub date: FieldPosition,
    #[serde(alias = "ja_volunteer")]
    pub volunteer: FieldPosition,
    pub teacher: FieldPosition,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            student_name: FieldPosition::new(500.0, 480.0, FontFamily::HelveticaBold, 18.0),
            school_name: FieldPosition::new(500.0, 253.0, FontFamily::Helvetica, 14.0),
            date: FieldPosition::new(500.0, 109.0, FontFamily::Helvetica, 12.0),
            volunteer: FieldPosition::new(380.0, 182.0, FontFamily::TimesItalic, 14.0),
            teacher: FieldPosition::new(645.0, 182.0, FontFamily::TimesItalic, 14.0),
        }
    }
}

impl FieldLayout {
    pub fn get(&self, field: Field) -> &FieldPosition {
        match field {
            Field::StudentName => &self.student_name,
            Field::SchoolName => &self.school_name,
            Field::Date => &self.date,
            Field::Volunteer => &self.volunteer,
            Field::Teacher => &self.teacher,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut FieldPosition {
        match field {
            Field::StudentName => &mut self.student_name,
            Field::SchoolName => &mut self.school_name,
            Field::Date => &mut self.date,
            Field::Volunteer => &mut self.volunteer,
            Field::Teacher => &mut self.teacher,
        }
    }

    /// Ändert die Position eines Feldes über seinen Namen
    pub fn update(&mut self, field: &str, changes: FieldOverride) -> Result<()> {
        let field = Field::from_name(field)?;
        self.update_field(field, changes);
        Ok(())
    }

    pub fn update_field(&mut self, field: Field, changes: FieldOverride) {
        debug!("Updating positioning for {}: {:?}", field, changes);
        self.get_mut(field).apply(&changes);
    }

    /// Wendet eine (ggf. unvollständige) Layout-Datei auf dieses Layout an.
    ///
    /// Erwartet ein JSON-Objekt `{ "<field>": { "x": .., "y": .., "font": .., "size": .. } }`;
    /// fehlende Felder und Attribute behalten ihren Wert.
    pub fn apply_json(&mut self, json: &str) -> Result<()> {
        let overrides: BTreeMap<String, FieldOverride> = serde_json::from_str(json)?;
        for (field, changes) in overrides {
            self.update(&field, changes)?;
        }
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut layout = Self::default();
        layout.apply_json(&content)?;
        Ok(layout)
    }
}
