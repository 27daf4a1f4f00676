use crate::certificate::layout::Field;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCHOOL_NAME: &str = "Andrew Jackson Elementary School";
pub const DEFAULT_DATE: &str = "19 November 2025";

/// Daten, die auf jedem Zertifikat gleich sind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateFields {
    pub school_name: String,

    pub date: String,

    /// JA-Volunteer (optional)
    #[serde(skip_serializing_if = "Option::is_none", alias = "ja_volunteer")]
    pub volunteer: Option<String>,

    /// Lehrkraft (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

impl Default for CertificateFields {
    fn default() -> Self {
        Self::new(DEFAULT_SCHOOL_NAME.to_string(), DEFAULT_DATE.to_string())
    }
}

impl CertificateFields {
    pub fn new(school_name: String, date: String) -> Self {
        Self {
            school_name,
            date,
            volunteer: None,
            teacher: None,
        }
    }

    pub fn with_volunteer(mut self, volunteer: Option<String>) -> Self {
        self.volunteer = volunteer;
        self
    }

    pub fn with_teacher(mut self, teacher: Option<String>) -> Self {
        self.teacher = teacher;
        self
    }

    /// Alle zu zeichnenden Texte für einen Schüler.
    /// Optionale Felder ohne Wert (oder leer) werden ganz weggelassen.
    pub fn entries<'a>(&'a self, student_name: &'a str) -> Vec<(Field, &'a str)> {
        let mut entries = vec![
            (Field::StudentName, student_name),
            (Field::SchoolName, self.school_name.as_str()),
            (Field::Date, self.date.as_str()),
        ];

        if let Some(volunteer) = self.volunteer.as_deref().filter(|v| !v.is_empty()) {
            entries.push((Field::Volunteer, volunteer));
        }
        if let Some(teacher) = self.teacher.as_deref().filter(|t| !t.is_empty()) {
            entries.push((Field::Teacher, teacher));
        }

        entries
    }
}
