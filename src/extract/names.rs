use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Schlüsselwörter, die auf Überschriften oder Beschriftungen hindeuten
const HEADER_KEYWORDS: &[&str] = &[
    "student",
    "name",
    "class",
    "grade",
    "school",
    "teacher",
    "kindergarten",
    "classroom",
    "list",
    "2025",
    "2026",
];

static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Vorname Nachname [Weitere]
        r"^[A-Z][a-z]+ [A-Z][a-z]+(?:\s+[A-Z][a-z]+)*$",
        // Bindestrich / Apostroph
        r"^[A-Z][a-z\-']+\s+[A-Z][a-z\-']+(?:\s+[A-Z][a-z\-']+)*$",
        // Akzente
        r"^[A-Z][a-zÀ-ÿ\-']+\s+[A-Z][a-zÀ-ÿ\-']+(?:\s+[A-Z][a-zÀ-ÿ\-']+)*$",
        // Gemischte Schreibweise (z.B. SaMiyah)
        r"^[A-Z][a-zA-Z\-']+\s+[A-Z][a-zA-Z\-']+(?:\s+[A-Z][a-zA-Z\-']+)*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LEADING_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+").unwrap());
static YEAR_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Zerlegt Rohtext in Zeilen und behält nur die, die wie Personennamen aussehen.
///
/// Duplikate werden ohne Beachtung der Groß-/Kleinschreibung entfernt; die
/// Schreibweise und Position des ersten Vorkommens bleibt erhalten.
pub fn parse_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();

    for line in text.split('\n') {
        let line = line.trim();

        if !is_candidate_name(line) {
            continue;
        }

        if seen.insert(line.to_lowercase()) {
            names.push(line.to_string());
        } else {
            debug!("Skipping duplicate name: {}", line);
        }
    }

    names
}

/// Prüft eine einzelne (bereits getrimmte) Zeile
pub fn is_candidate_name(line: &str) -> bool {
    if line.chars().count() < 3 {
        return false;
    }

    let lower = line.to_lowercase();
    if HEADER_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return false;
    }

    if LEADING_DIGIT.is_match(line) || YEAR_LIKE.is_match(line) {
        return false;
    }

    if !NAME_PATTERNS.iter().any(|re| re.is_match(line)) {
        return false;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    parts.len() >= 2 && parts.iter().all(|p| p.chars().count() >= 2)
}
