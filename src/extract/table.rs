use crate::error::Result;
use crate::extract::text::read_text;
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info, warn};
use std::path::Path;

/// Spaltenüberschriften mit diesen Teilwörtern enthalten vermutlich Namen
const NAME_COLUMN_KEYWORDS: &[&str] = &["name", "student", "first", "last"];

/// Liest eine CSV-Datei. Bei Parserfehlern wird auf reines Textlesen zurückgegriffen.
pub fn read_csv(path: &Path) -> Result<String> {
    match parse_csv(path) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("CSV parsing error: {}, falling back to text reading", e);
            read_text(path)
        }
    }
}

fn parse_csv(path: &Path) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let lines = match name_columns(&headers) {
        Some(columns) => column_values(&rows, &columns),
        None => {
            // Keine Namensspalten: gesamte Tabelle zeilenweise ausgeben, Kopfzeile inklusive
            std::iter::once(&headers)
                .chain(rows.iter())
                .map(|row| join_row(row))
                .filter(|line| !line.is_empty())
                .collect()
        }
    };

    Ok(lines.join("\n"))
}

/// Liest alle Blätter einer Excel-Arbeitsmappe (.xlsx/.xls)
pub fn read_spreadsheet(path: &Path) -> Result<String> {
    let mut workbook = open_workbook_auto(path)?;
    let mut lines = Vec::new();

    for sheet in workbook.sheet_names() {
        info!("Reading sheet: {}", sheet);
        let range = workbook.worksheet_range(&sheet)?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let headers = rows.next().unwrap_or_default();
        let body: Vec<Vec<String>> = rows.collect();

        match name_columns(&headers) {
            Some(columns) => lines.extend(column_values(&body, &columns)),
            None => {
                // Alle Zellen spaltenweise, jeweils mit der Überschrift zuerst
                let with_header: Vec<Vec<String>> =
                    std::iter::once(headers).chain(body).collect();
                let width = with_header.iter().map(Vec::len).max().unwrap_or(0);
                let all: Vec<usize> = (0..width).collect();
                lines.extend(column_values(&with_header, &all));
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Indizes der Spalten, deren Überschrift auf Namen hindeutet
fn name_columns(headers: &[String]) -> Option<Vec<usize>> {
    let columns: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let lower = h.to_lowercase();
            NAME_COLUMN_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(|(i, _)| i)
        .collect();

    if columns.is_empty() {
        None
    } else {
        debug!(
            "Name columns: {:?}",
            columns.iter().map(|&i| headers[i].as_str()).collect::<Vec<_>>()
        );
        Some(columns)
    }
}

/// Nicht-leere Zellwerte, Spalte für Spalte
fn column_values(rows: &[Vec<String>], columns: &[usize]) -> Vec<String> {
    let mut values = Vec::new();
    for &col in columns {
        for row in rows {
            if let Some(cell) = row.get(col) {
                if !cell.trim().is_empty() {
                    values.push(cell.clone());
                }
            }
        }
    }
    values
}

fn join_row(row: &[String]) -> String {
    row.iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_name_columns_detection() {
        let headers = vec![
            "ID".to_string(),
            "Student Name".to_string(),
            "Grade".to_string(),
            "LAST".to_string(),
        ];
        assert_eq!(name_columns(&headers), Some(vec![1, 3]));

        let headers = vec!["ID".to_string(), "Grade".to_string()];
        assert_eq!(name_columns(&headers), None);
    }

    #[test]
    fn test_csv_keyword_columns_only() {
        let file = write_csv("id,Student Name,room\n1,Adan Lopez,4B\n2,,4B\n3,Milton Rivera,4C\n");
        let text = read_csv(file.path()).unwrap();
        assert_eq!(text, "Adan Lopez\nMilton Rivera");
    }

    #[test]
    fn test_csv_column_major_order() {
        let file = write_csv("First,Last\nAdan,Lopez\nAxel,Spain\n");
        let text = read_csv(file.path()).unwrap();
        assert_eq!(text, "Adan\nAxel\nLopez\nSpain");
    }

    #[test]
    fn test_csv_without_keywords_flattens_everything() {
        let file = write_csv("Jane Doe\nName List\n2025\n123 Main St\n");
        let text = read_csv(file.path()).unwrap();
        assert_eq!(text, "Jane Doe\nName List\n2025\n123 Main St");
    }

    #[test]
    fn test_column_values_skips_short_rows() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        assert_eq!(column_values(&rows, &[1]), vec!["b".to_string()]);
    }
}
