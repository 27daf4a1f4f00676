use crate::printer::PrinterInfo;
use std::io::{self, BufRead, Write};

/// Liest eine Zeile; `None` bei Eingabeende
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Interaktive Druckerauswahl.
///
/// Ohne Drucker `None`, bei genau einem Drucker wird dieser ohne Rückfrage
/// gewählt. Sonst wird nach der Nummer gefragt, bis eine gültige Eingabe
/// kommt; `q` oder Eingabeende bricht ab.
pub fn prompt_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    printers: &[PrinterInfo],
) -> io::Result<Option<String>> {
    match printers {
        [] => {
            writeln!(output, "No printers available!")?;
            return Ok(None);
        }
        [only] => {
            writeln!(output, "Using only available printer: {}", only.name)?;
            return Ok(Some(only.name.clone()));
        }
        _ => {}
    }

    writeln!(output, "\nAvailable printers:")?;
    for (i, printer) in printers.iter().enumerate() {
        writeln!(
            output,
            "{}. {} - {} ({})",
            i + 1,
            printer.name,
            printer.description,
            printer.state
        )?;
    }

    let prompt = format!("\nSelect printer (1-{}) or 'q' to quit: ", printers.len());
    loop {
        let choice = match read_line(input, output, &prompt)? {
            Some(choice) => choice,
            None => {
                writeln!(output, "\nCancelled by user")?;
                return Ok(None);
            }
        };

        if choice.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match choice.parse::<usize>() {
            Ok(n) if (1..=printers.len()).contains(&n) => {
                let selected = &printers[n - 1];
                writeln!(output, "Selected printer: {}", selected.name)?;
                return Ok(Some(selected.name.clone()));
            }
            Ok(_) => writeln!(output, "Please enter a number between 1 and {}", printers.len())?,
            Err(_) => writeln!(output, "Please enter a valid number or 'q' to quit")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn printers(names: &[&str]) -> Vec<PrinterInfo> {
        names
            .iter()
            .map(|n| PrinterInfo {
                name: n.to_string(),
                description: n.to_string(),
                state: "idle".to_string(),
            })
            .collect()
    }

    fn select(input: &str, names: &[&str]) -> (Option<String>, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let choice = prompt_selection(&mut input, &mut output, &printers(names)).unwrap();
        (choice, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_no_printers() {
        let (choice, out) = select("1\n", &[]);
        assert_eq!(choice, None);
        assert!(out.contains("No printers available"));
    }

    #[test]
    fn test_single_printer_auto_selected() {
        let (choice, _) = select("", &["Office"]);
        assert_eq!(choice.as_deref(), Some("Office"));
    }

    #[test]
    fn test_select_by_number_after_bad_input() {
        let (choice, out) = select("abc\n7\n2\n", &["Office", "Library"]);
        assert_eq!(choice.as_deref(), Some("Library"));
        assert!(out.contains("valid number"));
        assert!(out.contains("between 1 and 2"));
    }

    #[test]
    fn test_quit_and_eof_cancel() {
        assert_eq!(select("Q\n", &["Office", "Library"]).0, None);
        assert_eq!(select("", &["Office", "Library"]).0, None);
    }
}
