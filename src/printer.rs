//! Druckausgabe über die Spooler-Kommandos des Systems (CUPS `lp`, BSD `lpr`).

use crate::error::{CertError, Result};
use crate::interactive;
use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use strum::Display;

/// Ein Drucker, wie ihn der Spooler meldet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterInfo {
    pub name: String,
    pub description: String,
    pub state: String,
}

/// Welche Spooler-Schnittstelle beim Start gefunden wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SpoolerAvailability {
    /// `lpstat`/`lp` vorhanden
    #[strum(serialize = "CUPS")]
    Cups,
    /// nur `lpr`
    #[strum(serialize = "BSD lpr")]
    Bsd,
    #[strum(serialize = "unavailable")]
    Unavailable,
}

/// Ergebnis eines Druckauftrags über mehrere Dateien
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintSummary {
    pub results: Vec<(PathBuf, bool)>,
    pub succeeded: usize,
    pub failed: usize,
}

impl PrintSummary {
    fn record(&mut self, path: &Path, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push((path.to_path_buf(), ok));
    }
}

pub struct PrinterManager {
    spooler: SpoolerAvailability,
}

impl PrinterManager {
    /// Prüft einmalig, welche Spooler-Kommandos verfügbar sind
    pub fn detect() -> Self {
        let spooler = if command_exists("lpstat", &["-r"]) {
            SpoolerAvailability::Cups
        } else if command_exists("lpr", &["-V"]) {
            SpoolerAvailability::Bsd
        } else {
            SpoolerAvailability::Unavailable
        };
        debug!("Print spooler: {}", spooler);
        Self { spooler }
    }

    pub fn with_spooler(spooler: SpoolerAvailability) -> Self {
        Self { spooler }
    }

    pub fn spooler(&self) -> SpoolerAvailability {
        self.spooler
    }

    /// Alle bekannten Drucker; ohne `lpstat`-Treffer nur der Standarddrucker
    pub fn available_printers(&self) -> Vec<PrinterInfo> {
        if self.spooler == SpoolerAvailability::Unavailable {
            warn!("No print spooler found");
            return Vec::new();
        }

        if self.spooler == SpoolerAvailability::Cups {
            match run_command("lpstat", &["-p"]) {
                Ok(output) => {
                    let printers = parse_lpstat(&String::from_utf8_lossy(&output.stdout));
                    if !printers.is_empty() {
                        return printers;
                    }
                }
                Err(e) => warn!("Listing printers via lpstat failed: {}", e),
            }
        }

        self.default_printer().into_iter().collect()
    }

    fn default_printer(&self) -> Option<PrinterInfo> {
        let output = match run_command("lpoptions", &["-d"]) {
            Ok(output) => output,
            Err(e) => {
                debug!("No default printer: {}", e);
                return None;
            }
        };

        parse_default_printer(&String::from_utf8_lossy(&output.stdout)).map(|name| PrinterInfo {
            description: format!("{} (default)", name),
            name,
            state: "idle".to_string(),
        })
    }

    /// Nummerierte Liste auf stdout, mit Hinweisen wenn nichts gefunden wurde
    pub fn list_printers(&self) {
        let printers = self.available_printers();
        let stdout = io::stdout();
        if let Err(e) = write_listing(&mut stdout.lock(), &printers) {
            warn!("Could not write printer list: {}", e);
        }
    }

    /// Interaktive Auswahl; bei genau einem Drucker ohne Rückfrage
    pub fn select_printer(&self) -> Option<String> {
        let printers = self.available_printers();
        let stdin = io::stdin();
        let stdout = io::stdout();
        match interactive::prompt_selection(&mut stdin.lock(), &mut stdout.lock(), &printers) {
            Ok(choice) => choice,
            Err(e) => {
                warn!("Printer selection aborted: {}", e);
                None
            }
        }
    }

    /// Schickt eine Datei an den Drucker: erst `lp`, dann `lpr`
    pub fn print_file(&self, path: &Path, printer: &str, job_name: Option<&str>) -> bool {
        if !path.exists() {
            error!("File {} not found", path.display());
            println!("✗ File not found: {}", path.display());
            return false;
        }

        let job = job_name
            .map(str::to_string)
            .unwrap_or_else(|| default_job_name(path));

        let result = self.submit(path, printer, &job);
        match result {
            Ok(message) => {
                info!("Print job '{}' sent to {}", job, printer);
                println!("✓ {}", message);
                true
            }
            Err(e) => {
                error!("Printing {} failed: {}", path.display(), e);
                false
            }
        }
    }

    fn submit(&self, path: &Path, printer: &str, job: &str) -> Result<String> {
        let file = path.to_string_lossy();

        if self.spooler == SpoolerAvailability::Cups {
            match run_command("lp", &["-d", printer, "-t", job, &file]) {
                Ok(output) => {
                    let reply = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    return Ok(if reply.is_empty() {
                        format!("Print job sent to {}", printer)
                    } else {
                        reply
                    });
                }
                Err(e) => warn!("lp failed, trying lpr: {}", e),
            }
        }

        if self.spooler == SpoolerAvailability::Unavailable {
            return Err(CertError::Print("no print spooler available".to_string()));
        }

        run_command("lpr", &["-P", printer, &file])?;
        Ok(format!("Print job sent to {} successfully", printer))
    }

    pub fn print_files(&self, paths: &[PathBuf], printer: &str) -> PrintSummary {
        println!("\nPrinting {} certificates to {}...", paths.len(), printer);

        let mut summary = PrintSummary::default();
        for (i, path) in paths.iter().enumerate() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            println!("Printing {}/{}: {}", i + 1, paths.len(), file_name);

            let ok = self.print_file(path, printer, None);
            if !ok {
                println!("✗ Failed to print: {}", path.display());
            }
            summary.record(path, ok);
        }

        println!("\nPrint summary:");
        println!("✓ Successful: {}", summary.succeeded);
        if summary.failed > 0 {
            println!("✗ Failed: {}", summary.failed);
        }
        summary
    }

    /// Druck im Anschluss an die Erzeugung: Drucker wählen, prüfen, drucken.
    /// Gibt `None` zurück, wenn nichts gedruckt wurde.
    pub fn print_generated(
        &self,
        paths: &[PathBuf],
        printer: Option<&str>,
    ) -> Option<PrintSummary> {
        let printer = match printer {
            Some(name) => name.to_string(),
            None => {
                println!("\nPrint options:");
                match self.select_printer() {
                    Some(name) => name,
                    None => {
                        println!("Printing cancelled");
                        return None;
                    }
                }
            }
        };

        let available = self.available_printers();
        if !verify_printer(&available, &printer) {
            error!("Printer '{}' not found", printer);
            println!("✗ Printer '{}' not found!", printer);
            let stdout = io::stdout();
            if let Err(e) = write_listing(&mut stdout.lock(), &available) {
                warn!("Could not write printer list: {}", e);
            }
            return None;
        }

        Some(self.print_files(paths, &printer))
    }
}

/// Nur bekannte Drucker werden angesprochen; eine leere Liste bestätigt nichts
pub fn verify_printer(available: &[PrinterInfo], printer: &str) -> bool {
    available.iter().any(|p| p.name == printer)
}

pub fn default_job_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("Certificate - {}", stem)
}

/// Liest die `printer <name> ...`-Zeilen aus `lpstat -p`
pub fn parse_lpstat(output: &str) -> Vec<PrinterInfo> {
    output
        .lines()
        .filter(|line| line.starts_with("printer"))
        .filter_map(|line| {
            let name = line.split_whitespace().nth(1)?;
            let state = if line.contains("disabled") {
                "disabled"
            } else if line.contains("idle") {
                "idle"
            } else if line.contains("printing") {
                "printing"
            } else {
                "unknown"
            };
            Some(PrinterInfo {
                name: name.to_string(),
                description: name.to_string(),
                state: state.to_string(),
            })
        })
        .collect()
}

/// Standarddrucker aus `lpoptions -d` bzw. `lpstat -d`
pub fn parse_default_printer(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;

    if line.starts_with("no system default") {
        return None;
    }
    if let Some((_, name)) = line.split_once("destination:") {
        return Some(name.trim().to_string()).filter(|n| !n.is_empty());
    }

    line.split_whitespace()
        .next()
        .filter(|token| !token.contains('='))
        .map(str::to_string)
}

pub fn write_listing<W: Write>(out: &mut W, printers: &[PrinterInfo]) -> io::Result<()> {
    if printers.is_empty() {
        writeln!(out, "No printers found!")?;
        writeln!(out)?;
        writeln!(out, "Troubleshooting:")?;
        writeln!(out, "1. Make sure CUPS is installed: sudo apt-get install cups")?;
        writeln!(out, "2. Make sure you have printers configured")?;
        writeln!(out, "3. Check printer status: lpstat -p")?;
        return Ok(());
    }

    writeln!(out, "Available printers:")?;
    writeln!(out, "{}", "-".repeat(50))?;
    for (i, printer) in printers.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, printer.name)?;
        writeln!(out, "   Description: {}", printer.description)?;
        writeln!(out, "   Status: {}", printer.state)?;
        writeln!(out)?;
    }
    Ok(())
}

fn command_exists(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

fn run_command(program: &str, args: &[&str]) -> Result<Output> {
    debug!("Running {} {}", program, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| CertError::Print(format!("{}: {}", program, e)))?;

    if !output.status.success() {
        return Err(CertError::Print(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(output)
}
