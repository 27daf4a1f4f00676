use class_certs::{
    names_or_default, CertError, CertificateFields, CertificateGenerator, Cli, FieldLayout,
    NameExtractor, PrinterManager, Result,
};
use clap::Parser;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Klassenlisten, nach denen ohne Eingabedatei in `data/` gesucht wird
const WELL_KNOWN_ROSTERS: [&str; 5] = [
    "25-26 Class list.docx",
    "class_list.docx",
    "student_list.txt",
    "students.csv",
    "class_list.xlsx",
];

fn main() {
    if let Err(e) = run() {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging initialisieren
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if cli.list_printers {
        PrinterManager::detect().list_printers();
        return Ok(());
    }

    if let Some(output) = &cli.coordinate_map {
        let mut generator = CertificateGenerator::new(CertificateFields::default());
        if let Some(template) = &cli.template {
            generator = generator.with_template(template.clone());
        }
        if let Some(layout) = &cli.layout {
            generator = generator.with_layout(FieldLayout::from_json_file(layout)?);
        }
        generator.write_coordinate_map(output)?;
        println!("✓ Coordinate map created: {}", output.display());
        return Ok(());
    }

    let input = match &cli.input_file {
        Some(path) => {
            if !path.exists() {
                return Err(CertError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File '{}' not found", path.display()),
                )));
            }
            Some(path.clone())
        }
        None => find_roster(),
    };

    let names = match &input {
        Some(path) => {
            println!("Reading student names from: {}", path.display());
            NameExtractor::new().extract_names(path)
        }
        None => Vec::new(),
    };

    if cli.extract_only {
        for name in &names {
            println!("{}", name);
        }
        println!("✓ Found {} names", names.len());
        return Ok(());
    }

    if names.is_empty() {
        println!("Using default student list");
    }
    let names = names_or_default(names);
    println!("Will generate certificates for {} students", names.len());

    let fields = CertificateFields::new(cli.school.clone(), cli.date.clone())
        .with_volunteer(cli.volunteer.clone())
        .with_teacher(cli.teacher.clone());

    let mut generator = CertificateGenerator::new(fields);
    if let Some(template) = &cli.template {
        generator = generator.with_template(template.clone());
    }
    if let Some(layout) = &cli.layout {
        info!("Loading field positions from {}", layout.display());
        generator = generator.with_layout(FieldLayout::from_json_file(layout)?);
    }

    let report = generator.generate_bulk(
        &names,
        Some(&cli.output_dir),
        cli.print,
        cli.printer.as_deref(),
    )?;

    println!(
        "✓ Generated {} certificates in '{}'",
        report.succeeded,
        cli.output_dir.display()
    );
    if report.has_failures() {
        println!("✗ Failed to generate {} certificates", report.failed);
        std::process::exit(1);
    }

    Ok(())
}

/// Erste vorhandene Klassenliste in `data/` (neben der Binary, dann im Arbeitsverzeichnis)
fn find_roster() -> Option<PathBuf> {
    let mut data_dirs = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        data_dirs.push(dir.join("data"));
    }
    data_dirs.push(PathBuf::from("data"));

    let found = data_dirs
        .iter()
        .flat_map(|dir| WELL_KNOWN_ROSTERS.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists());

    if found.is_none() {
        warn!("No class list found in data/");
    }
    found
}
