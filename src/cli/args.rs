use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "class-certs")]
#[command(author, version, about, long_about = None)]
#[command(about = "Generate certificates of achievement from class lists")]
pub struct Cli {
    /// Class list (txt, csv, xlsx, xls, docx, doc, pdf or image)
    pub input_file: Option<PathBuf>,

    /// Volunteer name (optional)
    #[arg(long, visible_alias = "ja-volunteer")]
    pub volunteer: Option<String>,

    /// Teacher name (optional)
    #[arg(long)]
    pub teacher: Option<String>,

    /// School name
    #[arg(long, default_value = "Andrew Jackson Elementary School")]
    pub school: String,

    /// Certificate date
    #[arg(long, default_value = "19 November 2025")]
    pub date: String,

    /// Print certificates after generation
    #[arg(long)]
    pub print: bool,

    /// Printer name (prompts for a selection if omitted)
    #[arg(long)]
    pub printer: Option<String>,

    /// List available printers and exit
    #[arg(long)]
    pub list_printers: bool,

    /// Output directory
    #[arg(short, long, default_value = "certificates")]
    pub output_dir: PathBuf,

    /// Certificate template PDF (default: bundled E004 template)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// JSON file with field positions, e.g. {"date": {"y": 120}}
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// Write the template with a coordinate grid and the field anchors to this PDF, then exit
    #[arg(long, value_name = "OUT_PDF")]
    pub coordinate_map: Option<PathBuf>,

    /// Only print the extracted names, do not generate certificates
    #[arg(long)]
    pub extract_only: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["class-certs"]);
        assert!(cli.input_file.is_none());
        assert_eq!(cli.school, "Andrew Jackson Elementary School");
        assert_eq!(cli.date, "19 November 2025");
        assert_eq!(cli.output_dir, PathBuf::from("certificates"));
        assert!(!cli.print);
        assert!(cli.coordinate_map.is_none());
    }

    #[test]
    fn test_coordinate_map() {
        let cli = Cli::parse_from([
            "class-certs",
            "--coordinate-map",
            "grid.pdf",
            "--layout",
            "positions.json",
        ]);
        assert_eq!(cli.coordinate_map, Some(PathBuf::from("grid.pdf")));
        assert_eq!(cli.layout, Some(PathBuf::from("positions.json")));
    }

    #[test]
    fn test_volunteer_alias() {
        let cli = Cli::parse_from([
            "class-certs",
            "list.docx",
            "--ja-volunteer",
            "Pat Kim",
            "--print",
        ]);
        assert_eq!(cli.input_file, Some(PathBuf::from("list.docx")));
        assert_eq!(cli.volunteer.as_deref(), Some("Pat Kim"));
        assert!(cli.print);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
