// Prints the structured outline of a resume PDF as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use doc_publisher::core::resume::{ResumeError, ResumeOutline, ResumeOutlineService};
use doc_publisher::infra::pdf::PdfReader;
use doc_publisher::logger;

#[derive(Parser)]
#[command(name = "resume-outline")]
#[command(about = "Parse a resume PDF into sections and entries")]
struct Args {
    /// Path to the resume PDF file
    #[arg(default_value = "Resume.pdf")]
    pdf_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn outline(path: &Path) -> Result<ResumeOutline, ResumeError> {
    let pdf = std::fs::read(path).map_err(|e| ResumeError::Pdf(e.to_string()))?;
    ResumeOutlineService::new(PdfReader::new()).outline(&pdf)
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let outline = match outline(&args.pdf_path) {
        Ok(outline) => outline,
        Err(e) => {
            eprintln!("Error parsing {}: {}", args.pdf_path.display(), e);
            return ExitCode::from(1);
        }
    };

    match serde_json::to_string_pretty(&outline) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering outline: {}", e);
            ExitCode::from(1)
        }
    }
}
