//! offex CLI - DOCX text and XLSX CSV extraction tool
//!
//! A command-line tool for pulling paragraph text out of DOCX files and
//! per-sheet CSV out of XLSX files.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use offex::render::{to_json, CsvOptions, JsonFormat, LineEnding};
use offex::FormatType;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extract text from DOCX and CSV from XLSX
#[derive(Parser)]
#[command(
    name = "offex",
    version,
    about = "Extract text from Word documents and CSV from Excel workbooks",
    long_about = "offex - Office Open XML content extraction.\n\n\
                  Writes the paragraphs of a DOCX as plain text, and each sheet of an\n\
                  XLSX as its own CSV file."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract paragraph text from a DOCX file
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path, `-` for stdout (default: input with .txt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write each sheet of an XLSX file to {base}_{sheet}.csv
    Csv {
        /// Input file path
        input: PathBuf,

        /// Base path for output files (default: input without extension)
        #[arg(short, long)]
        base: Option<PathBuf>,

        /// Field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// End records with \n instead of \r\n
        #[arg(long)]
        lf: bool,
    },

    /// Detect the format and run the matching extraction with default outputs
    Auto {
        /// Input file path
        input: PathBuf,
    },

    /// Show format and content statistics
    Info {
        /// Input file path
        input: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Text { input, output } => {
            let output = output.unwrap_or_else(|| default_text_output(&input));
            run_text(&input, &output)?;
        }

        Commands::Csv {
            input,
            base,
            delimiter,
            lf,
        } => {
            let base = base.unwrap_or_else(|| default_csv_base(&input));
            let mut options = CsvOptions::new().with_delimiter(delimiter);
            if lf {
                options = options.with_line_ending(LineEnding::Lf);
            }
            run_csv(&input, &base, &options)?;
        }

        Commands::Auto { input } => match offex::detect_format_from_path(&input)? {
            FormatType::Docx => run_text(&input, &default_text_output(&input))?,
            FormatType::Xlsx => {
                run_csv(&input, &default_csv_base(&input), &CsvOptions::default())?
            }
        },

        Commands::Info { input, json } => {
            let pb = create_spinner("Analyzing document...");
            let info = collect_info(&input)?;
            pb.finish_and_clear();

            if json {
                println!("{}", to_json(&info, JsonFormat::Pretty)?);
            } else {
                print_info(&input, &info);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn run_text(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Extracting text...");
    let text = offex::extract_text(input)?;
    pb.finish_and_clear();

    if output == Path::new("-") {
        emit_text(io::stdout().lock(), &text)?;
        return Ok(());
    }

    offex::export::write_text(output, &text)?;
    println!(
        "{} Extracted to {}",
        "✓".green().bold(),
        output.display()
    );
    Ok(())
}

/// Write extracted text exactly as the file output would hold it.
fn emit_text<W: Write>(mut out: W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

fn run_csv(
    input: &Path,
    base: &Path,
    options: &CsvOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Reading workbook...");
    let workbook = offex::parse_workbook(input)?;
    pb.set_message("Writing CSV files...");
    let written = offex::export::write_sheets(&workbook, base, options)?;
    pb.finish_and_clear();

    for path in &written {
        println!("{} Extracted to {}", "✓".green().bold(), path.display());
    }
    if written.is_empty() {
        println!("{} Workbook has no worksheets", "!".yellow().bold());
    }
    Ok(())
}

/// Summary printed by `info`.
#[derive(serde::Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
enum Info {
    Docx {
        paragraphs: usize,
        words: usize,
        characters: usize,
    },
    Xlsx {
        sheets: Vec<SheetInfo>,
    },
}

#[derive(serde::Serialize)]
struct SheetInfo {
    name: String,
    rows: usize,
    columns: usize,
}

fn collect_info(input: &Path) -> Result<Info, Box<dyn std::error::Error>> {
    let info = match offex::detect_format_from_path(input)? {
        FormatType::Docx => {
            let paragraphs = offex::docx::DocxParser::open(input)?.paragraphs()?;
            let text = offex::docx::join_paragraphs(&paragraphs);
            Info::Docx {
                paragraphs: paragraphs.len(),
                words: text.split_whitespace().count(),
                characters: text.chars().count(),
            }
        }
        FormatType::Xlsx => {
            let workbook = offex::parse_workbook(input)?;
            Info::Xlsx {
                sheets: workbook
                    .sheets
                    .iter()
                    .map(|s| SheetInfo {
                        name: s.name.clone(),
                        rows: s.row_count(),
                        columns: s.column_count(),
                    })
                    .collect(),
            }
        }
    };
    Ok(info)
}

fn print_info(input: &Path, info: &Info) {
    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );

    match info {
        Info::Docx {
            paragraphs,
            words,
            characters,
        } => {
            println!("{}: {}", "Format".bold(), FormatType::Docx);
            println!("{}: {}", "Paragraphs".bold(), paragraphs);
            println!("{}: {}", "Words".bold(), words);
            println!("{}: {}", "Characters".bold(), characters);
        }
        Info::Xlsx { sheets } => {
            println!("{}: {}", "Format".bold(), FormatType::Xlsx);
            println!("{}: {}", "Sheets".bold(), sheets.len());
            for sheet in sheets {
                println!(
                    "  {} ({} rows x {} columns)",
                    sheet.name, sheet.rows, sheet.columns
                );
            }
        }
    }
}

/// `report.docx` -> `report.txt`
fn default_text_output(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

/// `model.xlsx` -> `model`
fn default_csv_base(input: &Path) -> PathBuf {
    input.with_extension("")
}

fn print_version() {
    println!("{} {}", "offex".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Paragraph text from DOCX, per-sheet CSV from XLSX");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
