use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::decode::InputFormat;

#[derive(Debug, Parser)]
#[command(version, about = "Normalize ERP exports into canonical analysis records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize a CSV, TSV, or JSON export into the canonical record
    Ingest(IngestArgs),
    /// Report which required metrics an export is missing
    Validate(ValidateArgs),
    /// Write the wide-format CSV starter template
    Template(TemplateArgs),
    /// Emit the sample canonical payload
    Sample(SampleArgs),
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Input file to normalize ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file for the canonical JSON record (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Input format (inferred from the file extension by default)
    #[arg(long, value_enum, default_value = "auto")]
    pub format: FormatArg,
    /// Delimiter character for delimited input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
    /// Render the record as a text table instead of JSON
    #[arg(long)]
    pub table: bool,
    /// Exit with an error when the input contains no usable data
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input file to validate ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Input format (inferred from the file extension by default)
    #[arg(long, value_enum, default_value = "auto")]
    pub format: FormatArg,
    /// Delimiter character for delimited input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Emit the validation report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Destination file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Destination file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Pretty-print the sample payload
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum FormatArg {
    Auto,
    Csv,
    Json,
}

impl FormatArg {
    pub fn as_override(self) -> Option<InputFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Csv => Some(InputFormat::Csv),
            FormatArg::Json => Some(InputFormat::Json),
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
