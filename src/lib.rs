pub mod cli;
pub mod data;
pub mod decode;
pub mod ingest;
pub mod mapper;
pub mod normalize;
pub mod record;
pub mod shape;
pub mod table;
pub mod template;
pub mod validate;
pub mod vocab;

use std::{env, fs::File, io::Write, path::Path, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};

use crate::{
    cli::{Cli, Commands, FormatArg},
    decode::InputFormat,
    record::CanonicalRecord,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("erp_ingest", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest(args) => handle_ingest(&args),
        Commands::Validate(args) => handle_validate(&args),
        Commands::Template(args) => handle_template(&args),
        Commands::Sample(args) => handle_sample(&args),
    }
}

fn handle_ingest(args: &cli::IngestArgs) -> Result<()> {
    let record = load_record(
        &args.input,
        args.format,
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let report = validate::validate(record.as_ref());

    match &record {
        Some(record) => {
            info!("{}", report.summary());
            if args.table {
                table::print_record(record);
            } else {
                let rendered = if args.pretty {
                    serde_json::to_string_pretty(record)
                } else {
                    serde_json::to_string(record)
                }
                .context("Serializing canonical record")?;
                write_output(args.output.as_deref(), &rendered)?;
                if let Some(path) = &args.output {
                    info!("Canonical record written to {path:?}");
                }
            }
        }
        None => warn!("{}", report.summary()),
    }

    if args.strict && !report.valid {
        bail!("No usable data found in {:?}", args.input);
    }
    Ok(())
}

fn handle_validate(args: &cli::ValidateArgs) -> Result<()> {
    let record = load_record(
        &args.input,
        args.format,
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let report = validate::validate(record.as_ref());

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Serializing validation report")?;
        println!("{rendered}");
    } else {
        println!("{}", report.summary());
        for field in &report.recommended_missing {
            println!("  - {field}");
        }
    }

    if !report.valid {
        bail!("No usable data found in {:?}", args.input);
    }
    Ok(())
}

fn handle_template(args: &cli::TemplateArgs) -> Result<()> {
    write_output(args.output.as_deref(), template::template_csv().trim_end())?;
    if let Some(path) = &args.output {
        info!("Template written to {path:?}");
    }
    Ok(())
}

fn handle_sample(args: &cli::SampleArgs) -> Result<()> {
    let payload = template::sample_payload();
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }
    .context("Serializing sample payload")?;
    write_output(args.output.as_deref(), &rendered)?;
    if let Some(path) = &args.output {
        info!("Sample payload written to {path:?}");
    }
    Ok(())
}

fn load_record(
    input: &Path,
    format: FormatArg,
    delimiter: Option<u8>,
    encoding_label: Option<&str>,
) -> Result<Option<CanonicalRecord>> {
    let format = decode::resolve_format(input, format.as_override())?;
    match format {
        InputFormat::Csv => {
            let delimiter = decode::resolve_delimiter(input, delimiter);
            let encoding = decode::resolve_encoding(encoding_label)?;
            let rows = decode::read_rows(input, delimiter, encoding)?;
            info!("Decoded {} row(s) from {:?}", rows.len(), input);
            Ok(ingest::build_from_rows(&rows))
        }
        InputFormat::Json => {
            let payload = decode::read_json(input)?;
            Ok(ingest::build_from_json(&payload))
        }
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) if !decode::is_dash(path) => {
            let mut file =
                File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
            writeln!(file, "{contents}")
                .with_context(|| format!("Writing output to {path:?}"))?;
        }
        _ => println!("{contents}"),
    }
    Ok(())
}
