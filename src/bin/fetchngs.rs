use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fetchngs_core::app::{App, CheckRequest};
use fetchngs_core::config::ConfigLoader;
use fetchngs_core::domain::IdentifierFamily;
use fetchngs_core::error::FetchError;
use fetchngs_core::fs_util;
use fetchngs_core::output::JsonOutput;

#[derive(Parser)]
#[command(name = "fetchngs")]
#[command(about = "Check sequencing data ids, ENA metadata fields and sample naming before retrieval")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Classify an id file as SRA / ENA / GEO / DDBJ or Synapse")]
    Ids(IdsArgs),
    #[command(about = "Validate a comma-separated list of ENA metadata fields")]
    Fields(FieldsArgs),
    #[command(about = "Flatten `synapse show` output files")]
    SynapseMeta(SynapseMetaArgs),
    #[command(about = "Derive sample names from file names")]
    SampleName(SampleNameArgs),
    #[command(about = "Run all intake checks and print a report")]
    Check(CheckArgs),
}

#[derive(Args)]
struct IdsArgs {
    input: Utf8PathBuf,

    #[arg(long)]
    input_type: Option<IdentifierFamily>,
}

#[derive(Args)]
struct FieldsArgs {
    fields: Option<String>,
}

#[derive(Args)]
struct SynapseMetaArgs {
    #[arg(required = true)]
    files: Vec<Utf8PathBuf>,
}

#[derive(Args)]
struct SampleNameArgs {
    #[arg(long)]
    pattern: Option<String>,

    #[arg(required = true)]
    files: Vec<Utf8PathBuf>,
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long)]
    input: Utf8PathBuf,

    #[arg(long)]
    input_type: Option<IdentifierFamily>,

    #[arg(long)]
    ena_metadata_fields: Option<String>,

    #[arg(long)]
    pattern: Option<String>,

    files: Vec<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<FetchError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &FetchError) -> u8 {
    match error {
        FetchError::MissingConfig
        | FetchError::ConfigRead(_)
        | FetchError::ConfigParse(_)
        | FetchError::Filesystem(_) => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve_or_default(cli.config.as_deref())?;
    let app = App::new(config);

    match cli.command {
        Commands::Ids(args) => {
            let batch = app.classify_id_file(&args.input, args.input_type)?;
            print(&batch)
        }
        Commands::Fields(args) => {
            let fields = app.metadata_fields(args.fields.as_deref())?;
            print(&fields)
        }
        Commands::SynapseMeta(args) => {
            let records = args
                .files
                .iter()
                .map(|file| app.synapse_metadata(file))
                .collect::<Result<Vec<_>, FetchError>>()?;
            print(&records)
        }
        Commands::SampleName(args) => {
            let names = app.sample_names(&args.files, args.pattern.as_deref())?;
            print(&names)
        }
        Commands::Check(args) => {
            let request = CheckRequest {
                ids_text: fs_util::read_text(&args.input)?,
                input_type: args.input_type,
                metadata_fields: args.ena_metadata_fields,
                sample_pattern: args.pattern,
                files: args.files,
            };
            let report = app.check(request)?;
            print(&report)
        }
    }
}

fn print<T: serde::Serialize>(value: &T) -> miette::Result<()> {
    JsonOutput::print(value).map_err(|err| miette::Report::msg(err.to_string()))
}
