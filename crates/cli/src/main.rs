//! `receiptli` CLI entry-point.
//!
//! Available sub-commands:
//! - `describe` — print the node (or credential) descriptor as JSON.
//! - `extract`  — send files to the extraction service and print the results.

mod input;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::{CredentialStore, ItemContext, NodeRunner};
use nodes::receiptli::description::{
    BINARY_PROPERTY_NAME, DEFAULT_BASE_URL, DEFAULT_BINARY_PROPERTY, LANGUAGE, SCHEMA,
};
use nodes::receiptli::{receiptli_credentials, receiptli_description, CREDENTIAL_NAME, NODE_NAME};

#[derive(Parser)]
#[command(
    name = "receiptli",
    about = "Extract structured data from documents with the Receiptli service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the node descriptor as JSON.
    Describe {
        /// Print the credential descriptor instead.
        #[arg(long)]
        credentials: bool,
    },
    /// Extract structured data from one or more files (one item per file).
    Extract(ExtractArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Documents to extract, processed in the given order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON description of the desired output, sent verbatim.
    #[arg(long, required_unless_present = "schema_file", conflicts_with = "schema_file")]
    schema: Option<String>,

    /// Read the schema from a file instead.
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// Document language.
    #[arg(long, default_value = "eng", value_parser = ["eng", "ar"])]
    language: String,

    /// Binary property the file is attached under.
    #[arg(long, default_value = DEFAULT_BINARY_PROPERTY)]
    binary_property: String,

    #[arg(long, env = "RECEIPTLI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "RECEIPTLI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Describe { credentials } => describe(credentials),
        Command::Extract(args) => extract(args).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn describe(credentials: bool) -> Result<()> {
    let value = if credentials {
        serde_json::to_string_pretty(&receiptli_credentials())?
    } else {
        serde_json::to_string_pretty(&receiptli_description())?
    };
    println!("{value}");
    Ok(())
}

async fn extract(args: ExtractArgs) -> Result<()> {
    let schema = match (args.schema, &args.schema_file) {
        (Some(schema), _) => schema,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read schema file {}", path.display()))?,
        (None, None) => anyhow::bail!("either --schema or --schema-file is required"),
    };

    let items = args
        .files
        .iter()
        .map(|path| input::load_item(path, &args.binary_property))
        .collect::<Result<Vec<_>>>()?;

    let mut store = CredentialStore::new();
    store.insert(
        CREDENTIAL_NAME,
        [("apiKey", args.api_key), ("baseUrl", args.base_url)],
    );

    let ctx = ItemContext::new(items, Arc::new(store))
        .with_parameter(BINARY_PROPERTY_NAME, json!(args.binary_property))
        .with_parameter(SCHEMA, json!(schema))
        .with_parameter(LANGUAGE, json!(args.language));

    info!("Extracting {} file(s)", ctx.len());
    let result = NodeRunner::default()
        .run(NODE_NAME, &ctx)
        .await
        .context("extraction failed")?;

    println!("{}", serde_json::to_string_pretty(&result.output)?);
    Ok(())
}
