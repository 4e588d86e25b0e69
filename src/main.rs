use clap::{Parser, Subcommand};
use mapskeys::cloud::CloudClient;
use mapskeys::domain::{Key, Project};
use mapskeys::service::{FetchMode, KeyService, ProjectService};
use mapskeys::{telemetry, AppError, Config, Result};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Find Maps-enabled Google Cloud projects and inspect their API keys
#[derive(Debug, Parser)]
#[command(name = "mapskeys", version, about)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List projects with a Maps API enabled
    Projects,
    /// List the API keys of a project and their restrictions
    Keys {
        /// Numeric project identifier
        project_number: String,
    },
    /// List Maps projects together with their keys
    Summary {
        /// Fetch every project's keys at once
        #[arg(long)]
        concurrent: bool,
    },
    /// Print the secret string of an API key
    KeyString {
        /// Full key resource name, e.g. projects/123/locations/global/keys/abc
        key_name: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::Config(format!("{:#}", e));
            eprintln!("{}", error_message(&err));
            return ExitCode::from(err.exit_code() as u8);
        }
    };

    telemetry::init(&config.telemetry);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly so a narrow RUST_LOG filter cannot hide it.
            eprintln!("{}", error_message(&e));
            error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let api = Arc::new(CloudClient::new(config.cloud.clone())?);

    match cli.command {
        Command::Projects => {
            let projects = ProjectService::new(api).list_projects().await?;
            output(cli.json, &projects, || render_projects(&projects))
        }
        Command::Keys { project_number } => {
            let keys = KeyService::new(api).list_keys(&project_number).await?;
            output(cli.json, &keys, || render_keys(&keys, ""))
        }
        Command::Summary { concurrent } => {
            let mode = FetchMode::from_concurrent(concurrent || config.summary_concurrent);
            info!(?mode, "Building project summary");
            let projects = ProjectService::new(api).project_summary(mode).await?;
            output(cli.json, &projects, || render_summary(&projects))
        }
        Command::KeyString { key_name } => {
            let key_string = KeyService::new(api).key_string(&key_name).await?;
            output(cli.json, &key_string, || key_string.clone())
        }
    }
}

fn error_message(e: &AppError) -> String {
    format!("error: {}", e)
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if let Some(rendered) = render_output(json, value, text)? {
        println!("{}", rendered);
    }
    Ok(())
}

/// Command output as printed to stdout; `None` when there is nothing to print.
fn render_output<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<Option<String>> {
    if json {
        let rendered = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
        return Ok(Some(rendered));
    }

    let rendered = text();
    if rendered.is_empty() {
        Ok(None)
    } else {
        Ok(Some(rendered.trim_end().to_string()))
    }
}

fn render_projects(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|p| format!("{}\t{}\n", p.number, p.name))
        .collect()
}

fn render_keys(keys: &[Key], indent: &str) -> String {
    let mut out = String::new();
    for key in keys {
        out.push_str(&format!("{}{}\n", indent, key.name));
        if key.is_unrestricted() {
            out.push_str(&format!("{}  (unrestricted)\n", indent));
        }
        for site in &key.sites {
            out.push_str(&format!("{}  {}\n", indent, site));
        }
    }
    out
}

fn render_summary(projects: &[Project]) -> String {
    let mut out = String::new();
    for project in projects {
        out.push_str(&format!("{} ({})\n", project.name, project.number));
        if project.keys.is_empty() {
            out.push_str("  (no keys)\n");
        }
        out.push_str(&render_keys(&project.keys, "  "));
    }
    out
}
