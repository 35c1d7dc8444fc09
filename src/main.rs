//! JiraLink - Link GitHub activity to JIRA releases
//!
//! Main entry point for the JiraLink action.

use clap::Parser;
use jiralink::config::{validate_config_result, ActionConfig, ActionInputs};
use jiralink::github::EventPayload;
use jiralink::integrations::JiraClient;
use jiralink::run::{report_failure, run, RunSummary};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process;

/// JiraLink - Tag JIRA issues with releases and components from GitHub events
#[derive(Parser, Debug)]
#[command(name = "jiralink")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML config file; inputs and flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub event name (pull_request, push, release)
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the GitHub event payload JSON
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    #[command(flatten)]
    inputs: ActionInputs,
}

fn main() {
    // Initialize logging
    if let Err(e) = jiralink::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        for entry in report_failure(&e) {
            println!("::error::{}", escape_command_data(&entry));
        }
        println!("::error::{}", escape_command_data(&e.to_string()));
        process::exit(1);
    }
}

fn execute(cli: Cli) -> jiralink::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => ActionConfig::load(path)?,
        None => ActionConfig::new(),
    };
    cli.inputs.apply_to(&mut config)?;
    validate_config_result(&config)?;

    let event = EventPayload::load(&cli.event_name, &cli.event_path)?;
    let client = JiraClient::new(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(run(&config, &client, &event))?;

    write_outputs(&summary)
}

/// Expose the processed issue keys as the `issues` step output
fn write_outputs(summary: &RunSummary) -> jiralink::Result<()> {
    let Ok(path) = std::env::var("GITHUB_OUTPUT") else {
        return Ok(());
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "issues={}", serde_json::to_string(&summary.issues)?)?;
    Ok(())
}

/// Escape workflow command data (`%`, CR and LF)
fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
