mod analyze;
mod cli;
mod config;
mod error;
mod github;
mod report;
mod server;
mod types;

use crate::error::GradeError;
use crate::github::{GithubClient, MetadataSource};
use crate::types::metadata::RepositoryMetadata;
use crate::types::report::AnalysisResult;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const ROADMAP: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn runtime() -> Result<tokio::runtime::Runtime, GradeError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn print_report(
    metadata: &RepositoryMetadata,
    analysis: &AnalysisResult,
    format: &cli::ReportFormat,
) -> Result<i32, GradeError> {
    let rendered = report::render(metadata, analysis, output_format(format))?;
    println!("{rendered}");
    if analysis.roadmap.is_empty() {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::ROADMAP)
    }
}

fn run() -> Result<i32, GradeError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(&cwd)?;

    match cli.command {
        cli::Commands::Serve(cmd) => {
            let host = cmd.host.unwrap_or_else(|| loaded.host());
            let port = cmd.port.unwrap_or_else(|| loaded.port());
            if port == 0 {
                return Err(GradeError::ConfigParse(
                    "port must be between 1 and 65535".to_string(),
                ));
            }
            let ip: IpAddr = host
                .parse()
                .map_err(|_| GradeError::ConfigParse(format!("invalid host address: {host}")))?;

            let client = GithubClient::new(loaded.github_settings(config::env_token()))?;
            let source: Arc<dyn MetadataSource> = Arc::new(client);
            runtime()?.block_on(server::serve(SocketAddr::new(ip, port), source))?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Analyze(cmd) => {
            let client = GithubClient::new(loaded.github_settings(config::env_token()))?;
            let outcome = runtime()?.block_on(server::handler::run_analysis(
                &client,
                &cmd.url,
                chrono::Utc::now(),
            ))?;
            print_report(&outcome.metadata, &outcome.analysis, &cmd.format)
        }
        cli::Commands::Score(cmd) => {
            if !cmd.file.exists() {
                return Err(GradeError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("metadata file not found: {}", cmd.file.display()),
                )));
            }
            let content = std::fs::read_to_string(&cmd.file)?;
            let metadata: RepositoryMetadata = serde_json::from_str(&content)?;
            let analysis = analyze::analyze(&metadata, chrono::Utc::now());
            print_report(&metadata, &analysis, &cmd.format)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
