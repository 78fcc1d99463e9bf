use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repograde",
    version,
    about = "Score public GitHub repositories and suggest an improvement roadmap"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web page and the analysis endpoint
    Serve(ServeCommand),
    /// Fetch and score a repository by URL
    Analyze(AnalyzeCommand),
    /// Score repository metadata stored in a JSON file
    Score(ScoreCommand),
}

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind (overrides repograde.toml)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind (overrides repograde.toml)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Repository URL, e.g. https://github.com/owner/name
    pub url: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub file: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
