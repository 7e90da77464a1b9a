use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "felkla",
    version,
    about = "Phase-gated project assessment with weighted scoring and PDF reports"
)]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score an answers file and export the phase report
    Assess(AssessArgs),
    /// Write felkla.toml with the built-in questionnaire
    Init,
    /// Write a blank answers file for a phase
    Template(TemplateArgs),
    /// Print phases, dimensions, weights and questions
    Phases(ConfigArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AssessArgs {
    /// Answers file (.toml or .json)
    pub answers: PathBuf,
    /// Phase to score, overriding `phase` in the answers file
    #[arg(long)]
    pub phase: Option<String>,
    #[command(flatten)]
    pub config: ConfigArgs,
    #[arg(long)]
    pub json: bool,
    /// Directory for the exported report
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Export the plain-text report instead of a PDF
    #[arg(long, conflicts_with = "no_export")]
    pub text_only: bool,
    /// Only show the result; do not write a report file
    #[arg(long)]
    pub no_export: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TemplateArgs {
    /// Phase id, e.g. FELKLA-1
    pub phase: String,
    /// Output path; the extension picks TOML or JSON
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub config: ConfigArgs,
}
