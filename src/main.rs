mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{AssessArgs, Cli, Commands, ConfigArgs, TemplateArgs};
use colored::Colorize;
use felkla::config::{self, Config};
use felkla::core::report::{self, JsonReport};
use felkla::core::result::Completeness;
use felkla::core::{self as assessment, AssessmentInput};
use felkla::render;
use felkla::utils::fs as fs_utils;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Assess(args) => run_assess(args),
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Template(args) => run_template(args),
        Commands::Phases(args) => run_phases(args),
    }
}

fn load(args: &ConfigArgs) -> Result<(PathBuf, Config)> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    if let Some(source) = &loaded.source {
        debug!(config = %source.display(), "using config file");
    }
    Ok((cwd, loaded.config))
}

fn run_assess(args: AssessArgs) -> Result<i32> {
    let (cwd, cfg) = load(&args.config)?;
    let input = fs_utils::read_input(&resolve(&cwd, &args.answers))?;
    let report = assessment::run_assessment(&input, args.phase.as_deref(), &cfg)?;

    if report.result.completeness == Completeness::Empty {
        eprintln!(
            "{} no questions answered for {}; fill in the answers file to compute a result",
            "note:".yellow().bold(),
            report.result.phase_id
        );
        return Ok(1);
    }

    let output_json = args.json || cfg.general.json;
    if output_json {
        println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
    } else {
        report::print_human(&report);
    }

    if !args.no_export {
        export(&args, &cwd, &cfg, &report, output_json)?;
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn export(
    args: &AssessArgs,
    cwd: &Path,
    cfg: &Config,
    report: &report::FinalReport,
    quiet: bool,
) -> Result<()> {
    let missing = report.metadata.missing_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} report not exported; fill in project {} in the answers file",
            "hint:".cyan().bold(),
            missing.join(", ")
        );
        return Ok(());
    }

    let text = render::render_text(&report.metadata, &report.result);
    let artifact = render::build_artifact(
        &text,
        &report.result.phase_id,
        &report.metadata,
        args.text_only,
    );
    if let Some(warning) = &artifact.warning {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| cfg.general.output_dir.clone());
    let path = fs_utils::write_artifact(&resolve(cwd, &output_dir), &artifact)?;
    info!(
        path = %path.display(),
        mime = artifact.format.mime_type(),
        bytes = artifact.bytes.len(),
        "report exported"
    );

    let shown = fs_utils::relative_path(cwd, &path);
    if quiet {
        eprintln!("report: {shown}");
    } else {
        println!("report: {shown} ({})", artifact.format);
    }
    Ok(())
}

fn run_template(args: TemplateArgs) -> Result<i32> {
    let (cwd, cfg) = load(&args.config)?;
    let input = AssessmentInput::blank(&cfg, &args.phase)?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("answers_{}.toml", input.phase.to_ascii_lowercase())));
    let path = resolve(&cwd, &path);

    let format = fs_utils::InputFormat::from_path(&path)?;
    let content = fs_utils::render_input(&input, format)?;
    fs_utils::write_new(&path, content.as_bytes())?;
    println!("created {}", path.display());
    Ok(0)
}

fn run_phases(args: ConfigArgs) -> Result<i32> {
    let (_, cfg) = load(&args)?;
    let options: Vec<&str> = felkla::core::answer::AnswerOption::ALL
        .iter()
        .map(|option| option.as_str())
        .collect();

    for phase in &cfg.phases {
        let marker = if cfg.is_final_phase(&phase.id) {
            " (final gate)"
        } else {
            ""
        };
        println!("{} - {}{}", phase.id.bold(), phase.title, marker);
        if !phase.objective.is_empty() {
            println!("{}", phase.objective.dimmed());
        }
        for dimension in &phase.dimensions {
            println!();
            println!(
                "  [{}] {} (weight {:.0}%)",
                dimension.id,
                dimension.name.bold(),
                dimension.weight * 100.0
            );
            for (idx, question) in dimension.questions.iter().enumerate() {
                println!("    {}. {}", idx + 1, question);
            }
        }
        println!();
    }
    println!("answers: {} (blank = unanswered)", options.join(", "));
    Ok(0)
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
