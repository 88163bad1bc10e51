use anyhow::Context as _;
use clap::{Parser, Subcommand};
use colored::Colorize;
use listo::report::Render;
use listo::{consistency, fixes, golive, health, readiness, EngineConfig, ReportFormat, Snapshot};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "listo",
    about = "Infrastructure readiness checks for hospital branch configuration",
    version
)]
struct Cli {
    /// Engine configuration file (defaults to ./listo.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the cross-module consistency checks
    Check {
        /// Branch snapshot JSON file
        snapshot: PathBuf,
    },
    /// Score the snapshot against the standards checklist
    Readiness {
        snapshot: PathBuf,
        /// Override the checklist document
        #[arg(long)]
        checklist: Option<PathBuf>,
    },
    /// Compute the weighted go-live score and gate
    Golive {
        snapshot: PathBuf,
    },
    /// Generate fix suggestions from the consistency issues
    Fixes {
        snapshot: PathBuf,
    },
    /// One-call composite health summary
    Health {
        snapshot: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::load_or_default(&std::env::current_dir()?),
    };

    match cli.command {
        Command::Check { snapshot } => {
            let ctx = Snapshot::load(&snapshot)?;
            info!(branch = %ctx.branch.id, "running consistency checks");
            let result = consistency::evaluate(&ctx, &config.consistency);
            println!("{}", result.format(cli.format));
            summary_line(result.blockers.len(), result.issues.len());
        }
        Command::Readiness { snapshot, checklist } => {
            let ctx = Snapshot::load(&snapshot)?;
            let checklist = match checklist {
                Some(path) => listo::Checklist::load(&path)?,
                None => config.checklist()?,
            };
            info!(branch = %ctx.branch.id, checks = checklist.check_count(), "running readiness checks");
            let result = readiness::evaluate(&ctx, &checklist);
            println!("{}", result.format(cli.format));
            summary_line(result.blockers.len(), result.fail_count as usize);
        }
        Command::Golive { snapshot } => {
            let ctx = Snapshot::load(&snapshot)?;
            let consistency_result = consistency::evaluate(&ctx, &config.consistency);
            let readiness_result = readiness::evaluate(&ctx, &config.checklist()?);
            let result = golive::aggregate(&consistency_result, &readiness_result);
            println!("{}", result.format(cli.format));

            if result.can_go_live {
                println!("{}", "Gate passed: configuration can go live.".bright_green().bold());
            } else {
                println!("{}", format!("Gate failed: {}", result.recommendation).bright_red().bold());
                std::process::exit(1);
            }
        }
        Command::Fixes { snapshot } => {
            let ctx = Snapshot::load(&snapshot)?;
            let consistency_result = consistency::evaluate(&ctx, &config.consistency);
            let result = fixes::suggest(&consistency_result.issues);
            println!("{}", result.format(cli.format));
        }
        Command::Health { snapshot } => {
            let ctx = Snapshot::load(&snapshot)?;
            let consistency_result = consistency::evaluate(&ctx, &config.consistency);
            let readiness_result = readiness::evaluate(&ctx, &config.checklist()?);
            let golive_result = golive::aggregate(&consistency_result, &readiness_result);
            let result = health::summarize(&ctx, &consistency_result, &readiness_result, &golive_result);
            println!("{}", result.format(cli.format));
        }
    }

    Ok(())
}

fn summary_line(blockers: usize, findings: usize) {
    if blockers == 0 {
        println!("{}", "No blocking issues found.".bright_green().bold());
    } else {
        println!(
            "{}",
            format!("{findings} finding(s), {blockers} blocker(s).")
                .bright_red()
                .bold()
        );
    }
}
