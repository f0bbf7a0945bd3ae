//! ZenGrid CLI — the dashboard pipeline without the dashboard.
//!
//! Commands:
//! - `report` — run one refresh pass and print every section
//! - `check` — evaluate the readiness checklist; non-zero exit on failure
//! - `artifacts status` — show which artifact file each kind resolves to

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use zengrid_core::artifacts::{resolve_latest, ArtifactKind, ArtifactVersion};
use zengrid_core::warehouse::{SnowflakeClient, Warehouse, WarehouseConfig};
use zengrid_runner::{
    build_snapshot, demo_sources, load_sources, DashboardSnapshot, SectionState,
};

#[derive(Parser)]
#[command(name = "zengrid", about = "ZenGrid CLI — forecast dashboard reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one refresh pass and print the full report.
    Report {
        /// TOML secrets file with a [snowflake] table. Without it the
        /// warehouse sections report as unconfigured.
        #[arg(long)]
        secrets: Option<PathBuf>,

        /// Directory holding the exported artifact files.
        #[arg(long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// Use generated demo data instead of real sources.
        #[arg(long, default_value_t = false)]
        demo: bool,
    },
    /// Evaluate the system-readiness checklist. Exits 1 when any check fails.
    Check {
        /// TOML secrets file with a [snowflake] table.
        #[arg(long)]
        secrets: Option<PathBuf>,

        /// Directory holding the exported artifact files.
        #[arg(long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// Use generated demo data instead of real sources.
        #[arg(long, default_value_t = false)]
        demo: bool,
    },
    /// Artifact file commands.
    Artifacts {
        #[command(subcommand)]
        action: ArtifactsAction,
    },
}

#[derive(Subcommand)]
enum ArtifactsAction {
    /// Show which file each artifact kind resolves to.
    Status {
        /// Directory holding the exported artifact files.
        #[arg(long, default_value = "artifacts")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            secrets,
            artifacts,
            demo,
        } => {
            let snapshot = run_pass(secrets.as_deref(), &artifacts, demo)?;
            print_report(&snapshot);
            Ok(())
        }
        Commands::Check {
            secrets,
            artifacts,
            demo,
        } => {
            let snapshot = run_pass(secrets.as_deref(), &artifacts, demo)?;
            print_checklist(&snapshot);
            if !snapshot.readiness.all_ready() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Artifacts { action } => match action {
            ArtifactsAction::Status { dir } => run_artifacts_status(&dir),
        },
    }
}

/// One refresh pass, identical to what the TUI worker runs.
fn run_pass(
    secrets: Option<&Path>,
    artifact_dir: &Path,
    demo: bool,
) -> Result<DashboardSnapshot> {
    if demo {
        return Ok(build_snapshot(&demo_sources()));
    }

    // A bad secrets file is a hard error; a failing connection is not —
    // the report shows the failure in its warehouse sections.
    let config = secrets.map(WarehouseConfig::from_file).transpose()?;

    let client = config.and_then(|config| match SnowflakeClient::connect(&config) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("warehouse connection failed: {e}");
            None
        }
    });

    let warehouse = client.as_ref().map(|c| c as &dyn Warehouse);
    let sources = load_sources(warehouse, artifact_dir);
    Ok(build_snapshot(&sources))
}

fn print_report(snapshot: &DashboardSnapshot) {
    println!();
    println!("=== ZenGrid Report ===");
    println!("Refreshed:      {}", snapshot.refreshed_at);
    println!(
        "Data:           {}",
        &snapshot.fingerprint[..16.min(snapshot.fingerprint.len())]
    );

    println!();
    println!("--- Live Performance ---");
    match &snapshot.live {
        SectionState::Ready(live) => {
            println!(
                "Accuracy:       {:.1}%  ({} hits, {} misses, {} forecasts)",
                live.stats.accuracy_pct, live.stats.hits, live.stats.misses, live.stats.total
            );
            for record in live.recent.iter().take(5) {
                println!(
                    "  {}  {:<6} {:<9} {}",
                    record.date,
                    record.symbol,
                    record.bias.label(),
                    if record.hit { "HIT" } else { "MISS" }
                );
            }
        }
        other => print_placeholder(other),
    }

    println!();
    println!("--- Historical Backtest ---");
    match &snapshot.backtest {
        SectionState::Ready(trend) => {
            println!(
                "Accuracy:       {:.1}%  ({} hits / {} records)",
                trend.stats.accuracy_pct, trend.stats.hits, trend.stats.total
            );
            let last_rolling = trend.rolling_pct.iter().rev().find_map(|v| *v);
            match last_rolling {
                Some(pct) => println!("Rolling:        {pct:.1}% (latest window)"),
                None => println!("Rolling:        undefined (window not filled)"),
            }
            println!("Target:         {:.0}%", trend.target_pct);
            println!("Source:         {}", trend.source_file);
        }
        other => print_placeholder(other),
    }

    println!();
    println!("--- Bias Breakdown ---");
    match &snapshot.bias {
        SectionState::Ready(distribution) => {
            println!(
                "{:<10} {:>6} {:>6} {:>9}",
                "Bias", "Count", "Hits", "Accuracy"
            );
            for group in &distribution.groups {
                println!(
                    "{:<10} {:>6} {:>6} {:>8.1}%",
                    group.bias.label(),
                    group.count,
                    group.hits,
                    group.accuracy_pct
                );
            }
        }
        other => print_placeholder(other),
    }

    println!();
    println!("--- News Sources ---");
    match &snapshot.news {
        SectionState::Ready(ranking) => {
            println!(
                "{}/{} sources ok",
                ranking.success_count, ranking.feed_count
            );
            for (i, feed) in ranking.top.iter().enumerate() {
                println!(
                    "  {:>2}. {:<18} impact {:>4.1}  ({} high-impact / {} articles)",
                    i + 1,
                    feed.name,
                    feed.avg_impact_score,
                    feed.high_impact_articles,
                    feed.total_articles
                );
            }
        }
        other => print_placeholder(other),
    }

    println!();
    println!("--- Learning Corpus ---");
    match &snapshot.corpus {
        SectionState::Ready(corpus) => {
            if corpus.ready {
                println!("READY           {} entries", corpus.size);
            } else {
                println!(
                    "NOT READY       {} entries, {} more needed",
                    corpus.size, corpus.shortfall
                );
            }
        }
        other => print_placeholder(other),
    }

    println!();
    print_checklist(snapshot);
}

fn print_checklist(snapshot: &DashboardSnapshot) {
    println!("--- System Readiness ---");
    for (label, ok) in snapshot.readiness.checks() {
        println!("  [{}] {label}", if ok { "x" } else { " " });
    }
    if snapshot.readiness.all_ready() {
        println!("All systems ready.");
    } else {
        println!(
            "{}/4 checks met.",
            snapshot.readiness.met_count()
        );
    }
}

fn print_placeholder<T>(section: &SectionState<T>) {
    match section {
        SectionState::Ready(_) => unreachable!("placeholder printed for ready section"),
        SectionState::Empty {
            notice,
            remediation,
        } => {
            println!("(no data) {notice}");
            if let Some(command) = remediation {
                println!("  run: {command}");
            }
        }
        SectionState::Skipped(reason) => println!("(skipped) {reason}"),
        SectionState::Failed(message) => println!("(error) {message}"),
    }
}

fn run_artifacts_status(dir: &Path) -> Result<()> {
    if !dir.exists() {
        println!("Artifact directory does not exist: {}", dir.display());
        return Ok(());
    }

    println!("Artifacts: {}", dir.display());
    println!();
    for kind in ArtifactKind::ALL {
        match resolve_latest(dir, kind)? {
            Some(file) => {
                let version = match file.version {
                    ArtifactVersion::Stamped(stamp) => format!("stamped {stamp}"),
                    ArtifactVersion::Modified(_) => "unstamped (modification time)".to_string(),
                };
                println!("{:<18} {}  [{version}]", kind.label(), file.name);
            }
            None => {
                println!("{:<18} missing ({})", kind.label(), kind.pattern());
                println!("{:<18} run: {}", "", kind.remediation());
            }
        }
    }
    Ok(())
}
