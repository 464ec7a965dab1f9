use anyhow::Result;
use clap::Parser;
use energy_substitution::{charts, report, stats, EnergyTable};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Descriptive statistics and charts for global energy substitution by source"
)]
struct Args {
    /// CSV with a Year column and one "<Source> (TWh, substituted energy)" column per source
    #[arg(short, long, default_value = "global-energy-substitution.csv")]
    input: PathBuf,
    /// Directory the four PNG charts are written to
    #[arg(short, long, default_value = "plots")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr) // stdout carries the report
        .init();

    let args = Args::parse();
    info!(input = %args.input.display(), output = %args.output.display(), "startup");

    // ─── 2) load ─────────────────────────────────────────────────────
    let table = EnergyTable::load_csv(&args.input)?;

    // ─── 3) statistics ───────────────────────────────────────────────
    let analysis = stats::analyze(&table)?;

    // ─── 4) charts, fixed order ──────────────────────────────────────
    let paths = charts::render_all(&table, &args.output)?;
    for p in &paths {
        info!("wrote {}", p.display());
    }

    // ─── 5) report ───────────────────────────────────────────────────
    report::print_report(&analysis);

    info!("all done");
    Ok(())
}
