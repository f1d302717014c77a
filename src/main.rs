use anyhow::{Context, Result};
use mortstats::{
    fetch::{self, Source},
    ingest,
    views::catalog,
};
use std::{env, fs, path::PathBuf};
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_SOURCE: &str = "suicidedata.csv";
const DEFAULT_VIEWS_DIR: &str = "views";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,mortstats=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .init();
    info!("startup");

    // ─── 2) resolve source + output dir ──────────────────────────────
    let source = Source::parse(&env::args().nth(1).unwrap_or_else(|| DEFAULT_SOURCE.into()));
    let views_dir = PathBuf::from(env::args().nth(2).unwrap_or_else(|| DEFAULT_VIEWS_DIR.into()));
    fs::create_dir_all(&views_dir)
        .with_context(|| format!("creating {}", views_dir.display()))?;
    info!(source = %source, out = %views_dir.display(), "configured");

    // ─── 3) one-shot load + aggregate ────────────────────────────────
    let client = fetch::client()?;
    let start = Instant::now();
    let text = fetch::load_csv_text(&client, &source)
        .await
        .context("loading source data")?;
    let dataset = ingest::dataset_from_csv(&text)?;
    info!(years = dataset.years.len(), elapsed = ?start.elapsed(), "dataset built");

    // ─── 4) project + write views ────────────────────────────────────
    let views = catalog::build(&dataset)?;
    for view in &views {
        let path = views_dir.join(format!("{}.json", view.slug));
        let json = serde_json::to_vec_pretty(view)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(view = view.slug, "wrote view");
    }

    info!(count = views.len(), elapsed = ?start.elapsed(), "done");
    Ok(())
}
