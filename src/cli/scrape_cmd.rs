//! `parkfetch scrape` — run the brochure pipeline and write the sinks.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::error;

use crate::cli::output;
use crate::config::{ScrapeConfig, SheetRef};
use crate::model::Aggregator;
use crate::pipeline::Scraper;
use crate::progress::{self, ProgressReceiver, ScrapeEventKind};
use crate::sink::sheets::SheetsWriter;
use crate::sink::{self, json::write_json};

/// Flags for the scrape subcommand. Defaults mirror [`ScrapeConfig`].
#[derive(Debug, Args)]
pub struct ScrapeOpts {
    /// Maximum number of parks to process
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Delay in seconds between park attempts
    #[arg(long, default_value = "10")]
    pub delay_seconds: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Output path for the JSON backup
    #[arg(long, default_value = "parks_data.json")]
    pub out: PathBuf,

    /// Target spreadsheet: bare ID or full docs.google.com URL
    #[arg(long)]
    pub sheet: Option<String>,

    /// Bearer token granting edit access to the spreadsheet
    #[arg(long)]
    pub sheet_token: Option<String>,
}

impl Default for ScrapeOpts {
    fn default() -> Self {
        Self {
            limit: 20,
            delay_seconds: 10,
            timeout_seconds: 30,
            out: PathBuf::from("parks_data.json"),
            sheet: None,
            sheet_token: None,
        }
    }
}

/// Run the scrape command.
pub async fn run(opts: ScrapeOpts) -> Result<()> {
    let sheet = match (opts.sheet, opts.sheet_token) {
        (Some(spreadsheet), Some(token)) => Some(SheetRef { spreadsheet, token }),
        (Some(_), None) => bail!("--sheet requires --sheet-token"),
        (None, Some(_)) => bail!("--sheet-token requires --sheet"),
        (None, None) => None,
    };

    let config = ScrapeConfig {
        limit: opts.limit,
        delay: Duration::from_secs(opts.delay_seconds),
        http_timeout: Duration::from_secs(opts.timeout_seconds),
        output_path: opts.out,
        sheet,
        ..Default::default()
    };

    let total = config.parks().len();
    let (tx, rx) = progress::channel();
    let display = if output::is_quiet() || output::is_json() {
        None
    } else {
        Some(tokio::spawn(render_progress(rx, total)))
    };

    let scraper = Scraper::new(config.clone()).with_progress(tx);
    let aggregator = scraper.run().await;

    if let Some(handle) = display {
        let _ = handle.await;
    }

    write_sinks(&config, &aggregator).await;
    report(&aggregator);
    Ok(())
}

/// Write both sinks. Each is best-effort and independent: a failed
/// spreadsheet write never blocks the JSON backup, and neither discards the
/// in-memory records.
async fn write_sinks(config: &ScrapeConfig, aggregator: &Aggregator) {
    if let Err(e) = write_json(&config.output_path, aggregator.records()) {
        error!("JSON sink failed: {e}");
    }

    if let Some(sheet) = &config.sheet {
        match SheetsWriter::open(sheet).await {
            Ok(mut writer) => {
                if let Err(e) = sink::write_records(&mut writer, aggregator.records()).await {
                    error!("spreadsheet write failed: {e}");
                }
            }
            Err(e) => error!("spreadsheet sink unavailable: {e}"),
        }
    }
}

/// Render progress events as a console progress bar.
async fn render_progress(mut rx: ProgressReceiver, total: usize) {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    while let Ok(event) = rx.recv().await {
        match event.event {
            ScrapeEventKind::ParkStarted { name, .. } => {
                bar.set_message(format!("{name}: resolving"));
            }
            ScrapeEventKind::UrlDiscovered { name, .. } => {
                bar.set_message(format!("{name}: brochure link found"));
            }
            ScrapeEventKind::BrochureFetched { name, bytes, .. } => {
                bar.set_message(format!("{name}: downloaded {bytes} bytes"));
            }
            ScrapeEventKind::TextExtracted { name, chars } => {
                bar.set_message(format!("{name}: extracted {chars} chars"));
            }
            ScrapeEventKind::ParkRecorded { name, status } => {
                bar.println(format!("  {name}: {status}"));
                bar.inc(1);
            }
            ScrapeEventKind::BatchComplete { ok, failed } => {
                bar.finish_with_message(format!("done: {ok} ok, {failed} failed"));
                break;
            }
            ScrapeEventKind::Warning { message } => {
                bar.println(format!("  warning: {message}"));
            }
        }
    }
}

/// Print the run summary.
fn report(aggregator: &Aggregator) {
    if output::is_json() {
        let failures: serde_json::Map<String, serde_json::Value> = aggregator
            .failure_counts()
            .into_iter()
            .map(|(status, count)| (status.to_string(), json!(count)))
            .collect();
        output::print_json(&json!({
            "parks": aggregator.len(),
            "ok": aggregator.ok_count(),
            "failures": failures,
            "records": aggregator.records(),
        }));
    } else if !output::is_quiet() {
        println!(
            "Processed {} park(s): {} ok, {} failed",
            aggregator.len(),
            aggregator.ok_count(),
            aggregator.len() - aggregator.ok_count()
        );
        for (status, count) in aggregator.failure_counts() {
            println!("  {status}: {count}");
        }
    }
}
