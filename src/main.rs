mod config;
mod db;
mod discount;
mod error;
mod extractor;
mod fetcher;
mod notify;
mod report;
mod types;
mod watchlist;

use chrono::Local;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::db::HistoryStore;
use crate::discount::{percentage_drop, qualifies};
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::notify::{DesktopNotifier, Notifier};
use crate::report::{alert_body, RunReport};
use crate::types::{AlertEntry, PriceObservation, RefOutcome, RefPrice, Retailer, WatchEntry};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let watchlist = watchlist::load(&cfg.watchlist_path)?;
    info!(
        "Watchlist loaded: {} products from {}",
        watchlist.len(),
        cfg.watchlist_path
    );

    let store = HistoryStore::open(&cfg.db_path).await?;
    store.init().await?;
    info!("Price history ready at {}", cfg.db_path);

    let mut report = RunReport::create(&cfg.log_path)?;
    let fetcher = PageFetcher::connect(&cfg).await?;
    println!("Fetching prices...");

    report.date_header()?;
    let mut current_section: Option<Retailer> = None;
    for entry in &watchlist {
        if current_section != Some(entry.retailer) {
            if current_section.is_some() {
                report.divider()?;
            }
            report.section(entry.retailer.section_title())?;
            current_section = Some(entry.retailer);
        }
        scan_product(&cfg, &fetcher, &store, &mut report, entry).await?;
    }

    let alerts = report.finish()?;
    if !alerts.is_empty() {
        let title = format!("Price Drop > {}%", cfg.drop_threshold);
        if let Err(e) = DesktopNotifier.send(&title, &alert_body(&alerts)) {
            warn!("Alert delivery failed: {e}");
        }
    }

    fetcher.quit().await?;
    Ok(())
}

/// Process one watchlist entry end to end: fetch, extract, compute the drop,
/// write transcript lines, flag a qualifying drop, persist the observation.
/// Every failure here is isolated to this product; only transcript IO errors
/// propagate.
async fn scan_product(
    cfg: &Config,
    fetcher: &PageFetcher,
    store: &HistoryStore,
    report: &mut RunReport,
    entry: &WatchEntry,
) -> Result<()> {
    let url = entry.retailer.product_url(&entry.product_id);

    let html = match fetcher.fetch(&url, extractor::ready_selector(entry.retailer)).await {
        Ok(html) => html,
        Err(e) => {
            report.line(&format!("Network Error: {e}"))?;
            report.blank()?;
            return Ok(());
        }
    };

    let quote = match extractor::extract(entry.retailer, &html) {
        Ok(q) => q,
        Err(e) => {
            warn!("{}: {e}", entry.reference_name);
            report.line(&entry.reference_name)?;
            report.line("No price drop")?;
            report.blank()?;
            return Ok(());
        }
    };

    report.line(&quote.name)?;
    report.line(&format!("Price: ${:.2}", quote.price))?;

    let drop = match &quote.reference {
        RefOutcome::Present(reference) => match percentage_drop(quote.price, *reference) {
            Some(drop) => {
                match reference {
                    RefPrice::Savings(savings) => {
                        report.line(&format!("Savings: ${savings:.2} (-{drop}%)"))?;
                    }
                    RefPrice::Was(was) => {
                        report.line(&format!("Was: ${was:.2}"))?;
                        report.line(&format!("Price drop: -{drop}%"))?;
                    }
                }
                drop
            }
            None => {
                report.line("No price drop")?;
                0
            }
        },
        RefOutcome::Absent => {
            report.line("No price drop")?;
            0
        }
        RefOutcome::Unparseable(text) => {
            warn!(
                "{}: reference price text {text:?} did not parse as currency",
                entry.reference_name
            );
            report.line("No price drop")?;
            0
        }
    };
    report.blank()?;

    if qualifies(drop, cfg.drop_threshold) {
        report.flag(AlertEntry {
            reference_name: entry.reference_name.clone(),
            percentage_drop: drop,
        });
    }

    let observation = PriceObservation {
        reference_name: entry.reference_name.clone(),
        product_name: quote.name.clone(),
        product_id: entry.product_id.clone(),
        url,
        price: quote.price,
        percentage_drop: drop,
        date_scanned: Local::now().date_naive(),
    };
    match store.record(&observation).await {
        Ok(true) => debug!("{}: observation recorded", entry.reference_name),
        Ok(false) => debug!("{}: already recorded this week", entry.reference_name),
        Err(e) => warn!("{}: history write failed: {e}", entry.reference_name),
    }

    Ok(())
}
