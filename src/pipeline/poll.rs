// src/pipeline/poll.rs

//! Periodic polling of the station directory.

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::models::{NotifiedSet, PollConfig};
use crate::pipeline::{BotContext, ReportOutcome, fetch_and_report};
use crate::utils::station_url;

/// Summary of one poll cycle.
#[derive(Debug, Clone)]
pub struct PollSummary {
    pub started_at: DateTime<Local>,
    pub reported: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Report every listed station that is not yet in `notified`.
///
/// A station is marked as notified once its report (or inline timeout
/// message) has been delivered. Failures are logged and left unmarked so
/// the next cycle tries again. The snapshot is saved at the end of the cycle.
pub async fn run_poll_cycle(ctx: &BotContext, notified: &mut NotifiedSet) -> Result<PollSummary> {
    let mut summary = PollSummary {
        started_at: Local::now(),
        reported: 0,
        skipped: 0,
        failed: 0,
    };

    let directory = ctx.storage.load_stations().await?;
    if directory.is_empty() {
        log::debug!("Station list is empty; nothing to poll");
        return Ok(summary);
    }

    for station in directory.iter() {
        if notified.contains(&station.name) {
            summary.skipped += 1;
            continue;
        }

        match report_station(ctx, &station.name, &station.id).await {
            Ok(outcome) => {
                log::debug!("Reported '{}': {:?}", station.name, outcome);
                notified.add(station.name.clone());
                summary.reported += 1;
            }
            Err(e) => {
                log::warn!("Failed to report station '{}': {}", station.name, e);
                summary.failed += 1;
            }
        }
    }

    ctx.storage.save_notified(notified).await?;

    log::info!(
        "Poll cycle started {}: {} reported, {} skipped, {} failed",
        summary.started_at.format("%Y-%m-%d %H:%M:%S"),
        summary.reported,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

async fn report_station(ctx: &BotContext, name: &str, id: &str) -> Result<ReportOutcome> {
    let url = station_url(&ctx.fetcher_config, id)?;
    ctx.sink.send(&ctx.formatter.poll_announce(name)).await?;
    fetch_and_report(ctx, &url).await
}

/// Build the notified set for a new process.
///
/// The in-memory set always starts empty; the persisted snapshot is then
/// restored unless `reset_notified_on_start` is set, in which case the
/// snapshot is overwritten with the empty set.
pub async fn restore_notified(ctx: &BotContext, config: &PollConfig) -> Result<NotifiedSet> {
    let mut notified = NotifiedSet::new();
    if config.reset_notified_on_start {
        ctx.storage.save_notified(&notified).await?;
        log::info!("Notified snapshot reset");
    } else {
        notified.restore(ctx.storage.load_notified().await?);
        log::info!("Restored {} notified station(s)", notified.len());
    }
    Ok(notified)
}

/// Poll forever on a fixed interval until Ctrl-C.
pub async fn run_poll_loop(ctx: &BotContext, config: &PollConfig) -> Result<()> {
    run_poll_loop_until(ctx, config, tokio::signal::ctrl_c()).await
}

/// Poll on a fixed interval until `shutdown` resolves, then save the
/// notified snapshot.
pub async fn run_poll_loop_until<F>(
    ctx: &BotContext,
    config: &PollConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future,
{
    let mut notified = restore_notified(ctx, config).await?;
    let mut ticker = tokio::time::interval(config.interval());

    log::info!("Polling every {}s", config.interval_secs);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_poll_cycle(ctx, &mut notified).await {
                    log::error!("Poll cycle failed: {}", e);
                }
            }
            _ = &mut shutdown => {
                log::info!("Shutting down; saving notified snapshot");
                ctx.storage.save_notified(&notified).await?;
                return Ok(());
            }
        }
    }
}
