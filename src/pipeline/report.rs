// src/pipeline/report.rs

//! Fetch a board and send it to chat.

use crate::error::{AppError, Result};
use crate::models::StopBoard;
use crate::pipeline::BotContext;

/// What happened to a single report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The board was sent (possibly as the "no buses" sentence).
    Sent { stop_name: String, arrivals: usize },
    /// The page never became ready; the error was sent inline.
    TimedOut,
}

/// Fetch `url`, extract its board, and send the formatted message.
///
/// A fetch timeout is reported to the chat as an inline error and is not
/// an error for the caller. Anything else propagates.
pub async fn fetch_and_report(ctx: &BotContext, url: &str) -> Result<ReportOutcome> {
    let html = match ctx.fetcher.fetch_rendered(url).await {
        Ok(html) => html,
        Err(e @ AppError::FetchTimeout { .. }) => {
            log::warn!("{}", e);
            ctx.sink.send(&ctx.formatter.fetch_failed(&e)).await?;
            return Ok(ReportOutcome::TimedOut);
        }
        Err(e) => return Err(e),
    };

    let board: StopBoard = ctx.extractor.extract(&html);
    log::info!(
        "Extracted {} bus(es) for '{}' from {}",
        board.arrivals.len(),
        board.stop_name,
        url
    );

    ctx.sink.send(&ctx.formatter.format_board(&board)).await?;

    Ok(ReportOutcome::Sent {
        arrivals: board.arrivals.len(),
        stop_name: board.stop_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationDirectory;
    use crate::pipeline::context::testing::{FakeFetcher, board_html, harness};

    const URL: &str = "https://example.com/board?startId=1";

    #[tokio::test]
    async fn test_reports_board() {
        let html = board_html("Central", &[("12", "10:05", "Central", "/icons/bus_n.png")]);
        let h = harness(
            StationDirectory::default(),
            FakeFetcher::default().with_page(URL, &html),
        );

        let outcome = fetch_and_report(&h.ctx, URL).await.unwrap();
        assert_eq!(
            outcome,
            ReportOutcome::Sent {
                stop_name: "Central".to_string(),
                arrivals: 1
            }
        );

        let sent = h.sink.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("**12** (scheduled: 10:05)"));
        assert!(sent[0].contains("Non-step bus"));
    }

    #[tokio::test]
    async fn test_empty_board_sends_no_buses_sentence() {
        let h = harness(
            StationDirectory::default(),
            FakeFetcher::default().with_page(URL, &board_html("Central", &[])),
        );

        fetch_and_report(&h.ctx, URL).await.unwrap();
        assert_eq!(h.sink.sent(), vec!["No bus information was found."]);
    }

    #[tokio::test]
    async fn test_timeout_is_reported_inline() {
        let h = harness(StationDirectory::default(), FakeFetcher::default());

        let outcome = fetch_and_report(&h.ctx, URL).await.unwrap();
        assert_eq!(outcome, ReportOutcome::TimedOut);

        let sent = h.sink.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Error: Timed out after 10s"));
    }
}
