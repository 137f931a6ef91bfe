//! Service layer for the bot.
//!
//! This module contains the business logic for:
//! - Page fetching (`PageFetcher`, `HttpPageFetcher`)
//! - Arrival extraction (`ArrivalExtractor`)
//! - Message formatting (`MessageFormatter`)
//! - Chat delivery (`ChatSink`, `WebhookSink`, `ConsoleSink`)

mod extractor;
mod fetcher;
mod formatter;
mod notifier;

pub use extractor::ArrivalExtractor;
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use formatter::MessageFormatter;
pub use notifier::{ChatSink, ConsoleSink, MAX_MESSAGE_LEN, WebhookSink, split_message};
