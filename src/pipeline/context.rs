// src/pipeline/context.rs

//! Collaborators shared by commands and the poll loop.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, FetcherConfig};
use crate::services::{
    ArrivalExtractor, ChatSink, ConsoleSink, HttpPageFetcher, MessageFormatter, PageFetcher,
    WebhookSink,
};
use crate::storage::{BotStorage, LocalStorage};
use crate::utils::http;

/// Everything a command or poll cycle needs, built once at startup.
pub struct BotContext {
    pub fetcher_config: FetcherConfig,
    pub command_prefix: String,
    pub storage: Arc<dyn BotStorage>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub sink: Arc<dyn ChatSink>,
    pub extractor: ArrivalExtractor,
    pub formatter: MessageFormatter,
}

impl BotContext {
    /// Assemble a context from explicit collaborators.
    pub fn new(
        config: &Config,
        storage: Arc<dyn BotStorage>,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn ChatSink>,
    ) -> Result<Self> {
        Ok(Self {
            fetcher_config: config.fetcher.clone(),
            command_prefix: config.chat.command_prefix.clone(),
            storage,
            fetcher,
            sink,
            extractor: ArrivalExtractor::new(&config.selectors)?,
            formatter: MessageFormatter::new(config.messages.clone()),
        })
    }

    /// Build the production context: local files, HTTP fetcher, and a
    /// webhook sink (stdout when no webhook is configured).
    pub fn from_config(config: &Config, storage_dir: &Path) -> Result<Self> {
        let client = http::create_async_client(&config.fetcher)?;

        let storage = LocalStorage::with_paths(storage_dir, config.paths.clone());
        let fetcher = HttpPageFetcher::new(client.clone(), &config.fetcher)?;
        let sink: Arc<dyn ChatSink> = match &config.chat.webhook_url {
            Some(url) => {
                log::info!("Delivering messages to webhook");
                Arc::new(WebhookSink::new(client, url.clone()))
            }
            None => {
                log::info!("No webhook configured; printing messages to stdout");
                Arc::new(ConsoleSink)
            }
        };

        Self::new(config, Arc::new(storage), Arc::new(fetcher), sink)
    }
}
