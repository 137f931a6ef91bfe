// src/models/selectors.rs

//! CSS selectors for scraping a bus-location page.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for scraping a bus-location page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSelectors {
    /// Element naming the stop itself
    #[serde(default = "defaults::stop_name")]
    pub stop_name: String,

    /// Selector for each bus item on the board
    #[serde(default = "defaults::item")]
    pub item: String,

    /// Route name within an item
    #[serde(default = "defaults::route_name")]
    pub route_name: String,

    /// Scheduled time within an item
    #[serde(default = "defaults::scheduled_time")]
    pub scheduled_time: String,

    /// Destination within an item
    #[serde(default = "defaults::destination")]
    pub destination: String,

    /// Vehicle icon `<img>` within an item
    #[serde(default = "defaults::vehicle_icon")]
    pub vehicle_icon: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            stop_name: defaults::stop_name(),
            item: defaults::item(),
            route_name: defaults::route_name(),
            scheduled_time: defaults::scheduled_time(),
            destination: defaults::destination(),
            vehicle_icon: defaults::vehicle_icon(),
        }
    }
}

impl PageSelectors {
    /// Parse every selector, failing on the first invalid one.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            stop_name: parse_selector(&self.stop_name)?,
            item: parse_selector(&self.item)?,
            route_name: parse_selector(&self.route_name)?,
            scheduled_time: parse_selector(&self.scheduled_time)?,
            destination: parse_selector(&self.destination)?,
            vehicle_icon: parse_selector(&self.vehicle_icon)?,
        })
    }
}

/// Parsed form of [`PageSelectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub stop_name: Selector,
    pub item: Selector,
    pub route_name: Selector,
    pub scheduled_time: Selector,
    pub destination: Selector,
    pub vehicle_icon: Selector,
}

/// Parse a CSS selector into the crate error type.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn stop_name() -> String {
        ".departure-stop".into()
    }
    pub fn item() -> String {
        "li.plotList".into()
    }
    pub fn route_name() -> String {
        ".courseName".into()
    }
    pub fn scheduled_time() -> String {
        ".on-time".into()
    }
    pub fn destination() -> String {
        ".destination-name".into()
    }
    pub fn vehicle_icon() -> String {
        ".locationDataArea img".into()
    }
}
