// src/services/extractor.rs

//! Arrival extractor.
//!
//! Turns a rendered bus-location page into a [`StopBoard`] using the
//! configured CSS selectors. Missing elements never fail extraction; each
//! field falls back to [`UNKNOWN`] on its own.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{ArrivalRecord, CompiledSelectors, PageSelectors, StopBoard, UNKNOWN, VehicleType};

/// Extracts bus arrivals from rendered HTML.
#[derive(Debug, Clone)]
pub struct ArrivalExtractor {
    selectors: CompiledSelectors,
}

impl ArrivalExtractor {
    /// Create an extractor, compiling the given selectors.
    pub fn new(selectors: &PageSelectors) -> Result<Self> {
        Ok(Self {
            selectors: selectors.compile()?,
        })
    }

    /// Extract the stop name and all buses, in page order.
    pub fn extract(&self, html: &str) -> StopBoard {
        let document = Html::parse_document(html);
        self.extract_document(&document)
    }

    /// Same as [`extract`](Self::extract) for an already parsed document.
    pub fn extract_document(&self, document: &Html) -> StopBoard {
        let stop_name = document
            .select(&self.selectors.stop_name)
            .next()
            .map(element_text)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let arrivals = document
            .select(&self.selectors.item)
            .map(|item| self.parse_item(&item))
            .collect();

        StopBoard {
            stop_name,
            arrivals,
        }
    }

    fn parse_item(&self, item: &ElementRef) -> ArrivalRecord {
        let icon_src = item
            .select(&self.selectors.vehicle_icon)
            .next()
            .and_then(|img| img.value().attr("src"));

        ArrivalRecord {
            route_name: child_text(item, &self.selectors.route_name),
            scheduled_time: child_text(item, &self.selectors.scheduled_time),
            destination: child_text(item, &self.selectors.destination),
            vehicle_type: VehicleType::from_icon_src(icon_src),
        }
    }
}

/// Trimmed text of the first match under `parent`, or [`UNKNOWN`].
fn child_text(parent: &ElementRef, selector: &Selector) -> String {
    parent
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
