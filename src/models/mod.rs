// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod arrival;
mod config;
mod notified;
mod selectors;
mod station;

// Re-export all public types
pub use arrival::{ArrivalRecord, StopBoard, UNKNOWN, VehicleType};
pub use config::{
    ChatConfig, Config, FetcherConfig, Messages, PathsConfig, PollConfig, VehicleLabel,
    VehicleLabels,
};
pub use notified::NotifiedSet;
pub use selectors::{CompiledSelectors, PageSelectors, parse_selector};
pub use station::{Station, StationDirectory, validate_station};
