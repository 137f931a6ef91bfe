//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PageSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Page fetching behavior
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// CSS selectors for the bus-location page
    #[serde(default)]
    pub selectors: PageSelectors,

    /// Data file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Chat delivery settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Periodic polling settings
    #[serde(default)]
    pub poll: PollConfig,

    /// User-visible text
    #[serde(default)]
    pub messages: Messages,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.ready_timeout_secs == 0 {
            return Err(AppError::validation("fetcher.ready_timeout_secs must be > 0"));
        }
        if self.fetcher.request_timeout_secs == 0 {
            return Err(AppError::validation(
                "fetcher.request_timeout_secs must be > 0",
            ));
        }
        if self.poll.interval_secs == 0 {
            return Err(AppError::validation("poll.interval_secs must be > 0"));
        }
        url::Url::parse(&self.fetcher.base_url)
            .map_err(|e| AppError::validation(format!("fetcher.base_url: {e}")))?;
        if let Some(webhook) = &self.chat.webhook_url {
            url::Url::parse(webhook)
                .map_err(|e| AppError::validation(format!("chat.webhook_url: {e}")))?;
        }
        self.selectors.compile()?;
        Ok(())
    }
}

/// Page fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Bus-location result page, without query
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Value of the `sort` query parameter
    #[serde(default = "defaults::sort")]
    pub sort: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// How long to wait for the ready marker
    #[serde(default = "defaults::ready_timeout")]
    pub ready_timeout_secs: u64,

    /// Delay between marker checks in milliseconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,

    /// Selector that must be present before the page counts as rendered
    #[serde(default = "defaults::ready_marker")]
    pub ready_marker: String,
}

impl FetcherConfig {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            sort: defaults::sort(),
            user_agent: defaults::user_agent(),
            request_timeout_secs: defaults::request_timeout(),
            ready_timeout_secs: defaults::ready_timeout(),
            poll_interval_ms: defaults::poll_interval(),
            ready_marker: defaults::ready_marker(),
        }
    }
}

/// Data file locations, relative to the storage directory unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Station directory list file
    #[serde(default = "defaults::station_list")]
    pub station_list: PathBuf,

    /// Already-notified station names
    #[serde(default = "defaults::notified")]
    pub notified: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            station_list: defaults::station_list(),
            notified: defaults::notified(),
        }
    }
}

/// Chat delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Incoming-webhook URL; messages go to stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Prefix that marks a chat line as a command
    #[serde(default = "defaults::command_prefix")]
    pub command_prefix: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            command_prefix: defaults::command_prefix(),
        }
    }
}

/// Periodic polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between poll cycles
    #[serde(default = "defaults::poll_every")]
    pub interval_secs: u64,

    /// Start each process with an empty notified set instead of restoring it
    #[serde(default)]
    pub reset_notified_on_start: bool,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::poll_every(),
            reset_notified_on_start: false,
        }
    }
}

/// User-visible message strings.
///
/// Templates use `{placeholder}` substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    /// Header naming the stop. `{stop}`
    #[serde(default = "defaults::msg_board_header")]
    pub board_header: String,
    /// First line per bus. `{route}`, `{time}`
    #[serde(default = "defaults::msg_route_line")]
    pub route_line: String,
    /// Second line per bus. `{destination}`
    #[serde(default = "defaults::msg_destination_line")]
    pub destination_line: String,
    /// Third line per bus. `{vehicle}`
    #[serde(default = "defaults::msg_vehicle_line")]
    pub vehicle_line: String,
    /// Shown when the page lists no buses
    #[serde(default = "defaults::msg_no_buses")]
    pub no_buses: String,
    /// Placeholder for a missing field
    #[serde(default = "defaults::msg_unknown")]
    pub unknown: String,
    #[serde(default)]
    pub vehicles: VehicleLabels,
    /// `{station}`
    #[serde(default = "defaults::msg_not_registered")]
    pub not_registered: String,
    #[serde(default = "defaults::msg_list_header")]
    pub list_header: String,
    #[serde(default = "defaults::msg_list_empty")]
    pub list_empty: String,
    /// `{station}`, `{id}`
    #[serde(default = "defaults::msg_station_saved")]
    pub station_saved: String,
    /// `{station}`
    #[serde(default = "defaults::msg_station_removed")]
    pub station_removed: String,
    /// `{station}`
    #[serde(default = "defaults::msg_poll_announce")]
    pub poll_announce: String,
    /// `{error}`
    #[serde(default = "defaults::msg_fetch_failed")]
    pub fetch_failed: String,
    #[serde(default = "defaults::msg_usage")]
    pub usage: String,
    #[serde(default = "defaults::msg_apology")]
    pub apology: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            board_header: defaults::msg_board_header(),
            route_line: defaults::msg_route_line(),
            destination_line: defaults::msg_destination_line(),
            vehicle_line: defaults::msg_vehicle_line(),
            no_buses: defaults::msg_no_buses(),
            unknown: defaults::msg_unknown(),
            vehicles: VehicleLabels::default(),
            not_registered: defaults::msg_not_registered(),
            list_header: defaults::msg_list_header(),
            list_empty: defaults::msg_list_empty(),
            station_saved: defaults::msg_station_saved(),
            station_removed: defaults::msg_station_removed(),
            poll_announce: defaults::msg_poll_announce(),
            fetch_failed: defaults::msg_fetch_failed(),
            usage: defaults::msg_usage(),
            apology: defaults::msg_apology(),
        }
    }
}

/// Display label and decorative marker for one vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleLabel {
    pub label: String,
    #[serde(default)]
    pub marker: String,
}

impl VehicleLabel {
    fn new(label: &str, marker: &str) -> Self {
        Self {
            label: label.to_string(),
            marker: marker.to_string(),
        }
    }

    /// Label followed by its marker, if any.
    pub fn render(&self) -> String {
        if self.marker.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.label, self.marker)
        }
    }
}

/// Labels for every vehicle type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleLabels {
    #[serde(default = "defaults::low_floor")]
    pub low_floor: VehicleLabel,
    #[serde(default = "defaults::two_step")]
    pub two_step: VehicleLabel,
    #[serde(default = "defaults::non_step")]
    pub non_step: VehicleLabel,
    #[serde(default = "defaults::unknown_vehicle")]
    pub unknown: VehicleLabel,
}

impl Default for VehicleLabels {
    fn default() -> Self {
        Self {
            low_floor: defaults::low_floor(),
            two_step: defaults::two_step(),
            non_step: defaults::non_step(),
            unknown: defaults::unknown_vehicle(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::VehicleLabel;

    // Fetcher defaults
    pub fn base_url() -> String {
        "https://transfer.navitime.biz/chuo-bus/pc/location/BusLocationResult".into()
    }
    pub fn sort() -> String {
        "minutesToArrival".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; busbot/0.1)".into()
    }
    pub fn request_timeout() -> u64 {
        30
    }
    pub fn ready_timeout() -> u64 {
        10
    }
    pub fn poll_interval() -> u64 {
        500
    }
    pub fn ready_marker() -> String {
        "li.plotList".into()
    }

    // Path defaults
    pub fn station_list() -> PathBuf {
        PathBuf::from("list.txt")
    }
    pub fn notified() -> PathBuf {
        PathBuf::from("sent_buses.txt")
    }

    // Chat defaults
    pub fn command_prefix() -> String {
        "!".into()
    }

    // Poll defaults
    pub fn poll_every() -> u64 {
        300
    }

    // Message defaults
    pub fn msg_board_header() -> String {
        "**{stop}**".into()
    }
    pub fn msg_route_line() -> String {
        "**{route}** (scheduled: {time})".into()
    }
    pub fn msg_destination_line() -> String {
        "Destination: {destination}".into()
    }
    pub fn msg_vehicle_line() -> String {
        "Vehicle: {vehicle}".into()
    }
    pub fn msg_no_buses() -> String {
        "No bus information was found.".into()
    }
    pub fn msg_unknown() -> String {
        "unknown".into()
    }
    pub fn msg_not_registered() -> String {
        "**{station}** is not registered in the list.".into()
    }
    pub fn msg_list_header() -> String {
        "Station         ID".into()
    }
    pub fn msg_list_empty() -> String {
        "The list is empty.".into()
    }
    pub fn msg_station_saved() -> String {
        "Saved **{station}** ({id}).".into()
    }
    pub fn msg_station_removed() -> String {
        "Removed **{station}**.".into()
    }
    pub fn msg_poll_announce() -> String {
        "Fetching bus information for **{station}**...".into()
    }
    pub fn msg_fetch_failed() -> String {
        "Error: {error}".into()
    }
    pub fn msg_usage() -> String {
        "Unknown command. Try `!list` or `!bus_list <station>`.".into()
    }
    pub fn msg_apology() -> String {
        "Something went wrong while running the command. Please contact an administrator."
            .into()
    }

    // Vehicle label defaults
    pub fn low_floor() -> VehicleLabel {
        VehicleLabel::new("Low-floor bus", ":bus:")
    }
    pub fn two_step() -> VehicleLabel {
        VehicleLabel::new("**Two-step bus**", ":arrow_double_up:")
    }
    pub fn non_step() -> VehicleLabel {
        VehicleLabel::new("**Non-step bus**", ":wheelchair:")
    }
    pub fn unknown_vehicle() -> VehicleLabel {
        VehicleLabel::new("unknown", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetcher.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_ready_timeout() {
        let mut config = Config::default();
        config.fetcher.ready_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.item = "[[invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [poll]
            interval_secs = 60

            [messages.vehicles.non_step]
            label = "NS"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll.interval_secs, 60);
        assert_eq!(config.fetcher.ready_timeout_secs, 10);
        assert_eq!(config.messages.vehicles.non_step.render(), "NS");
        assert_eq!(config.paths.station_list, PathBuf::from("list.txt"));
    }
}
