//! Chat message formatting.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Messages, StationDirectory, StopBoard, UNKNOWN, VehicleLabel, VehicleType};

/// Width of the name column in the station table.
const NAME_COLUMN_WIDTH: usize = 15;

static PLACEHOLDER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").ok());

/// Renders boards and station lists using the configured message strings.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    messages: Messages,
}

impl MessageFormatter {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Render a stop board.
    ///
    /// A header naming the stop, then three lines per bus followed by a
    /// blank line. An empty board renders as the single "no buses" sentence.
    pub fn format_board(&self, board: &StopBoard) -> String {
        if board.is_empty() {
            return self.messages.no_buses.clone();
        }

        let mut out = fill(
            &self.messages.board_header,
            &[("stop", self.field(&board.stop_name))],
        );
        out.push('\n');

        for arrival in &board.arrivals {
            let route = fill(
                &self.messages.route_line,
                &[
                    ("route", self.field(&arrival.route_name)),
                    ("time", self.field(&arrival.scheduled_time)),
                ],
            );
            let destination = fill(
                &self.messages.destination_line,
                &[("destination", self.field(&arrival.destination))],
            );
            let vehicle = fill(
                &self.messages.vehicle_line,
                &[("vehicle", &self.vehicle_label(arrival.vehicle_type).render())],
            );

            out.push_str(&route);
            out.push('\n');
            out.push_str(&destination);
            out.push('\n');
            out.push_str(&vehicle);
            out.push_str("\n\n");
        }

        out
    }

    /// Render the station directory as a code-block table.
    pub fn format_directory(&self, directory: &StationDirectory) -> String {
        if directory.is_empty() {
            return self.messages.list_empty.clone();
        }

        let mut out = format!("```\n{}\n", self.messages.list_header);
        for station in directory.iter() {
            out.push_str(&pad_right(&station.name, NAME_COLUMN_WIDTH));
            out.push(' ');
            out.push_str(&station.id);
            out.push('\n');
        }
        out.push_str("```");
        out
    }

    pub fn not_registered(&self, station: &str) -> String {
        fill(&self.messages.not_registered, &[("station", station)])
    }

    pub fn station_saved(&self, station: &str, id: &str) -> String {
        fill(
            &self.messages.station_saved,
            &[("station", station), ("id", id)],
        )
    }

    pub fn station_removed(&self, station: &str) -> String {
        fill(&self.messages.station_removed, &[("station", station)])
    }

    pub fn poll_announce(&self, station: &str) -> String {
        fill(&self.messages.poll_announce, &[("station", station)])
    }

    pub fn fetch_failed(&self, error: impl std::fmt::Display) -> String {
        fill(&self.messages.fetch_failed, &[("error", &error.to_string())])
    }

    pub fn vehicle_label(&self, vehicle: VehicleType) -> &VehicleLabel {
        let labels = &self.messages.vehicles;
        match vehicle {
            VehicleType::LowFloor => &labels.low_floor,
            VehicleType::TwoStep => &labels.two_step,
            VehicleType::NonStep => &labels.non_step,
            VehicleType::Unknown => &labels.unknown,
        }
    }

    fn field<'a>(&'a self, value: &'a str) -> &'a str {
        if value == UNKNOWN {
            &self.messages.unknown
        } else {
            value
        }
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(Messages::default())
    }
}

/// Substitute `{name}` placeholders in one pass.
///
/// Substituted values are never rescanned; unknown placeholders are kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let Some(re) = PLACEHOLDER_RE.as_ref() else {
        return template.to_string();
    };
    re.replace_all(template, |caps: &Captures| {
        let name = &caps[1];
        values
            .iter()
            .find(|(key, _)| *key == name)
            .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
    })
    .into_owned()
}

/// Left-align `text` to `width` grapheme clusters.
fn pad_right(text: &str, width: usize) -> String {
    let len = text.graphemes(true).count();
    let mut out = text.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}
