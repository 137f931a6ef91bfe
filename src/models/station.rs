// src/models/station.rs

//! Station and station directory.

use crate::error::{AppError, Result};

/// A named bus stop with its provider-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub id: String,
}

impl Station {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Ordered list of stations, in file order.
///
/// Lines are kept as written; when a name repeats, lookups return the
/// first one. Only [`upsert`](Self::upsert) enforces uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDirectory {
    stations: Vec<Station>,
}

impl StationDirectory {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Parse the line-oriented list format.
    ///
    /// The last whitespace-separated field of a line is the id; the fields
    /// before it, joined by single spaces, are the name. Blank lines are
    /// ignored and lines with a single field are skipped.
    pub fn parse(text: &str) -> Self {
        let mut stations = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.split_last() {
                None => continue,
                Some((_, [])) => {
                    log::warn!("Skipping station list line {}: missing id", index + 1);
                }
                Some((id, name)) => stations.push(Station::new(name.join(" "), *id)),
            }
        }
        Self::new(stations)
    }

    /// Render back to the list format, one station per line.
    pub fn to_text(&self) -> String {
        self.stations
            .iter()
            .map(|s| format!("{} {}\n", s.name, s.id))
            .collect()
    }

    /// First station with exactly this name.
    pub fn find(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Look up a station, failing with [`AppError::UnknownStation`].
    pub fn resolve(&self, name: &str) -> Result<&Station> {
        self.find(name)
            .ok_or_else(|| AppError::UnknownStation(name.to_string()))
    }

    /// Insert a station, replacing the id of the first one with that name in place.
    pub fn upsert(&mut self, station: Station) {
        match self.stations.iter_mut().find(|s| s.name == station.name) {
            Some(existing) => existing.id = station.id,
            None => self.stations.push(station),
        }
    }

    /// Remove the first station with this name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Station> {
        let index = self.stations.iter().position(|s| s.name == name)?;
        Some(self.stations.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Check that a station can be stored in the list format.
pub fn validate_station(station: &Station) -> Result<()> {
    if station.name.trim().is_empty() {
        return Err(AppError::validation("station name is empty"));
    }
    if station.id.is_empty() || station.id.contains(char::is_whitespace) {
        return Err(AppError::validation(format!(
            "station id '{}' must be a single non-empty word",
            station.id
        )));
    }
    if station.name != station.name.split_whitespace().collect::<Vec<_>>().join(" ") {
        return Err(AppError::validation(format!(
            "station name '{}' has leading, trailing or repeated whitespace",
            station.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gates() -> StationDirectory {
        StationDirectory::new(vec![
            Station::new("North Gate", "101"),
            Station::new("South Gate", "202"),
        ])
    }

    #[test]
    fn test_parse_preserves_order() {
        let directory = StationDirectory::parse("Hachioji 00021\nTachikawa 00042\n");
        let names: Vec<_> = directory.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Hachioji", "Tachikawa"]);
        assert_eq!(directory.find("Tachikawa").unwrap().id, "00042");
    }

    #[test]
    fn test_parse_multi_word_names() {
        let directory = StationDirectory::parse("North Gate 101\n  South   Gate  202  \n");
        assert_eq!(directory, gates());
    }

    #[test]
    fn test_parse_skips_blank_and_incomplete_lines() {
        let directory = StationDirectory::parse("\nlonely\nA 1\n\n");
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.find("A").unwrap().id, "1");
    }

    #[test]
    fn test_text_round_trip() {
        let directory = gates();
        assert_eq!(StationDirectory::parse(&directory.to_text()), directory);
    }

    #[test]
    fn test_find_exact_name_only() {
        let directory = gates();
        assert!(directory.find("North").is_none());
        assert!(directory.find("north gate").is_none());
        assert!(matches!(
            directory.resolve("West Gate"),
            Err(AppError::UnknownStation(name)) if name == "West Gate"
        ));
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut directory = gates();
        directory.upsert(Station::new("North Gate", "999"));
        directory.upsert(Station::new("East Gate", "303"));

        let rows: Vec<_> = directory
            .iter()
            .map(|s| (s.name.as_str(), s.id.as_str()))
            .collect();
        assert_eq!(
            rows,
            [("North Gate", "999"), ("South Gate", "202"), ("East Gate", "303")]
        );
    }

    #[test]
    fn test_duplicate_names_keep_every_line() {
        let text = "Hachioji 111\nTachikawa 42\nHachioji 222\n";
        let directory = StationDirectory::parse(text);

        assert_eq!(directory.find("Hachioji").unwrap().id, "111");
        let rows: Vec<_> = directory
            .iter()
            .map(|s| (s.name.as_str(), s.id.as_str()))
            .collect();
        assert_eq!(
            rows,
            [("Hachioji", "111"), ("Tachikawa", "42"), ("Hachioji", "222")]
        );
        assert_eq!(directory.to_text(), text);
    }

    #[test]
    fn test_upsert_updates_first_duplicate() {
        let mut directory = StationDirectory::parse("A 1\nA 2\n");
        directory.upsert(Station::new("A", "9"));
        assert_eq!(directory.to_text(), "A 9\nA 2\n");
    }

    #[test]
    fn test_remove() {
        let mut directory = gates();
        assert_eq!(directory.remove("North Gate").unwrap().id, "101");
        assert!(directory.remove("North Gate").is_none());
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_validate_station() {
        assert!(validate_station(&Station::new("North Gate", "101")).is_ok());
        assert!(validate_station(&Station::new("", "101")).is_err());
        assert!(validate_station(&Station::new("North", "1 01")).is_err());
        assert!(validate_station(&Station::new("North  Gate", "101")).is_err());
    }
}
