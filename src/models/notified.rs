//! Stations already notified in the current polling epoch.

use std::collections::HashSet;

/// Set of station names that were already reported.
///
/// Owned by the poll loop and handed to each cycle; persisted as a
/// snapshot between cycles so a restart does not repeat notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifiedSet {
    names: HashSet<String>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the newline-separated snapshot format.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Render as one name per line, sorted for stable output.
    pub fn to_text(&self) -> String {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.into_iter().map(|name| format!("{name}\n")).collect()
    }

    /// Mark a station as notified. Returns false if it already was.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Replace the contents with a restored snapshot.
    pub fn restore(&mut self, snapshot: NotifiedSet) {
        self.names.clear();
        self.names.extend(snapshot.names);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for NotifiedSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let mut set = NotifiedSet::new();
        assert!(set.add("North Gate"));
        assert!(!set.add("North Gate"));
        assert!(set.contains("North Gate"));
        assert!(!set.contains("South Gate"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_text_round_trip_ignores_order() {
        let set: NotifiedSet = ["b", "a", "North Gate"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(set.to_text(), "North Gate\na\nb\n");
        assert_eq!(NotifiedSet::parse(&set.to_text()), set);
        assert_eq!(NotifiedSet::parse("a\n\nNorth Gate\r\nb"), set);
    }

    #[test]
    fn test_restore_replaces_contents() {
        let mut set = NotifiedSet::new();
        set.add("stale");
        set.restore(NotifiedSet::parse("fresh\n"));
        assert!(!set.contains("stale"));
        assert!(set.contains("fresh"));
    }
}
