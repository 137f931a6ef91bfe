//! Bus arrival data structures.

/// Placeholder for a field missing from the page.
pub const UNKNOWN: &str = "unknown";

/// Vehicle type, inferred from the icon shown next to a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    LowFloor,
    TwoStep,
    NonStep,
    Unknown,
}

impl VehicleType {
    /// Resolve the vehicle type from an icon `src`.
    ///
    /// Case-sensitive substring tests, checked in order:
    /// `bus_s.png`, `bus.png`, `bus_n.png`.
    pub fn from_icon_src(src: Option<&str>) -> Self {
        match src {
            Some(src) if src.contains("bus_s.png") => Self::LowFloor,
            Some(src) if src.contains("bus.png") => Self::TwoStep,
            Some(src) if src.contains("bus_n.png") => Self::NonStep,
            _ => Self::Unknown,
        }
    }
}

/// One bus as shown on the live board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRecord {
    pub route_name: String,
    pub scheduled_time: String,
    pub destination: String,
    pub vehicle_type: VehicleType,
}

/// Everything extracted from one bus-location page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopBoard {
    /// Stop name, or [`UNKNOWN`] when the page does not name it
    pub stop_name: String,

    /// Buses in page order
    pub arrivals: Vec<ArrivalRecord>,
}

impl StopBoard {
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_floor_icon() {
        assert_eq!(
            VehicleType::from_icon_src(Some("/img/icons/bus_s.png")),
            VehicleType::LowFloor
        );
    }

    #[test]
    fn test_two_step_icon() {
        assert_eq!(
            VehicleType::from_icon_src(Some("https://cdn.example.com/bus.png?v=2")),
            VehicleType::TwoStep
        );
    }

    #[test]
    fn test_non_step_icon() {
        assert_eq!(
            VehicleType::from_icon_src(Some(".../icons/bus_n.png")),
            VehicleType::NonStep
        );
    }

    #[test]
    fn test_unmatched_or_missing_icon() {
        assert_eq!(
            VehicleType::from_icon_src(Some("/img/train.png")),
            VehicleType::Unknown
        );
        assert_eq!(VehicleType::from_icon_src(Some("")), VehicleType::Unknown);
        assert_eq!(VehicleType::from_icon_src(None), VehicleType::Unknown);
    }

    #[test]
    fn test_icon_match_is_case_sensitive() {
        assert_eq!(
            VehicleType::from_icon_src(Some("/img/BUS_N.PNG")),
            VehicleType::Unknown
        );
    }
}
