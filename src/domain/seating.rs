use crate::error::{BookingError, Result};
use std::fmt;

pub const ROWS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const SEATS_PER_ROW: u32 = 10;
/// Maximum number of seat labels visible at once in the picker.
pub const MAX_VISIBLE_SEATS: u64 = 10;

/// The fixed auditorium layout: rows `A`–`F`, seats `1`–`10`.
///
/// The layout does not depend on how many tickets are in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    labels: Vec<String>,
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatMap {
    pub fn new() -> Self {
        let labels = ROWS
            .iter()
            .flat_map(|row| (1..=SEATS_PER_ROW).map(move |n| format!("{row}{n}")))
            .collect();
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Size of the picker window for a cart holding `seats_to_select` tickets.
    pub fn visible_window(seats_to_select: u64) -> u64 {
        seats_to_select.min(MAX_VISIBLE_SEATS)
    }

    /// Builds a selection from picked labels.
    ///
    /// Labels must exist in the map. The number picked is not compared with
    /// the number of tickets in the cart.
    pub fn select<I, S>(&self, picked: I) -> Result<SeatSelection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seats = Vec::new();
        for label in picked {
            let label = label.as_ref().trim().to_ascii_uppercase();
            if label.is_empty() {
                continue;
            }
            if !self.contains(&label) {
                return Err(BookingError::UnknownSeat(label));
            }
            if !seats.contains(&label) {
                seats.push(label);
            }
        }
        Ok(SeatSelection { seats })
    }
}

/// The seats a user picked, in the order picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatSelection {
    seats: Vec<String>,
}

impl SeatSelection {
    pub fn seats(&self) -> &[String] {
        &self.seats
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl fmt::Display for SeatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seats.is_empty() {
            f.write_str("Not Selected")
        } else {
            f.write_str(&self.seats.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_sixty_seats() {
        let map = SeatMap::new();
        assert_eq!(map.labels().len(), 60);
        assert_eq!(map.labels().first().map(String::as_str), Some("A1"));
        assert_eq!(map.labels().last().map(String::as_str), Some("F10"));
        assert!(map.contains("C7"));
        assert!(!map.contains("G1"));
        assert!(!map.contains("A11"));
    }

    #[test]
    fn test_visible_window_capped() {
        assert_eq!(SeatMap::visible_window(0), 0);
        assert_eq!(SeatMap::visible_window(4), 4);
        assert_eq!(SeatMap::visible_window(10), 10);
        assert_eq!(SeatMap::visible_window(25), 10);
    }

    #[test]
    fn test_select_joins_labels() {
        let map = SeatMap::new();
        let selection = map.select(["A1", " b5 ", "A1", "F10"]).unwrap();
        assert_eq!(selection.seats(), ["A1", "B5", "F10"]);
        assert_eq!(selection.to_string(), "A1, B5, F10");
    }

    #[test]
    fn test_empty_selection_display() {
        let selection = SeatMap::new().select(Vec::<String>::new()).unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.to_string(), "Not Selected");
    }

    #[test]
    fn test_unknown_seat_rejected() {
        let map = SeatMap::new();
        assert!(matches!(
            map.select(["A1", "Z9"]),
            Err(BookingError::UnknownSeat(label)) if label == "Z9"
        ));
    }
}
