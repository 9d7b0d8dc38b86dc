use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Add,
    Clear,
    SaveFavorite,
    ApplyFavorite,
}

/// One raw CSV row: `action,movie,seats,price`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ActionRecord {
    pub action: ActionType,
    pub movie: Option<String>,
    pub seats: Option<i64>,
    pub price: Option<Decimal>,
}

/// A user action in a booking session, with its input already resolved.
#[derive(Debug, PartialEq, Clone)]
pub enum BookingAction {
    Add {
        movie: String,
        seats: i64,
        price: Option<Decimal>,
    },
    Clear,
    SaveFavorite,
    ApplyFavorite,
}

impl TryFrom<ActionRecord> for BookingAction {
    type Error = BookingError;

    fn try_from(record: ActionRecord) -> Result<Self> {
        match record.action {
            ActionType::Add => {
                let movie = record
                    .movie
                    .filter(|m| !m.is_empty())
                    .ok_or_else(|| BookingError::MalformedAction("add needs a movie".into()))?;
                Ok(BookingAction::Add {
                    movie,
                    // An empty seat field behaves like the untouched "0" input.
                    seats: record.seats.unwrap_or(0),
                    price: record.price,
                })
            }
            ActionType::Clear => Ok(BookingAction::Clear),
            ActionType::SaveFavorite => Ok(BookingAction::SaveFavorite),
            ActionType::ApplyFavorite => Ok(BookingAction::ApplyFavorite),
        }
    }
}

/// Reads booking actions from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// so `clear` rows may omit the trailing columns.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and resolves actions, one result per row.
    pub fn actions(self) -> impl Iterator<Item = Result<BookingAction>> {
        self.reader
            .into_deserialize::<ActionRecord>()
            .map(|result| BookingAction::try_from(result?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, movie, seats, price\n\
                    add, Movie X, 2, 10.00\n\
                    save-favorite\n\
                    clear,,,\n\
                    apply-favorite";
        let actions: Vec<BookingAction> = ActionReader::new(data.as_bytes())
            .actions()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            actions,
            vec![
                BookingAction::Add {
                    movie: "Movie X".into(),
                    seats: 2,
                    price: Some(dec!(10.00)),
                },
                BookingAction::SaveFavorite,
                BookingAction::Clear,
                BookingAction::ApplyFavorite,
            ]
        );
    }

    #[test]
    fn test_missing_seats_and_price() {
        let data = "action,movie,seats,price\nadd,Movie X,,";
        let actions: Vec<Result<BookingAction>> =
            ActionReader::new(data.as_bytes()).actions().collect();
        assert_eq!(
            actions[0].as_ref().unwrap(),
            &BookingAction::Add {
                movie: "Movie X".into(),
                seats: 0,
                price: None,
            }
        );
    }

    #[test]
    fn test_reader_malformed_lines() {
        let data = "action,movie,seats,price\nrefund,Movie X,1,1\nadd,,1,1\nadd,Movie X,two,1";
        let results: Vec<Result<BookingAction>> =
            ActionReader::new(data.as_bytes()).actions().collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Err(BookingError::Csv(_))));
        assert!(matches!(results[1], Err(BookingError::MalformedAction(_))));
        assert!(matches!(results[2], Err(BookingError::Csv(_))));
    }
}
