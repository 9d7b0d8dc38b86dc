use super::cart::Cart;
use super::money::Money;
use super::seating::SeatSelection;
use rand::Rng;
use std::fmt;

const REFERENCE_LEN: usize = 8;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A random booking code of 8 upper-case base-36 characters.
///
/// Codes are not checked for collisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..REFERENCE_LEN)
            .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user sees after a successful payment. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub movies: String,
    pub seats: String,
    pub grand_total: Money,
    pub reference: BookingReference,
}

impl BookingConfirmation {
    pub fn new(
        cart: &Cart,
        seats: &SeatSelection,
        grand_total: Money,
        reference: BookingReference,
    ) -> Self {
        let movies = cart
            .items()
            .iter()
            .map(|item| format!("{} ({} tickets)", item.movie(), item.seats()))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            movies,
            seats: seats.to_string(),
            grand_total,
            reference,
        }
    }
}

impl fmt::Display for BookingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Thank You for Your Purchase!")?;
        writeln!(f, "Movies: {}", self.movies)?;
        writeln!(f, "Seats: {}", self.seats)?;
        writeln!(f, "Total: {}", self.grand_total)?;
        write!(f, "Booking Reference: {}", self.reference)
    }
}
