use super::money::{Money, Price};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One merged ticket purchase for a single movie.
///
/// `total` always equals `price × seats`; it is recomputed on every
/// mutation instead of being accumulated.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LineItem {
    movie: String,
    seats: u32,
    price: Price,
    total: Money,
}

impl LineItem {
    pub fn new(movie: impl Into<String>, seats: u32, price: Price) -> Result<Self> {
        Ok(Self {
            movie: movie.into(),
            seats,
            price,
            total: price.times(seats)?,
        })
    }

    pub fn movie(&self) -> &str {
        &self.movie
    }

    pub fn seats(&self) -> u32 {
        self.seats
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// The stored line total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// `price × seats`, computed from scratch.
    pub fn expected_total(&self) -> Result<Money> {
        self.price.times(self.seats)
    }

    fn add_seats(&mut self, seats: u32) -> Result<()> {
        let seats = self
            .seats
            .checked_add(seats)
            .ok_or(BookingError::InvalidSeatCount)?;
        self.total = self.price.times(seats)?;
        self.seats = seats;
        Ok(())
    }
}

/// An ordered set of line items keyed by movie title.
///
/// Items keep the order in which each movie was first added. Serialized as a
/// bare JSON array of line items.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, movie: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.movie == movie)
    }

    /// Adds `seats` tickets for `movie`, merging with an existing line.
    ///
    /// The seat count is checked before the price. A movie already in the cart
    /// keeps its original unit price; `price` only applies to new lines.
    /// On any error, including an order total too large to represent, the
    /// cart is left as it was.
    pub fn add_or_merge(&mut self, movie: &str, seats: i64, price: Option<Decimal>) -> Result<()> {
        if seats <= 0 {
            return Err(BookingError::InvalidSeatCount);
        }
        let seats = u32::try_from(seats).map_err(|_| BookingError::InvalidSeatCount)?;
        let price = Price::new(price.ok_or(BookingError::InvalidPrice)?)?;

        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.movie == movie) {
            Some(existing) => existing.add_seats(seats)?,
            None => items.push(LineItem::new(movie, seats, price)?),
        }
        Money::total(items.iter().map(LineItem::total))?;
        self.items = items;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of the stored line totals.
    pub fn grand_total(&self) -> Result<Money> {
        Money::total(self.items.iter().map(LineItem::total))
    }

    /// Sum of `price × seats` over all lines, ignoring stored totals.
    pub fn recomputed_total(&self) -> Result<Money> {
        self.items
            .iter()
            .map(LineItem::expected_total)
            .try_fold(Money::ZERO, |sum, line| sum.checked_add(line?))
    }

    pub fn total_seats(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.seats)).sum()
    }
}
