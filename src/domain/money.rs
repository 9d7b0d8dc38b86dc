use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A monetary sum, such as a line total or a cart's grand total.
///
/// Serialized as a plain JSON number so stored carts keep the
/// `{ movie, seats, price, total }` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

/// A non-negative unit price for one seat.
///
/// Deserialization goes through [`Price::new`], so a stored cart cannot carry
/// a negative price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BookingError::InvalidPrice)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The cost of `seats` seats at this price.
    pub fn times(&self, seats: u32) -> Result<Money> {
        self.0
            .checked_mul(Decimal::from(seats))
            .map(Money)
            .ok_or(BookingError::AmountOverflow)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Price::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = BookingError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(BookingError::AmountOverflow)
    }

    /// Sums `amounts`, failing instead of wrapping or panicking on overflow.
    pub fn total<I: IntoIterator<Item = Self>>(amounts: I) -> Result<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

// Rendered the way the booking pages show amounts: "$12.50".
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Money(self.0), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_validation() {
        assert!(Price::new(dec!(10.0)).is_ok());
        assert!(Price::new(dec!(0)).is_ok());
        assert!(matches!(
            Price::new(dec!(-0.01)),
            Err(BookingError::InvalidPrice)
        ));
    }

    #[test]
    fn test_price_times_seats() {
        let price = Price::new(dec!(12.5)).unwrap();
        assert_eq!(price.times(3).unwrap(), Money::new(dec!(37.5)));
        assert_eq!(price.times(0).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let price = Price::new(Decimal::MAX).unwrap();
        assert!(matches!(price.times(2), Err(BookingError::AmountOverflow)));
        assert_eq!(price.times(1).unwrap(), Money::new(Decimal::MAX));

        let big = Money::new(Decimal::MAX);
        assert!(matches!(
            Money::total([big, Money::new(dec!(1))]),
            Err(BookingError::AmountOverflow)
        ));
    }

    #[test]
    fn test_money_sum_and_display() {
        let total = Money::total([Money::new(dec!(10)), Money::new(dec!(2.5))]).unwrap();
        assert_eq!(total, Money::new(dec!(12.5)));
        assert_eq!(total.to_string(), "$12.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::new(dec!(9.5)).unwrap()).unwrap();
        assert_eq!(json, "9.5");
        let money: Money = serde_json::from_str("50").unwrap();
        assert_eq!(money, Money::new(dec!(50)));
    }

    #[test]
    fn test_deserialize_rejects_negative_price() {
        let price: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(price.value(), dec!(12.5));
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
