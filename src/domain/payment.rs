use crate::error::{BookingError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// ASCII classes on purpose: `\d` in `regex` also matches non-ASCII digits.
static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("valid pattern"));
static CVV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("valid pattern"));
static EXPIRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})$").expect("valid pattern"));

/// The payment form fields, used as a focus hint after a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    CardNumber,
    Expiry,
    Cvv,
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentField::CardNumber => "card number",
            PaymentField::Expiry => "expiry",
            PaymentField::Cvv => "cvv",
        };
        f.write_str(name)
    }
}

/// A card expiry month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expiry {
    year: i32,
    month: u32,
}

impl Expiry {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(BookingError::InvalidExpiryFormat)
        }
    }

    /// Parses a `YYYY-MM` value.
    pub fn parse(value: &str) -> Result<Self> {
        let caps = EXPIRY
            .captures(value.trim())
            .ok_or(BookingError::InvalidExpiryFormat)?;
        let year = caps[1]
            .parse()
            .map_err(|_| BookingError::InvalidExpiryFormat)?;
        let month = caps[2]
            .parse()
            .map_err(|_| BookingError::InvalidExpiryFormat)?;
        Self::new(year, month)
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether the card has expired as of `today`. Day and time are ignored.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        *self < Self::of(today)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Payment details as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSubmission {
    pub card_number: String,
    pub expiry: Option<String>,
    pub cvv: String,
}

impl PaymentSubmission {
    pub fn new(
        card_number: impl Into<String>,
        expiry: Option<impl Into<String>>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry: expiry.map(Into::into),
            cvv: cvv.into(),
        }
    }

    /// Checks card number, expiry and CVV in that order.
    ///
    /// Stops at the first failing field; later fields are not examined.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if !CARD_NUMBER.is_match(self.card_number.trim()) {
            return Err(BookingError::InvalidCardNumber);
        }

        let expiry = match self.expiry.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Expiry::parse(value)?,
            _ => return Err(BookingError::MissingExpiry),
        };
        if expiry.is_past(today) {
            return Err(BookingError::PastExpiry);
        }

        if !CVV.is_match(self.cvv.trim()) {
            return Err(BookingError::InvalidCvv);
        }

        Ok(())
    }
}
