use crate::domain::payment::PaymentField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Please enter 1 or more seats.")]
    InvalidSeatCount,
    #[error("Please enter a valid ticket price.")]
    InvalidPrice,
    #[error("The order total is too large.")]
    AmountOverflow,
    #[error("Cart is empty.")]
    EmptyFavoriteSave,
    #[error("No favorite cart found!")]
    NoFavoriteToApply,
    #[error("Please enter a valid 16-digit card number.")]
    InvalidCardNumber,
    #[error("Please enter the expiry date.")]
    MissingExpiry,
    #[error("Please enter the expiry date as YYYY-MM.")]
    InvalidExpiryFormat,
    #[error("Expiry date cannot be in the past.")]
    PastExpiry,
    #[error("Please enter a valid 3-digit CVV.")]
    InvalidCvv,
    #[error("Your cart is empty. Please add tickets first.")]
    EmptyCartCheckout,
    #[error("Seat {0} does not exist.")]
    UnknownSeat(String),
    #[error("This booking has already been confirmed.")]
    SessionClosed,
    #[error("Malformed action: {0}")]
    MalformedAction(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    InternalError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Whether the error is caused by user input rather than by the environment.
    ///
    /// Validation errors never change any state and are surfaced verbatim.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Csv(_) | Self::Io(_) | Self::Serialization(_) | Self::InternalError(_)
        )
    }

    /// The payment field that should receive focus after this error, if any.
    pub fn field(&self) -> Option<PaymentField> {
        match self {
            Self::InvalidCardNumber => Some(PaymentField::CardNumber),
            Self::MissingExpiry | Self::InvalidExpiryFormat | Self::PastExpiry => {
                Some(PaymentField::Expiry)
            }
            Self::InvalidCvv => Some(PaymentField::Cvv),
            _ => None,
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for BookingError {
    fn from(e: rocksdb::Error) -> Self {
        BookingError::InternalError(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
