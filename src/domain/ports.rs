use super::cart::Cart;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::fmt;

/// The keys under which carts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartSlot {
    /// The cart of the current booking, handed over to checkout.
    Live,
    /// A user-saved snapshot, never cleared by the booking flow.
    Favorite,
}

impl CartSlot {
    pub fn key(&self) -> &'static str {
        match self {
            CartSlot::Live => "cart",
            CartSlot::Favorite => "favoriteCart",
        }
    }
}

impl fmt::Display for CartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Key-value persistence for carts. Values are JSON arrays of line items.
///
/// Writes replace the previous value wholesale; concurrent writers are not
/// coordinated and the last write wins.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load(&self, slot: CartSlot) -> Result<Option<Cart>>;
    async fn save(&self, slot: CartSlot, cart: &Cart) -> Result<()>;
    async fn remove(&self, slot: CartSlot) -> Result<()>;
}

pub type CartStoreBox = Box<dyn CartStore>;
pub type CartStoreFactory = Box<dyn Fn() -> CartStoreBox + Send + Sync>;

/// Source of the current date, used for card expiry checks.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock in the local time zone, so card expiry follows the
/// user's calendar month.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
