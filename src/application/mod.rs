//! Application layer orchestrating the booking flow.
//!
//! A [`BookingSession`](booking::BookingSession) fills the cart and persists it
//! after every change; a [`CheckoutSession`](checkout::CheckoutSession) picks it
//! up, validates payment and confirms the booking. Both talk to storage only
//! through the [`CartStore`](crate::domain::ports::CartStore) port.

pub mod booking;
pub mod checkout;
