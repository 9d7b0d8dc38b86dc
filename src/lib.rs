//! Movie-ticket booking: a cart that merges ticket purchases by movie, and a
//! checkout that validates payment details before confirming the booking.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
