//! Domain types for ticket booking: carts, money, seats, payment checks and
//! the persistence ports the application layer depends on.

pub mod cart;
pub mod confirmation;
pub mod money;
pub mod payment;
pub mod ports;
pub mod seating;
