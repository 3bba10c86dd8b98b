//! Business layer for the repair shop booking backend.
//! - Separates catalog and booking logic from HTTP concerns.
//! - Talks to persistence through repository traits, with mongo-backed
//!   implementations and in-memory mocks for tests.
//! - Provides clear error types and documented interfaces.

pub mod bookings;
pub mod catalog;
pub mod errors;
pub mod token;
