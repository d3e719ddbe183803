//! Entity to model mappers
//!
//! Conversions from database rows (models) into domain entities (market-core).
//! Products go through `TryFrom` since a stored price is re-validated.

mod catalog;
mod reaction;
mod user;
