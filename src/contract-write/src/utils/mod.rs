//! Conversions from user-entered values to typed call data.

pub mod coerce;
pub mod value;
