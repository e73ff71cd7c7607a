//! Wrap Estimator library
//!
//! Quote line-item pricing and margin solving for vehicle, box truck,
//! trailer, marine, PPF and generic graphics jobs. Used by the CLI and
//! the demo binary, and exposed for tests.

pub mod catalog;
pub mod core;
pub mod geometry;
pub mod pricing;
pub mod quote;
