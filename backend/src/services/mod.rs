//! Business logic services
//!
//! Services wrap the shared engine with logging, metrics and
//! request-level limits.

pub mod targets;

pub use targets::TargetsService;
