//! Shared configuration and error types for the almanac crates.

pub mod config;
pub mod error;
