//! Core types for the investment research tool layer
//!
//! This crate defines the error type shared across the workspace and the
//! uniform response envelope every public tool operation returns.

pub mod envelope;
pub mod error;

pub use envelope::Status;
pub use error::{Error, Result};
