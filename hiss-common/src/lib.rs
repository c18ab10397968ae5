//! # hiss Common Library
//!
//! Shared code for the hiss workspace:
//! - Error types
//! - TOML configuration loading and config file resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
