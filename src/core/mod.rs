//! Core module - shared infrastructure for Stagekit
//!
//! This module contains foundational types, configuration, and error handling
//! used throughout the application.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, StagehandConfig};
pub use error::{Result, StagekitError};
pub use types::*;
