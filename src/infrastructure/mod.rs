//! Infrastructure layer module
//!
//! This module contains the adapters around the core pipeline:
//! - Delimited file record source
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod input;
pub mod logging;
