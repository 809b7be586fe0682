//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty formatting on stderr
//! - Optional rotated log files through tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
