use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration structure for orgaudit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Salary band and depth thresholds
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Input parsing configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Hierarchy construction configuration
    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Compensation and reporting-depth policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicyConfig {
    /// A manager earning more than this multiple of the direct-report average is overpaid
    #[serde(default = "default_overpaid_ratio")]
    pub overpaid_ratio: Decimal,

    /// A manager earning less than this multiple of the direct-report average is underpaid
    #[serde(default = "default_underpaid_ratio")]
    pub underpaid_ratio: Decimal,

    /// Employees deeper than this below the root are too far from it
    #[serde(default = "default_max_depth_from_root")]
    pub max_depth_from_root: u32,
}

fn default_overpaid_ratio() -> Decimal {
    Decimal::new(15, 1)
}

fn default_underpaid_ratio() -> Decimal {
    Decimal::new(12, 1)
}

const fn default_max_depth_from_root() -> u32 {
    5
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            overpaid_ratio: default_overpaid_ratio(),
            underpaid_ratio: default_underpaid_ratio(),
            max_depth_from_root: default_max_depth_from_root(),
        }
    }
}

/// Input parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InputConfig {
    /// Field delimiter of the record file
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

const fn default_delimiter() -> char {
    ','
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

/// Hierarchy construction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HierarchyConfig {
    /// Place records on a thread pool; when false, child lists follow input order
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

const fn default_parallel() -> bool {
    true
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format for stderr output
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files (optional, stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}
