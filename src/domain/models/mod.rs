pub mod config;
pub mod employee;
pub mod hierarchy;
pub mod metrics;
pub mod report;

pub use config::{
    Config, HierarchyConfig, InputConfig, LogFormat, LoggingConfig, PolicyConfig, RotationPolicy,
};
pub use employee::{EmployeeDirectory, EmployeeRecord, RawRecord};
pub use hierarchy::{BreadthFirst, Hierarchy, Node, NodeId};
pub use metrics::{HierarchyMetrics, NodeMetrics};
pub use report::{EmployeeResult, ReportCollections};
