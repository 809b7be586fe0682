pub mod hierarchy_builder;
pub mod org_report_service;
pub mod policy_evaluator;
pub mod record_validator;
pub mod report_traversal;

pub use hierarchy_builder::HierarchyBuilder;
pub use org_report_service::OrgReportService;
pub use policy_evaluator::{PolicyEvaluator, PolicyVerdict};
pub use record_validator::RecordValidator;
pub use report_traversal::ReportTraversal;
