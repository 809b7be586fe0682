use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::display::{employee_table, CommandOutput};
use crate::cli::types::Cli;
use crate::domain::models::{Config, EmployeeResult, ReportCollections};
use crate::infrastructure::input::DelimitedFileSource;
use crate::services::{HierarchyBuilder, OrgReportService};

/// Rendered report sections
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub far_from_root: Vec<Arc<EmployeeResult>>,
    pub overpaid: Vec<Arc<EmployeeResult>>,
    pub underpaid: Vec<Arc<EmployeeResult>>,
}

impl From<ReportCollections> for ReportOutput {
    fn from(report: ReportCollections) -> Self {
        Self {
            far_from_root: report.far_from_root().to_vec(),
            overpaid: report.overpaid().to_vec(),
            underpaid: report.underpaid().to_vec(),
        }
    }
}

impl ReportOutput {
    fn far_from_root_section(&self) -> String {
        let mut lines = vec![format!(
            "Total employees too far from root: {}",
            console::style(self.far_from_root.len()).bold()
        )];

        if !self.far_from_root.is_empty() {
            let table = employee_table("Layers to root", &self.far_from_root, |e| {
                e.layers_to_root.to_string()
            });
            lines.push("List of employees too far from root:".to_string());
            lines.push(table.to_string());
        }

        lines.join("\n")
    }

    fn pay_section(situation: &str, employees: &[Arc<EmployeeResult>]) -> String {
        let mut lines = vec![format!(
            "Total {situation} managers: {}",
            console::style(employees.len()).bold()
        )];

        if !employees.is_empty() {
            let table = employee_table("Difference from expected pay", employees, |e| {
                e.deviation_from_expected_pay.to_string()
            });
            lines.push(format!("List of {situation} managers:"));
            lines.push(table.to_string());
        }

        lines.join("\n")
    }
}

impl CommandOutput for ReportOutput {
    fn to_human(&self) -> String {
        [
            self.far_from_root_section(),
            Self::pay_section("overpaid", &self.overpaid),
            Self::pay_section("underpaid", &self.underpaid),
        ]
        .join("\n\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Handle the report command
///
/// The pipeline is CPU-bound (and fans out on rayon), so it runs on the
/// blocking pool rather than on a runtime worker.
pub async fn execute(cli: &Cli, config: Config) -> Result<ReportOutput> {
    let delimiter = cli.delimiter.unwrap_or(config.input.delimiter);
    let parallel = config.hierarchy.parallel && !cli.sequential;
    let source = DelimitedFileSource::new(&cli.input, delimiter);
    let service = OrgReportService::new(config.policy)
        .with_builder(HierarchyBuilder::with_parallelism(parallel));

    let report = tokio::task::spawn_blocking(move || service.generate(&source))
        .await
        .context("Report task panicked")?
        .context("Failed to generate organization report")?;

    Ok(report.into())
}
