//! Employee tables for the report sections.

use std::sync::Arc;

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

use crate::domain::models::EmployeeResult;

/// Columns shared by every report table, before the section-specific one
const IDENTITY_COLUMNS: [&str; 3] = ["Id", "First name", "Last name"];

/// Borderless table with upper-cased, left-aligned headers.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// One row per employee: identity columns plus `value_header` filled by `value`.
pub fn employee_table(
    value_header: &str,
    employees: &[Arc<EmployeeResult>],
    value: impl Fn(&EmployeeResult) -> String,
) -> Table {
    let mut headers = IDENTITY_COLUMNS.to_vec();
    headers.push(value_header);

    let mut table = list_table(&headers);
    for employee in employees {
        table.add_row(vec![
            Cell::new(&employee.id),
            Cell::new(&employee.first_name),
            Cell::new(&employee.last_name),
            Cell::new(value(employee)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
