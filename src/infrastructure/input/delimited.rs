//! Delimited text record source
//!
//! One header line names the fields in any order, followed by one line per
//! employee. Fields are split on the delimiter without quoting or escaping.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::employee::fields;
use crate::domain::models::RawRecord;
use crate::domain::ports::RecordSource;

/// Split delimited text into raw records.
///
/// Rows shorter than the header are padded with empty values (a trailing
/// empty manager column is common); rows longer than the header are rejected
/// since quoting is not supported. An input without any line yields no rows.
pub fn parse_delimited(content: &str, delimiter: char) -> DomainResult<Vec<RawRecord>> {
    let mut lines = content.lines().enumerate();

    let Some((_, header_line)) = lines.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_line.split(delimiter).map(fields::normalize).collect();
    if let Some(missing) = fields::REQUIRED
        .iter()
        .find(|required| !headers.iter().any(|header| header == *required))
    {
        return Err(DomainError::invalid_record(
            1,
            format!("header is missing required column '{missing}'"),
        ));
    }

    let mut records = Vec::new();
    for (index, line) in lines {
        let line_number = index + 1;
        let values: Vec<&str> = line.split(delimiter).collect();

        if values.len() > headers.len() {
            return Err(DomainError::invalid_record(
                line_number,
                format!(
                    "expected at most {} fields, found {}",
                    headers.len(),
                    values.len()
                ),
            ));
        }

        let mut record = RawRecord::new(line_number);
        for (position, header) in headers.iter().enumerate() {
            let value = values.get(position).map_or("", |value| value.trim());
            record.fields.insert(header.clone(), value.to_string());
        }
        records.push(record);
    }

    Ok(records)
}

/// Record source backed by a delimited text file
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    path: PathBuf,
    delimiter: char,
}

impl DelimitedFileSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for DelimitedFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_records(&self) -> DomainResult<Vec<RawRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| DomainError::SourceRead {
            path: self.path.clone(),
            source,
        })?;

        let records = parse_delimited(&content, self.delimiter)?;
        debug!(rows = records.len(), "records read");
        Ok(records)
    }
}
