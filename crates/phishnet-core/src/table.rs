//! In-memory tables loaded from and written to CSV.
//!
//! [`RawTable`] holds text cells exactly as read. [`NumericTable`] is the
//! classifier-facing view: named numeric columns plus a label vector.

use anyhow::{Context, Result};
use std::path::Path;

use crate::error::PipelineError;
use crate::label::Label;

/// Name of the label column in every labeled file.
pub const LABEL_COLUMN: &str = "label";

/// Text table with a header row. Short rows read as empty trailing cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a CSV file whose first record is the header row.
    pub fn read_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("read header of {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.with_context(|| format!("read {}", path.display()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of `name`, or a schema error listing the available columns.
    pub fn require_column(&self, name: &str) -> Result<usize, PipelineError> {
        self.column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Cell text; missing cells are the empty string.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, col))
    }
}

/// Named numeric feature columns plus the label column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<Label>,
}

impl NumericTable {
    /// Separates the label column and keeps only the columns whose every cell
    /// parses as a number. Non-numeric columns are dropped with a warning.
    pub fn from_raw(raw: &RawTable) -> Result<Self> {
        let label_col = raw.require_column(LABEL_COLUMN)?;

        let labels = raw
            .column(label_col)
            .enumerate()
            .map(|(row, value)| {
                Label::parse(value).ok_or_else(|| PipelineError::InvalidLabel {
                    row,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns = Vec::new();
        let mut values: Vec<Vec<f64>> = Vec::new();
        for (idx, name) in raw.headers().iter().enumerate() {
            if idx == label_col {
                continue;
            }
            let parsed: Option<Vec<f64>> = raw
                .column(idx)
                .map(|cell| cell.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
                .collect();
            match parsed {
                Some(col) => {
                    columns.push(name.clone());
                    values.push(col);
                }
                None => tracing::warn!(column = %name, "dropping non-numeric column"),
            }
        }

        let rows = (0..raw.len())
            .map(|r| values.iter().map(|col| col[r]).collect())
            .collect();

        Ok(Self {
            columns,
            rows,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows per class, indexed by [`Label::index`].
    pub fn label_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for label in &self.labels {
            counts[label.index()] += 1;
        }
        counts
    }

    /// Reorders (and narrows) the table to exactly `names`, in that order.
    pub fn select(&self, names: &[String]) -> Result<Self, PipelineError> {
        let indices = names
            .iter()
            .map(|name| {
                self.columns
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| PipelineError::MissingColumn {
                        column: name.clone(),
                        available: self.columns.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            columns: names.to_vec(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i]).collect())
                .collect(),
            labels: self.labels.clone(),
        })
    }

    /// Rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Writes feature columns followed by `label`.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let mut writer =
            csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;

        let mut header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        header.push(LABEL_COLUMN);
        writer.write_record(&header)?;

        for (row, label) in self.rows.iter().zip(&self.labels) {
            let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            record.push(label.as_u8().to_string());
            writer.write_record(&record)?;
        }
        writer
            .flush()
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
