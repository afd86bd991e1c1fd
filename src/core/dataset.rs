use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ordered_float::OrderedFloat;
use serde::Deserialize;
use tracing::debug;

use crate::core::types::{Dimension, NumericColumn, Record};
use crate::error::{DashboardError, DashboardResult};

/// Read-only, in-memory tips dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

/// Row shape of the conventional tips CSV layout before category parsing.
#[derive(Debug, Deserialize)]
struct CsvRow {
    total_bill: f64,
    tip: f64,
    sex: String,
    smoker: String,
    day: String,
    time: String,
    size: u32,
}

impl CsvRow {
    fn into_record(self, row: usize) -> DashboardResult<Record> {
        let category_error =
            |reason: String| DashboardError::InvalidData(format!("row {row}: {reason}"));
        Ok(Record {
            total_bill: self.total_bill,
            tip: self.tip,
            sex: self.sex.parse().map_err(category_error)?,
            smoker: self.smoker.parse().map_err(category_error)?,
            day: self.day.parse().map_err(category_error)?,
            time: self.time.parse().map_err(category_error)?,
            size: self.size,
        })
    }
}

impl Dataset {
    /// Builds a dataset, rejecting rows that break record invariants.
    pub fn from_records(records: Vec<Record>) -> DashboardResult<Self> {
        for (row, record) in records.iter().enumerate() {
            validate_record(row, record)?;
        }
        Ok(Self { records })
    }

    /// Reads `total_bill,tip,sex,smoker,day,time,size` rows with a header line.
    pub fn from_csv_reader<R: Read>(reader: R) -> DashboardResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (row, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let csv_row = result
                .map_err(|e| DashboardError::InvalidData(format!("row {row}: {e}")))?;
            records.push(csv_row.into_record(row)?);
        }

        debug!(rows = records.len(), "loaded tips csv");
        Self::from_records(records)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file))
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of one numeric column in dataset order.
    #[must_use]
    pub fn column(&self, column: NumericColumn) -> Vec<f64> {
        self.records.iter().map(|record| record.value(column)).collect()
    }

    /// Rows whose category in `dimension` sits at `category_index`, in dataset order.
    pub fn rows_in_category(
        &self,
        dimension: Dimension,
        category_index: usize,
    ) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(move |record| record.category_index(dimension) == category_index)
    }

    /// Smallest and largest `total_bill`, or `None` for an empty dataset.
    #[must_use]
    pub fn total_bill_range(&self) -> Option<(f64, f64)> {
        let min = self
            .records
            .iter()
            .map(|record| OrderedFloat(record.total_bill))
            .min()?;
        let max = self
            .records
            .iter()
            .map(|record| OrderedFloat(record.total_bill))
            .max()?;
        Some((min.into_inner(), max.into_inner()))
    }

    /// Distinct party sizes in ascending order.
    #[must_use]
    pub fn distinct_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.records.iter().map(|record| record.size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

fn validate_record(row: usize, record: &Record) -> DashboardResult<()> {
    for (name, value) in [("total_bill", record.total_bill), ("tip", record.tip)] {
        if !value.is_finite() || value < 0.0 {
            return Err(DashboardError::InvalidData(format!(
                "row {row}: `{name}` must be finite and >= 0"
            )));
        }
    }
    if record.size < 1 {
        return Err(DashboardError::InvalidData(format!(
            "row {row}: `size` must be >= 1"
        )));
    }
    Ok(())
}
