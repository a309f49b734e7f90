// src/records.rs
//! Columnar filer records as produced by the tax-calculation engine.

use std::io::Read;

use ndarray::{Array1, ArrayView1};
use polars::prelude::*;

use crate::utils::{checked_weight, Result, TaxcalcError};

/// Name of the survey-weight column every record set carries.
pub const WEIGHT: &str = "weight";

/// Immutable set of filer records stored column by column.
///
/// Every column has the same length and a `weight` column is always
/// present with finite, non-negative values.
#[derive(Debug, Clone)]
pub struct RecordSet {
    names: Vec<String>,
    columns: Vec<Array1<f64>>,
    weight_idx: usize,
}

impl RecordSet {
    pub fn new<S: Into<String>>(columns: Vec<(S, Array1<f64>)>) -> Result<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (name, col) in columns {
            let name = name.into();
            if names.contains(&name) {
                return Err(TaxcalcError::InvalidInput(format!("duplicate column '{}'", name)));
            }
            names.push(name);
            values.push(col);
        }

        let weight_idx = names
            .iter()
            .position(|n| n == WEIGHT)
            .ok_or_else(|| TaxcalcError::MissingColumn(WEIGHT.into()))?;

        let n = values[weight_idx].len();
        for col in &values {
            if col.len() != n {
                return Err(TaxcalcError::DimensionMismatch { expected: n, got: col.len() });
            }
        }
        for (row, &w) in values[weight_idx].iter().enumerate() {
            checked_weight(row, w)?;
        }

        Ok(RecordSet { names, columns: values, weight_idx })
    }

    /// Build from a polars frame, keeping its numeric columns.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::new();
        for col in df.get_columns() {
            if !col.dtype().is_primitive_numeric() {
                continue;
            }
            let name = col.name().to_string();
            let cast = col.cast(&DataType::Float64)?;
            let ca = cast.f64()?;
            let values = ca
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    v.ok_or_else(|| TaxcalcError::MissingValue { column: name.clone(), row })
                })
                .collect::<Result<Vec<f64>>>()?;
            columns.push((name, Array1::from(values)));
        }
        RecordSet::new(columns)
    }

    /// Read delimited text with a header row; every field must parse as a number.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
        let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut data: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() != names.len() {
                return Err(TaxcalcError::DimensionMismatch { expected: names.len(), got: record.len() });
            }
            for (j, field) in record.iter().enumerate() {
                let v = field.parse::<f64>().map_err(|_| {
                    TaxcalcError::InvalidInput(format!(
                        "non-numeric value '{}' in column '{}', row {}",
                        field, names[j], row
                    ))
                })?;
                data[j].push(v);
            }
        }

        RecordSet::new(names.into_iter().zip(data.into_iter().map(Array1::from)).collect())
    }

    pub fn len(&self) -> usize {
        self.columns[self.weight_idx].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].view())
            .ok_or_else(|| TaxcalcError::MissingColumn(name.into()))
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.columns[self.weight_idx].view()
    }

    /// Add or replace a column, returning the extended set.
    pub fn with_column(mut self, name: &str, values: Array1<f64>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(TaxcalcError::DimensionMismatch { expected: self.len(), got: values.len() });
        }
        match self.names.iter().position(|n| n == name) {
            Some(i) => {
                if i == self.weight_idx {
                    for (row, &w) in values.iter().enumerate() {
                        checked_weight(row, w)?;
                    }
                }
                self.columns[i] = values;
            }
            None => {
                self.names.push(name.to_string());
                self.columns.push(values);
            }
        }
        Ok(self)
    }

    /// Project onto the named columns; `weight` is always kept.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let mut columns: Vec<(String, Array1<f64>)> = Vec::with_capacity(names.len() + 1);
        for &name in names {
            if columns.iter().any(|(n, _)| n == name) {
                continue;
            }
            columns.push((name.to_string(), self.column(name)?.to_owned()));
        }
        if !names.contains(&WEIGHT) {
            columns.push((WEIGHT.to_string(), self.weights().to_owned()));
        }
        RecordSet::new(columns)
    }
}
