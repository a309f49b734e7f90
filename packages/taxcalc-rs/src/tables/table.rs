// src/tables/table.rs
//! Finished table: named rows, catalog columns and an `ALL` totals row.

use std::io::Write;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use polars::prelude::*;
use serde::{Serialize, Serializer};

use super::catalog::ColumnSpec;
use super::format::TableFormat;
use crate::utils::{Result, TaxcalcError};

/// Name of the grand-total row.
pub const ALL_ROW: &str = "ALL";

#[derive(Debug, Clone)]
pub struct Table {
    index: Vec<String>,
    columns: Vec<ColumnSpec>,
    values: Array2<f64>,
}

impl Table {
    pub(crate) fn new(index: Vec<String>, columns: Vec<ColumnSpec>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != index.len() {
            return Err(TaxcalcError::DimensionMismatch { expected: index.len(), got: values.nrows() });
        }
        if values.ncols() != columns.len() {
            return Err(TaxcalcError::DimensionMismatch { expected: columns.len(), got: values.ncols() });
        }
        Ok(Table { index, columns, values })
    }

    /// Row names, bins first and `ALL` last.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|j| self.values.index_axis(Axis(1), j))
    }

    pub fn row(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.index
            .iter()
            .position(|r| r == name)
            .map(|i| self.values.index_axis(Axis(0), i))
    }

    pub fn value(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.index.iter().position(|r| r == row)?;
        let j = self.columns.iter().position(|c| c.name == column)?;
        Some(self.values[[i, j]])
    }

    /// The `ALL` row.
    pub fn totals(&self) -> ArrayView1<'_, f64> {
        self.values.index_axis(Axis(0), self.index.len() - 1)
    }

    /// Polars frame with a leading `table_row` column holding the row names.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut cols: Vec<Column> = Vec::with_capacity(self.columns.len() + 1);
        cols.push(Column::new("table_row".into(), self.index.clone()));
        for (j, spec) in self.columns.iter().enumerate() {
            let values: Vec<f64> = self.values.index_axis(Axis(1), j).to_vec();
            cols.push(Column::new(spec.name.into(), values));
        }
        Ok(DataFrame::new(cols)?)
    }

    /// Write the table as delimited text, one line per row plus a header.
    pub fn write_delimited<W: Write>(&self, writer: W, format: &TableFormat) -> Result<()> {
        if !format.delimiter.is_ascii() {
            return Err(TaxcalcError::InvalidInput(format!(
                "delimiter '{}' is not an ASCII character",
                format.delimiter
            )));
        }
        let mut wtr = csv::WriterBuilder::new().delimiter(format.delimiter as u8).from_writer(writer);

        let mut header = vec![String::new()];
        header.extend(
            self.columns
                .iter()
                .map(|c| (if format.use_labels { c.label } else { c.name }).to_string()),
        );
        wtr.write_record(&header)?;

        for (name, row) in self.index.iter().zip(self.values.rows()) {
            let mut fields = vec![name.clone()];
            fields.extend(row.iter().zip(&self.columns).map(|(&v, c)| format.render(v, c.kind)));
            wtr.write_record(&fields)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct TableRepr<'a> {
    index: &'a [String],
    columns: &'a [ColumnSpec],
    values: Vec<Vec<f64>>,
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TableRepr {
            index: &self.index,
            columns: &self.columns,
            values: self.values.rows().into_iter().map(|r| r.to_vec()).collect(),
        }
        .serialize(serializer)
    }
}
