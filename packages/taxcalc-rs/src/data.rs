// src/data.rs
//! Data files compiled into the crate.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::Value;

use crate::records::RecordSet;
use crate::utils::{Result, TaxcalcError};

static PACKAGED: [(&str, &str); 2] = [
    ("records_variables.json", include_str!("../data/records_variables.json")),
    ("sample_records.csv", include_str!("../data/sample_records.csv")),
];

fn packaged(name: &str) -> Result<&'static str> {
    PACKAGED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
        .ok_or_else(|| resource_error(name, "no such packaged file"))
}

fn resource_error(name: &str, reason: impl ToString) -> TaxcalcError {
    TaxcalcError::Resource { name: name.to_string(), reason: reason.to_string() }
}

/// Names of every packaged file.
pub fn packaged_files() -> impl Iterator<Item = &'static str> {
    PACKAGED.iter().map(|(n, _)| *n)
}

/// Parse a packaged CSV file into records.
pub fn read_packaged_csv(name: &str) -> Result<RecordSet> {
    if !name.ends_with(".csv") {
        return Err(resource_error(name, "not a CSV file"));
    }
    let text = packaged(name)?;
    RecordSet::from_csv_reader(text.as_bytes()).map_err(|e| resource_error(name, e))
}

/// Parse a packaged JSON file.
pub fn read_packaged_json(name: &str) -> Result<Value> {
    if !name.ends_with(".json") {
        return Err(resource_error(name, "not a JSON file"));
    }
    let text = packaged(name)?;
    serde_json::from_str(text).map_err(|e| resource_error(name, e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Int,
    Float,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableInfo {
    #[serde(rename = "type")]
    pub var_type: VarType,
    pub desc: String,
}

/// Schema of record variables: inputs read from data files and variables
/// produced by the tax calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordVariables {
    pub read: BTreeMap<String, VariableInfo>,
    pub calc: BTreeMap<String, VariableInfo>,
}

impl RecordVariables {
    pub fn load() -> Result<Self> {
        let name = "records_variables.json";
        let value = read_packaged_json(name)?;
        serde_json::from_value(value).map_err(|e| resource_error(name, e))
    }

    pub fn input_vars(&self) -> BTreeSet<&str> {
        self.read.keys().map(String::as_str).collect()
    }

    pub fn calculated_vars(&self) -> BTreeSet<&str> {
        self.calc.keys().map(String::as_str).collect()
    }

    pub fn integer_vars(&self) -> BTreeSet<&str> {
        self.read
            .iter()
            .chain(self.calc.iter())
            .filter(|(_, info)| info.var_type == VarType::Int)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
