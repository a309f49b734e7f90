// src/aggregation/partition.rs
//! Explicit grouping of record rows by label.

use std::collections::BTreeMap;

use ndarray::ArrayView1;

use crate::records::RecordSet;
use crate::utils::{Result, TaxcalcError};

/// Rows of a record set split into labelled groups.
///
/// Labels are kept in ascending order, matching a sorted group-by.
#[derive(Debug, Clone)]
pub struct Partition<L> {
    labels: Vec<L>,
    rows: Vec<Vec<usize>>,
    n_rows: usize,
}

impl<L: Ord + Clone> Partition<L> {
    /// One group per distinct label; row order inside a group is preserved.
    pub fn from_labels(labels: &[L]) -> Self {
        let mut map: BTreeMap<L, Vec<usize>> = BTreeMap::new();
        for (i, lab) in labels.iter().enumerate() {
            map.entry(lab.clone()).or_default().push(i);
        }
        let (labels_sorted, rows): (Vec<L>, Vec<Vec<usize>>) = map.into_iter().unzip();
        Partition { labels: labels_sorted, rows, n_rows: labels.len() }
    }
}

impl Partition<usize> {
    /// One group per bin index `0..n_bins`, including empty bins.
    pub fn from_bins(bins: &[usize], n_bins: usize) -> Result<Self> {
        let mut rows = vec![Vec::new(); n_bins];
        for (i, &b) in bins.iter().enumerate() {
            if b >= n_bins {
                return Err(TaxcalcError::InvalidInput(format!(
                    "row {} assigned to bin {} but only {} bins exist",
                    i, b, n_bins
                )));
            }
            rows[b].push(i);
        }
        Ok(Partition { labels: (0..n_bins).collect(), rows, n_rows: bins.len() })
    }
}

impl<L> Partition<L> {
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn n_groups(&self) -> usize {
        self.labels.len()
    }

    pub fn rows(&self, group: usize) -> &[usize] {
        &self.rows[group]
    }

    /// Views of every group over `records`, in label order.
    pub fn groups<'a>(&'a self, records: &'a RecordSet) -> Result<Vec<Group<'a>>> {
        if records.len() != self.n_rows {
            return Err(TaxcalcError::DimensionMismatch { expected: self.n_rows, got: records.len() });
        }
        Ok(self.rows.iter().map(|rows| Group { records, rows: rows.as_slice() }).collect())
    }

    /// Evaluate `f` on every group, pairing each result with its label.
    pub fn apply<T, F>(&self, records: &RecordSet, f: F) -> Result<Vec<(L, T)>>
    where
        L: Clone,
        F: Fn(&Group<'_>) -> Result<T>,
    {
        self.groups(records)?
            .iter()
            .zip(self.labels.iter())
            .map(|(g, lab)| Ok((lab.clone(), f(g)?)))
            .collect()
    }
}

/// A subset of rows of a record set.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    records: &'a RecordSet,
    rows: &'a [usize],
}

impl<'a> Group<'a> {
    pub fn new(records: &'a RecordSet, rows: &'a [usize]) -> Self {
        Group { records, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row indices into the parent record set.
    pub fn rows(&self) -> &'a [usize] {
        self.rows
    }

    pub fn weights(&self) -> ArrayView1<'a, f64> {
        self.records.weights()
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'a, f64>> {
        self.records.column(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_labels_sorts_and_groups() {
        let part = Partition::from_labels(&['b', 'a', 'b', 'a', 'c']);
        assert_eq!(part.labels(), &['a', 'b', 'c']);
        assert_eq!(part.rows(0), &[1, 3]);
        assert_eq!(part.rows(1), &[0, 2]);
        assert_eq!(part.rows(2), &[4]);
    }

    #[test]
    fn test_from_bins_keeps_empty_bins() {
        let part = Partition::from_bins(&[2, 0, 2], 4).unwrap();
        assert_eq!(part.n_groups(), 4);
        assert!(part.rows(1).is_empty());
        assert!(part.rows(3).is_empty());
        assert!(Partition::from_bins(&[5], 4).is_err());
    }

    #[test]
    fn test_groups_checks_length() {
        let recs = RecordSet::new(vec![("weight", array![1.0, 1.0])]).unwrap();
        let part = Partition::from_labels(&[1, 2, 3]);
        assert!(matches!(
            part.groups(&recs),
            Err(TaxcalcError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }
}
