// tests/tables.rs
//! Distribution and difference tables built from the packaged filer sample.

use approx::assert_relative_eq;
use ndarray::Array1;

use taxcalc_utils::tables::{DIFF_TABLE_COLUMNS, DIST_TABLE_COLUMNS};
use taxcalc_utils::{
    bootstrap_se_ci, create_difference_table, create_distribution_table, nonsmall_diffs, read_packaged_csv, DEFAULT_SMALL,
    BinScheme, RecordSet, Table, TableFormat,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn baseline() -> RecordSet {
    read_packaged_csv("sample_records.csv").unwrap()
}

/// Raise income tax by 5% for filers with AGI above 200K and cut it by 300
/// for everyone else with a positive liability.
fn reform(base: &RecordSet) -> RecordSet {
    let agi = base.column("c00100").unwrap();
    let iitax = base.column("iitax").unwrap();
    let new_iitax: Array1<f64> = agi
        .iter()
        .zip(iitax.iter())
        .map(|(&a, &t)| {
            if a > 200_000.0 {
                t * 1.05
            } else if t > 300.0 {
                t - 300.0
            } else {
                t
            }
        })
        .collect();
    let combined = &new_iitax + &base.column("payrolltax").unwrap();
    let aftertax = &base.column("expanded_income").unwrap() - &combined;
    base.clone()
        .with_column("iitax", new_iitax)
        .unwrap()
        .with_column("combined", combined)
        .unwrap()
        .with_column("aftertax_income", aftertax)
        .unwrap()
}

fn check_all_row_sums(table: &Table, additive: &[&str]) {
    let n_bins = table.n_rows() - 1;
    for &name in additive {
        let col = table.column(name).unwrap();
        let bin_sum: f64 = col.iter().take(n_bins).sum();
        assert_relative_eq!(col[n_bins], bin_sum, epsilon = 1e-6, max_relative = 1e-12);
    }
}

#[test]
fn distribution_tables_for_every_scheme() {
    init_logging();
    let recs = baseline();
    let schemes = [
        (BinScheme::WeightedDeciles, 15),
        (BinScheme::StandardIncomeBins, 14),
        (BinScheme::SoiAgiBins, 20),
        (BinScheme::Quantiles { num_quantiles: 5, weight_by_income_measure: true }, 6),
    ];
    let names: Vec<&str> = DIST_TABLE_COLUMNS.iter().map(|c| c.spec.name).collect();

    for (scheme, n_rows) in schemes.iter() {
        let table = create_distribution_table(&recs, scheme, "expanded_income").unwrap();
        assert_eq!(table.n_rows(), *n_rows, "{:?}", scheme);
        assert_eq!(table.index().last().map(String::as_str), Some("ALL"));
        assert_relative_eq!(table.value("ALL", "weight").unwrap(), 3297.5, max_relative = 1e-12);
        check_all_row_sums(&table, &names);
    }
}

#[test]
fn distribution_totals_match_whole_sample() {
    let recs = baseline();
    let table = create_distribution_table(&recs, &BinScheme::StandardIncomeBins, "expanded_income").unwrap();
    let w = recs.weights();
    for var in ["iitax", "combined", "aftertax_income"] {
        let expected: f64 = recs.column(var).unwrap().iter().zip(w.iter()).map(|(v, w)| v * w).sum();
        assert_relative_eq!(table.value("ALL", var).unwrap(), expected, max_relative = 1e-9);
    }
}

#[test]
fn difference_table_against_reform() {
    init_logging();
    let base = baseline();
    let refm = reform(&base);

    for compared in ["iitax", "combined"] {
        let table = create_difference_table(&base, &refm, &BinScheme::WeightedDeciles, compared).unwrap();
        assert_eq!(table.n_rows(), 15);
        check_all_row_sums(&table, &["count", "tax_cut", "tax_inc", "tot_change"]);

        let expected: f64 = refm
            .column(compared)
            .unwrap()
            .iter()
            .zip(base.column(compared).unwrap().iter())
            .zip(base.weights().iter())
            .map(|((r, b), w)| (r - b) * w)
            .sum();
        assert_relative_eq!(table.value("ALL", "tot_change").unwrap(), expected, max_relative = 1e-9);
        assert_relative_eq!(table.value("ALL", "share_of_change").unwrap(), 100.0, max_relative = 1e-12);

        let count = table.value("ALL", "count").unwrap();
        let perc_cut = table.value("ALL", "perc_cut").unwrap();
        assert_relative_eq!(perc_cut, 100.0 * table.value("ALL", "tax_cut").unwrap() / count);
    }
}

#[test]
fn zero_income_bin_reports_missing_change() {
    let base = baseline();
    let refm = reform(&base);
    let table = create_difference_table(&base, &refm, &BinScheme::StandardIncomeBins, "iitax").unwrap();

    // the only zero-income filer has zero after-tax income
    assert!(table.value("=$0K", "pc_aftertaxinc").unwrap().is_nan());
    // the 1.2M and 2.5M filers pay 5% more income tax
    assert!(table.value(">$1000K", "pc_aftertaxinc").unwrap() < 0.0);

    let mut out = Vec::new();
    table.write_delimited(&mut out, &TableFormat::display()).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 15);
    assert!(lines[2].starts_with("=$0K,"));
    assert!(lines[2].ends_with(",nan"));
    assert_eq!(
        lines[0].split(',').count(),
        DIFF_TABLE_COLUMNS.len() + 1,
        "header should have one field per column plus the row name"
    );

    // writing twice yields identical text
    let mut again = Vec::new();
    table.write_delimited(&mut again, &TableFormat::display()).unwrap();
    let again: Vec<String> = String::from_utf8(again).unwrap().lines().map(str::to_string).collect();
    assert!(!nonsmall_diffs(&lines, &again, DEFAULT_SMALL));
}

#[test]
fn bootstrap_precision_of_tax_increase_count() {
    let base = baseline();
    let refm = reform(&base);
    let weights = base.weights();
    let data: Vec<f64> = refm
        .column("iitax")
        .unwrap()
        .iter()
        .zip(base.column("iitax").unwrap().iter())
        .zip(weights.iter())
        .map(|((r, b), &w)| if r - b > 0.001 { w } else { 0.0 })
        .collect();
    let point: f64 = data.iter().sum();

    let res = bootstrap_se_ci(&data, 123_456_789, 500, |s| s.iter().sum(), 0.025).unwrap();
    assert!(res.se > 0.0);
    assert!(res.cilo <= point && point <= res.cihi);

    let again = bootstrap_se_ci(&data, 123_456_789, 500, |s| s.iter().sum(), 0.025).unwrap();
    assert_eq!(res, again);
}
