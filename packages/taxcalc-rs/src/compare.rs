// src/compare.rs
//! Tolerant comparison of text output, line by line and token by token.

/// Numeric differences at or below `small + EPSILON` are ignored.
const EPSILON: f64 = 1e-6;

/// Tolerance for comparisons where only rounding noise is acceptable.
pub const DEFAULT_SMALL: f64 = 0.0;

/// True when the two line sequences differ by more than `small`.
///
/// Identical lines match. Other line pairs are compared token by token
/// after dropping thousands separators: two numbers match when they are
/// within `small`, anything else must be textually equal. Sequences of
/// different length always differ. `small` is clamped into `[0, 1]`.
pub fn nonsmall_diffs<S: AsRef<str>>(lines1: &[S], lines2: &[S], small: f64) -> bool {
    if lines1.len() != lines2.len() {
        return true;
    }
    let small = small.clamp(0.0, 1.0);
    lines1
        .iter()
        .zip(lines2)
        .any(|(a, b)| line_differs(a.as_ref(), b.as_ref(), small))
}

fn line_differs(line1: &str, line2: &str, small: f64) -> bool {
    if line1 == line2 {
        return false;
    }
    let stripped1 = line1.replace(',', "");
    let stripped2 = line2.replace(',', "");
    let tokens1: Vec<&str> = stripped1.split_whitespace().collect();
    let tokens2: Vec<&str> = stripped2.split_whitespace().collect();
    if tokens1.len() != tokens2.len() {
        return true;
    }
    tokens1.iter().zip(&tokens2).any(|(t1, t2)| {
        match (t1.parse::<f64>(), t2.parse::<f64>()) {
            (Ok(x), Ok(y)) => !((x - y).abs() <= small + EPSILON),
            (Err(_), Err(_)) => t1 != t2,
            _ => true,
        }
    })
}
