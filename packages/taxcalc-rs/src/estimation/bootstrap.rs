// src/estimation/bootstrap.rs
//! Bootstrap standard error and percentile confidence interval of a statistic.

use rand::RngCore;
use rayon::prelude::*;
use serde::Serialize;

use super::mt19937::{masked_index, Mt19937};
use crate::utils::{Result, TaxcalcError};

/// Resamples drawn before each parallel evaluation round.
const BATCH_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapResult {
    /// Seed of the resampling stream, when it came from one.
    pub seed: Option<u32>,
    pub num_samples: usize,
    pub alpha: f64,
    /// Standard deviation of the bootstrap statistics (`B - 1` denominator).
    pub se: f64,
    pub cilo: f64,
    pub cihi: f64,
}

/// Bootstrap `statistic` over `num_samples` resamples of `data` drawn from an
/// MT19937 stream seeded with `seed`.
///
/// The same seed always yields the same resamples, so results are
/// reproducible bit for bit.
///
/// # Arguments
/// * `data` - Observations, resampled with replacement
/// * `seed` - Seed of the MT19937 stream
/// * `num_samples` - Number of bootstrap resamples `B`
/// * `statistic` - Function of one resample, e.g. its sum or mean
/// * `alpha` - Tail probability on each side of the interval, in `(0, 0.5)`
///
/// # Returns
/// `se` and the interval `[s[round(alpha*B)-1], s[round((1-alpha)*B)-1]]`
/// of the sorted statistics `s`.
pub fn bootstrap_se_ci<F>(data: &[f64], seed: u32, num_samples: usize, statistic: F, alpha: f64) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    let mut rng = Mt19937::new(seed);
    let mut result = bootstrap_se_ci_with_rng(data, &mut rng, num_samples, statistic, alpha)?;
    result.seed = Some(seed);
    Ok(result)
}

/// Same as [`bootstrap_se_ci`] with resample indices drawn from `rng`.
pub fn bootstrap_se_ci_with_rng<R, F>(
    data: &[f64],
    rng: &mut R,
    num_samples: usize,
    statistic: F,
    alpha: f64,
) -> Result<BootstrapResult>
where
    R: RngCore + ?Sized,
    F: Fn(&[f64]) -> f64 + Sync,
{
    let n = data.len();
    if n == 0 {
        return Err(TaxcalcError::InvalidInput("cannot bootstrap empty data".into()));
    }
    if n as u64 > u32::MAX as u64 + 1 {
        return Err(TaxcalcError::InvalidInput(format!("too many observations: {}", n)));
    }
    if num_samples < 2 {
        return Err(TaxcalcError::InvalidInput(format!(
            "num_samples must be at least 2, got {}",
            num_samples
        )));
    }
    if !(alpha > 0.0 && alpha < 0.5) {
        return Err(TaxcalcError::InvalidInput(format!("alpha must be in (0, 0.5), got {}", alpha)));
    }
    let b = num_samples as f64;
    let lo_rank = (alpha * b).round_ties_even() as usize;
    let hi_rank = ((1.0 - alpha) * b).round_ties_even() as usize;
    if lo_rank == 0 || hi_rank > num_samples {
        return Err(TaxcalcError::InvalidInput(format!(
            "alpha {} too small for {} samples",
            alpha, num_samples
        )));
    }

    log::debug!("bootstrap: n={} B={} alpha={}", n, num_samples, alpha);

    // Draws stay sequential so the stream order never depends on threads
    let mut stats = Vec::with_capacity(num_samples);
    let mut remaining = num_samples;
    while remaining > 0 {
        let batch = remaining.min(BATCH_SIZE);
        let samples: Vec<Vec<f64>> = (0..batch)
            .map(|_| (0..n).map(|_| data[masked_index(rng, n)]).collect())
            .collect();
        stats.par_extend(samples.par_iter().map(|s| statistic(s)));
        remaining -= batch;
    }

    let mean = stats.iter().sum::<f64>() / b;
    let var = stats.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (b - 1.0);

    stats.sort_by(f64::total_cmp);

    Ok(BootstrapResult {
        seed: None,
        num_samples,
        alpha,
        se: var.sqrt(),
        cilo: stats[lo_rank - 1],
        cihi: stats[hi_rank - 1],
    })
}

/// Plain sum, the statistic of weighted-count columns.
pub fn sum(sample: &[f64]) -> f64 {
    sample.iter().sum()
}

pub fn mean(sample: &[f64]) -> f64 {
    sum(sample) / sample.len() as f64
}
