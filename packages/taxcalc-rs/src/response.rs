// src/response.rs
//! Partial-equilibrium behavioral response of a quantity to tax changes.

use ndarray::{Array1, ArrayView1, Zip};

use crate::utils::{Result, TaxcalcError};

/// After-tax incomes below this floor are raised to it before taking
/// percentage changes.
pub const MIN_AFTERTAX_INCOME: f64 = 1.0;

/// Change in `quantity` implied by the price and income elasticities:
/// `quantity * (e_price * pch_price + e_income * pch_income)`.
///
/// Each percentage-change term is zero when its elasticity is zero, and its
/// arrays may then be `None`.
///
/// # Arguments
/// * `quantity` - Baseline quantity per filer
/// * `price_elasticity` - Elasticity with respect to the after-tax price
/// * `aftertax_price1`, `aftertax_price2` - Baseline and reform prices, positive
/// * `income_elasticity` - Elasticity with respect to after-tax income
/// * `aftertax_income1`, `aftertax_income2` - Baseline and reform after-tax incomes
#[allow(clippy::too_many_arguments)]
pub fn quantity_response<'a>(
    quantity: ArrayView1<f64>,
    price_elasticity: f64,
    aftertax_price1: Option<ArrayView1<'a, f64>>,
    aftertax_price2: Option<ArrayView1<'a, f64>>,
    income_elasticity: f64,
    aftertax_income1: Option<ArrayView1<'a, f64>>,
    aftertax_income2: Option<ArrayView1<'a, f64>>,
) -> Result<Array1<f64>> {
    let n = quantity.len();
    let mut response = Array1::zeros(n);

    if price_elasticity != 0.0 {
        let (p1, p2) = pair("aftertax_price", aftertax_price1, aftertax_price2, n)?;
        if let Some(row) = p1.iter().chain(p2.iter()).position(|&p| !(p > 0.0)) {
            return Err(TaxcalcError::InvalidInput(format!(
                "after-tax prices must be positive (offending value at position {})",
                row % n
            )));
        }
        Zip::from(&mut response)
            .and(&p1)
            .and(&p2)
            .for_each(|r, &a, &b| *r += price_elasticity * (b - a) / a);
    }

    if income_elasticity != 0.0 {
        let (i1, i2) = pair("aftertax_income", aftertax_income1, aftertax_income2, n)?;
        Zip::from(&mut response).and(&i1).and(&i2).for_each(|r, &a, &b| {
            let a = a.max(MIN_AFTERTAX_INCOME);
            let b = b.max(MIN_AFTERTAX_INCOME);
            *r += income_elasticity * (b - a) / a;
        });
    }

    Ok(response * &quantity)
}

fn pair<'a>(
    what: &str,
    first: Option<ArrayView1<'a, f64>>,
    second: Option<ArrayView1<'a, f64>>,
    n: usize,
) -> Result<(ArrayView1<'a, f64>, ArrayView1<'a, f64>)> {
    let missing = |k: u8| TaxcalcError::InvalidInput(format!("{}{} required for a non-zero elasticity", what, k));
    let a = first.ok_or_else(|| missing(1))?;
    let b = second.ok_or_else(|| missing(2))?;
    for v in [&a, &b] {
        if v.len() != n {
            return Err(TaxcalcError::DimensionMismatch { expected: n, got: v.len() });
        }
    }
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_zero_elasticities_need_no_prices() {
        let quantity = Array1::from_elem(10, 1.0);
        let res = quantity_response(quantity.view(), 0.0, None, None, 0.0, None, None).unwrap();
        assert!(res.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn test_income_response() {
        let quantity = Array1::from_elem(10, 1.0);
        let one = Array1::from_elem(10, 1.0);
        let two = &one + &one;
        let res = quantity_response(
            quantity.view(),
            -0.2,
            Some(one.view()),
            Some(one.view()),
            0.1,
            Some(one.view()),
            Some(two.view()),
        )
        .unwrap();
        for &r in res.iter() {
            assert_relative_eq!(r, 0.1);
        }
    }

    #[test]
    fn test_price_response_scales_with_quantity() {
        let quantity = array![10.0, 20.0];
        let p1 = array![1.0, 0.8];
        let p2 = array![1.1, 0.8];
        let res = quantity_response(quantity.view(), -0.5, Some(p1.view()), Some(p2.view()), 0.0, None, None)
            .unwrap();
        assert_relative_eq!(res[0], 10.0 * -0.5 * 0.1, epsilon = 1e-12);
        assert_relative_eq!(res[1], 0.0);
    }

    #[test]
    fn test_arrays_with_separate_owners() {
        let quantity = array![2.0, 4.0];
        let base_price = array![1.0, 2.0];
        let income1 = array![100.0, 200.0];
        let res = {
            let reform_price = array![1.5, 2.0];
            let income2 = array![110.0, 200.0];
            quantity_response(
                quantity.view(),
                -1.0,
                Some(base_price.view()),
                Some(reform_price.view()),
                0.5,
                Some(income1.view()),
                Some(income2.view()),
            )
            .unwrap()
        };
        assert_relative_eq!(res[0], 2.0 * (-0.5 + 0.05), epsilon = 1e-12);
        assert_relative_eq!(res[1], 0.0);
    }

    #[test]
    fn test_low_incomes_are_floored() {
        let quantity = array![1.0, 1.0];
        let i1 = array![-500.0, 0.0];
        let i2 = array![3.0, 0.5];
        let res = quantity_response(quantity.view(), 0.0, None, None, 1.0, Some(i1.view()), Some(i2.view()))
            .unwrap();
        assert_relative_eq!(res[0], 2.0);
        assert_relative_eq!(res[1], 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let quantity = array![1.0, 1.0];
        let short = array![1.0];
        let err = quantity_response(quantity.view(), 0.0, None, None, 0.3, Some(short.view()), Some(short.view()))
            .unwrap_err();
        assert!(matches!(err, TaxcalcError::DimensionMismatch { expected: 2, got: 1 }));

        let zero = array![0.0, 1.0];
        assert!(quantity_response(quantity.view(), -0.1, Some(zero.view()), Some(zero.view()), 0.0, None, None)
            .is_err());
        assert!(quantity_response(quantity.view(), -0.1, None, None, 0.0, None, None).is_err());
    }
}
