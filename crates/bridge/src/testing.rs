use thiserror::Error;

use nlpbridge_core::{NlpMeta, NlpModel};

#[derive(Debug, Error)]
#[error("point is not finite")]
pub(crate) struct NonFinite;

fn check(x: &[f64]) -> Result<(), NonFinite> {
    if x.iter().all(|xi| xi.is_finite()) {
        Ok(())
    } else {
        Err(NonFinite)
    }
}

/// Hock-Schittkowski problem 6.
///
/// ```text
/// min  (1 - x₀)²
/// s.t. 10 (x₁ - x₀²) = 0
/// ```
pub(crate) struct Hs6 {
    meta: NlpMeta,
}

impl Hs6 {
    pub(crate) fn new() -> Self {
        Self {
            meta: NlpMeta::new(2, 1)
                .with_name("hs6")
                .with_x0(vec![-1.2, 1.0])
                .with_con_bounds(vec![0.0], vec![0.0])
                .with_nnzj(2)
                .with_nnzh(1),
        }
    }
}

impl NlpModel for Hs6 {
    type Error = NonFinite;

    fn meta(&self) -> &NlpMeta {
        &self.meta
    }

    fn obj(&self, x: &[f64]) -> Result<f64, Self::Error> {
        check(x)?;
        Ok((1.0 - x[0]).powi(2))
    }

    fn grad(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error> {
        check(x)?;
        g[0] = -2.0 * (1.0 - x[0]);
        g[1] = 0.0;
        Ok(())
    }

    fn cons(&self, x: &[f64], c: &mut [f64]) -> Result<(), Self::Error> {
        check(x)?;
        c[0] = 10.0 * (x[1] - x[0] * x[0]);
        Ok(())
    }

    fn jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) {
        rows.copy_from_slice(&[0, 0]);
        cols.copy_from_slice(&[0, 1]);
    }

    fn jac_coord(&self, x: &[f64], vals: &mut [f64]) -> Result<(), Self::Error> {
        check(x)?;
        vals[0] = -20.0 * x[0];
        vals[1] = 10.0;
        Ok(())
    }

    fn hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) {
        rows[0] = 0;
        cols[0] = 0;
    }

    fn hess_coord(
        &self,
        x: &[f64],
        y: &[f64],
        obj_weight: f64,
        vals: &mut [f64],
    ) -> Result<(), Self::Error> {
        check(x)?;
        vals[0] = 2.0 * obj_weight - 20.0 * y[0];
        Ok(())
    }
}
