use crate::{NlpMeta, sparse};

/// A nonlinear program with first and second derivatives.
///
/// The problem has the form
///
/// ```text
/// min or max  f(x)
/// subject to  lcon ≤ c(x) ≤ ucon
///             lvar ≤ x ≤ uvar
/// ```
///
/// with sizes, bounds and starting points described by [`NlpMeta`].
///
/// Output slices are sized by the caller and overwritten by the model.
/// Sparsity structures use 0-based indices; the Hessian structure covers the
/// lower triangle only.
pub trait NlpModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the problem metadata.
    fn meta(&self) -> &NlpMeta;

    /// Evaluates the objective `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be evaluated at `x`.
    fn obj(&self, x: &[f64]) -> Result<f64, Self::Error>;

    /// Writes the objective gradient `∇f(x)` into `g`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be evaluated at `x`.
    fn grad(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes the constraint values `c(x)` into `c`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the constraints cannot be evaluated at `x`.
    fn cons(&self, x: &[f64], c: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes the Jacobian sparsity structure, `nnzj` entries long.
    fn jac_structure(&self, rows: &mut [usize], cols: &mut [usize]);

    /// Writes the Jacobian values in the order of [`Self::jac_structure`].
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Jacobian cannot be evaluated at `x`.
    fn jac_coord(&self, x: &[f64], vals: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes the Jacobian-vector product `J(x) v` into `jv`.
    ///
    /// The default assembles the coordinate Jacobian and multiplies by it.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Jacobian cannot be evaluated at `x`.
    fn jprod(&self, x: &[f64], v: &[f64], jv: &mut [f64]) -> Result<(), Self::Error> {
        let (rows, cols, vals) = assemble_jacobian(self, x)?;
        sparse::coo_mul(&rows, &cols, &vals, v, jv);
        Ok(())
    }

    /// Writes the transposed product `J(x)ᵀ v` into `jtv`.
    ///
    /// The default assembles the coordinate Jacobian and multiplies by it.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Jacobian cannot be evaluated at `x`.
    fn jtprod(&self, x: &[f64], v: &[f64], jtv: &mut [f64]) -> Result<(), Self::Error> {
        let (rows, cols, vals) = assemble_jacobian(self, x)?;
        sparse::coo_mul_transposed(&rows, &cols, &vals, v, jtv);
        Ok(())
    }

    /// Writes the lower-triangle Hessian structure, `nnzh` entries long.
    fn hess_structure(&self, rows: &mut [usize], cols: &mut [usize]);

    /// Writes the values of `∇²(obj_weight · f + Σ yᵢ cᵢ)(x)` in the order
    /// of [`Self::hess_structure`].
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Hessian cannot be evaluated at `x`.
    fn hess_coord(
        &self,
        x: &[f64],
        y: &[f64],
        obj_weight: f64,
        vals: &mut [f64],
    ) -> Result<(), Self::Error>;

    /// Writes the Hessian-vector product into `hv`.
    ///
    /// The default assembles the coordinate Hessian and multiplies by it.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Hessian cannot be evaluated at `x`.
    fn hprod(
        &self,
        x: &[f64],
        y: &[f64],
        obj_weight: f64,
        v: &[f64],
        hv: &mut [f64],
    ) -> Result<(), Self::Error> {
        let nnzh = self.meta().nnzh;
        let mut rows = vec![0; nnzh];
        let mut cols = vec![0; nnzh];
        let mut vals = vec![0.0; nnzh];
        self.hess_structure(&mut rows, &mut cols);
        self.hess_coord(x, y, obj_weight, &mut vals)?;
        sparse::coo_mul_symmetric(&rows, &cols, &vals, v, hv);
        Ok(())
    }
}

type Triplets = (Vec<usize>, Vec<usize>, Vec<f64>);

fn assemble_jacobian<M>(model: &M, x: &[f64]) -> Result<Triplets, M::Error>
where
    M: NlpModel + ?Sized,
{
    let nnzj = model.meta().nnzj;
    let mut rows = vec![0; nnzj];
    let mut cols = vec![0; nnzj];
    let mut vals = vec![0.0; nnzj];
    model.jac_structure(&mut rows, &mut cols);
    model.jac_coord(x, &mut vals)?;
    Ok((rows, cols, vals))
}

impl<M> NlpModel for &M
where
    M: NlpModel + ?Sized,
{
    type Error = M::Error;

    fn meta(&self) -> &NlpMeta {
        (**self).meta()
    }

    fn obj(&self, x: &[f64]) -> Result<f64, Self::Error> {
        (**self).obj(x)
    }

    fn grad(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error> {
        (**self).grad(x, g)
    }

    fn cons(&self, x: &[f64], c: &mut [f64]) -> Result<(), Self::Error> {
        (**self).cons(x, c)
    }

    fn jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) {
        (**self).jac_structure(rows, cols);
    }

    fn jac_coord(&self, x: &[f64], vals: &mut [f64]) -> Result<(), Self::Error> {
        (**self).jac_coord(x, vals)
    }

    fn jprod(&self, x: &[f64], v: &[f64], jv: &mut [f64]) -> Result<(), Self::Error> {
        (**self).jprod(x, v, jv)
    }

    fn jtprod(&self, x: &[f64], v: &[f64], jtv: &mut [f64]) -> Result<(), Self::Error> {
        (**self).jtprod(x, v, jtv)
    }

    fn hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) {
        (**self).hess_structure(rows, cols);
    }

    fn hess_coord(
        &self,
        x: &[f64],
        y: &[f64],
        obj_weight: f64,
        vals: &mut [f64],
    ) -> Result<(), Self::Error> {
        (**self).hess_coord(x, y, obj_weight, vals)
    }

    fn hprod(
        &self,
        x: &[f64],
        y: &[f64],
        obj_weight: f64,
        v: &[f64],
        hv: &mut [f64],
    ) -> Result<(), Self::Error> {
        (**self).hprod(x, y, obj_weight, v, hv)
    }
}
