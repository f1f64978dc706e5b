use thiserror::Error;
use tracing::{debug, warn};

use nlpbridge_core::{Evaluator, Feature, NlpModel};

/// Features every [`ModelEvaluator`] provides.
const FEATURES: [Feature; 5] = [
    Feature::Grad,
    Feature::Jac,
    Feature::JacVec,
    Feature::Hess,
    Feature::HessVec,
];

/// Errors returned by a [`ModelEvaluator`].
#[derive(Debug, Error)]
pub enum EvalError<ME> {
    /// The wrapped model failed.
    #[error("model evaluation failed")]
    Model(#[source] ME),

    #[error("feature {0:?} is not available")]
    UnsupportedFeature(Feature),

    /// A slice passed by the solver has the wrong length.
    #[error("{what} has length {found}, expected {expected}")]
    Dimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Presents an [`NlpModel`] through the solver-side [`Evaluator`] contract.
///
/// Every evaluation forwards to the model unchanged. The Jacobian and
/// Hessian sparsity structures are read once, when the evaluator is
/// created, and served from the cache afterwards.
#[derive(Debug, Clone)]
pub struct ModelEvaluator<M> {
    model: M,
    jac_rows: Vec<usize>,
    jac_cols: Vec<usize>,
    hess_rows: Vec<usize>,
    hess_cols: Vec<usize>,
}

impl<M: NlpModel> ModelEvaluator<M> {
    /// Wraps a model and caches its sparsity structures.
    pub fn new(model: M) -> Self {
        let meta = model.meta();
        let (nnzj, nnzh) = (meta.nnzj, meta.nnzh);

        let mut jac_rows = vec![0; nnzj];
        let mut jac_cols = vec![0; nnzj];
        model.jac_structure(&mut jac_rows, &mut jac_cols);

        let mut hess_rows = vec![0; nnzh];
        let mut hess_cols = vec![0; nnzh];
        model.hess_structure(&mut hess_rows, &mut hess_cols);

        debug!(
            component = "evaluator",
            operation = "cache_structure",
            model = %meta.name,
            nnzj,
            nnzh,
            "Cached sparsity structures"
        );

        Self {
            model,
            jac_rows,
            jac_cols,
            hess_rows,
            hess_cols,
        }
    }

    /// Returns the wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Consumes the evaluator and returns the wrapped model.
    pub fn into_inner(self) -> M {
        self.model
    }

    fn nvar(&self) -> usize {
        self.model.meta().nvar
    }

    fn ncon(&self) -> usize {
        self.model.meta().ncon
    }
}

fn check_len<ME>(what: &'static str, expected: usize, found: usize) -> Result<(), EvalError<ME>> {
    if expected == found {
        Ok(())
    } else {
        Err(EvalError::Dimension {
            what,
            expected,
            found,
        })
    }
}

impl<M: NlpModel> Evaluator for ModelEvaluator<M> {
    type Error = EvalError<M::Error>;

    fn initialize(&mut self, requested: &[Feature]) -> Result<(), Self::Error> {
        if let Some(&feature) = requested.iter().find(|f| !FEATURES.contains(f)) {
            warn!(
                component = "evaluator",
                operation = "initialize",
                feature = ?feature,
                "Requested feature is not available"
            );
            return Err(EvalError::UnsupportedFeature(feature));
        }

        debug!(
            component = "evaluator",
            operation = "initialize",
            features = ?requested,
            "Evaluator initialized"
        );
        Ok(())
    }

    fn features_available(&self) -> &[Feature] {
        &FEATURES
    }

    fn eval_f(&self, x: &[f64]) -> Result<f64, Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        self.model.obj(x).map_err(EvalError::Model)
    }

    fn eval_grad_f(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("gradient", self.nvar(), g.len())?;
        self.model.grad(x, g).map_err(EvalError::Model)
    }

    fn eval_g(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("constraints", self.ncon(), g.len())?;
        self.model.cons(x, g).map_err(EvalError::Model)
    }

    fn jac_structure(&self) -> (&[usize], &[usize]) {
        (&self.jac_rows, &self.jac_cols)
    }

    fn eval_jac_g(&self, x: &[f64], j: &mut [f64]) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("jacobian values", self.jac_rows.len(), j.len())?;
        self.model.jac_coord(x, j).map_err(EvalError::Model)
    }

    fn eval_jac_prod(&self, x: &[f64], v: &[f64], jv: &mut [f64]) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("v", self.nvar(), v.len())?;
        check_len("jacobian product", self.ncon(), jv.len())?;
        self.model.jprod(x, v, jv).map_err(EvalError::Model)
    }

    fn eval_jac_prod_t(
        &self,
        x: &[f64],
        v: &[f64],
        jtv: &mut [f64],
    ) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("v", self.ncon(), v.len())?;
        check_len("transposed jacobian product", self.nvar(), jtv.len())?;
        self.model.jtprod(x, v, jtv).map_err(EvalError::Model)
    }

    fn hesslag_structure(&self) -> (&[usize], &[usize]) {
        (&self.hess_rows, &self.hess_cols)
    }

    fn eval_hesslag(
        &self,
        x: &[f64],
        sigma: f64,
        mu: &[f64],
        h: &mut [f64],
    ) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("mu", self.ncon(), mu.len())?;
        check_len("hessian values", self.hess_rows.len(), h.len())?;
        self.model
            .hess_coord(x, mu, sigma, h)
            .map_err(EvalError::Model)
    }

    fn eval_hesslag_prod(
        &self,
        x: &[f64],
        v: &[f64],
        sigma: f64,
        mu: &[f64],
        h: &mut [f64],
    ) -> Result<(), Self::Error> {
        check_len("x", self.nvar(), x.len())?;
        check_len("v", self.nvar(), v.len())?;
        check_len("mu", self.ncon(), mu.len())?;
        check_len("hessian product", self.nvar(), h.len())?;
        self.model
            .hprod(x, mu, sigma, v, h)
            .map_err(EvalError::Model)
    }

    fn is_obj_linear(&self) -> bool {
        false
    }

    fn is_obj_quadratic(&self) -> bool {
        false
    }

    fn is_constr_linear(&self, i: usize) -> bool {
        self.model.meta().is_linear_constraint(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::testing::Hs6;

    #[test]
    fn caches_structures_from_the_model() {
        let evaluator = ModelEvaluator::new(Hs6::new());

        assert_eq!(evaluator.jac_structure(), (&[0, 0][..], &[0, 1][..]));
        assert_eq!(evaluator.hesslag_structure(), (&[0][..], &[0][..]));
    }

    #[test]
    fn initialize_accepts_available_features() {
        let mut evaluator = ModelEvaluator::new(Hs6::new());

        assert!(
            evaluator
                .initialize(&[Feature::Grad, Feature::Jac, Feature::Hess])
                .is_ok()
        );
        assert!(evaluator.initialize(&[]).is_ok());
        assert_eq!(evaluator.features_available(), &FEATURES);
    }

    #[test]
    fn initialize_rejects_expression_graphs() {
        let mut evaluator = ModelEvaluator::new(Hs6::new());

        let err = evaluator
            .initialize(&[Feature::Grad, Feature::ExprGraph])
            .unwrap_err();

        assert!(matches!(err, EvalError::UnsupportedFeature(Feature::ExprGraph)));
    }

    #[test]
    fn forwards_values_unchanged() {
        let evaluator = ModelEvaluator::new(Hs6::new());
        let x = [-1.2, 1.0];

        let f = evaluator.eval_f(&x).unwrap();
        assert_relative_eq!(f, 4.84);

        let mut g = [0.0; 2];
        evaluator.eval_grad_f(&x, &mut g).unwrap();
        assert_relative_eq!(g[0], -4.4);
        assert_relative_eq!(g[1], 0.0);

        let mut c = [0.0; 1];
        evaluator.eval_g(&x, &mut c).unwrap();
        assert_relative_eq!(c[0], 10.0 * (1.0 - 1.44));

        let mut j = [0.0; 2];
        evaluator.eval_jac_g(&x, &mut j).unwrap();
        assert_relative_eq!(j[0], 24.0);
        assert_relative_eq!(j[1], 10.0);
    }

    #[test]
    fn hesslag_passes_sigma_as_objective_weight() {
        let evaluator = ModelEvaluator::new(Hs6::new());
        let mut h = [0.0; 1];

        // ∇²L = 2σ - 20μ in the (0, 0) entry.
        evaluator.eval_hesslag(&[0.5, 0.5], 3.0, &[0.5], &mut h).unwrap();

        assert_relative_eq!(h[0], -4.0);
    }

    #[test]
    fn products_use_the_model_defaults() {
        let evaluator = ModelEvaluator::new(Hs6::new());
        let x = [-1.2, 1.0];

        let mut jv = [0.0; 1];
        evaluator.eval_jac_prod(&x, &[1.0, 1.0], &mut jv).unwrap();
        assert_relative_eq!(jv[0], 34.0);

        let mut jtv = [0.0; 2];
        evaluator.eval_jac_prod_t(&x, &[2.0], &mut jtv).unwrap();
        assert_relative_eq!(jtv[0], 48.0);
        assert_relative_eq!(jtv[1], 20.0);

        let mut hv = [0.0; 2];
        evaluator
            .eval_hesslag_prod(&x, &[1.0, 1.0], 1.0, &[0.0], &mut hv)
            .unwrap();
        assert_relative_eq!(hv[0], 2.0);
        assert_relative_eq!(hv[1], 0.0);
    }

    #[test]
    fn linear_constraints_come_from_meta() {
        let evaluator = ModelEvaluator::new(Hs6::new());

        assert!(!evaluator.is_constr_linear(0));
        assert!(!evaluator.is_obj_linear());
        assert!(!evaluator.is_obj_quadratic());
    }

    #[test]
    fn rejects_wrong_lengths() {
        let evaluator = ModelEvaluator::new(Hs6::new());
        let mut g = [0.0; 3];

        let err = evaluator.eval_grad_f(&[0.0, 0.0], &mut g).unwrap_err();

        assert!(matches!(
            err,
            EvalError::Dimension {
                what: "gradient",
                expected: 2,
                found: 3,
            }
        ));
    }

    #[test]
    fn model_failures_are_wrapped() {
        let evaluator = ModelEvaluator::new(Hs6::new());

        let err = evaluator.eval_f(&[f64::NAN, 0.0]).unwrap_err();

        assert!(matches!(err, EvalError::Model(_)));
    }

    #[test]
    fn into_inner_returns_the_model() {
        let evaluator = ModelEvaluator::new(Hs6::new());

        assert_eq!(evaluator.model().meta().name, "hs6");
        assert_eq!(evaluator.into_inner().meta().nvar, 2);
    }
}
