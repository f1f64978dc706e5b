use std::cmp::Ordering;

use thiserror::Error;

/// Counts that partition a model's variables into structural categories.
///
/// Models read from the AMPL `.nl` format order their variables by how they
/// appear in the problem: nonlinear variables first, then arc variables, then
/// linear ones, with binary and integer variables at the end. The counts are
/// cumulative in the nonlinear region:
///
/// - `nlvb` variables are nonlinear in both the objective and the constraints
/// - `nlvc` variables are nonlinear in the constraints, including the `nlvb`
/// - `nlvo` variables are nonlinear in the objective, including the `nlvc`
///
/// Each nonlinear block ends with its integer-valued variables
/// (`nlvbi`, `nlvci`, `nlvoi`), counted only within that block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarCounts {
    /// Nonlinear in both objective and constraints.
    pub nlvb: usize,

    /// Integer variables among the last `nlvb`.
    pub nlvbi: usize,

    /// Nonlinear in constraints (includes `nlvb`).
    pub nlvc: usize,

    /// Integer variables in the constraints-only block.
    pub nlvci: usize,

    /// Nonlinear in objective (includes `nlvc`).
    pub nlvo: usize,

    /// Integer variables in the objective-only block.
    pub nlvoi: usize,

    /// Linear arc (network) variables.
    pub nwv: usize,

    /// Linear binary variables.
    pub nbv: usize,

    /// Linear non-binary integer variables.
    pub niv: usize,
}

impl VarCounts {
    /// Creates counts with every category empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block nonlinear in both objective and constraints.
    #[must_use]
    pub fn with_both(mut self, nlvb: usize, nlvbi: usize) -> Self {
        self.nlvb = nlvb;
        self.nlvbi = nlvbi;
        self
    }

    /// Sets the cumulative constraint-nonlinear count and its integer suffix.
    #[must_use]
    pub fn with_constraints(mut self, nlvc: usize, nlvci: usize) -> Self {
        self.nlvc = nlvc;
        self.nlvci = nlvci;
        self
    }

    /// Sets the cumulative objective-nonlinear count and its integer suffix.
    #[must_use]
    pub fn with_objective(mut self, nlvo: usize, nlvoi: usize) -> Self {
        self.nlvo = nlvo;
        self.nlvoi = nlvoi;
        self
    }

    /// Sets the number of arc variables.
    #[must_use]
    pub fn with_arcs(mut self, nwv: usize) -> Self {
        self.nwv = nwv;
        self
    }

    /// Sets the number of linear binary variables.
    #[must_use]
    pub fn with_binaries(mut self, nbv: usize) -> Self {
        self.nbv = nbv;
        self
    }

    /// Sets the number of linear integer variables.
    #[must_use]
    pub fn with_integers(mut self, niv: usize) -> Self {
        self.niv = niv;
        self
    }
}

/// Errors found when validating [`NlpMeta`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetaError {
    #[error("{field} has length {found}, expected {expected}")]
    Length {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{field} bounds at index {index} are crossed or NaN")]
    CrossedBounds { field: &'static str, index: usize },

    #[error("linear constraint index {index} is out of range for {ncon} constraints")]
    LinearIndex { index: usize, ncon: usize },
}

/// Sizes, bounds and starting points of a nonlinear program.
///
/// Bounds use `f64::NEG_INFINITY` and `f64::INFINITY` for absent sides.
#[derive(Debug, Clone, PartialEq)]
pub struct NlpMeta {
    pub name: String,

    /// Number of variables.
    pub nvar: usize,

    /// Number of general constraints.
    pub ncon: usize,

    /// Initial guess for the variables.
    pub x0: Vec<f64>,

    pub lvar: Vec<f64>,
    pub uvar: Vec<f64>,

    /// Initial guess for the constraint multipliers.
    pub y0: Vec<f64>,

    pub lcon: Vec<f64>,
    pub ucon: Vec<f64>,

    /// Number of structural nonzeros in the constraint Jacobian.
    pub nnzj: usize,

    /// Number of structural nonzeros in the lower triangle of the Hessian.
    pub nnzh: usize,

    pub minimize: bool,

    /// Indices of the linear constraints.
    pub lin: Vec<usize>,

    /// Variable categories, present only for models that track them.
    pub var_counts: Option<VarCounts>,
}

impl NlpMeta {
    /// Creates metadata for a dense, unbounded minimization problem.
    ///
    /// Starting points are zero, every bound is infinite, and the sparsity
    /// counts assume dense derivatives, saturating at `usize::MAX`.
    #[must_use]
    pub fn new(nvar: usize, ncon: usize) -> Self {
        Self {
            name: "generic".to_owned(),
            nvar,
            ncon,
            x0: vec![0.0; nvar],
            lvar: vec![f64::NEG_INFINITY; nvar],
            uvar: vec![f64::INFINITY; nvar],
            y0: vec![0.0; ncon],
            lcon: vec![f64::NEG_INFINITY; ncon],
            ucon: vec![f64::INFINITY; ncon],
            nnzj: nvar.saturating_mul(ncon),
            nnzh: dense_triangle(nvar),
            minimize: true,
            lin: Vec::new(),
            var_counts: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_x0(mut self, x0: Vec<f64>) -> Self {
        self.x0 = x0;
        self
    }

    #[must_use]
    pub fn with_var_bounds(mut self, lvar: Vec<f64>, uvar: Vec<f64>) -> Self {
        self.lvar = lvar;
        self.uvar = uvar;
        self
    }

    #[must_use]
    pub fn with_y0(mut self, y0: Vec<f64>) -> Self {
        self.y0 = y0;
        self
    }

    #[must_use]
    pub fn with_con_bounds(mut self, lcon: Vec<f64>, ucon: Vec<f64>) -> Self {
        self.lcon = lcon;
        self.ucon = ucon;
        self
    }

    #[must_use]
    pub fn with_nnzj(mut self, nnzj: usize) -> Self {
        self.nnzj = nnzj;
        self
    }

    #[must_use]
    pub fn with_nnzh(mut self, nnzh: usize) -> Self {
        self.nnzh = nnzh;
        self
    }

    /// Marks the problem as a maximization.
    #[must_use]
    pub fn maximize(mut self) -> Self {
        self.minimize = false;
        self
    }

    #[must_use]
    pub fn with_linear_constraints(mut self, lin: Vec<usize>) -> Self {
        self.lin = lin;
        self
    }

    #[must_use]
    pub fn with_var_counts(mut self, counts: VarCounts) -> Self {
        self.var_counts = Some(counts);
        self
    }

    /// Returns `true` if the problem has general constraints.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.ncon > 0
    }

    /// Returns `true` if the only constraints are finite variable bounds.
    #[must_use]
    pub fn is_bound_constrained(&self) -> bool {
        self.ncon == 0
            && self
                .lvar
                .iter()
                .chain(&self.uvar)
                .any(|bound| bound.is_finite())
    }

    /// Returns `true` if constraint `i` is listed as linear.
    #[must_use]
    pub fn is_linear_constraint(&self, i: usize) -> bool {
        self.lin.contains(&i)
    }

    /// Checks that vector lengths, bounds and indices are consistent.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), MetaError> {
        check_len("x0", self.nvar, self.x0.len())?;
        check_len("lvar", self.nvar, self.lvar.len())?;
        check_len("uvar", self.nvar, self.uvar.len())?;
        check_len("y0", self.ncon, self.y0.len())?;
        check_len("lcon", self.ncon, self.lcon.len())?;
        check_len("ucon", self.ncon, self.ucon.len())?;

        check_order("variable", &self.lvar, &self.uvar)?;
        check_order("constraint", &self.lcon, &self.ucon)?;

        if let Some(&index) = self.lin.iter().find(|&&i| i >= self.ncon) {
            return Err(MetaError::LinearIndex {
                index,
                ncon: self.ncon,
            });
        }

        Ok(())
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), MetaError> {
    if expected == found {
        Ok(())
    } else {
        Err(MetaError::Length {
            field,
            expected,
            found,
        })
    }
}

/// Entries in one triangle of a dense `n × n` matrix.
fn dense_triangle(n: usize) -> usize {
    // One of n and n + 1 is even, so halve that one before multiplying.
    if n % 2 == 0 {
        (n / 2).saturating_mul(n.saturating_add(1))
    } else {
        n.saturating_mul(n / 2 + 1)
    }
}

fn check_order(field: &'static str, lower: &[f64], upper: &[f64]) -> Result<(), MetaError> {
    let ordered = |lo: &f64, hi: &f64| {
        matches!(lo.partial_cmp(hi), Some(Ordering::Less | Ordering::Equal))
    };
    match lower.iter().zip(upper).position(|(lo, hi)| !ordered(lo, hi)) {
        Some(index) => Err(MetaError::CrossedBounds { field, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_meta_is_dense_and_unbounded() {
        let meta = NlpMeta::new(3, 2);

        assert_eq!(meta.x0, vec![0.0; 3]);
        assert!(meta.lvar.iter().all(|b| *b == f64::NEG_INFINITY));
        assert!(meta.ucon.iter().all(|b| *b == f64::INFINITY));
        assert_eq!(meta.nnzj, 6);
        assert_eq!(meta.nnzh, 6);
        assert!(meta.minimize);
        assert!(meta.var_counts.is_none());
        assert_eq!(meta.validate(), Ok(()));
    }

    #[test]
    fn validate_reports_wrong_lengths() {
        let meta = NlpMeta::new(2, 0).with_x0(vec![1.0]);

        assert_eq!(
            meta.validate(),
            Err(MetaError::Length {
                field: "x0",
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn validate_reports_crossed_bounds() {
        let meta = NlpMeta::new(2, 0).with_var_bounds(vec![0.0, 3.0], vec![1.0, 2.0]);

        assert_eq!(
            meta.validate(),
            Err(MetaError::CrossedBounds {
                field: "variable",
                index: 1,
            })
        );
    }

    #[test]
    fn validate_rejects_nan_bounds() {
        let meta = NlpMeta::new(1, 2).with_con_bounds(vec![0.0, f64::NAN], vec![1.0, 1.0]);

        assert_eq!(
            meta.validate(),
            Err(MetaError::CrossedBounds {
                field: "constraint",
                index: 1,
            })
        );
    }

    #[test]
    fn dense_triangle_counts() {
        assert_eq!(dense_triangle(0), 0);
        assert_eq!(dense_triangle(1), 1);
        assert_eq!(dense_triangle(4), 10);
        assert_eq!(dense_triangle(5), 15);
        assert_eq!(dense_triangle(usize::MAX), usize::MAX);
        assert_eq!(dense_triangle(usize::MAX - 1), usize::MAX);
    }

    #[test]
    fn validate_reports_linear_index_out_of_range() {
        let meta = NlpMeta::new(2, 1).with_linear_constraints(vec![0, 1]);

        assert_eq!(
            meta.validate(),
            Err(MetaError::LinearIndex { index: 1, ncon: 1 })
        );
    }

    #[test]
    fn bound_constrained_needs_a_finite_bound() {
        let free = NlpMeta::new(2, 0);
        let boxed = NlpMeta::new(2, 0).with_var_bounds(
            vec![0.0, f64::NEG_INFINITY],
            vec![f64::INFINITY, f64::INFINITY],
        );
        let constrained = NlpMeta::new(2, 1);

        assert!(!free.is_bound_constrained());
        assert!(boxed.is_bound_constrained());
        assert!(!constrained.is_bound_constrained());
        assert!(constrained.is_constrained());
    }

    #[test]
    fn counts_builder_sets_each_block() {
        let counts = VarCounts::new()
            .with_both(2, 1)
            .with_constraints(3, 1)
            .with_objective(4, 0)
            .with_arcs(1)
            .with_binaries(2)
            .with_integers(3);

        assert_eq!(
            counts,
            VarCounts {
                nlvb: 2,
                nlvbi: 1,
                nlvc: 3,
                nlvci: 1,
                nlvo: 4,
                nlvoi: 0,
                nwv: 1,
                nbv: 2,
                niv: 3,
            }
        );
    }
}
