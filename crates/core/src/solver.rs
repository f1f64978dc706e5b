/// The type of a decision variable, as seen by the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VarType {
    #[default]
    Continuous,
    Integer,
    Binary,
}

impl VarType {
    /// Returns `true` for integer and binary variables.
    #[must_use]
    pub fn is_discrete(self) -> bool {
        !matches!(self, VarType::Continuous)
    }
}

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    /// Maps a `minimize` flag to a sense.
    #[must_use]
    pub fn from_minimize(minimize: bool) -> Self {
        if minimize {
            Sense::Minimize
        } else {
            Sense::Maximize
        }
    }
}

/// Derivative capabilities a solver may request from an [`Evaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Objective gradient.
    Grad,

    /// Constraint Jacobian in coordinate form.
    Jac,

    /// Jacobian-vector products.
    JacVec,

    /// Hessian of the Lagrangian in coordinate form.
    Hess,

    /// Hessian-of-the-Lagrangian-vector products.
    HessVec,

    /// Symbolic expression graphs of the objective and constraints.
    ExprGraph,
}

/// The callback contract a nonlinear solver uses to query a problem.
///
/// The Lagrangian is `σ f(x) + Σ μᵢ gᵢ(x)`. Sparsity structures use 0-based
/// indices and stay fixed for the lifetime of the evaluator; the Hessian
/// structure covers the lower triangle only.
///
/// Output slices are sized by the solver and overwritten by the evaluator.
pub trait Evaluator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Prepares the evaluator for the requested features.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if a requested feature is not available.
    fn initialize(&mut self, requested: &[Feature]) -> Result<(), Self::Error>;

    /// Returns the features this evaluator can provide.
    fn features_available(&self) -> &[Feature];

    /// Evaluates the objective.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_f(&self, x: &[f64]) -> Result<f64, Self::Error>;

    /// Writes the objective gradient into `g`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_grad_f(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes the constraint values into `g`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_g(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error>;

    /// Returns the `(rows, cols)` of the constraint Jacobian.
    fn jac_structure(&self) -> (&[usize], &[usize]);

    /// Writes the Jacobian values in the order of [`Self::jac_structure`].
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_jac_g(&self, x: &[f64], j: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes `J(x) v` into `jv`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_jac_prod(&self, x: &[f64], v: &[f64], jv: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes `J(x)ᵀ v` into `jtv`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_jac_prod_t(&self, x: &[f64], v: &[f64], jtv: &mut [f64])
    -> Result<(), Self::Error>;

    /// Returns the `(rows, cols)` of the lower-triangle Lagrangian Hessian.
    fn hesslag_structure(&self) -> (&[usize], &[usize]);

    /// Writes the Lagrangian Hessian values in the order of
    /// [`Self::hesslag_structure`].
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_hesslag(
        &self,
        x: &[f64],
        sigma: f64,
        mu: &[f64],
        h: &mut [f64],
    ) -> Result<(), Self::Error>;

    /// Writes the Lagrangian Hessian-vector product into `h`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if evaluation fails.
    fn eval_hesslag_prod(
        &self,
        x: &[f64],
        v: &[f64],
        sigma: f64,
        mu: &[f64],
        h: &mut [f64],
    ) -> Result<(), Self::Error>;

    /// Returns `true` if the objective is known to be linear.
    fn is_obj_linear(&self) -> bool;

    /// Returns `true` if the objective is known to be quadratic.
    fn is_obj_quadratic(&self) -> bool;

    /// Returns `true` if constraint `i` is known to be linear.
    fn is_constr_linear(&self, i: usize) -> bool;
}

/// Sizes and bounds handed to a solver when a problem is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemData {
    pub nvar: usize,
    pub ncon: usize,
    pub lvar: Vec<f64>,
    pub uvar: Vec<f64>,
    pub lcon: Vec<f64>,
    pub ucon: Vec<f64>,
}

/// Outcome of the most recent solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// No solve has completed since the problem was loaded.
    NotSolved,

    /// Converged according to the solver's criteria.
    Optimal,

    /// Stopped at the iteration limit.
    IterationLimit,

    Infeasible,

    /// Stopped because of a failure.
    Error,
}

/// A nonlinear solver that accepts problems through an [`Evaluator`].
///
/// The expected call order is [`load_problem`], optionally
/// [`set_var_types`] and [`set_warm_start`], then [`optimize`]. Variables
/// without an explicit type are continuous.
///
/// [`load_problem`]: NonlinearSolver::load_problem
/// [`set_var_types`]: NonlinearSolver::set_var_types
/// [`set_warm_start`]: NonlinearSolver::set_warm_start
/// [`optimize`]: NonlinearSolver::optimize
pub trait NonlinearSolver<E: Evaluator> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads a problem, replacing any previously loaded one.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the solver cannot handle the problem.
    fn load_problem(
        &mut self,
        problem: ProblemData,
        sense: Sense,
        evaluator: E,
    ) -> Result<(), Self::Error>;

    /// Sets the type of every variable, in variable order.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no problem is loaded, the length is wrong,
    /// or the solver does not support a type.
    fn set_var_types(&mut self, types: &[VarType]) -> Result<(), Self::Error>;

    /// Sets the point the solver starts from.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no problem is loaded or the length is wrong.
    fn set_warm_start(&mut self, x0: &[f64]) -> Result<(), Self::Error>;

    /// Solves the loaded problem.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no problem is loaded or the solve fails.
    fn optimize(&mut self) -> Result<(), Self::Error>;

    /// Returns the status of the most recent solve.
    fn status(&self) -> SolveStatus;

    /// Returns the objective value at the reported solution, if any.
    fn objective_value(&self) -> Option<f64>;

    /// Returns the reported solution, if any.
    fn solution(&self) -> Option<&[f64]>;
}
