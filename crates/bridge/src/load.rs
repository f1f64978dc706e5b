use tracing::{debug, info, warn};

use nlpbridge_core::{NlpMeta, NlpModel, NonlinearSolver, ProblemData, Sense, SolveStatus, VarType};

use crate::{
    Error, ModelEvaluator,
    classify::{ClassifyError, classify, has_discrete},
};

/// Where the solver starts from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WarmStart {
    /// Use the model's initial guess, `meta.x0`.
    #[default]
    Model,

    /// Use the given point.
    Point(Vec<f64>),

    /// Leave the solver's starting point untouched.
    Skip,
}

/// Options for [`load_with`] and [`solve_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    warm_start: WarmStart,
}

impl LoadOptions {
    /// Creates options that warm start from the model's initial guess.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where the solver starts from.
    #[must_use]
    pub fn with_warm_start(mut self, warm_start: WarmStart) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Returns where the solver starts from.
    #[must_use]
    pub fn warm_start(&self) -> &WarmStart {
        &self.warm_start
    }
}

/// The outcome of [`solve`] or [`solve_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolveStatus,

    /// The reported point, if the solver produced one.
    pub x: Option<Vec<f64>>,

    /// The objective at `x`, if the solver produced one.
    pub objective: Option<f64>,
}

/// Returns the solver-side type of every variable of a model.
///
/// Models without [`NlpMeta::var_counts`] are entirely continuous.
///
/// # Errors
///
/// Returns an error if the category counts are inconsistent.
pub fn var_types(meta: &NlpMeta) -> Result<Vec<VarType>, ClassifyError> {
    match &meta.var_counts {
        Some(counts) => classify(meta.nvar, counts),
        None => Ok(vec![VarType::Continuous; meta.nvar]),
    }
}

/// Loads a model into a solver, warm starting from the model's initial guess.
///
/// # Errors
///
/// See [`load_with`].
pub fn load<M, S>(model: M, solver: &mut S) -> Result<(), Error<S::Error>>
where
    M: NlpModel,
    S: NonlinearSolver<ModelEvaluator<M>>,
{
    load_with(model, solver, &LoadOptions::default())
}

/// Loads a model into a solver.
///
/// The model's bounds and sense are passed to
/// [`NonlinearSolver::load_problem`] along with a [`ModelEvaluator`] that
/// owns the model. Variable types are set only when at least one variable
/// is integer or binary, since continuous is the solver default.
///
/// # Errors
///
/// Returns an error if the metadata is inconsistent, the variable category
/// counts do not decode, the warm start has the wrong length, or the solver
/// rejects a call.
pub fn load_with<M, S>(
    model: M,
    solver: &mut S,
    options: &LoadOptions,
) -> Result<(), Error<S::Error>>
where
    M: NlpModel,
    S: NonlinearSolver<ModelEvaluator<M>>,
{
    let meta = model.meta();
    meta.validate().inspect_err(|err| {
        warn!(
            component = "bridge",
            operation = "load",
            model = %meta.name,
            error = %err,
            "Rejected model metadata"
        );
    })?;

    let types = var_types(meta)?;

    let warm_start = match options.warm_start() {
        WarmStart::Model => Some(meta.x0.clone()),
        WarmStart::Point(x) if x.len() == meta.nvar => Some(x.clone()),
        WarmStart::Point(x) => {
            return Err(Error::WarmStart {
                expected: meta.nvar,
                found: x.len(),
            });
        }
        WarmStart::Skip => None,
    };

    let problem = ProblemData {
        nvar: meta.nvar,
        ncon: meta.ncon,
        lvar: meta.lvar.clone(),
        uvar: meta.uvar.clone(),
        lcon: meta.lcon.clone(),
        ucon: meta.ucon.clone(),
    };
    let sense = Sense::from_minimize(meta.minimize);

    debug!(
        component = "bridge",
        operation = "load",
        model = %meta.name,
        nvar = meta.nvar,
        ncon = meta.ncon,
        ?sense,
        "Loading problem"
    );

    solver
        .load_problem(problem, sense, ModelEvaluator::new(model))
        .map_err(Error::Solver)?;

    if has_discrete(&types) {
        debug!(
            component = "bridge",
            operation = "set_var_types",
            discrete = types.iter().filter(|t| t.is_discrete()).count(),
            "Setting variable types"
        );
        solver.set_var_types(&types).map_err(Error::Solver)?;
    }

    if let Some(x0) = warm_start {
        solver.set_warm_start(&x0).map_err(Error::Solver)?;
    }

    Ok(())
}

/// Loads a model into a solver and solves it.
///
/// # Errors
///
/// See [`solve_with`].
pub fn solve<M, S>(model: M, solver: &mut S) -> Result<Solution, Error<S::Error>>
where
    M: NlpModel,
    S: NonlinearSolver<ModelEvaluator<M>>,
{
    solve_with(model, solver, &LoadOptions::default())
}

/// Loads a model into a solver, solves it, and collects the result.
///
/// # Errors
///
/// Returns an error if loading fails (see [`load_with`]) or the solver
/// fails to optimize.
pub fn solve_with<M, S>(
    model: M,
    solver: &mut S,
    options: &LoadOptions,
) -> Result<Solution, Error<S::Error>>
where
    M: NlpModel,
    S: NonlinearSolver<ModelEvaluator<M>>,
{
    load_with(model, solver, options)?;
    solver.optimize().map_err(Error::Solver)?;

    let solution = Solution {
        status: solver.status(),
        x: solver.solution().map(<[f64]>::to_vec),
        objective: solver.objective_value(),
    };

    info!(
        component = "bridge",
        operation = "solve",
        status = ?solution.status,
        objective = ?solution.objective,
        "Solve finished"
    );

    Ok(solution)
}
