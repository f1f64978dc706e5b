//! Hands nonlinear programming models to generic nonlinear solvers.
//!
//! A model implementing [`NlpModel`] is wrapped in a [`ModelEvaluator`],
//! which serves the solver-side [`Evaluator`] contract by forwarding every
//! call to the model. [`load`] passes the evaluator to a
//! [`NonlinearSolver`] together with the model's bounds, optimization sense,
//! variable types and starting point; [`solve`] also runs the solver.
//!
//! Models that carry [`VarCounts`] have their variables typed by
//! [`classify`]; all other models are loaded as purely continuous.
//!
//! # Example
//!
//! ```no_run
//! # fn run<M, S>(model: M, solver: &mut S) -> Result<(), Box<dyn std::error::Error>>
//! # where
//! #     M: nlpbridge::NlpModel,
//! #     S: nlpbridge::NonlinearSolver<nlpbridge::ModelEvaluator<M>>,
//! # {
//! let solution = nlpbridge::solve(model, solver)?;
//! println!("{:?} at {:?}", solution.status, solution.x);
//! # Ok(())
//! # }
//! ```
//!
//! [`Evaluator`]: nlpbridge_core::Evaluator

pub mod classify;

mod error;
mod evaluator;
mod load;

#[cfg(test)]
mod testing;

pub use classify::{ClassifyError, classify, has_discrete};
pub use error::Error;
pub use evaluator::{EvalError, ModelEvaluator};
pub use load::{LoadOptions, Solution, WarmStart, load, load_with, solve, solve_with, var_types};

pub use nlpbridge_core::{
    Evaluator, Feature, MetaError, NlpMeta, NlpModel, NonlinearSolver, ProblemData, Sense,
    SolveStatus, VarCounts, VarType,
};
