//! Golden section search behind the [`NonlinearSolver`] interface.
//!
//! # Algorithm
//!
//! Golden section search finds the minimum (or maximum) of a unimodal
//! function on a bounded interval. It keeps two interior probes placed by the
//! golden ratio, compares their objectives, and shrinks the interval toward
//! the better probe. Only [`Evaluator::eval_f`] is used.
//!
//! # Supported problems
//!
//! - Exactly one variable with finite bounds
//! - No general constraints
//! - Continuous variables only
//!
//! Anything else is rejected when loaded or when variable types are set.
//!
//! # Warm start
//!
//! A warm start inside the bounds is evaluated once and reported instead of
//! the search result if its objective is better. A warm start outside the
//! bounds is ignored.

mod bracket;
mod config;
mod error;
mod search;


pub use config::{Config, ConfigError};
pub use error::Error;

use tracing::{debug, warn};

use nlpbridge_core::{Evaluator, NonlinearSolver, ProblemData, Sense, SolveStatus, VarType};

use search::{Outcome, search};

struct Loaded<E> {
    evaluator: E,
    bounds: [f64; 2],
    sense: Sense,
}

/// A single-variable solver using golden section search.
pub struct GoldenSection<E> {
    config: Config,
    loaded: Option<Loaded<E>>,
    warm_start: Option<f64>,
    outcome: Option<Outcome>,
    status: SolveStatus,
}

impl<E> Default for GoldenSection<E> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E> GoldenSection<E> {
    /// Creates a solver with no problem loaded.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            loaded: None,
            warm_start: None,
            outcome: None,
            status: SolveStatus::NotSolved,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the loaded evaluator, if any.
    pub fn evaluator(&self) -> Option<&E> {
        self.loaded.as_ref().map(|loaded| &loaded.evaluator)
    }

    /// Returns the number of shrink iterations of the last solve.
    #[must_use]
    pub fn iters(&self) -> Option<usize> {
        self.outcome.map(|outcome| outcome.iters)
    }

    fn loaded(&self) -> Result<&Loaded<E>, Error> {
        self.loaded.as_ref().ok_or(Error::NotLoaded)
    }
}

fn check_len(what: &'static str, found: usize) -> Result<(), Error> {
    if found == 1 {
        Ok(())
    } else {
        Err(Error::Dimension {
            what,
            expected: 1,
            found,
        })
    }
}

impl<E: Evaluator> NonlinearSolver<E> for GoldenSection<E> {
    type Error = Error;

    fn load_problem(
        &mut self,
        problem: ProblemData,
        sense: Sense,
        mut evaluator: E,
    ) -> Result<(), Self::Error> {
        if problem.nvar != 1 || problem.ncon != 0 {
            warn!(
                component = "golden_section",
                operation = "load_problem",
                nvar = problem.nvar,
                ncon = problem.ncon,
                "Rejected problem shape"
            );
            return Err(Error::Shape {
                nvar: problem.nvar,
                ncon: problem.ncon,
            });
        }

        check_len("lower bounds", problem.lvar.len())?;
        check_len("upper bounds", problem.uvar.len())?;

        let (lower, upper) = (problem.lvar[0], problem.uvar[0]);
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(Error::Bounds { lower, upper });
        }

        evaluator
            .initialize(&[])
            .map_err(|err| Error::Evaluator(Box::new(err)))?;

        debug!(
            component = "golden_section",
            operation = "load_problem",
            lower,
            upper,
            ?sense,
            "Problem loaded"
        );

        self.loaded = Some(Loaded {
            evaluator,
            bounds: [lower, upper],
            sense,
        });
        self.warm_start = None;
        self.outcome = None;
        self.status = SolveStatus::NotSolved;
        Ok(())
    }

    fn set_var_types(&mut self, types: &[VarType]) -> Result<(), Self::Error> {
        self.loaded()?;
        check_len("variable types", types.len())?;

        match types.iter().position(|t| t.is_discrete()) {
            Some(index) => Err(Error::Discrete {
                index,
                var_type: types[index],
            }),
            None => Ok(()),
        }
    }

    fn set_warm_start(&mut self, x0: &[f64]) -> Result<(), Self::Error> {
        let [lower, upper] = self.loaded()?.bounds;
        check_len("warm start", x0.len())?;

        let x = x0[0];
        if (lower..=upper).contains(&x) {
            self.warm_start = Some(x);
        } else {
            debug!(
                component = "golden_section",
                operation = "set_warm_start",
                x,
                "Ignoring warm start outside the bounds"
            );
            self.warm_start = None;
        }
        Ok(())
    }

    fn optimize(&mut self) -> Result<(), Self::Error> {
        let loaded = self.loaded()?;
        let score: fn(f64) -> f64 = match loaded.sense {
            Sense::Minimize => |v: f64| v,
            Sense::Maximize => |v: f64| -v,
        };

        let result = search(
            |x| loaded.evaluator.eval_f(&[x]),
            loaded.bounds,
            self.warm_start,
            &self.config,
            score,
        );

        match result {
            Ok(outcome) => {
                self.status = if outcome.converged {
                    SolveStatus::Optimal
                } else {
                    SolveStatus::IterationLimit
                };
                debug!(
                    component = "golden_section",
                    operation = "optimize",
                    x = outcome.best.x,
                    objective = outcome.best.objective,
                    iters = outcome.iters,
                    status = ?self.status,
                    "Search finished"
                );
                self.outcome = Some(outcome);
                Ok(())
            }
            Err(err) => {
                self.status = SolveStatus::Error;
                self.outcome = None;
                Err(Error::Evaluator(Box::new(err)))
            }
        }
    }

    fn status(&self) -> SolveStatus {
        self.status
    }

    fn objective_value(&self) -> Option<f64> {
        self.outcome.map(|outcome| outcome.best.objective)
    }

    fn solution(&self) -> Option<&[f64]> {
        self.outcome
            .as_ref()
            .map(|outcome| std::slice::from_ref(&outcome.best.x))
    }
}
