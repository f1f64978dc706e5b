use thiserror::Error;

/// Settings for the golden section solver.
///
/// The search stops once the distance between the two probes is at most
/// `x_abs_tol + x_rel_tol * |midpoint|`, or after `max_iters` shrinks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
}

/// Errors from building a [`Config`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-10,
            x_rel_tol: 1e-10,
        }
    }
}

impl Config {
    /// Creates a config from an iteration limit and tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or not finite.
    pub fn new(max_iters: usize, x_abs_tol: f64, x_rel_tol: f64) -> Result<Self, ConfigError> {
        Self::default()
            .with_max_iters(max_iters)
            .with_tolerances(x_abs_tol, x_rel_tol)
    }

    /// Replaces the iteration limit.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Replaces both tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or not finite.
    pub fn with_tolerances(mut self, x_abs_tol: f64, x_rel_tol: f64) -> Result<Self, ConfigError> {
        if !is_tolerance(x_abs_tol) {
            return Err(ConfigError::XAbs);
        }
        if !is_tolerance(x_rel_tol) {
            return Err(ConfigError::XRel);
        }
        self.x_abs_tol = x_abs_tol;
        self.x_rel_tol = x_rel_tol;
        Ok(self)
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }

    /// Returns `true` if probes `gap` apart around `mid` are close enough.
    pub(super) fn is_converged(&self, gap: f64, mid: f64) -> bool {
        gap.abs() <= self.x_abs_tol + self.x_rel_tol * mid.abs()
    }
}

fn is_tolerance(tol: f64) -> bool {
    tol.is_finite() && tol >= 0.0
}
