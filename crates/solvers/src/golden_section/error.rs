use nlpbridge_core::VarType;

/// Errors returned by the golden section solver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no problem is loaded")]
    NotLoaded,

    #[error("expected one variable and no constraints, got {nvar} variables and {ncon} constraints")]
    Shape { nvar: usize, ncon: usize },

    #[error("variable bounds [{lower}, {upper}] must be finite and ordered")]
    Bounds { lower: f64, upper: f64 },

    #[error("variable {index} is {var_type:?}, only continuous variables are supported")]
    Discrete { index: usize, var_type: VarType },

    #[error("{what} has length {found}, expected {expected}")]
    Dimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("evaluator error: {0}")]
    Evaluator(Box<dyn std::error::Error + Send + Sync>),
}
