use thiserror::Error;

use nlpbridge_core::MetaError;

use crate::classify::ClassifyError;

/// Errors that can occur when handing a model to a solver.
///
/// `SE` is the error type of the target solver.
#[derive(Debug, Error)]
pub enum Error<SE> {
    #[error("invalid model metadata")]
    Meta(#[from] MetaError),

    #[error("inconsistent variable categories")]
    Classify(#[from] ClassifyError),

    #[error("warm start has length {found}, expected {expected}")]
    WarmStart { expected: usize, found: usize },

    /// The solver rejected a call.
    #[error("solver error")]
    Solver(#[source] SE),
}
