//! Core traits and types for nlpbridge.
//!
//! This crate defines the two sides that the bridge connects:
//!
//! - [`NlpModel`]: a nonlinear program that evaluates its objective,
//!   constraints and their derivatives, described by [`NlpMeta`]
//! - [`Evaluator`] and [`NonlinearSolver`]: the callback contract and the
//!   loading interface a generic nonlinear solver expects
//!
//! The [`sparse`] module holds the coordinate-format products used by the
//! default derivative-product methods of [`NlpModel`].

mod meta;
mod model;
mod solver;

pub mod sparse;

pub use meta::{MetaError, NlpMeta, VarCounts};
pub use model::NlpModel;
pub use solver::{Evaluator, Feature, NonlinearSolver, ProblemData, Sense, SolveStatus, VarType};
