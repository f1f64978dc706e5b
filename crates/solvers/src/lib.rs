//! Solvers that accept problems through the nlpbridge solver interface.
//!
//! Each solver implements [`NonlinearSolver`] for any [`Evaluator`], so a
//! model loaded through `nlpbridge` can be solved without further glue.
//!
//! # Solvers
//!
//! - [`golden_section`]: derivative-free search for single-variable
//!   problems with finite bounds
//!
//! [`NonlinearSolver`]: nlpbridge_core::NonlinearSolver
//! [`Evaluator`]: nlpbridge_core::Evaluator

pub mod golden_section;
