//! Decoding of variable category counts into per-variable types.
//!
//! Models that track [`VarCounts`] order their variables as
//!
//! ```text
//! | both | constraints-only | objective-only | arcs | linear | binary | integer |
//! ```
//!
//! where each nonlinear block lists its continuous variables before its
//! integer ones. Arc and linear variables are continuous.

use std::fmt;

use thiserror::Error;

use nlpbridge_core::{VarCounts, VarType};

/// One of the three nonlinear blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// Nonlinear in both objective and constraints.
    Both,

    /// Nonlinear in constraints only.
    Constraints,

    /// Nonlinear in objective only.
    Objective,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Block::Both => "both",
            Block::Constraints => "constraints-only",
            Block::Objective => "objective-only",
        };
        f.write_str(name)
    }
}

/// Errors raised when category counts contradict each other.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// A cumulative count is smaller than the count it should include.
    #[error("{block} count {count} is below the preceding cumulative count {previous}")]
    Nesting {
        block: Block,
        count: usize,
        previous: usize,
    },

    /// A block has more integer variables than variables.
    #[error("{block} block has {size} variables but {integer} are integer")]
    Split {
        block: Block,
        size: usize,
        integer: usize,
    },

    /// The walk over all categories does not cover exactly `nvar` variables.
    ///
    /// Counts whose sum overflows `usize` report `walked` as `usize::MAX`.
    #[error("category counts cover {walked} variables, expected {nvar}")]
    IndexMismatch { nvar: usize, walked: usize },
}

/// Returns the type of every variable, in variable order.
///
/// # Errors
///
/// Returns an error if the counts are not nested as described in
/// [`VarCounts`], or if they do not add up to exactly `nvar` variables.
pub fn classify(nvar: usize, counts: &VarCounts) -> Result<Vec<VarType>, ClassifyError> {
    let mut walk = Walk::new(nvar);

    let blocks = [
        (Block::Both, counts.nlvb, 0, counts.nlvbi),
        (Block::Constraints, counts.nlvc, counts.nlvb, counts.nlvci),
        (Block::Objective, counts.nlvo, counts.nlvc, counts.nlvoi),
    ];
    for (block, count, previous, integer) in blocks {
        let size = count
            .checked_sub(previous)
            .ok_or(ClassifyError::Nesting {
                block,
                count,
                previous,
            })?;
        let continuous = size
            .checked_sub(integer)
            .ok_or(ClassifyError::Split {
                block,
                size,
                integer,
            })?;

        walk.skip(continuous)?;
        walk.mark(integer, VarType::Integer)?;
    }

    walk.skip(counts.nwv)?;

    let tail = walk
        .position()
        .checked_add(counts.nbv)
        .and_then(|p| p.checked_add(counts.niv))
        .ok_or_else(|| walk.overflow())?;
    let Some(linear) = nvar.checked_sub(tail) else {
        return Err(ClassifyError::IndexMismatch { nvar, walked: tail });
    };
    walk.skip(linear)?;

    walk.mark(counts.nbv, VarType::Binary)?;
    walk.mark(counts.niv, VarType::Integer)?;

    walk.finish()
}

/// Returns `true` if any variable is integer or binary.
#[must_use]
pub fn has_discrete(types: &[VarType]) -> bool {
    types.iter().any(|t| t.is_discrete())
}

/// A single pass over the variable indices.
///
/// Writes past `nvar` are dropped; [`Walk::finish`] reports them as a
/// mismatch instead.
struct Walk {
    types: Vec<VarType>,
    position: usize,
}

impl Walk {
    fn new(nvar: usize) -> Self {
        Self {
            types: vec![VarType::Continuous; nvar],
            position: 0,
        }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn overflow(&self) -> ClassifyError {
        ClassifyError::IndexMismatch {
            nvar: self.types.len(),
            walked: usize::MAX,
        }
    }

    /// Moves past `n` variables and returns where they start.
    fn advance(&mut self, n: usize) -> Result<usize, ClassifyError> {
        let start = self.position;
        self.position = start.checked_add(n).ok_or_else(|| self.overflow())?;
        Ok(start)
    }

    fn skip(&mut self, n: usize) -> Result<(), ClassifyError> {
        self.advance(n).map(|_| ())
    }

    fn mark(&mut self, n: usize, var_type: VarType) -> Result<(), ClassifyError> {
        let start = self.advance(n)?;
        for slot in self.types.iter_mut().skip(start).take(n) {
            *slot = var_type;
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<VarType>, ClassifyError> {
        let nvar = self.types.len();
        if self.position == nvar {
            Ok(self.types)
        } else {
            Err(ClassifyError::IndexMismatch {
                nvar,
                walked: self.position,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nlpbridge_core::VarType::{Binary as B, Continuous as C, Integer as I};

    fn count(types: &[VarType], var_type: VarType) -> usize {
        types.iter().filter(|t| **t == var_type).count()
    }

    #[test]
    fn all_linear_continuous() {
        let types = classify(5, &VarCounts::new()).unwrap();

        assert_eq!(types, vec![C; 5]);
        assert!(!has_discrete(&types));
    }

    #[test]
    fn all_binary() {
        let types = classify(4, &VarCounts::new().with_binaries(4)).unwrap();

        assert_eq!(types, vec![B; 4]);
    }

    #[test]
    fn empty_problem() {
        assert_eq!(classify(0, &VarCounts::new()).unwrap(), Vec::new());
    }

    #[test]
    fn mixed_nonlinear_and_linear_blocks() {
        let counts = VarCounts::new()
            .with_both(2, 1)
            .with_constraints(2, 0)
            .with_objective(2, 0)
            .with_binaries(1)
            .with_integers(1);

        let types = classify(6, &counts).unwrap();

        assert_eq!(types, vec![C, I, C, C, B, I]);
        assert!(has_discrete(&types));
    }

    #[test]
    fn integer_suffix_of_every_nonlinear_block() {
        // both: [C, I], constraints-only: [C, C, I], objective-only: [I],
        // arcs: [C], linear: [C], binary: [B, B], integer: [I]
        let counts = VarCounts::new()
            .with_both(2, 1)
            .with_constraints(5, 1)
            .with_objective(6, 1)
            .with_arcs(1)
            .with_binaries(2)
            .with_integers(1);

        let types = classify(11, &counts).unwrap();

        assert_eq!(types, vec![C, I, C, C, I, I, C, C, B, B, I]);
    }

    #[test]
    fn tag_counts_match_category_counts() {
        for nlvbi in 0..=2 {
            for nlvci in 0..=1 {
                for nbv in 0..=2 {
                    for niv in 0..=2 {
                        let counts = VarCounts::new()
                            .with_both(2, nlvbi)
                            .with_constraints(3, nlvci)
                            .with_objective(5, 1)
                            .with_arcs(1)
                            .with_binaries(nbv)
                            .with_integers(niv);
                        let nvar = 8 + nbv + niv;

                        let types = classify(nvar, &counts).unwrap();

                        assert_eq!(types.len(), nvar);
                        assert_eq!(count(&types, I), nlvbi + nlvci + 1 + niv);
                        assert_eq!(count(&types, B), nbv);
                        assert_eq!(types, classify(nvar, &counts).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn nonlinear_count_beyond_nvar_fails_final_check() {
        let counts = VarCounts::new().with_objective(4, 0);

        assert_eq!(
            classify(3, &counts),
            Err(ClassifyError::IndexMismatch { nvar: 3, walked: 4 })
        );
    }

    #[test]
    fn discrete_counts_beyond_nvar_fail_final_check() {
        let counts = VarCounts::new().with_arcs(1).with_binaries(2).with_integers(2);

        assert_eq!(
            classify(4, &counts),
            Err(ClassifyError::IndexMismatch { nvar: 4, walked: 5 })
        );
    }

    #[test]
    fn overflowing_binary_count_is_rejected() {
        let counts = VarCounts::new().with_binaries(usize::MAX).with_integers(1);

        assert_eq!(
            classify(3, &counts),
            Err(ClassifyError::IndexMismatch {
                nvar: 3,
                walked: usize::MAX,
            })
        );
    }

    #[test]
    fn overflowing_arc_count_is_rejected() {
        let counts = VarCounts::new()
            .with_both(1, 0)
            .with_constraints(1, 0)
            .with_objective(2, 0)
            .with_arcs(usize::MAX);

        assert_eq!(
            classify(3, &counts),
            Err(ClassifyError::IndexMismatch {
                nvar: 3,
                walked: usize::MAX,
            })
        );
    }

    #[test]
    fn maximal_objective_count_is_rejected() {
        let counts = VarCounts::new().with_objective(usize::MAX, 0);

        assert_eq!(
            classify(3, &counts),
            Err(ClassifyError::IndexMismatch {
                nvar: 3,
                walked: usize::MAX,
            })
        );
    }

    #[test]
    fn maximal_nested_counts_with_discrete_tail_are_rejected() {
        let counts = VarCounts::new()
            .with_both(usize::MAX, usize::MAX)
            .with_constraints(usize::MAX, 0)
            .with_objective(usize::MAX, 0)
            .with_binaries(1);

        assert_eq!(
            classify(2, &counts),
            Err(ClassifyError::IndexMismatch {
                nvar: 2,
                walked: usize::MAX,
            })
        );
    }

    #[test]
    fn integer_suffix_larger_than_block_is_rejected() {
        let counts = VarCounts::new().with_both(1, 2).with_constraints(1, 0).with_objective(1, 0);

        assert_eq!(
            classify(3, &counts),
            Err(ClassifyError::Split {
                block: Block::Both,
                size: 1,
                integer: 2,
            })
        );
    }

    #[test]
    fn shrinking_cumulative_count_is_rejected() {
        let counts = VarCounts::new().with_both(3, 0).with_constraints(2, 0);

        assert_eq!(
            classify(5, &counts),
            Err(ClassifyError::Nesting {
                block: Block::Constraints,
                count: 2,
                previous: 3,
            })
        );
    }

    #[test]
    fn errors_name_the_offending_block() {
        let err = ClassifyError::Split {
            block: Block::Objective,
            size: 1,
            integer: 3,
        };

        assert_eq!(
            err.to_string(),
            "objective-only block has 1 variables but 3 are integer"
        );
    }
}
