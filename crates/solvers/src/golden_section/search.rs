use super::{Config, bracket::Bracket};

/// An evaluated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Point {
    pub(super) x: f64,
    pub(super) objective: f64,
}

impl Point {
    fn at<F, E>(x: f64, eval: &mut F) -> Result<Self, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        Ok(Self {
            x,
            objective: eval(x)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Outcome {
    pub(super) best: Point,
    pub(super) iters: usize,
    pub(super) converged: bool,
}

/// Runs golden section search on `[lower, upper]`.
///
/// `score` maps an objective to a value where smaller is better, so the
/// same search serves minimization (identity) and maximization (negation).
/// A `start` point, if given, is evaluated once and competes for best.
pub(super) fn search<F, S, E>(
    mut eval: F,
    [lower, upper]: [f64; 2],
    start: Option<f64>,
    config: &Config,
    score: S,
) -> Result<Outcome, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    S: Fn(f64) -> f64,
{
    let better = |a: Point, b: Point| {
        if score(b.objective) < score(a.objective) {
            b
        } else {
            a
        }
    };

    let mut bracket = Bracket::new(lower, upper);
    let mut near = Point::at(bracket.near, &mut eval)?;
    let mut far = Point::at(bracket.far, &mut eval)?;
    let mut best = better(near, far);

    if let Some(x) = start {
        best = better(best, Point::at(x, &mut eval)?);
    }

    for iter in 1..=config.max_iters() {
        let mid = 0.5 * (bracket.near + bracket.far);
        if config.is_converged(bracket.gap(), mid) {
            return Ok(Outcome {
                best,
                iters: iter - 1,
                converged: true,
            });
        }

        if score(near.objective) <= score(far.objective) {
            let x = bracket.keep_lower();
            far = near;
            near = Point::at(x, &mut eval)?;
            best = better(best, near);
        } else {
            let x = bracket.keep_upper();
            near = far;
            far = Point::at(x, &mut eval)?;
            best = better(best, far);
        }
    }

    Ok(Outcome {
        best,
        iters: config.max_iters(),
        converged: false,
    })
}
