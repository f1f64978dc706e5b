/// The inverse golden ratio, 1/φ = φ - 1.
const INV_PHI: f64 = 0.618_033_988_749_895;

/// An interval `[lower, upper]` with two interior probes placed by the
/// golden ratio.
///
/// After a shrink, one old probe is reused as a new probe, so each
/// iteration needs a single new evaluation.
#[derive(Debug, Clone, Copy)]
pub(super) struct Bracket {
    pub(super) lower: f64,
    pub(super) upper: f64,

    /// Probe at `lower + (1 - φ⁻¹) * width`.
    pub(super) near: f64,

    /// Probe at `lower + φ⁻¹ * width`.
    pub(super) far: f64,
}

impl Bracket {
    /// Creates a bracket over variable bounds, which must satisfy
    /// `lower <= upper`.
    pub(super) fn new(lower: f64, upper: f64) -> Self {
        let width = upper - lower;
        Self {
            lower,
            upper,
            near: lower + (1.0 - INV_PHI) * width,
            far: lower + INV_PHI * width,
        }
    }

    pub(super) fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Distance between the two probes.
    pub(super) fn gap(&self) -> f64 {
        self.far - self.near
    }

    /// Keeps `[lower, far]`; the old `near` becomes `far`.
    ///
    /// Returns the new `near` probe, which still needs an evaluation.
    pub(super) fn keep_lower(&mut self) -> f64 {
        self.upper = self.far;
        self.far = self.near;
        self.near = self.lower + (1.0 - INV_PHI) * self.width();
        self.near
    }

    /// Keeps `[near, upper]`; the old `far` becomes `near`.
    ///
    /// Returns the new `far` probe, which still needs an evaluation.
    pub(super) fn keep_upper(&mut self) -> f64 {
        self.lower = self.near;
        self.near = self.far;
        self.far = self.lower + INV_PHI * self.width();
        self.far
    }
}
