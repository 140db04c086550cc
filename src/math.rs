#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Degrees to radians factor.
pub(crate) const RAD: f64 = core::f64::consts::PI / 180.0;

/// Round half up, the way the reference formulas round the Julian cycle.
///
/// Differs from [`f64::round`] for negative halves: `-2.5` rounds to `-2`.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Parabola through three equally spaced samples at `x = -1, 0, 1`.
///
/// Written as `a·x² + b·x + c`, with the vertex cached because callers
/// classify roots by which side of the vertex they fall on.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Parabola {
    pub(crate) a: f64,
    pub(crate) b: f64,
    pub(crate) c: f64,
    /// Abscissa of the vertex
    pub(crate) xe: f64,
    /// Value at the vertex
    pub(crate) ye: f64,
}

/// Roots of a [`Parabola`] lying inside the sampled interval `[-1, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum IntervalRoots {
    None,
    /// Exactly one crossing inside the interval
    One(f64),
    /// Two crossings, in ascending order
    Two(f64, f64),
}

impl Parabola {
    /// Fits the parabola through `(-1, y0)`, `(0, y1)`, `(1, y2)`.
    pub(crate) fn through(y0: f64, y1: f64, y2: f64) -> Self {
        let a = (y0 + y2) / 2.0 - y1;
        let b = (y2 - y0) / 2.0;
        let xe = -b / (2.0 * a);
        let ye = (a * xe + b) * xe + y1;
        Self { a, b, c: y1, xe, ye }
    }

    /// Finds the zero crossings inside `[-1, 1]`.
    ///
    /// When only the upper root is inside, it is reported as the single root.
    pub(crate) fn roots_in_unit_interval(&self) -> IntervalRoots {
        let discriminant = self.b * self.b - 4.0 * self.a * self.c;
        if discriminant.is_nan() || discriminant < 0.0 {
            return IntervalRoots::None;
        }

        let dx = discriminant.sqrt() / (self.a.abs() * 2.0);
        let x1 = self.xe - dx;
        let x2 = self.xe + dx;
        match (x1.abs() <= 1.0, x2.abs() <= 1.0) {
            (true, true) => IntervalRoots::Two(x1, x2),
            (true, false) => IntervalRoots::One(x1),
            (false, true) => IntervalRoots::One(x2),
            (false, false) => IntervalRoots::None,
        }
    }
}
