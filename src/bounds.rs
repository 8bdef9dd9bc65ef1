//! Classification of a `(lower, upper)` pair into the bound type the engine expects.

native_codes! {
    /// How a row or a column is bounded.
    ///
    /// This is derived from the numeric bounds with [BoundKind::classify] and never stored
    /// on its own.
    pub enum BoundKind ("bound kind") {
        /// `-inf < x < +inf`
        Free = 1 => "free",
        /// `lower <= x < +inf`
        LowerBounded = 2 => "lower_bounded",
        /// `-inf < x <= upper`
        UpperBounded = 3 => "upper_bounded",
        /// `lower <= x <= upper`
        DoubleBounded = 4 => "double_bounded",
        /// `x == lower == upper`
        Fixed = 5 => "fixed",
    }
}

impl BoundKind {
    /// Derives the bound kind of a pair of bounds.
    ///
    /// Infinite upper bounds are checked first, then infinite lower bounds, then equality,
    /// so `classify(f64::NEG_INFINITY, f64::INFINITY)` is [BoundKind::Free] and
    /// `classify(3., 3.)` is [BoundKind::Fixed].
    ///
    /// `lower > upper` is not detected here; [ProblemData::validate](crate::ProblemData::validate)
    /// rejects it before any bound reaches the engine.
    ///
    /// ```
    /// use glpk_core::BoundKind;
    /// assert_eq!(BoundKind::classify(0., f64::INFINITY), BoundKind::LowerBounded);
    /// assert_eq!(BoundKind::classify(f64::NEG_INFINITY, 5.), BoundKind::UpperBounded);
    /// assert_eq!(BoundKind::classify(0., 10.), BoundKind::DoubleBounded);
    /// ```
    pub fn classify(lower: f64, upper: f64) -> Self {
        if upper == f64::INFINITY {
            if lower == f64::NEG_INFINITY {
                BoundKind::Free
            } else {
                BoundKind::LowerBounded
            }
        } else if lower == f64::NEG_INFINITY {
            BoundKind::UpperBounded
        } else if lower == upper {
            BoundKind::Fixed
        } else {
            BoundKind::DoubleBounded
        }
    }
}
