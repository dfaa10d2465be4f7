use std::fmt;

use thiserror::Error;

/// Which side of an interval a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Lower,
    Upper,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("lower"),
            Self::Upper => f.write_str("upper"),
        }
    }
}

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundsError {
    #[error("lower bounds have {lower} entries but upper bounds have {upper}")]
    LengthMismatch { lower: usize, upper: usize },

    #[error("inverted bounds at index {index}: lower {lower} > upper {upper}")]
    Inverted { index: usize, lower: f64, upper: f64 },

    #[error("{side} bound at index {index} is {value}, which admits no point")]
    Empty { index: usize, side: Side, value: f64 },
}

/// Per-dimension box constraints on the search point.
///
/// Either side may be omitted entirely, and individual entries may be
/// omitted by placing `NaN` or an infinity pointing away from the feasible
/// region (`-∞` for a lower bound, `+∞` for an upper bound).
///
/// Construction validates that both sides agree on length and that every
/// dimension admits at least one point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Bounds {
    /// Returns bounds that constrain nothing and fit any dimensionality.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates bounds from optional lower and upper vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if both sides are present with different lengths, if a
    /// finite lower bound exceeds its finite upper bound, or if an entry
    /// excludes every point (`+∞` lower or `-∞` upper).
    pub fn new(lower: Option<Vec<f64>>, upper: Option<Vec<f64>>) -> Result<Self, BoundsError> {
        if let (Some(l), Some(u)) = (&lower, &upper)
            && l.len() != u.len()
        {
            return Err(BoundsError::LengthMismatch {
                lower: l.len(),
                upper: u.len(),
            });
        }

        let bounds = Self { lower, upper };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Creates bounds from `(lower, upper)` pairs, one per dimension.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Bounds::new`].
    pub fn from_intervals<I>(intervals: I) -> Result<Self, BoundsError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (lower, upper) = intervals.into_iter().unzip();
        Self::new(Some(lower), Some(upper))
    }

    /// Returns the raw lower bounds, if any were given.
    #[must_use]
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Returns the raw upper bounds, if any were given.
    #[must_use]
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Returns the dimensionality fixed by these bounds.
    ///
    /// Returns `None` when neither side was given.
    #[must_use]
    pub fn dim(&self) -> Option<usize> {
        self.lower
            .as_ref()
            .or(self.upper.as_ref())
            .map(Vec::len)
    }

    /// Returns the effective lower bound at `index`, or `None` if absent.
    #[must_use]
    pub fn lower_at(&self, index: usize) -> Option<f64> {
        self.lower
            .as_ref()
            .and_then(|l| l.get(index).copied())
            .filter(|v| !v.is_nan() && *v != f64::NEG_INFINITY)
    }

    /// Returns the effective upper bound at `index`, or `None` if absent.
    #[must_use]
    pub fn upper_at(&self, index: usize) -> Option<f64> {
        self.upper
            .as_ref()
            .and_then(|u| u.get(index).copied())
            .filter(|v| !v.is_nan() && *v != f64::INFINITY)
    }

    fn validate(&self) -> Result<(), BoundsError> {
        for index in 0..self.dim().unwrap_or(0) {
            let lower = self.lower_at(index);
            let upper = self.upper_at(index);

            if let Some(value) = lower.filter(|v| v.is_infinite()) {
                return Err(BoundsError::Empty {
                    index,
                    side: Side::Lower,
                    value,
                });
            }
            if let Some(value) = upper.filter(|v| v.is_infinite()) {
                return Err(BoundsError::Empty {
                    index,
                    side: Side::Upper,
                    value,
                });
            }
            if let (Some(lower), Some(upper)) = (lower, upper)
                && lower > upper
            {
                return Err(BoundsError::Inverted {
                    index,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn unbounded_has_no_dimension() {
        let bounds = Bounds::unbounded();
        assert_eq!(bounds.dim(), None);
        assert_eq!(bounds.lower_at(0), None);
        assert_eq!(bounds.upper_at(0), None);
    }

    #[test]
    fn one_sided_bounds_fix_dimension() {
        let bounds = Bounds::new(None, Some(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(bounds.dim(), Some(3));
        assert!(bounds.lower().is_none());
        assert_relative_eq!(bounds.upper_at(2).unwrap(), 3.0);
    }

    #[test]
    fn sentinels_mark_absent_entries() {
        let bounds = Bounds::new(
            Some(vec![f64::NAN, f64::NEG_INFINITY, -1.0]),
            Some(vec![f64::INFINITY, f64::NAN, 1.0]),
        )
        .unwrap();

        assert_eq!(bounds.lower_at(0), None);
        assert_eq!(bounds.lower_at(1), None);
        assert_eq!(bounds.upper_at(0), None);
        assert_eq!(bounds.upper_at(1), None);
        assert_relative_eq!(bounds.lower_at(2).unwrap(), -1.0);
        assert_relative_eq!(bounds.upper_at(2).unwrap(), 1.0);
    }

    #[test]
    fn from_intervals_splits_pairs() {
        let bounds =
            Bounds::from_intervals([(1.0, 10.0), (f64::NEG_INFINITY, -1.0)]).unwrap();

        assert_eq!(bounds.lower(), Some([1.0, f64::NEG_INFINITY].as_slice()));
        assert_eq!(bounds.upper(), Some([10.0, -1.0].as_slice()));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Bounds::new(Some(vec![0.0]), Some(vec![1.0, 2.0])).unwrap_err();
        assert_eq!(err, BoundsError::LengthMismatch { lower: 1, upper: 2 });
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Bounds::from_intervals([(0.0, 1.0), (3.0, 2.0)]).unwrap_err();
        assert!(matches!(err, BoundsError::Inverted { index: 1, .. }));
    }

    #[test]
    fn accepts_fixed_variable() {
        assert!(Bounds::from_intervals([(2.0, 2.0)]).is_ok());
    }

    #[test]
    fn rejects_bounds_that_admit_nothing() {
        let err = Bounds::new(Some(vec![f64::INFINITY]), None).unwrap_err();
        assert!(matches!(
            err,
            BoundsError::Empty {
                index: 0,
                side: Side::Lower,
                ..
            }
        ));

        let err = Bounds::new(None, Some(vec![0.0, f64::NEG_INFINITY])).unwrap_err();
        assert!(matches!(
            err,
            BoundsError::Empty {
                index: 1,
                side: Side::Upper,
                ..
            }
        ));
    }
}
