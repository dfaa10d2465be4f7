use twine_core::{BoundKind, Bounds, EncodedBounds, Side};

use super::Error;

/// Encodes bounds into per-dimension control codes for an `n`-dimensional
/// point.
///
/// A dimension's control code reflects which of its bounds are present: an
/// entry is absent if its side is missing entirely, or if it is `NaN` or the
/// infinity pointing away from the feasible region. Bound slots that the
/// control code marks as unused are filled with `0.0`.
///
/// The encoding is a pure function of its inputs.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if either side of `bounds` does not
/// have exactly `n` entries.
pub fn encode(bounds: Option<&Bounds>, n: usize) -> Result<EncodedBounds, Error> {
    let Some(bounds) = bounds else {
        return Ok(EncodedBounds::unbounded(n));
    };

    for (side, values) in [(Side::Lower, bounds.lower()), (Side::Upper, bounds.upper())] {
        if let Some(values) = values
            && values.len() != n
        {
            return Err(Error::DimensionMismatch {
                point: n,
                side,
                bounds: values.len(),
            });
        }
    }

    let mut encoded = EncodedBounds::unbounded(n);
    for i in 0..n {
        let lower = bounds.lower_at(i);
        let upper = bounds.upper_at(i);

        encoded.kinds[i] = match (lower, upper) {
            (None, None) => BoundKind::Unbounded,
            (Some(_), None) => BoundKind::LowerOnly,
            (Some(_), Some(_)) => BoundKind::Both,
            (None, Some(_)) => BoundKind::UpperOnly,
        };
        encoded.lower[i] = lower.unwrap_or(0.0);
        encoded.upper[i] = upper.unwrap_or(0.0);
    }

    Ok(encoded)
}
