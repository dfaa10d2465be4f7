use twine_core::EncodedBounds;

/// Projects `x` onto the box in place.
pub(crate) fn project(x: &mut [f64], bounds: &EncodedBounds) {
    for (i, xi) in x.iter_mut().enumerate() {
        let kind = bounds.kinds[i];
        if kind.has_lower() && *xi < bounds.lower[i] {
            *xi = bounds.lower[i];
        }
        if kind.has_upper() && *xi > bounds.upper[i] {
            *xi = bounds.upper[i];
        }
    }
}

/// Returns the infinity norm of the projected gradient.
///
/// A gradient component that pushes against an active bound contributes
/// only the distance to that bound. Non-finite gradients yield `+∞` so they
/// can never pass a tolerance test.
pub(crate) fn projected_gradient_norm(x: &[f64], g: &[f64], bounds: &EncodedBounds) -> f64 {
    let mut norm = 0.0_f64;
    for (i, (&xi, &gi)) in x.iter().zip(g).enumerate() {
        if !gi.is_finite() {
            return f64::INFINITY;
        }
        let kind = bounds.kinds[i];
        let pg = if gi < 0.0 {
            if kind.has_upper() {
                (xi - bounds.upper[i]).max(gi)
            } else {
                gi
            }
        } else if kind.has_lower() {
            (xi - bounds.lower[i]).min(gi)
        } else {
            gi
        };
        norm = norm.max(pg.abs());
    }
    norm
}

/// Zeroes direction components that would leave an active bound.
pub(crate) fn clip_direction(x: &[f64], d: &mut [f64], bounds: &EncodedBounds) {
    for (i, di) in d.iter_mut().enumerate() {
        let kind = bounds.kinds[i];
        let at_lower = kind.has_lower() && x[i] <= bounds.lower[i];
        let at_upper = kind.has_upper() && x[i] >= bounds.upper[i];
        if (at_lower && *di < 0.0) || (at_upper && *di > 0.0) {
            *di = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use twine_core::BoundKind;

    fn box_bounds() -> EncodedBounds {
        EncodedBounds {
            kinds: vec![
                BoundKind::Unbounded,
                BoundKind::LowerOnly,
                BoundKind::Both,
                BoundKind::UpperOnly,
            ],
            lower: vec![0.0, 1.0, -1.0, 0.0],
            upper: vec![0.0, 0.0, 1.0, 2.0],
        }
    }

    #[test]
    fn project_clamps_only_bounded_sides() {
        let mut x = [-50.0, -50.0, -50.0, 50.0];
        project(&mut x, &box_bounds());
        assert_eq!(x, [-50.0, 1.0, -1.0, 2.0]);

        let mut x = [50.0, 50.0, 50.0, -50.0];
        project(&mut x, &box_bounds());
        assert_eq!(x, [50.0, 50.0, 1.0, -50.0]);
    }

    #[test]
    fn projected_gradient_ignores_blocked_components() {
        let bounds = box_bounds();

        // x sits on the lower bound of dim 1 and the upper bound of dim 3;
        // the gradient pushes outward in both.
        let x = [0.0, 1.0, 0.0, 2.0];
        let g = [0.5, 3.0, -0.25, -4.0];

        assert_relative_eq!(projected_gradient_norm(&x, &g, &bounds), 0.5);
    }

    #[test]
    fn projected_gradient_caps_at_distance_to_bound() {
        let bounds = box_bounds();
        let x = [0.0, 1.5, 0.0, 0.0];
        let g = [0.0, 3.0, 0.0, 0.0];

        assert_relative_eq!(projected_gradient_norm(&x, &g, &bounds), 0.5);
    }

    #[test]
    fn projected_gradient_is_infinite_for_nan() {
        let bounds = EncodedBounds::unbounded(2);
        let norm = projected_gradient_norm(&[0.0, 0.0], &[1.0, f64::NAN], &bounds);
        assert!(norm.is_infinite());
    }

    #[test]
    fn clip_direction_zeroes_outward_components() {
        let bounds = box_bounds();
        let x = [0.0, 1.0, 1.0, 2.0];
        let mut d = [-1.0, -1.0, 1.0, 1.0];

        clip_direction(&x, &mut d, &bounds);

        assert_eq!(d, [-1.0, 0.0, 0.0, 0.0]);
    }
}
