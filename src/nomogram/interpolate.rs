/// How an hour that falls off the right end of a curve is resolved.
///
/// The risk-zone chart clamps as soon as the sample index reaches the curve
/// length; the treatment chart only clamps once the index runs past it, so
/// the first interval beyond the last sample has no threshold at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightEdge {
    AtLength,
    PastLength,
}

/// Linear-interpolated curve value at `hours`.
///
/// The sample index is taken relative to `starts_at` while the left grid
/// point `x1` is taken relative to zero; the two are computed separately.
/// Past the last sample the curve is flat. Returns `None` when no sample can
/// be read, which callers treat as a threshold that cannot be crossed.
pub fn threshold_at(
    curve: &[f64],
    interval: f64,
    starts_at: f64,
    hours: f64,
    edge: RightEdge,
) -> Option<f64> {
    let position = ((hours - starts_at) / interval).floor();
    if !position.is_finite() || position < 0.0 || curve.is_empty() {
        return None;
    }

    let len = curve.len();
    let mut index = position as usize;
    let clamp = match edge {
        RightEdge::AtLength => index >= len,
        RightEdge::PastLength => index > len,
    };
    if clamp {
        index = len - 1;
    }

    let y1 = *curve.get(index)?;
    let y2 = curve.get(index + 1).copied().unwrap_or(y1);
    let x1 = (hours / interval).floor() * interval;

    Some(y1 + (hours - x1) * ((y2 - y1) / interval))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: [f64; 4] = [2.0, 4.0, 8.0, 10.0];

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("threshold defined");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn interpolates_between_samples() {
        approx(threshold_at(&CURVE, 4.0, 0.0, 0.0, RightEdge::AtLength), 2.0);
        approx(threshold_at(&CURVE, 4.0, 0.0, 2.0, RightEdge::AtLength), 3.0);
        approx(threshold_at(&CURVE, 4.0, 0.0, 9.0, RightEdge::AtLength), 8.5);
    }

    #[test]
    fn last_sample_extends_flat() {
        approx(threshold_at(&CURVE, 4.0, 0.0, 13.0, RightEdge::AtLength), 10.0);
        approx(threshold_at(&CURVE, 4.0, 0.0, 400.0, RightEdge::AtLength), 10.0);
        approx(threshold_at(&CURVE, 4.0, 0.0, 401.5, RightEdge::AtLength), 10.0);
    }

    #[test]
    fn past_length_leaves_a_gap_one_interval_wide() {
        assert_eq!(
            threshold_at(&CURVE, 4.0, 0.0, 17.0, RightEdge::PastLength),
            None
        );
        approx(threshold_at(&CURVE, 4.0, 0.0, 13.0, RightEdge::PastLength), 10.0);
        approx(threshold_at(&CURVE, 4.0, 0.0, 21.0, RightEdge::PastLength), 10.0);
    }

    #[test]
    fn grid_point_is_measured_from_zero_not_from_offset() {
        // index = floor((7 - 2) / 4) = 1, x1 = floor(7 / 4) * 4 = 4
        approx(threshold_at(&CURVE, 4.0, 2.0, 7.0, RightEdge::AtLength), 7.0);
    }

    #[test]
    fn undefined_before_the_curve_and_for_non_finite_hours() {
        assert_eq!(
            threshold_at(&CURVE, 12.0, 0.0, -0.5, RightEdge::PastLength),
            None
        );
        assert_eq!(
            threshold_at(&CURVE, 4.0, 0.0, f64::NAN, RightEdge::AtLength),
            None
        );
        assert_eq!(threshold_at(&[], 4.0, 0.0, 5.0, RightEdge::AtLength), None);
    }
}
