use super::curves::RISK_ZONES;
use super::interpolate::{threshold_at, RightEdge};
use super::RiskZone;

/// Place a reading on the Bhutani chart.
///
/// Readings before the first tabulated hour are `Undefined`. Otherwise the
/// interior boundaries are checked from the top down and the first ceiling
/// the level reaches promotes the reading to the zone above it.
pub fn classify_risk(hours: f64, level: f64) -> RiskZone {
    if hours.is_nan() || hours < RISK_ZONES.starts_at {
        return RiskZone::Undefined;
    }

    let boundaries = [
        RiskZone::HighIntermediate,
        RiskZone::LowIntermediate,
        RiskZone::Low,
    ];

    for (above, boundary) in RiskZone::ordered().into_iter().zip(boundaries) {
        let Some(curve) = RISK_ZONES.curve(boundary.curve_index()) else {
            continue;
        };
        let threshold = threshold_at(
            curve,
            RISK_ZONES.interval,
            RISK_ZONES.starts_at,
            hours,
            RightEdge::AtLength,
        );
        if threshold.is_some_and(|threshold| level >= threshold) {
            return above;
        }
    }

    RiskZone::Low
}
