use super::curves::{CurveSet, PHOTOTHERAPY, TRANSFUSION};
use super::interpolate::{threshold_at, RightEdge};
use super::{TreatmentCategory, TreatmentKind, TreatmentZone, TERM_GESTATIONAL_AGE_WEEKS};

/// Curve set backing one kind of treatment chart.
pub fn treatment_curves(kind: TreatmentKind) -> &'static CurveSet {
    match kind {
        TreatmentKind::Phototherapy => &PHOTOTHERAPY,
        TreatmentKind::Transfusion => &TRANSFUSION,
    }
}

/// Check a reading against the phototherapy and transfusion charts.
///
/// Infants at or above 38 weeks are never evaluated against the Low line.
pub fn classify_treatment(hours: f64, level: f64, gestational_age_weeks: f64) -> TreatmentZone {
    let skip_lowest = gestational_age_weeks >= TERM_GESTATIONAL_AGE_WEEKS;

    TreatmentZone {
        phototherapy: first_crossed(&PHOTOTHERAPY, hours, level, skip_lowest),
        transfusion: first_crossed(&TRANSFUSION, hours, level, skip_lowest),
    }
}

fn first_crossed(
    set: &CurveSet,
    hours: f64,
    level: f64,
    skip_lowest: bool,
) -> Option<TreatmentCategory> {
    let candidates = TreatmentCategory::ordered();
    let evaluated = candidates.len() - usize::from(skip_lowest);

    candidates
        .into_iter()
        .take(evaluated)
        .find(|category| {
            set.curve(category.curve_index())
                .and_then(|curve| {
                    threshold_at(curve, set.interval, set.starts_at, hours, RightEdge::PastLength)
                })
                .is_some_and(|threshold| level >= threshold)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_crossed_names_the_category() {
        // 24 h sits on sample 2: photo 11.5 / 9.8 / 7.8
        let zone = classify_treatment(24.0, 11.5, 36.0);
        assert_eq!(zone.phototherapy, Some(TreatmentCategory::High));

        let zone = classify_treatment(24.0, 10.0, 36.0);
        assert_eq!(zone.phototherapy, Some(TreatmentCategory::Medium));

        let zone = classify_treatment(24.0, 8.0, 36.0);
        assert_eq!(zone.phototherapy, Some(TreatmentCategory::Low));
        assert_eq!(zone.transfusion, None);

        let zone = classify_treatment(24.0, 7.0, 36.0);
        assert!(zone.is_none());
    }

    #[test]
    fn term_infants_skip_the_low_line() {
        let zone = classify_treatment(24.0, 8.0, 38.0);
        assert_eq!(zone.phototherapy, None);

        let zone = classify_treatment(24.0, 8.0, 37.9);
        assert_eq!(zone.phototherapy, Some(TreatmentCategory::Low));

        // transfusion Low line at 24 h is 15.0, Medium is 16.5
        let zone = classify_treatment(24.0, 15.5, 38.0);
        assert_eq!(zone.transfusion, None);
        assert_eq!(zone.phototherapy, Some(TreatmentCategory::High));

        let zone = classify_treatment(24.0, 15.5, 36.0);
        assert_eq!(zone.transfusion, Some(TreatmentCategory::Low));
    }

    #[test]
    fn phototherapy_and_transfusion_are_independent() {
        let zone = classify_treatment(24.0, 25.0, 40.0);
        assert_eq!(zone.phototherapy, Some(TreatmentCategory::High));
        assert_eq!(zone.transfusion, Some(TreatmentCategory::High));
    }

    #[test]
    fn interpolates_on_the_twelve_hour_grid() {
        // 6 h: photo High halfway between 6.7 and 9.0 -> 7.85
        assert_eq!(
            classify_treatment(6.0, 7.9, 40.0).phototherapy,
            Some(TreatmentCategory::High)
        );
        assert_eq!(
            classify_treatment(6.0, 7.8, 40.0).phototherapy,
            Some(TreatmentCategory::Medium)
        );
    }

    #[test]
    fn first_interval_past_the_chart_has_no_threshold() {
        for hours in [180.0, 185.5, 191.9] {
            assert!(classify_treatment(hours, 40.0, 36.0).is_none());
        }
        assert_eq!(
            classify_treatment(192.0, 21.0, 40.0).phototherapy,
            Some(TreatmentCategory::High)
        );
    }

    #[test]
    fn far_right_matches_last_tabulated_hour() {
        let last = PHOTOTHERAPY.last_hour();
        for level in [15.0, 18.0, 21.0, 24.9] {
            assert_eq!(
                classify_treatment(10_000.0, level, 36.0),
                classify_treatment(last, level, 36.0)
            );
        }
    }

    #[test]
    fn negative_hours_are_never_in_a_treatment_zone() {
        assert!(classify_treatment(-3.0, 30.0, 36.0).is_none());
    }
}
