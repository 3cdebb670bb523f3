use biligram::infant::{ClinicalWarning, DrawMethod, Infant, Reading, SortOrder};
use biligram::nomogram::{
    classify_risk, classify_treatment, threshold_at, RightEdge, RiskZone, TreatmentCategory,
    TreatmentKind, PHOTOTHERAPY, RISK_ZONES, TRANSFUSION,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn birth() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 14)
        .expect("valid birth date")
        .and_hms_opt(22, 40, 0)
        .expect("valid birth time")
}

fn reading(hours: i64, level: f64) -> Reading {
    Reading {
        time: birth() + Duration::hours(hours),
        level,
    }
}

#[test]
fn risk_zone_is_undefined_before_twelve_hours() {
    for tenth in 0..120 {
        let hours = tenth as f64 / 10.0;
        for level in [0.0, 5.0, 12.5, 40.0] {
            assert_eq!(classify_risk(hours, level), RiskZone::Undefined);
        }
    }
}

#[test]
fn levels_on_the_top_curve_are_high_risk() {
    for hour in 12..=300 {
        assert_eq!(classify_risk(hour as f64, 25.0), RiskZone::High);
    }
}

#[test]
fn treatment_is_gated_by_gestational_age() {
    let mut saw_low_at_36 = false;
    for hour in (0..=168).step_by(6) {
        for step in 0..60 {
            let level = step as f64 / 2.0;
            let zone = classify_treatment(hour as f64, level, 38.0);
            assert_ne!(zone.phototherapy, Some(TreatmentCategory::Low));
            assert_ne!(zone.transfusion, Some(TreatmentCategory::Low));

            let zone = classify_treatment(hour as f64, level, 36.0);
            saw_low_at_36 |= zone.phototherapy == Some(TreatmentCategory::Low)
                || zone.transfusion == Some(TreatmentCategory::Low);
        }
    }
    assert!(saw_low_at_36);
}

#[test]
fn far_right_readings_match_the_last_tabulated_hour() {
    for set in [&PHOTOTHERAPY, &TRANSFUSION] {
        for curve in set.curves {
            let edge = threshold_at(
                curve,
                set.interval,
                set.starts_at,
                set.last_hour(),
                RightEdge::PastLength,
            )
            .expect("edge threshold");
            assert_eq!(
                classify_treatment(10_000.0, edge, 36.0),
                classify_treatment(set.last_hour(), edge, 36.0)
            );
        }
    }

    for curve in &RISK_ZONES.curves[1..4] {
        let edge = curve[curve.len() - 1];
        assert_eq!(
            classify_risk(10_000.0, edge),
            classify_risk(RISK_ZONES.last_hour(), edge)
        );
    }
}

#[test]
fn term_infant_at_twenty_four_hours_reaches_both_treatment_charts() {
    let mut infant = Infant::new(birth(), 40.0, "40", 3.2);
    infant.add_bilis(DrawMethod::Serum, [reading(24, 25.0)]);

    let bili = infant.bilis(SortOrder::Ascending)[0];
    assert_eq!(bili.hours(), 24.0);
    assert_eq!(bili.risk_zone(), RiskZone::High);
    assert_eq!(bili.phototherapy_zone(), Some(TreatmentCategory::High));
    assert_eq!(bili.transfusion_zone(), Some(TreatmentCategory::High));

    assert_eq!(
        infant.has_warnings(),
        Some(vec![ClinicalWarning::InTreatmentZone {
            kind: TreatmentKind::Transfusion
        }])
    );
}

#[test]
fn term_infant_below_treatment_lines_has_no_warnings() {
    let mut infant = Infant::new(birth(), 40.0, "40", 3.2);
    infant.add_bilis(DrawMethod::Tc, [reading(24, 7.0), reading(36, 9.0)]);
    assert_eq!(infant.has_warnings(), None);
}

#[test]
fn preterm_infant_is_flagged_regardless_of_results() {
    let mut infant = Infant::new(birth(), 34.0, "34", 3.8);
    infant.add_bilis(DrawMethod::Serum, [reading(30, 2.0)]);
    let warnings = infant.has_warnings().expect("warnings present");
    assert!(warnings
        .iter()
        .any(|warning| matches!(warning, ClinicalWarning::InvalidAge { raw_ga } if raw_ga == "34")));
    assert!(infant.is_too_young());
}

#[test]
fn light_late_preterm_infant_gets_the_35_week_weight_warning() {
    let infant = Infant::new(birth(), 35.5, "35 4/7", 2.0);
    let warnings = infant.has_warnings().expect("warnings present");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), "InvalidWeight35");
}

#[test]
fn measurements_read_back_in_time_order() {
    let mut infant = Infant::new(birth(), 39.0, "39", 3.3);
    infant.add_bilis(DrawMethod::Tc, [reading(60, 9.0), reading(12, 3.0)]);
    infant.add_bilis(DrawMethod::Serum, [reading(36, 8.0), reading(36, 8.4)]);
    infant.add_bilis(DrawMethod::Poc, [reading(2, 1.0)]);

    let ascending = infant.bilis(SortOrder::Ascending);
    assert!(ascending
        .windows(2)
        .all(|pair| pair[0].time() <= pair[1].time()));
    assert_eq!(ascending.len(), 5);

    let descending = infant.bilis(SortOrder::Descending);
    assert!(descending
        .windows(2)
        .all(|pair| pair[0].time() >= pair[1].time()));
    assert_eq!(descending[0].method(), DrawMethod::Tc);
}

#[test]
fn treatment_flags_survive_later_normal_results() {
    let mut infant = Infant::new(birth(), 36.0, "36", 2.8);
    infant.add_bilis(DrawMethod::Serum, [reading(72, 19.0)]);
    assert!(infant.in_treatment_zone_phototherapy());
    assert!(infant.in_treatment_zone_transfusion());

    infant.add_bilis(DrawMethod::Serum, [reading(96, 6.0), reading(120, 5.0)]);
    assert!(infant.in_treatment_zone_phototherapy());
    assert!(infant.in_treatment_zone_transfusion());
}
