//! Display-ready views over an evaluated infant and the nomogram itself.

mod views;

pub use views::{
    BandPoint, BiliRow, ChartSeries, InfantSummary, LinePoint, RiskBandSeries,
    TreatmentLineSeries, WarningView,
};

use crate::infant::{Bili, ClinicalWarning, Infant, SortOrder};
use crate::nomogram::{treatment_curves, RiskZone, TreatmentCategory, TreatmentKind, RISK_ZONES};

impl From<&Bili> for BiliRow {
    fn from(bili: &Bili) -> Self {
        Self {
            time: bili.time(),
            time_label: bili.time_abbreviation(),
            level: bili.level(),
            hours: bili.hours(),
            method: bili.method(),
            method_label: bili.method().label(),
            risk_zone: bili.risk_zone(),
            risk_zone_label: bili.risk_zone().label(),
            phototherapy_zone: bili.phototherapy_zone(),
            transfusion_zone: bili.transfusion_zone(),
        }
    }
}

impl From<&ClinicalWarning> for WarningView {
    fn from(warning: &ClinicalWarning) -> Self {
        Self {
            code: warning.code(),
            message: warning.message(),
        }
    }
}

impl InfantSummary {
    pub fn from_infant(infant: &Infant) -> Self {
        Self {
            birth: infant.birth(),
            gestational_age: infant.raw_gestational_age().to_string(),
            gestational_age_weeks: infant.gestational_age_weeks(),
            weight_kg: infant.weight_kg(),
            is_young: infant.is_young(),
            is_too_young: infant.is_too_young(),
            bili_count: infant.bili_count(),
            in_treatment_zone_phototherapy: infant.in_treatment_zone_phototherapy(),
            in_treatment_zone_transfusion: infant.in_treatment_zone_transfusion(),
            warnings: infant.warnings().iter().map(WarningView::from).collect(),
            bilis: infant
                .bilis(SortOrder::Descending)
                .into_iter()
                .map(BiliRow::from)
                .collect(),
            phototherapy: infant.phototherapy().to_vec(),
        }
    }
}

impl ChartSeries {
    /// Nomogram curves as plottable points. Treatment lines are only marked
    /// visible for a kind of treatment the infant has reached.
    pub fn for_infant(infant: Option<&Infant>) -> Self {
        let risk_bands = RiskZone::ordered()
            .into_iter()
            .filter_map(|zone| {
                let below = zone.below()?;
                let ceiling = RISK_ZONES.curve(zone.curve_index())?;
                let floor = RISK_ZONES.curve(below.curve_index())?;
                let points = ceiling
                    .iter()
                    .zip(floor)
                    .enumerate()
                    .map(|(index, (high, low))| BandPoint {
                        hour: RISK_ZONES.hour_at(index),
                        low: *low,
                        high: *high,
                    })
                    .collect();
                Some(RiskBandSeries {
                    zone,
                    zone_label: zone.label(),
                    points,
                })
            })
            .collect();

        let treatment_lines = [TreatmentKind::Transfusion, TreatmentKind::Phototherapy]
            .into_iter()
            .flat_map(|kind| {
                let visible = infant.is_some_and(|infant| infant.in_treatment_zone(kind));
                TreatmentCategory::ordered()
                    .into_iter()
                    .map(move |category| TreatmentLineSeries {
                        kind,
                        category,
                        visible,
                        points: treatment_curves(kind)
                            .points(category.curve_index())
                            .into_iter()
                            .map(|(hour, value)| LinePoint { hour, value })
                            .collect(),
                    })
            })
            .collect();

        Self {
            risk_bands,
            treatment_lines,
        }
    }
}
