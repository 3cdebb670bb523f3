use crate::infant::{DrawMethod, PhototherapyInterval};
use crate::nomogram::{RiskZone, TreatmentCategory, TreatmentKind};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BiliRow {
    pub time: NaiveDateTime,
    pub time_label: String,
    pub level: f64,
    pub hours: f64,
    pub method: DrawMethod,
    pub method_label: &'static str,
    pub risk_zone: RiskZone,
    pub risk_zone_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phototherapy_zone: Option<TreatmentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfusion_zone: Option<TreatmentCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningView {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfantSummary {
    pub birth: NaiveDateTime,
    pub gestational_age: String,
    pub gestational_age_weeks: f64,
    pub weight_kg: f64,
    pub is_young: bool,
    pub is_too_young: bool,
    pub bili_count: usize,
    pub in_treatment_zone_phototherapy: bool,
    pub in_treatment_zone_transfusion: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningView>,
    /// Newest first.
    pub bilis: Vec<BiliRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phototherapy: Vec<PhototherapyInterval>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandPoint {
    pub hour: f64,
    pub low: f64,
    pub high: f64,
}

/// Area between a risk zone's ceiling and the ceiling of the zone below it.
#[derive(Debug, Clone, Serialize)]
pub struct RiskBandSeries {
    pub zone: RiskZone,
    pub zone_label: &'static str,
    pub points: Vec<BandPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub hour: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentLineSeries {
    pub kind: TreatmentKind,
    pub category: TreatmentCategory,
    pub visible: bool,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub risk_bands: Vec<RiskBandSeries>,
    pub treatment_lines: Vec<TreatmentLineSeries>,
}
