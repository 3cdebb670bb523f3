use crate::nomogram::{
    classify_risk, classify_treatment, RiskZone, TreatmentCategory, TreatmentZone,
};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// How a bilirubin sample was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DrawMethod {
    Serum,
    #[serde(rename = "POC")]
    Poc,
    #[serde(rename = "TC")]
    Tc,
}

impl DrawMethod {
    pub const fn ordered() -> [Self; 3] {
        [Self::Serum, Self::Poc, Self::Tc]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Serum => "Serum",
            Self::Poc => "POC",
            Self::Tc => "TC",
        }
    }
}

impl fmt::Display for DrawMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDrawMethod(pub String);

impl fmt::Display for UnknownDrawMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown draw method '{}'", self.0)
    }
}

impl std::error::Error for UnknownDrawMethod {}

impl FromStr for DrawMethod {
    type Err = UnknownDrawMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "serum" | "tsb" => Ok(Self::Serum),
            "poc" | "point of care" | "point-of-care" => Ok(Self::Poc),
            "tc" | "tcb" | "transcutaneous" => Ok(Self::Tc),
            _ => Err(UnknownDrawMethod(value.to_string())),
        }
    }
}

/// A timestamped bilirubin level before it is placed on the nomogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub time: NaiveDateTime,
    pub level: f64,
}

/// A classified bilirubin measurement.
///
/// Age in hours is rounded to one decimal before classification, so a
/// borderline reading is judged on the same value that is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bili {
    method: DrawMethod,
    time: NaiveDateTime,
    level: f64,
    hours: f64,
    risk_zone: RiskZone,
    treatment_zone: TreatmentZone,
}

impl Bili {
    pub fn new(
        method: DrawMethod,
        reading: Reading,
        birth: NaiveDateTime,
        gestational_age_weeks: f64,
    ) -> Self {
        let hours = round_tenth(hours_between(birth, reading.time));
        let risk_zone = classify_risk(hours, reading.level);
        let treatment_zone = classify_treatment(hours, reading.level, gestational_age_weeks);

        Self {
            method,
            time: reading.time,
            level: reading.level,
            hours,
            risk_zone,
            treatment_zone,
        }
    }

    pub fn method(&self) -> DrawMethod {
        self.method
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Hours of life, rounded to one decimal.
    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn risk_zone(&self) -> RiskZone {
        self.risk_zone
    }

    pub fn treatment_zone(&self) -> TreatmentZone {
        self.treatment_zone
    }

    pub fn phototherapy_zone(&self) -> Option<TreatmentCategory> {
        self.treatment_zone.phototherapy
    }

    pub fn transfusion_zone(&self) -> Option<TreatmentCategory> {
        self.treatment_zone.transfusion
    }

    /// Short `M/D H:MM` form used in tables and chart labels.
    pub fn time_abbreviation(&self) -> String {
        format!(
            "{}/{} {}:{:02}",
            self.time.format("%-m"),
            self.time.format("%-d"),
            self.time.hour(),
            self.time.minute()
        )
    }
}

/// Fractional hours from `from` to `to`, at millisecond resolution.
pub(crate) fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Round to one decimal from the exact decimal expansion of `value`, with
/// exact ties going to the larger tenth.
///
/// Multiplying by ten first would round values such as 11.95 h (stored just
/// below the half) up to 12.0 instead of down to 11.9.
fn round_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // a tie at the tenths digit is only representable as an odd multiple of 0.25
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return ((value * 10.0).floor() + 1.0) / 10.0;
    }

    format!("{value:.1}").parse().unwrap_or(value)
}
