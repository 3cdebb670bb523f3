use crate::nomogram::TreatmentKind;
use serde::Serialize;
use std::fmt;

/// Gestational age (weeks) below which the nomogram is not validated.
pub const MINIMUM_GESTATIONAL_AGE_WEEKS: f64 = 35.0;
/// Gestational age (weeks) that separates the two birth-weight categories.
pub const LATE_PRETERM_CUTOFF_WEEKS: f64 = 36.0;
/// Birth weight (kg) below which the nomogram is not validated.
pub const MINIMUM_WEIGHT_KG: f64 = 2.5;

/// Non-fatal clinical observation shown alongside the results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", content = "context")]
pub enum ClinicalWarning {
    #[serde(rename = "InvalidAge")]
    InvalidAge { raw_ga: String },
    #[serde(rename = "InvalidWeight35")]
    InvalidWeight35 { raw_ga: String, weight_kg: f64 },
    #[serde(rename = "InvalidWeight36")]
    InvalidWeight36 { raw_ga: String, weight_kg: f64 },
    #[serde(rename = "InTxZone")]
    InTreatmentZone { kind: TreatmentKind },
}

impl ClinicalWarning {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAge { .. } => "InvalidAge",
            Self::InvalidWeight35 { .. } => "InvalidWeight35",
            Self::InvalidWeight36 { .. } => "InvalidWeight36",
            Self::InTreatmentZone { .. } => "InTxZone",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidAge { raw_ga } => format!(
                "gestational age {raw_ga} is below 35 weeks; the nomogram does not apply"
            ),
            Self::InvalidWeight35 { raw_ga, weight_kg } => format!(
                "infants of {raw_ga} weeks must weigh at least 2.5 kg for the 35 week category (recorded {weight_kg} kg)"
            ),
            Self::InvalidWeight36 { raw_ga, weight_kg } => format!(
                "infants of {raw_ga} weeks must weigh at least 2.5 kg for the 36+ week category (recorded {weight_kg} kg)"
            ),
            Self::InTreatmentZone { kind } => {
                format!("bilirubin has reached the {kind} treatment zone")
            }
        }
    }
}

impl fmt::Display for ClinicalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

pub(crate) fn demographic_warnings(
    gestational_age_weeks: f64,
    raw_ga: &str,
    weight_kg: f64,
) -> Option<ClinicalWarning> {
    if gestational_age_weeks < MINIMUM_GESTATIONAL_AGE_WEEKS {
        return Some(ClinicalWarning::InvalidAge {
            raw_ga: raw_ga.to_string(),
        });
    }

    if weight_kg >= MINIMUM_WEIGHT_KG {
        return None;
    }

    if gestational_age_weeks < LATE_PRETERM_CUTOFF_WEEKS {
        Some(ClinicalWarning::InvalidWeight35 {
            raw_ga: raw_ga.to_string(),
            weight_kg,
        })
    } else {
        Some(ClinicalWarning::InvalidWeight36 {
            raw_ga: raw_ga.to_string(),
            weight_kg,
        })
    }
}

pub(crate) fn treatment_warning(phototherapy: bool, transfusion: bool) -> Option<ClinicalWarning> {
    let kind = if transfusion {
        TreatmentKind::Transfusion
    } else if phototherapy {
        TreatmentKind::Phototherapy
    } else {
        return None;
    };

    Some(ClinicalWarning::InTreatmentZone { kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_below_range_ignores_weight() {
        let warning = demographic_warnings(34.0, "34", 1.2).expect("warning");
        assert_eq!(warning.code(), "InvalidAge");
        assert!(demographic_warnings(34.9, "34 6/7", 3.5).is_some());
    }

    #[test]
    fn weight_category_follows_gestational_age() {
        assert_eq!(
            demographic_warnings(35.5, "35 3/7", 2.0).map(|w| w.code()),
            Some("InvalidWeight35")
        );
        assert_eq!(
            demographic_warnings(36.0, "36", 2.4).map(|w| w.code()),
            Some("InvalidWeight36")
        );
        assert_eq!(demographic_warnings(36.0, "36", 2.5), None);
        assert_eq!(demographic_warnings(35.0, "35", 3.0), None);
    }

    #[test]
    fn transfusion_takes_precedence() {
        assert_eq!(
            treatment_warning(true, true),
            Some(ClinicalWarning::InTreatmentZone {
                kind: TreatmentKind::Transfusion
            })
        );
        assert_eq!(
            treatment_warning(true, false),
            Some(ClinicalWarning::InTreatmentZone {
                kind: TreatmentKind::Phototherapy
            })
        );
        assert_eq!(treatment_warning(false, false), None);
    }

    #[test]
    fn messages_carry_context() {
        let warning = ClinicalWarning::InvalidWeight35 {
            raw_ga: "35 3/7".to_string(),
            weight_kg: 2.0,
        };
        assert!(warning.message().contains("35 3/7"));
        assert!(warning.message().contains("2 kg"));
        assert!(ClinicalWarning::InTreatmentZone {
            kind: TreatmentKind::Transfusion
        }
        .to_string()
        .contains("transfusion"));
    }
}
