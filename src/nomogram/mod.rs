//! Bilirubin nomogram evaluation: reference curves, interpolation and the
//! risk-zone and treatment-zone classifiers built on top of them.

pub mod curves;
mod interpolate;
mod risk;
mod treatment;

pub use curves::{CurveSet, PHOTOTHERAPY, RISK_ZONES, TRANSFUSION};
pub use interpolate::{threshold_at, RightEdge};
pub use risk::classify_risk;
pub use treatment::{classify_treatment, treatment_curves};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gestational age (weeks) at and above which the lowest treatment line is
/// not evaluated.
pub const TERM_GESTATIONAL_AGE_WEEKS: f64 = 38.0;

/// Bhutani risk zone for a single reading, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskZone {
    Undefined,
    Low,
    LowIntermediate,
    HighIntermediate,
    High,
}

impl RiskZone {
    /// Zones in chart order, top curve first.
    pub const fn ordered() -> [Self; 5] {
        [
            Self::High,
            Self::HighIntermediate,
            Self::LowIntermediate,
            Self::Low,
            Self::Undefined,
        ]
    }

    /// Position of the zone's ceiling curve in [`RISK_ZONES`].
    pub const fn curve_index(self) -> usize {
        match self {
            Self::High => 0,
            Self::HighIntermediate => 1,
            Self::LowIntermediate => 2,
            Self::Low => 3,
            Self::Undefined => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::HighIntermediate => "High Intermediate",
            Self::LowIntermediate => "Low Intermediate",
            Self::Low => "Low",
            Self::Undefined => "Undefined",
        }
    }

    /// Zone whose ceiling sits directly below this one's, if any.
    pub const fn below(self) -> Option<Self> {
        match self {
            Self::High => Some(Self::HighIntermediate),
            Self::HighIntermediate => Some(Self::LowIntermediate),
            Self::LowIntermediate => Some(Self::Low),
            Self::Low => Some(Self::Undefined),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for RiskZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Treatment line within the phototherapy or transfusion chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreatmentCategory {
    High,
    Medium,
    Low,
}

impl TreatmentCategory {
    /// Lines in evaluation order, matching the curve order of the treatment sets.
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn curve_index(self) -> usize {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for TreatmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentKind {
    Phototherapy,
    Transfusion,
}

impl TreatmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phototherapy => "phototherapy",
            Self::Transfusion => "transfusion",
        }
    }
}

impl fmt::Display for TreatmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of checking one reading against both treatment charts.
///
/// The two results are independent; a reading may cross either, both or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentZone {
    pub phototherapy: Option<TreatmentCategory>,
    pub transfusion: Option<TreatmentCategory>,
}

impl TreatmentZone {
    pub fn get(&self, kind: TreatmentKind) -> Option<TreatmentCategory> {
        match kind {
            TreatmentKind::Phototherapy => self.phototherapy,
            TreatmentKind::Transfusion => self.transfusion,
        }
    }

    pub fn is_none(&self) -> bool {
        self.phototherapy.is_none() && self.transfusion.is_none()
    }
}
