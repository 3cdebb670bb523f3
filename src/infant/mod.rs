mod bili;
mod warnings;

pub use bili::{Bili, DrawMethod, Reading, UnknownDrawMethod};
pub use warnings::{
    ClinicalWarning, LATE_PRETERM_CUTOFF_WEEKS, MINIMUM_GESTATIONAL_AGE_WEEKS, MINIMUM_WEIGHT_KG,
};

use crate::nomogram::{TreatmentKind, TERM_GESTATIONAL_AGE_WEEKS};
use bili::hours_between;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

/// Hours of phototherapy assumed for each charted start time.
pub const DEFAULT_PHOTOTHERAPY_HOURS: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A stretch of time under phototherapy, in hours of life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhototherapyInterval {
    pub start: f64,
    pub end: f64,
}

/// A newborn evaluated during one clinical session.
///
/// The birth time is fixed at construction so every measurement's age in
/// hours stays consistent with it. Treatment flags only ever go from unset
/// to set.
#[derive(Debug, Clone)]
pub struct Infant {
    birth: NaiveDateTime,
    gestational_age_weeks: f64,
    raw_gestational_age: String,
    weight_kg: f64,
    bilis: Vec<Bili>,
    phototherapy: Vec<PhototherapyInterval>,
    in_treatment_zone_phototherapy: bool,
    in_treatment_zone_transfusion: bool,
}

impl Infant {
    pub fn new(
        birth: NaiveDateTime,
        gestational_age_weeks: f64,
        raw_gestational_age: impl Into<String>,
        weight_kg: f64,
    ) -> Self {
        Self {
            birth,
            gestational_age_weeks,
            raw_gestational_age: raw_gestational_age.into(),
            weight_kg,
            bilis: Vec::new(),
            phototherapy: Vec::new(),
            in_treatment_zone_phototherapy: false,
            in_treatment_zone_transfusion: false,
        }
    }

    pub fn birth(&self) -> NaiveDateTime {
        self.birth
    }

    pub fn gestational_age_weeks(&self) -> f64 {
        self.gestational_age_weeks
    }

    pub fn raw_gestational_age(&self) -> &str {
        &self.raw_gestational_age
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Below 38 weeks, where the lowest treatment line applies.
    pub fn is_young(&self) -> bool {
        self.gestational_age_weeks < TERM_GESTATIONAL_AGE_WEEKS
    }

    /// Below the nomogram's validated range.
    pub fn is_too_young(&self) -> bool {
        self.gestational_age_weeks < MINIMUM_GESTATIONAL_AGE_WEEKS
    }

    /// Classify and record each reading drawn by `method`.
    pub fn add_bilis<I>(&mut self, method: DrawMethod, readings: I)
    where
        I: IntoIterator<Item = Reading>,
    {
        for reading in readings {
            let bili = Bili::new(method, reading, self.birth, self.gestational_age_weeks);
            debug!(
                %method,
                hours = bili.hours(),
                level = bili.level(),
                risk_zone = %bili.risk_zone(),
                "classified bilirubin"
            );
            self.raise_flags(&bili);
            self.bilis.push(bili);
        }
    }

    fn raise_flags(&mut self, bili: &Bili) {
        if bili.phototherapy_zone().is_some() && !self.in_treatment_zone_phototherapy {
            self.in_treatment_zone_phototherapy = true;
            info!(hours = bili.hours(), level = bili.level(), "phototherapy threshold reached");
        }
        if bili.transfusion_zone().is_some() && !self.in_treatment_zone_transfusion {
            self.in_treatment_zone_transfusion = true;
            info!(hours = bili.hours(), level = bili.level(), "transfusion threshold reached");
        }
    }

    /// Measurements sorted by draw time; equal times keep insertion order.
    pub fn bilis(&self, order: SortOrder) -> Vec<&Bili> {
        let mut sorted: Vec<&Bili> = self.bilis.iter().collect();
        match order {
            SortOrder::Ascending => sorted.sort_by(|a, b| a.time().cmp(&b.time())),
            SortOrder::Descending => sorted.sort_by(|a, b| b.time().cmp(&a.time())),
        }
        sorted
    }

    pub fn bili_count(&self) -> usize {
        self.bilis.len()
    }

    /// Replace the phototherapy record with one interval per charted start time.
    pub fn set_phototherapy_times<I>(&mut self, times: I, assumed_duration_hours: Option<f64>)
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let duration = assumed_duration_hours.unwrap_or(DEFAULT_PHOTOTHERAPY_HOURS);
        self.phototherapy = times
            .into_iter()
            .map(|time| {
                let start = hours_between(self.birth, time);
                PhototherapyInterval {
                    start,
                    end: start + duration,
                }
            })
            .collect();
    }

    pub fn phototherapy(&self) -> &[PhototherapyInterval] {
        &self.phototherapy
    }

    pub fn in_treatment_zone_phototherapy(&self) -> bool {
        self.in_treatment_zone_phototherapy
    }

    pub fn in_treatment_zone_transfusion(&self) -> bool {
        self.in_treatment_zone_transfusion
    }

    pub fn in_treatment_zone(&self, kind: TreatmentKind) -> bool {
        match kind {
            TreatmentKind::Phototherapy => self.in_treatment_zone_phototherapy,
            TreatmentKind::Transfusion => self.in_treatment_zone_transfusion,
        }
    }

    /// Every clinical warning that currently applies, demographic ones first.
    pub fn warnings(&self) -> Vec<ClinicalWarning> {
        warnings::demographic_warnings(
            self.gestational_age_weeks,
            &self.raw_gestational_age,
            self.weight_kg,
        )
        .into_iter()
        .chain(warnings::treatment_warning(
            self.in_treatment_zone_phototherapy,
            self.in_treatment_zone_transfusion,
        ))
        .collect()
    }

    /// Like [`Infant::warnings`], but `None` when nothing applies.
    pub fn has_warnings(&self) -> Option<Vec<ClinicalWarning>> {
        let warnings = self.warnings();
        if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        }
    }
}
