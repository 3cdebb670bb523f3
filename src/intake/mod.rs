//! Turning charted text into an [`Infant`]: demographic fields are validated
//! together and reading tables are ingested best-effort.

mod normalizer;
mod parser;

use crate::infant::{DrawMethod, Infant, Reading};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A demographic field that prevents building an infant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeIssue {
    NoBirthtime,
    NoBirthday,
    NoGa,
    NoWeight,
}

impl IntakeIssue {
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoBirthtime => "NoBirthtime",
            Self::NoBirthday => "NoBirthday",
            Self::NoGa => "NoGA",
            Self::NoWeight => "NoWeight",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::NoBirthtime => "birth time is missing",
            Self::NoBirthday => "birth date and time could not be read",
            Self::NoGa => "gestational age is missing or unreadable",
            Self::NoWeight => "birth weight is missing or unreadable",
        }
    }
}

impl fmt::Display for IntakeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("cannot evaluate infant: {}", join_issues(.0))]
    Invalid(Vec<IntakeIssue>),
    #[error("failed to read bilirubin results: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid bilirubin results table: {0}")]
    Csv(#[from] csv::Error),
}

impl IntakeError {
    pub fn issues(&self) -> &[IntakeIssue] {
        match self {
            IntakeError::Invalid(issues) => issues,
            IntakeError::Io(_) | IntakeError::Csv(_) => &[],
        }
    }
}

fn join_issues(issues: &[IntakeIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw demographic fields exactly as charted.
#[derive(Debug, Clone, Default)]
pub struct InfantForm {
    pub birth_date: String,
    pub birth_time: String,
    pub gestational_age: String,
    pub weight: String,
}

impl InfantForm {
    /// Validate every field and build the infant, reporting all problems at once.
    pub fn into_infant(self) -> Result<Infant, IntakeError> {
        let mut issues = Vec::new();

        let birth = if self.birth_time.trim().is_empty() {
            issues.push(IntakeIssue::NoBirthtime);
            None
        } else {
            let birth = parse_birth(&self.birth_date, &self.birth_time);
            if birth.is_none() {
                issues.push(IntakeIssue::NoBirthday);
            }
            birth
        };

        let gestational_age = normalizer::parse_gestational_age(&self.gestational_age);
        if gestational_age.is_none() {
            issues.push(IntakeIssue::NoGa);
        }

        let weight = normalizer::leading_number(&self.weight)
            .filter(|weight| weight.is_finite() && *weight != 0.0);
        if weight.is_none() {
            issues.push(IntakeIssue::NoWeight);
        }

        match (birth, gestational_age, weight) {
            (Some(birth), Some(gestational_age), Some(weight)) if issues.is_empty() => Ok(
                Infant::new(birth, gestational_age, self.gestational_age.trim(), weight),
            ),
            _ => Err(IntakeError::Invalid(issues)),
        }
    }
}

fn parse_birth(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = normalizer::parse_date(date)?;
    let time = normalizer::parse_time(time)?;
    Some(date.and_time(time))
}

/// Parse a single charted timestamp, such as a phototherapy start time.
pub fn parse_charted_time(value: &str) -> Option<NaiveDateTime> {
    normalizer::parse_datetime(value)
}

/// Bilirubin readings grouped by draw method, in table order.
#[derive(Debug, Clone, Default)]
pub struct ReadingTable {
    by_method: BTreeMap<DrawMethod, Vec<Reading>>,
}

impl ReadingTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IntakeError> {
        let parsed = parser::parse_records(reader)?;
        if !parsed.skipped_lines.is_empty() {
            debug!(
                skipped = parsed.skipped_lines.len(),
                lines = ?parsed.skipped_lines,
                "reading table had unusable rows"
            );
        }

        let mut table = Self::default();
        for record in parsed.records {
            table.push(record.method, record.reading);
        }
        Ok(table)
    }

    pub fn push(&mut self, method: DrawMethod, reading: Reading) {
        self.by_method.entry(method).or_default().push(reading);
    }

    pub fn readings(&self, method: DrawMethod) -> &[Reading] {
        self.by_method
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_method.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add every reading to `infant`, one draw method at a time.
    pub fn apply_to(&self, infant: &mut Infant) {
        for method in DrawMethod::ordered() {
            infant.add_bilis(method, self.readings(method).iter().copied());
        }
    }
}
