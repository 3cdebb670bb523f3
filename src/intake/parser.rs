use super::normalizer::{leading_number, parse_datetime};
use crate::infant::{DrawMethod, Reading};
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

/// A reading row that survived parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ReadingRecord {
    pub method: DrawMethod,
    pub reading: Reading,
}

/// Usable readings plus the file lines that were passed over.
#[derive(Debug, Default)]
pub(crate) struct ParsedReadings {
    pub records: Vec<ReadingRecord>,
    pub skipped_lines: Vec<u64>,
}

/// Parse a `Method,Time,Level` table.
///
/// Rows that do not describe a usable reading (comment rows, unknown method,
/// unparseable time, non-numeric level) are skipped one by one. Only I/O and
/// structural CSV problems fail the whole table.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedReadings, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut raw = StringRecord::new();
    let mut parsed = ParsedReadings::default();

    while csv_reader.read_record(&mut raw)? {
        let line = raw.position().map_or(0, |position| position.line());
        let row: ReadingRow = raw.deserialize(Some(&headers))?;
        match row.to_record() {
            Some(record) => parsed.records.push(record),
            None => {
                debug!(line, ?row, "skipping unusable reading row");
                parsed.skipped_lines.push(line);
            }
        }
    }

    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    #[serde(
        rename = "Method",
        alias = "method",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    method: Option<String>,
    #[serde(
        rename = "Time",
        alias = "time",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    time: Option<String>,
    #[serde(
        rename = "Level",
        alias = "level",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    level: Option<String>,
}

impl ReadingRow {
    fn to_record(&self) -> Option<ReadingRecord> {
        let time = self.time.as_deref()?;
        // charted comments ("Critical result called to RN ...") share the table
        if !time.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let method = self.method.as_deref()?.parse::<DrawMethod>().ok()?;
        let time = parse_datetime(time)?;
        let level = self.level.as_deref().and_then(leading_number)?;
        if !level.is_finite() {
            return None;
        }

        Some(ReadingRecord {
            method,
            reading: Reading { time, level },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
