//! Per-lake selection and aggregation
//!
//! Pure, reentrant derivations over the immutable feed snapshot. Every call
//! recomputes from the same rows, so re-selecting a lake from repeated UI
//! events is idempotent.

use serde::Serialize;

use crate::feed::MeasurementRow;
use crate::quality::Parameter;

/// Midpoint of a min/max pair. Stored at full precision; rounding to two
/// decimals happens only at the display boundary.
pub fn average_pair(min: f64, max: f64) -> f64 {
    (min + max) / 2.0
}

/// The ordered subset of feed rows belonging to one lake, in feed order.
#[derive(Debug, Clone)]
pub struct LakeSelection<'a> {
    rows: Vec<&'a MeasurementRow>,
}

/// Select a lake's rows by case-insensitive exact name match. No trimming,
/// no fuzzy matching; an unknown name yields an empty selection, never an
/// error — callers render the no-data state instead.
pub fn select_lake<'a>(rows: &'a [MeasurementRow], name: &str) -> LakeSelection<'a> {
    let needle = name.to_lowercase();
    LakeSelection {
        rows: rows
            .iter()
            .filter(|row| row.lake.to_lowercase() == needle)
            .collect(),
    }
}

impl<'a> LakeSelection<'a> {
    pub fn rows(&self) -> &[&'a MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent row: the last element in feed order. The provider
    /// appends rows chronologically (actual then forecast), which is a
    /// contract on the feed, not something verified here.
    pub fn latest(&self) -> Option<&'a MeasurementRow> {
        self.rows.last().copied()
    }

    /// One point per row in feed order; no interpolation, no gap filling
    /// for missing years. Unparseable cells carry through as absent values.
    pub fn series_by_year(&self, parameter: Parameter) -> Vec<YearPoint> {
        self.rows
            .iter()
            .map(|row| {
                let (min, max) = row.pair(parameter);
                YearPoint {
                    year: row.year.clone(),
                    min: min.value(),
                    max: max.value(),
                    average: midpoint(row, parameter),
                }
            })
            .collect()
    }
}

/// Midpoint of one parameter's min/max pair in a row, absent when either
/// cell is unparseable.
pub fn midpoint(row: &MeasurementRow, parameter: Parameter) -> Option<f64> {
    let (min, max) = row.pair(parameter);
    Some(average_pair(min.value()?, max.value()?))
}

/// A single year's min/max/midpoint for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
}
