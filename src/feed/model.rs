//! Typed measurement-feed records
//!
//! The feed is parsed into these structs exactly once at the boundary; no
//! code downstream ever touches the wire's string keys again.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::quality::Parameter;

/// Whether a row holds observed or model-forecast measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Actual,
    Forecast,
}

impl Source {
    /// CSS class the table sink styles the source cell by.
    pub fn css_class(&self) -> &'static str {
        match self {
            Source::Actual => "source-actual",
            Source::Forecast => "source-forecast",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Actual => "Actual",
            Source::Forecast => "Forecast",
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_lowercase().as_str() {
            "actual" => Ok(Source::Actual),
            "forecast" => Ok(Source::Forecast),
            other => Err(D::Error::custom(format!(
                "unknown measurement source: {other:?}"
            ))),
        }
    }
}

/// One numeric cell as it arrived from the feed.
///
/// The feed mixes JSON numbers and numeric strings, so each cell is coerced
/// here, once. A cell that does not parse to a finite number keeps its raw
/// text: it renders as provided and classifies as unclassified, never as a
/// silent zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Value(f64),
    Unparseable(String),
}

impl Sample {
    /// Coerce a raw cell (CSV text or JSON string) into a sample.
    pub fn from_text(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Sample::Value(v),
            _ => Sample::Unparseable(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Sample::Value(v) => Some(*v),
            Sample::Unparseable(_) => None,
        }
    }

    /// Two-decimal display text, or the raw feed text for unparseable cells.
    pub fn display(&self) -> String {
        match self {
            Sample::Value(v) => format!("{v:.2}"),
            Sample::Unparseable(raw) => raw.clone(),
        }
    }
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Sample::Value(v) => serializer.serialize_f64(*v),
            Sample::Unparseable(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Sample::Value(v),
                _ => Sample::Unparseable(n.to_string()),
            },
            serde_json::Value::String(s) => Sample::from_text(&s),
            other => Sample::Unparseable(other.to_string()),
        })
    }
}

/// Year labels arrive as integers or strings; they are display labels, not
/// something we do arithmetic on.
fn deserialize_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid year label: {other}"))),
    }
}

/// One record per (lake, year, source), with min/max pairs for the five
/// measured parameters. The serde renames are the feed's exact wire keys;
/// a missing key fails the whole parse with a descriptive error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    #[serde(rename = "Name of Lake")]
    pub lake: String,
    #[serde(rename = "Year", deserialize_with = "deserialize_year")]
    pub year: String,
    #[serde(rename = "Source")]
    pub source: Source,
    #[serde(rename = "Min Temperature")]
    pub min_temperature: Sample,
    #[serde(rename = "Max Temperature")]
    pub max_temperature: Sample,
    #[serde(rename = "Min Dissolved Oxygen")]
    pub min_dissolved_oxygen: Sample,
    #[serde(rename = "Max Dissolved Oxygen")]
    pub max_dissolved_oxygen: Sample,
    #[serde(rename = "Min pH")]
    pub min_ph: Sample,
    #[serde(rename = "Max pH")]
    pub max_ph: Sample,
    #[serde(rename = "Min Conductivity")]
    pub min_conductivity: Sample,
    #[serde(rename = "Max Conductivity")]
    pub max_conductivity: Sample,
    #[serde(rename = "Min BOD")]
    pub min_bod: Sample,
    #[serde(rename = "Max BOD")]
    pub max_bod: Sample,
}

impl MeasurementRow {
    /// The (min, max) samples for one parameter.
    pub fn pair(&self, parameter: Parameter) -> (&Sample, &Sample) {
        match parameter {
            Parameter::Temperature => (&self.min_temperature, &self.max_temperature),
            Parameter::DissolvedOxygen => (&self.min_dissolved_oxygen, &self.max_dissolved_oxygen),
            Parameter::Ph => (&self.min_ph, &self.max_ph),
            Parameter::Conductivity => (&self.min_conductivity, &self.max_conductivity),
            Parameter::Bod => (&self.min_bod, &self.max_bod),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_from_text() {
        assert_eq!(Sample::from_text("12.5"), Sample::Value(12.5));
        assert_eq!(Sample::from_text("-3"), Sample::Value(-3.0));
        assert_eq!(
            Sample::from_text("n/a"),
            Sample::Unparseable("n/a".to_string())
        );
        assert_eq!(Sample::from_text("").value(), None);
    }

    #[test]
    fn test_sample_display() {
        assert_eq!(Sample::Value(17.5).display(), "17.50");
        assert_eq!(Sample::Unparseable("n/a".into()).display(), "n/a");
    }

    #[test]
    fn test_row_parses_numbers_and_strings() {
        let json = serde_json::json!({
            "Name of Lake": "Dal Lake",
            "Year": 2020,
            "Source": "actual",
            "Min Temperature": 12,
            "Max Temperature": "22.0",
            "Min Dissolved Oxygen": 7,
            "Max Dissolved Oxygen": 9,
            "Min pH": 7.0,
            "Max pH": 7.8,
            "Min Conductivity": 150,
            "Max Conductivity": 250,
            "Min BOD": 1,
            "Max BOD": "bad-cell"
        });

        let row: MeasurementRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.lake, "Dal Lake");
        assert_eq!(row.year, "2020");
        assert_eq!(row.source, Source::Actual);
        assert_eq!(row.min_temperature, Sample::Value(12.0));
        assert_eq!(row.max_temperature, Sample::Value(22.0));
        assert_eq!(row.max_bod, Sample::Unparseable("bad-cell".to_string()));
    }

    #[test]
    fn test_missing_key_is_a_structural_error() {
        let json = serde_json::json!({
            "Name of Lake": "Dal Lake",
            "Year": 2020,
            "Source": "Actual"
        });
        let err = serde_json::from_value::<MeasurementRow>(json).unwrap_err();
        assert!(err.to_string().contains("Min Temperature"));
    }

    #[test]
    fn test_unknown_source_rejected() {
        let err = serde_json::from_value::<Source>(serde_json::json!("guess")).unwrap_err();
        assert!(err.to_string().contains("unknown measurement source"));
    }

    #[test]
    fn test_row_round_trips_wire_keys() {
        let json = serde_json::json!({
            "Name of Lake": "Wular Lake",
            "Year": "2021",
            "Source": "Forecast",
            "Min Temperature": 11.0,
            "Max Temperature": 21.0,
            "Min Dissolved Oxygen": 6.5,
            "Max Dissolved Oxygen": 8.5,
            "Min pH": 6.9,
            "Max pH": 7.4,
            "Min Conductivity": 180.0,
            "Max Conductivity": 260.0,
            "Min BOD": 1.2,
            "Max BOD": 2.4
        });
        let row: MeasurementRow = serde_json::from_value(json.clone()).unwrap();
        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["Name of Lake"], "Wular Lake");
        assert_eq!(back["Source"], "Forecast");
        assert_eq!(back["Max Temperature"], serde_json::json!(21.0));
    }
}
