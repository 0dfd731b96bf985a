//! Outbound water-quality alert composition
//!
//! Alerts leave the service as a formatted subject + body handed to the
//! platform's default mail composer through a `mailto:` URL. Fire-and-forget:
//! no retry, no delivery confirmation; dispatch is only logged.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::feed::MeasurementRow;
use crate::quality::Parameter;

/// A composed alert ready for the mail-composition sink.
#[derive(Debug, Clone, Serialize)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
    /// Percent-encoded `mailto:` URL carrying the subject and body.
    pub mailto: String,
}

/// Compose the alert mail for a lake, embedding a summary of its latest
/// measurement row when one exists.
pub fn compose(
    recipient: &str,
    lake_name: &str,
    issue: &str,
    location: Option<&str>,
    latest: Option<&MeasurementRow>,
    timestamp: DateTime<Utc>,
) -> AlertMessage {
    let subject = format!("Water Quality Alert - {lake_name}");

    let location_block = match location {
        Some(loc) if !loc.trim().is_empty() => format!("SPECIFIC LOCATION:\n{loc}\n\n"),
        _ => String::new(),
    };
    let latest_block = latest.map(latest_summary).unwrap_or_default();

    let body = format!(
        "Dear Water Quality Authority,\n\
         \n\
         I am reporting a water quality concern for {lake_name} in Kashmir.\n\
         \n\
         ISSUE DESCRIPTION:\n\
         {issue}\n\
         \n\
         {location_block}DATE & TIME:\n\
         {timestamp}\n\
         \n\
         {latest_block}\
         This alert was generated by the Lakewatch water quality dashboard.\n\
         \n\
         Please investigate this matter at your earliest convenience.\n\
         \n\
         Thank you.",
        timestamp = timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    let mailto = format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    );

    AlertMessage {
        subject,
        body,
        mailto,
    }
}

/// The "Latest Water Quality Data" block of the mail body, one line per
/// parameter as "min to max unit". Unparseable cells render as provided.
fn latest_summary(row: &MeasurementRow) -> String {
    let mut block = format!(
        "Latest Water Quality Data ({} - {}):\n",
        row.year,
        row.source.as_str()
    );
    for &parameter in &Parameter::ALL {
        let (min, max) = row.pair(parameter);
        let line = match parameter {
            // Temperature carries its unit on both ends.
            Parameter::Temperature => format!(
                "- Temperature: {}°C to {}°C",
                min.display(),
                max.display()
            ),
            p if p.unit().is_empty() => {
                format!("- {}: {} to {}", p.label(), min.display(), max.display())
            }
            p => format!(
                "- {}: {} to {} {}",
                p.label(),
                min.display(),
                max.display(),
                p.unit()
            ),
        };
        block.push_str(&line);
        block.push('\n');
    }
    block.push('\n');
    block
}

/// Log the fire-and-forget handoff to the mail composer.
pub fn dispatch(lake_name: &str, message: &AlertMessage) {
    tracing::info!(
        lake = lake_name,
        subject = %message.subject,
        "alert handed to mail composer"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Sample, Source};
    use chrono::TimeZone;

    fn dal_row() -> MeasurementRow {
        MeasurementRow {
            lake: "Dal Lake".to_string(),
            year: "2020".to_string(),
            source: Source::Actual,
            min_temperature: Sample::Value(12.0),
            max_temperature: Sample::Value(22.0),
            min_dissolved_oxygen: Sample::Value(7.0),
            max_dissolved_oxygen: Sample::Value(9.0),
            min_ph: Sample::Value(7.0),
            max_ph: Sample::Value(7.8),
            min_conductivity: Sample::Value(150.0),
            max_conductivity: Sample::Value(250.0),
            min_bod: Sample::Value(1.0),
            max_bod: Sample::Value(2.0),
        }
    }

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_subject_names_the_lake() {
        let msg = compose(
            "authority@example.org",
            "Dal Lake",
            "visible algae bloom",
            None,
            None,
            at_noon(),
        );
        assert_eq!(msg.subject, "Water Quality Alert - Dal Lake");
    }

    #[test]
    fn test_body_includes_issue_location_and_latest_data() {
        let row = dal_row();
        let msg = compose(
            "authority@example.org",
            "Dal Lake",
            "strong smell near the shore",
            Some("near Nehru Park ghat"),
            Some(&row),
            at_noon(),
        );

        assert!(msg.body.contains("strong smell near the shore"));
        assert!(msg.body.contains("SPECIFIC LOCATION:\nnear Nehru Park ghat"));
        assert!(msg.body.contains("Latest Water Quality Data (2020 - Actual):"));
        assert!(msg.body.contains("- Temperature: 12.00°C to 22.00°C"));
        assert!(msg.body.contains("- Dissolved Oxygen: 7.00 to 9.00 mg/L"));
        assert!(msg.body.contains("- pH: 7.00 to 7.80"));
        assert!(msg.body.contains("- Conductivity: 150.00 to 250.00 μS/cm"));
        assert!(msg.body.contains("- BOD: 1.00 to 2.00 mg/L"));
        assert!(msg.body.contains("2024-06-01 12:00:00 UTC"));
    }

    #[test]
    fn test_location_block_omitted_when_absent() {
        let msg = compose(
            "authority@example.org",
            "Wular Lake",
            "dead fish sighted",
            None,
            None,
            at_noon(),
        );
        assert!(!msg.body.contains("SPECIFIC LOCATION"));
        assert!(!msg.body.contains("Latest Water Quality Data"));
    }

    #[test]
    fn test_mailto_is_percent_encoded() {
        let msg = compose(
            "authority@example.org",
            "Dal Lake",
            "test issue",
            None,
            None,
            at_noon(),
        );
        assert!(msg.mailto.starts_with("mailto:authority@example.org?subject="));
        assert!(msg.mailto.contains("Water%20Quality%20Alert%20-%20Dal%20Lake"));
        // Raw spaces and newlines never survive encoding.
        assert!(!msg.mailto.contains(' '));
        assert!(!msg.mailto.contains('\n'));
    }
}
