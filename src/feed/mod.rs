//! Measurement feed boundary
//!
//! The feed is loaded exactly once per session, either as a JSON array over
//! HTTP or as a pair of local CSV files (actual + forecast) concatenated in
//! order with the source column stamped on each half. On failure the service
//! keeps running with an empty snapshot for the rest of the session.

pub mod model;

use std::path::Path;

pub use model::{MeasurementRow, Sample, Source};

/// Errors at the feed boundary.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("malformed feed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing column {column:?}")]
    MissingColumn { path: String, column: String },
}

/// The immutable per-session collection of measurement rows, in feed order.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    rows: Vec<MeasurementRow>,
}

impl FeedSnapshot {
    pub fn new(rows: Vec<MeasurementRow>) -> Self {
        Self { rows }
    }

    /// The empty snapshot the service falls back to when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One-shot HTTP fetch of the JSON feed.
pub async fn fetch(url: &str) -> Result<FeedSnapshot, FeedError> {
    let response = reqwest::Client::new().get(url).send().await?;
    if !response.status().is_success() {
        return Err(FeedError::HttpStatus(response.status().as_u16()));
    }
    let body = response.text().await?;
    let rows: Vec<MeasurementRow> = serde_json::from_str(&body)?;
    tracing::info!(rows = rows.len(), url, "measurement feed fetched");
    Ok(FeedSnapshot::new(rows))
}

/// Load the actual and forecast CSV files and concatenate them, actual
/// first, each half stamped with its source. Mirrors how the upstream data
/// provider assembles the JSON feed.
pub fn load_csv_pair(actual: &Path, forecast: &Path) -> Result<FeedSnapshot, FeedError> {
    let mut rows = read_csv(actual, Source::Actual)?;
    rows.extend(read_csv(forecast, Source::Forecast)?);
    tracing::info!(
        rows = rows.len(),
        actual = %actual.display(),
        forecast = %forecast.display(),
        "measurement feed loaded from CSV"
    );
    Ok(FeedSnapshot::new(rows))
}

/// CSV columns carrying numeric min/max cells, paired with their row fields.
const NUMERIC_COLUMNS: [&str; 10] = [
    "Min Temperature",
    "Max Temperature",
    "Min Dissolved Oxygen",
    "Max Dissolved Oxygen",
    "Min pH",
    "Max pH",
    "Min Conductivity",
    "Max Conductivity",
    "Min BOD",
    "Max BOD",
];

fn read_csv(path: &Path, source: Source) -> Result<Vec<MeasurementRow>, FeedError> {
    let csv_err = |source: csv::Error| FeedError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    let column = |name: &str| -> Result<usize, FeedError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| FeedError::MissingColumn {
                path: path.display().to_string(),
                column: name.to_string(),
            })
    };

    let lake_col = column("Name of Lake")?;
    let year_col = column("Year")?;
    let mut numeric_cols = [0usize; 10];
    for (slot, name) in numeric_cols.iter_mut().zip(NUMERIC_COLUMNS) {
        *slot = column(name)?;
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let cell = |i: usize| record.get(i).unwrap_or_default();
        let sample = |i: usize| Sample::from_text(cell(i));

        rows.push(MeasurementRow {
            lake: cell(lake_col).to_string(),
            year: cell(year_col).to_string(),
            source,
            min_temperature: sample(numeric_cols[0]),
            max_temperature: sample(numeric_cols[1]),
            min_dissolved_oxygen: sample(numeric_cols[2]),
            max_dissolved_oxygen: sample(numeric_cols[3]),
            min_ph: sample(numeric_cols[4]),
            max_ph: sample(numeric_cols[5]),
            min_conductivity: sample(numeric_cols[6]),
            max_conductivity: sample(numeric_cols[7]),
            min_bod: sample(numeric_cols[8]),
            max_bod: sample(numeric_cols[9]),
        });
    }
    Ok(rows)
}
