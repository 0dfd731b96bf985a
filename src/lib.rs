//! Lakewatch: water-quality classification and dashboard service
//!
//! Serves the derived data structures behind an interactive two-lake
//! water-quality dashboard (Dal Lake and Wular Lake): map markers, summary
//! cards, radar/bar/heatmap/line chart payloads, a color-classified
//! measurement table, and composed mail alerts. The map and chart widgets
//! are opaque rendering sinks; this crate owns the classification and
//! aggregation they render.
//!
//! # Features
//!
//! - **Threshold classification**: fixed inclusive safe/caution/unsafe bands
//!   per parameter, with a distinct unclassified outcome for unparseable cells
//! - **Per-lake aggregation**: case-insensitive selection, latest-row lookup,
//!   min/max midpoints, per-year series
//! - **Typed feed boundary**: the JSON/CSV feed is parsed once into
//!   structured rows; no string-keyed records downstream
//! - **Explicit chart registry**: destroy-and-replace chart handles keyed by
//!   canvas id, no global instance map
//!
//! # Example
//!
//! ```no_run
//! use lakewatch::metrics::select_lake;
//! use lakewatch::quality::{classify, Parameter, Status};
//!
//! let rows = Vec::new(); // loaded from the feed at startup
//! let selection = select_lake(&rows, "dal lake");
//! if let Some(latest) = selection.latest() {
//!     println!("latest year: {}", latest.year);
//! }
//! assert_eq!(classify(Parameter::DissolvedOxygen, 6.0), Status::Safe);
//! ```

pub mod alerts;
pub mod api;
pub mod charts;
pub mod feed;
pub mod lakes;
pub mod metrics;
pub mod quality;

// Re-export commonly used types
pub use feed::{FeedSnapshot, MeasurementRow, Sample, Source};
pub use metrics::{average_pair, select_lake, LakeSelection};
pub use quality::{classify, radar_magnitude, Parameter, Status};
