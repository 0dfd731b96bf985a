//! Prepared payloads for the dashboard's rendering sinks
//!
//! The map, table, and chart widgets are opaque collaborators; this module
//! shapes the data they consume. Every chart payload carries the stable
//! canvas id its sink renders into, so repeated renders can
//! destroy-and-replace prior instances through the [`ChartRegistry`].

pub mod registry;

use serde::Serialize;

pub use registry::ChartRegistry;

use crate::feed::MeasurementRow;
use crate::metrics::{self, LakeSelection};
use crate::quality::{classify, radar_magnitude, Parameter, Status};

pub const RADAR_CANVAS: &str = "radarChart";
pub const BAR_CANVAS: &str = "barChart";
pub const HEATMAP_CANVAS: &str = "heatmapChart";

/// Canvas id for a parameter's trend line chart, e.g. "MinDissolvedOxygen_chart".
fn line_canvas_id(parameter: Parameter) -> String {
    format!("Min{}_chart", parameter.label().replace(' ', ""))
}

/// Short axis label for the grouped per-parameter chart.
fn short_label(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::DissolvedOxygen => "DO",
        other => other.label(),
    }
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

/// One card per parameter summarizing the latest row.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCard {
    pub label: &'static str,
    pub unit: &'static str,
    pub css_class: &'static str,
    /// Full-precision midpoint; absent when either cell is unparseable.
    pub average: Option<f64>,
    /// Two-decimal display text for the midpoint.
    pub display: String,
    /// "min - max" range text, unparseable cells shown as provided.
    pub range: String,
}

pub fn summary_cards(latest: &MeasurementRow) -> Vec<SummaryCard> {
    Parameter::ALL
        .iter()
        .map(|&parameter| {
            let (min, max) = latest.pair(parameter);
            let average = metrics::midpoint(latest, parameter);
            SummaryCard {
                label: parameter.label(),
                unit: parameter.unit(),
                css_class: parameter.css_class(),
                average,
                display: average
                    .map(|v| format!("{v:.2}"))
                    .unwrap_or_else(|| "NaN".to_string()),
                range: format!("{} - {}", min.display(), max.display()),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Radar chart over the latest row, one axis per parameter, values scaled
/// for cross-axis visibility.
#[derive(Debug, Clone, Serialize)]
pub struct RadarChart {
    pub canvas_id: &'static str,
    pub title: String,
    pub labels: Vec<&'static str>,
    pub max_values: Vec<Option<f64>>,
    pub min_values: Vec<Option<f64>>,
}

pub fn radar_chart(latest: &MeasurementRow) -> RadarChart {
    let scaled = |sample_value: Option<f64>, parameter: Parameter| {
        sample_value.map(|v| radar_magnitude(parameter, v))
    };

    let mut labels = Vec::new();
    let mut max_values = Vec::new();
    let mut min_values = Vec::new();
    for &parameter in &Parameter::ALL {
        let (min, max) = latest.pair(parameter);
        labels.push(parameter.label());
        max_values.push(scaled(max.value(), parameter));
        min_values.push(scaled(min.value(), parameter));
    }

    RadarChart {
        canvas_id: RADAR_CANVAS,
        title: format!(
            "Water Quality Parameters - {} ({})",
            latest.year,
            latest.source.as_str()
        ),
        labels,
        max_values,
        min_values,
    }
}

/// One labeled value-per-year series within a grouped chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Grouped yearly chart: per-year midpoints for a set of parameters.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedChart {
    pub canvas_id: &'static str,
    pub title: &'static str,
    pub years: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

fn grouped_chart(
    selection: &LakeSelection<'_>,
    canvas_id: &'static str,
    title: &'static str,
    parameters: &[Parameter],
) -> GroupedChart {
    let years = selection
        .rows()
        .iter()
        .map(|row| row.year.clone())
        .collect();
    let datasets = parameters
        .iter()
        .map(|&parameter| ChartDataset {
            label: match parameter.unit() {
                "" => format!("Avg {}", short_label(parameter)),
                unit => format!("Avg {} ({unit})", short_label(parameter)),
            },
            values: selection
                .rows()
                .iter()
                .map(|row| metrics::midpoint(row, parameter))
                .collect(),
        })
        .collect();

    GroupedChart {
        canvas_id,
        title,
        years,
        datasets,
    }
}

/// Year-comparison bar chart: temperature, DO, and pH midpoints.
pub fn bar_chart(selection: &LakeSelection<'_>) -> GroupedChart {
    grouped_chart(
        selection,
        BAR_CANVAS,
        "Average Water Quality Parameters by Year",
        &[
            Parameter::Temperature,
            Parameter::DissolvedOxygen,
            Parameter::Ph,
        ],
    )
}

/// All five parameters' midpoints per year, rendered by the heatmap sink as
/// grouped bars.
pub fn heatmap_chart(selection: &LakeSelection<'_>) -> GroupedChart {
    grouped_chart(
        selection,
        HEATMAP_CANVAS,
        "Average Parameter Values by Year",
        &Parameter::ALL,
    )
}

/// Min/max trend lines over years for one parameter.
#[derive(Debug, Clone, Serialize)]
pub struct LineChart {
    pub canvas_id: String,
    pub title: String,
    pub label: &'static str,
    pub years: Vec<String>,
    pub min_values: Vec<Option<f64>>,
    pub max_values: Vec<Option<f64>>,
}

pub fn line_charts(selection: &LakeSelection<'_>) -> Vec<LineChart> {
    Parameter::ALL
        .iter()
        .map(|&parameter| {
            let series = selection.series_by_year(parameter);
            LineChart {
                canvas_id: line_canvas_id(parameter),
                title: format!("{} Trends Over Time", parameter.label()),
                label: parameter.label(),
                years: series.iter().map(|p| p.year.clone()).collect(),
                min_values: series.iter().map(|p| p.min).collect(),
                max_values: series.iter().map(|p| p.max).collect(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One numeric table cell: display text plus its resolved status class.
#[derive(Debug, Clone, Serialize)]
pub struct TableCell {
    pub display: String,
    pub status: Status,
}

/// One measurement row shaped for the table sink, cells in min/max pairs in
/// parameter order.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub lake: String,
    pub year: String,
    pub source: &'static str,
    pub source_class: &'static str,
    pub cells: Vec<TableCell>,
}

pub fn table_rows(selection: &LakeSelection<'_>) -> Vec<TableRow> {
    selection
        .rows()
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(Parameter::ALL.len() * 2);
            for &parameter in &Parameter::ALL {
                let (min, max) = row.pair(parameter);
                for sample in [min, max] {
                    cells.push(TableCell {
                        display: sample.display(),
                        status: match sample.value() {
                            Some(v) => classify(parameter, v),
                            None => Status::Unclassified,
                        },
                    });
                }
            }
            TableRow {
                lake: row.lake.clone(),
                year: row.year.clone(),
                source: row.source.as_str(),
                source_class: row.source.css_class(),
                cells,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard assembly
// ---------------------------------------------------------------------------

/// The full derived payload the dashboard renders for one lake.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub lake: String,
    pub summary_cards: Vec<SummaryCard>,
    pub radar: RadarChart,
    pub bar: GroupedChart,
    pub heatmap: GroupedChart,
    pub lines: Vec<LineChart>,
    pub table: Vec<TableRow>,
}

/// Build the dashboard for a selection, or `None` for the no-data state.
pub fn build_dashboard(lake: &str, selection: &LakeSelection<'_>) -> Option<Dashboard> {
    let latest = selection.latest()?;
    Some(Dashboard {
        lake: lake.to_string(),
        summary_cards: summary_cards(latest),
        radar: radar_chart(latest),
        bar: bar_chart(selection),
        heatmap: heatmap_chart(selection),
        lines: line_charts(selection),
        table: table_rows(selection),
    })
}

impl Dashboard {
    /// Install every chart payload into the registry under its canvas id,
    /// replacing whatever the previous render left there.
    pub fn register_into(&self, registry: &mut ChartRegistry) {
        registry.replace(self.radar.canvas_id, serde_json::json!(self.radar));
        registry.replace(self.bar.canvas_id, serde_json::json!(self.bar));
        registry.replace(self.heatmap.canvas_id, serde_json::json!(self.heatmap));
        for line in &self.lines {
            registry.replace(line.canvas_id.clone(), serde_json::json!(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{MeasurementRow, Sample, Source};
    use crate::metrics::select_lake;

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

    #[test]
    fn test_summary_cards_midpoints_and_ranges() {
        let cards = summary_cards(&dal_row());
        assert_eq!(cards.len(), 5);

        let temp = &cards[0];
        assert_eq!(temp.label, "Temperature");
        assert_eq!(temp.average, Some(17.0));
        assert_eq!(temp.display, "17.00");
        assert_eq!(temp.range, "12.00 - 22.00");

        let bod = &cards[4];
        assert_eq!(bod.average, Some(1.5));
        assert_eq!(bod.display, "1.50");
    }

    #[test]
    fn test_summary_card_unparseable_shows_raw_text() {
        let mut row = dal_row();
        row.min_ph = Sample::Unparseable("n/a".to_string());
        let ph = &summary_cards(&row)[2];
        assert_eq!(ph.average, None);
        assert_eq!(ph.display, "NaN");
        assert_eq!(ph.range, "n/a - 7.80");
    }

    #[test]
    fn test_radar_chart_scaling_and_title() {
        let radar = radar_chart(&dal_row());
        assert_eq!(radar.canvas_id, "radarChart");
        assert_eq!(radar.title, "Water Quality Parameters - 2020 (Actual)");
        // Axis order: temperature, DO, pH, conductivity, BOD.
        assert_eq!(radar.max_values[0], Some(22.0));
        assert_eq!(radar.max_values[1], Some(27.0));
        assert_eq!(radar.max_values[2], Some(78.0));
        assert_eq!(radar.max_values[3], Some(25.0));
        assert_eq!(radar.max_values[4], Some(10.0));
        assert_eq!(radar.min_values[2], Some(70.0));
    }

    #[test]
    fn test_bar_and_heatmap_datasets() {
        let rows = vec![dal_row()];
        let selection = select_lake(&rows, "Dal Lake");

        let bar = bar_chart(&selection);
        assert_eq!(bar.canvas_id, "barChart");
        assert_eq!(bar.years, vec!["2020"]);
        assert_eq!(bar.datasets.len(), 3);
        assert_eq!(bar.datasets[0].label, "Avg Temperature (°C)");
        assert_eq!(bar.datasets[0].values, vec![Some(17.0)]);
        assert_eq!(bar.datasets[2].label, "Avg pH");

        let heatmap = heatmap_chart(&selection);
        assert_eq!(heatmap.datasets.len(), 5);
        assert_eq!(heatmap.datasets[1].label, "Avg DO (mg/L)");
        assert_eq!(heatmap.datasets[1].values, vec![Some(8.0)]);
    }

    #[test]
    fn test_line_chart_canvas_ids() {
        let rows = vec![dal_row()];
        let selection = select_lake(&rows, "Dal Lake");
        let lines = line_charts(&selection);

        let ids: Vec<&str> = lines.iter().map(|l| l.canvas_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "MinTemperature_chart",
                "MinDissolvedOxygen_chart",
                "MinpH_chart",
                "MinConductivity_chart",
                "MinBOD_chart",
            ]
        );
        assert_eq!(lines[1].max_values, vec![Some(9.0)]);
    }

    #[test]
    fn test_table_rows_classify_every_cell() {
        let rows = vec![dal_row()];
        let selection = select_lake(&rows, "Dal Lake");
        let table = table_rows(&selection);

        assert_eq!(table.len(), 1);
        let row = &table[0];
        assert_eq!(row.source, "Actual");
        assert_eq!(row.source_class, "source-actual");
        assert_eq!(row.cells.len(), 10);
        // Every value in the Dal scenario sits inside its safe band.
        assert!(row.cells.iter().all(|c| c.status == Status::Safe));
        assert_eq!(row.cells[0].display, "12.00");
    }

    #[test]
    fn test_table_unparseable_cell_is_unclassified() {
        let mut bad = dal_row();
        bad.max_bod = Sample::Unparseable("??".to_string());
        let rows = vec![bad];
        let selection = select_lake(&rows, "Dal Lake");
        let cell = &table_rows(&selection)[0].cells[9];
        assert_eq!(cell.display, "??");
        assert_eq!(cell.status, Status::Unclassified);
    }

    #[test]
    fn test_dashboard_none_for_empty_selection() {
        let rows: Vec<MeasurementRow> = vec![];
        let selection = select_lake(&rows, "Dal Lake");
        assert!(build_dashboard("Dal Lake", &selection).is_none());
    }

    #[test]
    fn test_dashboard_registers_all_canvases() {
        let rows = vec![dal_row()];
        let selection = select_lake(&rows, "Dal Lake");
        let dashboard = build_dashboard("Dal Lake", &selection).unwrap();

        let mut registry = ChartRegistry::new();
        dashboard.register_into(&mut registry);
        // radar + bar + heatmap + five line charts
        assert_eq!(registry.len(), 8);
        assert!(registry.get("radarChart").is_some());
        assert!(registry.get("MinBOD_chart").is_some());

        // Re-rendering replaces rather than accumulates.
        dashboard.register_into(&mut registry);
        assert_eq!(registry.len(), 8);
    }
}
