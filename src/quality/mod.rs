//! Water-quality parameter bands and threshold classification
//!
//! Bands follow the BIS/WHO guidance the dashboard has always used: two
//! inclusive ranges per parameter (safe and caution) with everything outside
//! both treated as unsafe. The bands are process-wide constants and never
//! derived from data.

use serde::{Deserialize, Serialize};

/// The five measured water-quality parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Temperature,
    DissolvedOxygen,
    Ph,
    Conductivity,
    Bod,
}

impl Parameter {
    /// All parameters in the order the dashboard renders them.
    pub const ALL: [Parameter; 5] = [
        Parameter::Temperature,
        Parameter::DissolvedOxygen,
        Parameter::Ph,
        Parameter::Conductivity,
        Parameter::Bod,
    ];

    /// Human-readable label used in card and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::DissolvedOxygen => "Dissolved Oxygen",
            Parameter::Ph => "pH",
            Parameter::Conductivity => "Conductivity",
            Parameter::Bod => "BOD",
        }
    }

    /// Measurement unit, empty for the unitless pH scale.
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Temperature => "°C",
            Parameter::DissolvedOxygen => "mg/L",
            Parameter::Ph => "",
            Parameter::Conductivity => "μS/cm",
            Parameter::Bod => "mg/L",
        }
    }

    /// CSS class slug the summary-card sink styles by.
    pub fn css_class(&self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::DissolvedOxygen => "oxygen",
            Parameter::Ph => "ph",
            Parameter::Conductivity => "conductivity",
            Parameter::Bod => "bod",
        }
    }
}

/// An inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The safe and caution bands for one parameter.
///
/// The bands may overlap; caution is only consulted when safe fails, so it
/// does not need to contain the safe band.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bands {
    pub safe: Band,
    pub caution: Band,
}

const TEMPERATURE_BANDS: Bands = Bands {
    safe: Band { min: 10.0, max: 25.0 },
    caution: Band { min: 5.0, max: 30.0 },
};

const DISSOLVED_OXYGEN_BANDS: Bands = Bands {
    safe: Band { min: 6.0, max: 14.0 },
    caution: Band { min: 4.0, max: 6.0 },
};

const PH_BANDS: Bands = Bands {
    safe: Band { min: 6.5, max: 8.5 },
    caution: Band { min: 6.0, max: 9.0 },
};

const CONDUCTIVITY_BANDS: Bands = Bands {
    safe: Band { min: 0.0, max: 300.0 },
    caution: Band { min: 300.0, max: 500.0 },
};

const BOD_BANDS: Bands = Bands {
    safe: Band { min: 0.0, max: 3.0 },
    caution: Band { min: 3.0, max: 6.0 },
};

/// Fixed classification bands per parameter.
pub fn bands(parameter: Parameter) -> &'static Bands {
    match parameter {
        Parameter::Temperature => &TEMPERATURE_BANDS,
        Parameter::DissolvedOxygen => &DISSOLVED_OXYGEN_BANDS,
        Parameter::Ph => &PH_BANDS,
        Parameter::Conductivity => &CONDUCTIVITY_BANDS,
        Parameter::Bod => &BOD_BANDS,
    }
}

/// Three-tier health status, plus a distinct outcome for values that could
/// not be parsed into a finite number. Unclassified is never folded into
/// unsafe; out-of-range is a legitimate measurement, an unparseable cell is
/// a data-quality problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Caution,
    Unsafe,
    Unclassified,
}

impl Status {
    /// CSS class the table sink colors cells by.
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Caution => "caution",
            Status::Unsafe => "unsafe",
            Status::Unclassified => "unclassified",
        }
    }
}

/// Classify a single measurement value against the fixed bands.
///
/// Pure function: safe is checked first, caution only when safe fails,
/// everything else is unsafe. Non-finite input yields `Unclassified`.
pub fn classify(parameter: Parameter, value: f64) -> Status {
    if !value.is_finite() {
        return Status::Unclassified;
    }
    let bands = bands(parameter);
    if bands.safe.contains(value) {
        Status::Safe
    } else if bands.caution.contains(value) {
        Status::Caution
    } else {
        Status::Unsafe
    }
}

/// Scale a raw value for the radar chart so axes with very different natural
/// ranges stay visually comparable. Presentation-only; never feeds back into
/// classification or aggregation.
pub fn radar_magnitude(parameter: Parameter, raw: f64) -> f64 {
    match parameter {
        Parameter::Temperature => raw,
        Parameter::DissolvedOxygen => raw * 3.0,
        Parameter::Ph => raw * 10.0,
        Parameter::Conductivity => raw / 10.0,
        Parameter::Bod => raw * 5.0,
    }
}
