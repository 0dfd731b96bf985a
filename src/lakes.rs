//! Static registry of the monitored lakes
//!
//! Marker data for the map sink and the descriptive text for the details
//! panel. The registry is fixed configuration, not derived from the feed.

use serde::Serialize;

/// One monitored lake: marker metadata plus details-panel text.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Lake {
    pub name: &'static str,
    /// [latitude, longitude]
    pub coords: [f64; 2],
    pub description: &'static str,
    /// Longer text for the details panel.
    pub info: &'static str,
}

/// Center point the map opens on before any marker is selected.
pub const MAP_CENTER: [f64; 2] = [34.22947024039823, 74.71906692726527];

pub static LAKES: [Lake; 2] = [
    Lake {
        name: "Dal Lake",
        coords: [34.115820567793925, 74.87038724125391],
        description: "Dal Lake is a famous urban lake in Srinagar.",
        info: "Dal is a freshwater lake in Srinagar, the summer capital of Jammu \
and Kashmir. It is an urban lake, the second largest in Jammu and Kashmir, and \
the most visited place in Srinagar. It is integral to tourism and recreation in \
the Kashmir Valley and is an important source for commercial fishing and water \
plant harvesting.",
    },
    Lake {
        name: "Wular Lake",
        coords: [34.34842187394441, 74.55284157368692],
        description: "Wular Lake is one of the largest freshwater lakes in Asia.",
        info: "Wular Lake, located in the Bandipora district of Jammu and Kashmir, \
is one of the largest freshwater lakes in Asia. It plays a crucial role in \
controlling floods in the Jhelum River basin and supports rich biodiversity, \
including migratory birds and aquatic vegetation. Local communities depend on it \
for fishing, water transport, and agriculture.",
    },
];

/// Look up a lake by name, case-insensitively, matching how feed rows are
/// selected.
pub fn find(name: &str) -> Option<&'static Lake> {
    let needle = name.to_lowercase();
    LAKES.iter().find(|lake| lake.name.to_lowercase() == needle)
}
