//! Explicit chart-handle registry

use std::collections::HashMap;

/// Prepared chart payloads keyed by canvas id.
///
/// The rendering collaborator owns this value and passes it explicitly;
/// there is no module-level instance map. Repeated renders of the same
/// canvas id are an explicit destroy-and-replace, and the no-data state is
/// an explicit clear.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: HashMap<String, serde_json::Value>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a payload under a canvas id, returning the payload it
    /// replaced, if any.
    pub fn replace(
        &mut self,
        canvas_id: impl Into<String>,
        payload: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.charts.insert(canvas_id.into(), payload)
    }

    /// Drop every registered chart, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.charts.len();
        self.charts.clear();
        dropped
    }

    pub fn get(&self, canvas_id: &str) -> Option<&serde_json::Value> {
        self.charts.get(canvas_id)
    }

    pub fn canvas_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.charts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_returns_previous_payload() {
        let mut registry = ChartRegistry::new();
        assert_eq!(
            registry.replace("radarChart", serde_json::json!({"v": 1})),
            None
        );

        let old = registry.replace("radarChart", serde_json::json!({"v": 2}));
        assert_eq!(old, Some(serde_json::json!({"v": 1})));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("radarChart"),
            Some(&serde_json::json!({"v": 2}))
        );
    }

    #[test]
    fn test_clear_empties_the_registry() {
        let mut registry = ChartRegistry::new();
        registry.replace("radarChart", serde_json::json!(1));
        registry.replace("barChart", serde_json::json!(2));

        assert_eq!(registry.clear(), 2);
        assert!(registry.is_empty());
        assert_eq!(registry.clear(), 0);
    }

    #[test]
    fn test_canvas_ids_sorted() {
        let mut registry = ChartRegistry::new();
        registry.replace("radarChart", serde_json::json!(1));
        registry.replace("barChart", serde_json::json!(2));
        assert_eq!(registry.canvas_ids(), vec!["barChart", "radarChart"]);
    }
}
