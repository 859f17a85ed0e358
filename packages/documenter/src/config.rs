//! Documenter settings.

/// Generation settings shared by every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumenterConfig {
    /// Sampling temperature for analysis, briefing and search requests
    pub temperature: Option<f32>,

    /// Temperature for simplify/translate rewrites
    pub transform_temperature: Option<f32>,

    /// Target number of highlights requested from the model
    pub highlight_count: usize,
}

impl Default for DocumenterConfig {
    fn default() -> Self {
        Self {
            temperature: Some(0.2),
            transform_temperature: Some(0.3),
            highlight_count: 10,
        }
    }
}

impl DocumenterConfig {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_transform_temperature(mut self, temperature: f32) -> Self {
        self.transform_temperature = Some(temperature);
        self
    }

    pub fn with_highlight_count(mut self, count: usize) -> Self {
        self.highlight_count = count.max(1);
        self
    }
}
