//! Reader accessibility preferences.
//!
//! Plain values owned by the caller and passed to whatever renders the page.
//! There is no global state; `reset_all` returns to [`A11ySettings::default`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT_SIZE_PX: u8 = 18;
pub const MIN_TEXT_SIZE_PX: u8 = 12;
pub const MAX_TEXT_SIZE_PX: u8 = 28;

pub const DEFAULT_LINE_HEIGHT: f32 = 1.8;
pub const MIN_LINE_HEIGHT: f32 = 1.2;
pub const MAX_LINE_HEIGHT: f32 = 3.0;

/// Toggleable display features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    DyslexicFont,
    HighContrast,
    ReducedMotion,
    EnhancedFocus,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::DyslexicFont,
        Feature::HighContrast,
        Feature::ReducedMotion,
        Feature::EnhancedFocus,
    ];

    /// Body class applied while the feature is on.
    pub fn css_class(self) -> &'static str {
        match self {
            Feature::DyslexicFont => "dyslexic-font",
            Feature::HighContrast => "high-contrast",
            Feature::ReducedMotion => "reduced-motion",
            Feature::EnhancedFocus => "enhanced-focus",
        }
    }
}

/// Display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,

    /// English rewritten in plain language
    Simple,

    /// Any other language code, handled by machine translation
    Other(String),
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "" | "en" => Language::English,
            "simple" => Language::Simple,
            other => Language::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Simple => "simple",
            Language::Other(code) => code,
        }
    }

    /// Whether the page text must go through a translator.
    pub fn needs_machine_translation(&self) -> bool {
        matches!(self, Language::Other(_))
    }
}

/// The full panel state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A11ySettings {
    pub text_size_px: u8,
    pub line_height: f32,
    pub dyslexic_font: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub enhanced_focus: bool,
    pub language: Language,
}

impl Default for A11ySettings {
    fn default() -> Self {
        Self {
            text_size_px: DEFAULT_TEXT_SIZE_PX,
            line_height: DEFAULT_LINE_HEIGHT,
            dyslexic_font: false,
            high_contrast: false,
            reduced_motion: false,
            enhanced_focus: false,
            language: Language::English,
        }
    }
}

impl A11ySettings {
    pub fn adjust_text_size(&mut self, delta: i16) {
        let size = (self.text_size_px as i16 + delta)
            .clamp(MIN_TEXT_SIZE_PX as i16, MAX_TEXT_SIZE_PX as i16);
        self.text_size_px = size as u8;
    }

    pub fn reset_text_size(&mut self) {
        self.text_size_px = DEFAULT_TEXT_SIZE_PX;
    }

    pub fn adjust_line_height(&mut self, delta: f32) {
        // tenths, so repeated 0.1 steps don't drift
        let stepped = ((self.line_height + delta) * 10.0).round() / 10.0;
        self.line_height = stepped.clamp(MIN_LINE_HEIGHT, MAX_LINE_HEIGHT);
    }

    pub fn reset_line_height(&mut self) {
        self.line_height = DEFAULT_LINE_HEIGHT;
    }

    fn flag_mut(&mut self, feature: Feature) -> &mut bool {
        match feature {
            Feature::DyslexicFont => &mut self.dyslexic_font,
            Feature::HighContrast => &mut self.high_contrast,
            Feature::ReducedMotion => &mut self.reduced_motion,
            Feature::EnhancedFocus => &mut self.enhanced_focus,
        }
    }

    /// Flip a feature, returning its new state.
    pub fn toggle(&mut self, feature: Feature) -> bool {
        let flag = self.flag_mut(feature);
        *flag = !*flag;
        *flag
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::DyslexicFont => self.dyslexic_font,
            Feature::HighContrast => self.high_contrast,
            Feature::ReducedMotion => self.reduced_motion,
            Feature::EnhancedFocus => self.enhanced_focus,
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Classes to put on `<body>`.
    pub fn body_classes(&self) -> Vec<&'static str> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.is_enabled(*f))
            .map(Feature::css_class)
            .collect()
    }

    /// CSS custom properties and inline styles for the document root.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--base-font-size", format!("{}px", self.text_size_px)),
            ("line-height", format!("{:.1}", self.line_height)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_clamped() {
        let mut settings = A11ySettings::default();
        settings.adjust_text_size(100);
        assert_eq!(settings.text_size_px, MAX_TEXT_SIZE_PX);
        settings.adjust_text_size(-100);
        assert_eq!(settings.text_size_px, MIN_TEXT_SIZE_PX);
        settings.reset_text_size();
        assert_eq!(settings.text_size_px, 18);
    }

    #[test]
    fn test_line_height_clamped_and_stepped() {
        let mut settings = A11ySettings::default();
        for _ in 0..3 {
            settings.adjust_line_height(0.1);
        }
        assert_eq!(settings.line_height, 2.1);

        settings.adjust_line_height(5.0);
        assert_eq!(settings.line_height, MAX_LINE_HEIGHT);
        settings.adjust_line_height(-5.0);
        assert_eq!(settings.line_height, MIN_LINE_HEIGHT);
    }

    #[test]
    fn test_toggles_and_classes() {
        let mut settings = A11ySettings::default();
        assert!(settings.toggle(Feature::HighContrast));
        assert!(settings.toggle(Feature::EnhancedFocus));
        assert_eq!(settings.body_classes(), vec!["high-contrast", "enhanced-focus"]);

        assert!(!settings.toggle(Feature::HighContrast));
        assert_eq!(settings.body_classes(), vec!["enhanced-focus"]);
    }

    #[test]
    fn test_reset_all() {
        let mut settings = A11ySettings::default();
        settings.adjust_text_size(4);
        settings.toggle(Feature::DyslexicFont);
        settings.set_language(Language::from_code("es"));

        settings.reset_all();

        assert_eq!(settings, A11ySettings::default());
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("EN"), Language::English);
        assert_eq!(Language::from_code("simple"), Language::Simple);
        assert!(!Language::Simple.needs_machine_translation());

        let spanish = Language::from_code("es");
        assert!(spanish.needs_machine_translation());
        assert_eq!(spanish.code(), "es");
    }

    #[test]
    fn test_css_variables() {
        let vars = A11ySettings::default().css_variables();
        assert_eq!(vars[0], ("--base-font-size", "18px".to_string()));
        assert_eq!(vars[1], ("line-height", "1.8".to_string()));
    }
}
