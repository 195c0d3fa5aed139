//! Option list configuration.
//!
//! Configuration is plain data with serde support, so it can be embedded in a
//! larger TOML file or loaded on its own:
//!
//! ```toml
//! max_options = 32
//! seed_count = 3
//! header_count = 2
//! trigger_id = "add-poll-option"
//! container_id = "poll-form-fieldset"
//! label_style = "plain"
//! placeholders = ["New York", "Paris", "London"]
//! ```

use std::path::Path;

use pollform_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::placeholders::PlaceholderList;
use crate::error::{Error, Result};

/// Default upper bound on the number of option fields.
pub const DEFAULT_MAX_OPTIONS: usize = 32;

/// Default number of add calls performed when the page becomes ready.
pub const DEFAULT_SEED_COUNT: usize = 3;

/// Default number of container children that precede the options.
pub const DEFAULT_HEADER_COUNT: usize = 2;

/// Default id of the "add option" control.
pub const DEFAULT_TRIGGER_ID: &str = "add-poll-option";

/// Default id of the element that holds the option field groups.
pub const DEFAULT_CONTAINER_ID: &str = "poll-form-fieldset";

/// Default `name` attribute of option inputs.
pub const DEFAULT_INPUT_NAME: &str = "option";

/// How option labels and placeholders are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Label "Option: " with an example placeholder from the list.
    #[default]
    Plain,
    /// Label "Option N: " (1-based) with no placeholder.
    Numbered,
}

impl LabelStyle {
    /// The label text for the option at 0-based `index`.
    pub fn label_text(self, index: usize) -> String {
        match self {
            LabelStyle::Plain => "Option: ".to_string(),
            LabelStyle::Numbered => format!("Option {}: ", index + 1),
        }
    }
}

/// Configuration of an option list controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionListConfig {
    /// Upper bound on the option count.
    pub max_options: usize,
    /// Number of add calls made on initialization.
    pub seed_count: usize,
    /// Option count at construction time. Must equal `prerendered_options`.
    pub initial_count: usize,
    /// Number of container children before the first option.
    pub header_count: usize,
    /// Option groups already in the container when the page loads.
    pub prerendered_options: usize,
    /// Id of the "add option" control.
    pub trigger_id: String,
    /// Id of the element holding the option groups.
    pub container_id: String,
    /// `name` attribute of the option inputs.
    pub input_name: String,
    /// Label and placeholder policy.
    pub label_style: LabelStyle,
    /// Example values shown as input placeholders.
    pub placeholders: PlaceholderList,
}

impl Default for OptionListConfig {
    fn default() -> Self {
        Self {
            max_options: DEFAULT_MAX_OPTIONS,
            seed_count: DEFAULT_SEED_COUNT,
            initial_count: 0,
            header_count: DEFAULT_HEADER_COUNT,
            prerendered_options: 0,
            trigger_id: DEFAULT_TRIGGER_ID.to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            input_name: DEFAULT_INPUT_NAME.to_string(),
            label_style: LabelStyle::default(),
            placeholders: PlaceholderList::default(),
        }
    }
}

impl OptionListConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::config_io(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded option list config");
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check that the values are usable together.
    pub fn validate(&self) -> Result<()> {
        if self.max_options == 0 {
            return Err(Error::invalid_config("max_options", "must be at least 1"));
        }
        if self.initial_count > self.max_options {
            return Err(Error::invalid_config(
                "initial_count",
                format!("{} exceeds max_options {}", self.initial_count, self.max_options),
            ));
        }
        if self.prerendered_options > self.max_options {
            return Err(Error::invalid_config(
                "prerendered_options",
                format!(
                    "{} exceeds max_options {}",
                    self.prerendered_options, self.max_options
                ),
            ));
        }
        if self.initial_count != self.prerendered_options {
            // Both describe the option groups already in the container. A
            // mismatch puts new groups among the headers or after the buttons.
            return Err(Error::invalid_config(
                "initial_count",
                format!(
                    "{} does not match prerendered_options {}",
                    self.initial_count, self.prerendered_options
                ),
            ));
        }
        for (field, value) in [
            ("trigger_id", &self.trigger_id),
            ("container_id", &self.container_id),
            ("input_name", &self.input_name),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(field, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Set the upper bound.
    pub fn with_max_options(mut self, max: usize) -> Self {
        self.max_options = max;
        self
    }

    /// Set the number of seed calls.
    pub fn with_seed_count(mut self, count: usize) -> Self {
        self.seed_count = count;
        self
    }

    /// Set the number of header children before the options.
    pub fn with_header_count(mut self, count: usize) -> Self {
        self.header_count = count;
        self
    }

    /// Render `count` option groups in the page markup and start counting
    /// from there.
    pub fn with_prerendered_options(mut self, count: usize) -> Self {
        self.prerendered_options = count;
        self.initial_count = count;
        self
    }

    /// Set the trigger element id.
    pub fn with_trigger_id(mut self, id: impl Into<String>) -> Self {
        self.trigger_id = id.into();
        self
    }

    /// Set the container element id.
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Set the label style.
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Replace the placeholder list.
    pub fn with_placeholders(mut self, placeholders: PlaceholderList) -> Self {
        self.placeholders = placeholders;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = OptionListConfig::default();
        assert_eq!(config.max_options, 32);
        assert_eq!(config.seed_count, 3);
        assert_eq!(config.header_count, 2);
        assert_eq!(config.trigger_id, "add-poll-option");
        assert_eq!(config.container_id, "poll-form-fieldset");
        assert_eq!(config.placeholders.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = OptionListConfig::from_toml_str(
            r#"
            max_options = 5
            container_id = "poll-options-list"
            label_style = "numbered"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_options, 5);
        assert_eq!(config.container_id, "poll-options-list");
        assert_eq!(config.label_style, LabelStyle::Numbered);
        assert_eq!(config.seed_count, DEFAULT_SEED_COUNT);
    }

    #[test]
    fn test_placeholders_from_toml() {
        let config =
            OptionListConfig::from_toml_str(r#"placeholders = ["Oslo", "Lima"]"#).unwrap();
        assert_eq!(config.placeholders.get(1), "Lima");
        assert_eq!(config.placeholders.get(2), "");
    }

    #[test]
    fn test_validation_errors() {
        let err = OptionListConfig::from_toml_str("max_options = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "max_options", .. }));

        let err = OptionListConfig::from_toml_str("max_options = 2\ninitial_count = 3").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "initial_count", .. }));

        let err = OptionListConfig::from_toml_str("initial_count = 3\nseed_count = 1").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "initial_count", .. }));

        let err = OptionListConfig::from_toml_str("prerendered_options = 3").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "initial_count", .. }));

        let err = OptionListConfig::from_toml_str("trigger_id = \"  \"").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "trigger_id", .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = OptionListConfig::from_toml_str("max_options = \"many\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = OptionListConfig::default()
            .with_max_options(10)
            .with_label_style(LabelStyle::Numbered);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("label_style = \"numbered\""));
        assert_eq!(OptionListConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_count = 0").unwrap();
        writeln!(file, "trigger_id = \"add-option\"").unwrap();

        let config = OptionListConfig::load(file.path()).unwrap();
        assert_eq!(config.seed_count, 0);
        assert_eq!(config.trigger_id, "add-option");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = OptionListConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigIo { .. }));
    }

    #[test]
    fn test_label_text() {
        assert_eq!(LabelStyle::Plain.label_text(4), "Option: ");
        assert_eq!(LabelStyle::Numbered.label_text(0), "Option 1: ");
        assert_eq!(LabelStyle::Numbered.label_text(9), "Option 10: ");
    }

    #[test]
    fn test_prerendered_sets_initial_count() {
        let config = OptionListConfig::default().with_prerendered_options(3);
        assert_eq!(config.initial_count, 3);
        assert_eq!(config.prerendered_options, 3);
        assert!(config.validate().is_ok());

        let config =
            OptionListConfig::from_toml_str("initial_count = 3\nprerendered_options = 3").unwrap();
        assert_eq!(config, OptionListConfig::default().with_prerendered_options(3));
    }
}
