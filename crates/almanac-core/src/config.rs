use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output switches consulted by the property accessors.
///
/// The codec itself never reads these; accessors resolve them and pass
/// plain booleans and strings down.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Whether a property holding an empty value renders as a bare `NAME:` line.
    pub allow_empty: bool,
    /// Default `LANGUAGE` parameter for language-aware properties.
    pub language: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            allow_empty: true,
            language: None,
        }
    }
}

impl OutputConfig {
    /// ## Summary
    /// Checks that the configured language looks like a BCP 47 tag.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the tag is empty or holds characters
    /// other than ASCII alphanumerics and `-`.
    pub fn validate(&self) -> CoreResult<()> {
        let Some(language) = &self.language else {
            return Ok(());
        };
        let well_formed = !language.is_empty()
            && language
                .split('-')
                .all(|sub| !sub.is_empty() && sub.chars().all(|c| c.is_ascii_alphanumeric()));
        if well_formed {
            Ok(())
        } else {
            Err(CoreError::ConfigError(format!(
                "invalid default language tag: {language:?}"
            )))
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables (prefixed `ALMANAC_`,
    /// nested with `__`) and an optional `config.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix("ALMANAC")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        settings.output.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from an inline TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or fails validation.
    pub fn from_toml(document: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.output.validate()?;
        Ok(settings)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = OutputConfig::default();
        Ok(Config::builder().set_default("output.allow_empty", defaults.allow_empty)?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(
        allow_empty = settings.output.allow_empty,
        language = ?settings.output.language,
        "Loaded output configuration"
    );
    Ok(settings)
}
