//! Configuration loading via `ortho-config`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Region swept when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Sweep settings merged from defaults, `volsweep.toml`, and `VOLSWEEP_*`
/// environment variables. CLI flags are applied on top by the binary.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "VOLSWEEP",
    discovery(
        app_name = "volsweep",
        env_var = "VOLSWEEP_CONFIG_PATH",
        config_file_name = "volsweep.toml",
        dotfile_name = ".volsweep.toml",
        project_file_name = "volsweep.toml"
    )
)]
pub struct SweepConfig {
    /// Region whose volumes are listed and deleted.
    #[ortho_config(default = DEFAULT_REGION.to_owned())]
    pub region: String,
    /// Only volumes of exactly this many GiB are selected. Unset selects all
    /// sizes.
    pub size_filter_gib: Option<u32>,
    /// Skip the interactive confirmation and delete straight away.
    #[ortho_config(default = false)]
    pub auto_delete: bool,
    /// Path to the `aws` CLI binary.
    #[ortho_config(default = crate::aws::DEFAULT_AWS_BIN.to_owned())]
    pub aws_bin: String,
    /// Named profile from the ambient `aws` credential chain.
    pub profile: Option<String>,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }

    fn guidance(&self) -> String {
        format!(
            "set {} or add {} to volsweep.toml",
            self.env_var, self.toml_key
        )
    }
}

const REGION: FieldMetadata = FieldMetadata::new("AWS region", "VOLSWEEP_REGION", "region");
const AWS_BIN: FieldMetadata = FieldMetadata::new("aws CLI binary", "VOLSWEEP_AWS_BIN", "aws_bin");
const PROFILE: FieldMetadata = FieldMetadata::new("aws profile", "VOLSWEEP_PROFILE", "profile");
const SIZE_FILTER: FieldMetadata = FieldMetadata::new(
    "size filter",
    "VOLSWEEP_SIZE_FILTER_GIB",
    "size_filter_gib",
);

impl SweepConfig {
    /// Builds a configuration for `region` with every other field at its
    /// default.
    #[must_use]
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into().trim().to_owned(),
            size_filter_gib: None,
            auto_delete: false,
            aws_bin: crate::aws::DEFAULT_AWS_BIN.to_owned(),
            profile: None,
        }
    }

    /// Sets the exact-size filter.
    #[must_use]
    pub const fn with_size_filter(mut self, size_gib: Option<u32>) -> Self {
        self.size_filter_gib = size_gib;
        self
    }

    /// Sets whether confirmation is skipped.
    #[must_use]
    pub const fn with_auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = auto_delete;
        self
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("volsweep")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation. Error messages include guidance on how
    /// to provide the value via environment variables or the config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is blank,
    /// or [`ConfigError::InvalidValue`] when the size filter is zero or the
    /// profile is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(&self.region, &REGION)?;
        Self::require_field(&self.aws_bin, &AWS_BIN)?;
        if self
            .profile
            .as_deref()
            .is_some_and(|profile| profile.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue(format!(
                "{} must not be blank: {}",
                PROFILE.description,
                PROFILE.guidance()
            )));
        }
        if self.size_filter_gib == Some(0) {
            return Err(ConfigError::InvalidValue(format!(
                "{} must be a positive number of GiB: {}",
                SIZE_FILTER.description,
                SIZE_FILTER.guidance()
            )));
        }
        Ok(())
    }

    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: {}",
                metadata.description,
                metadata.guidance()
            )));
        }
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a field holds a value outside its allowed range.
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
