//! # Validation Options
//!
//! [`ValidationOptions`] travels by reference through every recursive
//! validation call and is never mutated. A nested scope that needs different
//! behaviour (for example one field that must always stop at its first
//! failure) applies an [`OptionOverrides`] to produce a narrower copy.
//!
//! Options are plain serde data, so a host application can keep them in its
//! own YAML or JSON configuration:
//!
//! ```yaml
//! earlyExit: true
//! strip: false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Behaviour switches for validate and parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationOptions {
    /// Stop aggregating at the first failing child.
    pub early_exit: bool,
    /// Drop undeclared object keys when parsing.
    pub strip: bool,
    /// Let leaf schemas accept and convert alternative representations.
    pub with_coercion: bool,
    /// Parse without validating first.
    pub skip_validation: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            early_exit: false,
            strip: true,
            with_coercion: false,
            skip_validation: false,
        }
    }
}

impl ValidationOptions {
    /// Stop at the first failing child.
    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    /// Drop undeclared object keys from parsed output.
    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    /// Let leaf schemas convert compatible representations.
    pub fn with_coercion(mut self, with_coercion: bool) -> Self {
        self.with_coercion = with_coercion;
        self
    }

    /// Parse without validating first.
    pub fn with_skip_validation(mut self, skip_validation: bool) -> Self {
        self.skip_validation = skip_validation;
        self
    }

    /// Load options from a YAML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Yaml` for malformed YAML or unknown keys.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load options from a JSON value. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for a non-object or unknown keys.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Partial options for a nested scope. `Some` fields replace the caller's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionOverrides {
    pub early_exit: Option<bool>,
    pub strip: Option<bool>,
    pub with_coercion: Option<bool>,
    pub skip_validation: Option<bool>,
}

impl OptionOverrides {
    /// Overrides that force early exit.
    pub fn early_exit() -> Self {
        Self {
            early_exit: Some(true),
            ..Self::default()
        }
    }

    /// The caller's options narrowed by these overrides.
    pub fn apply(&self, base: &ValidationOptions) -> ValidationOptions {
        ValidationOptions {
            early_exit: self.early_exit.unwrap_or(base.early_exit),
            strip: self.strip.unwrap_or(base.strip),
            with_coercion: self.with_coercion.unwrap_or(base.with_coercion),
            skip_validation: self.skip_validation.unwrap_or(base.skip_validation),
        }
    }
}
