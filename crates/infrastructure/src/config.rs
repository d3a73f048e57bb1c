//! Suite configuration.
//!
//! The base URL is fixed; tests point a config at a local server with
//! [`SuiteConfig::with_base_url`]. The only environment input is the
//! optional results directory.

use std::env::{self, VarError};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Variable naming the directory that receives Allure result files.
pub const RESULTS_DIR_VAR: &str = "OBJECTS_CONTRACT_RESULTS_DIR";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but is not valid unicode.
    #[error("environment variable {var} is not valid unicode")]
    NotUnicode {
        /// Variable name.
        var: &'static str,
    },
}

/// Where the suite sends requests and where reports go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    base_url: String,
    results_dir: Option<PathBuf>,
}

impl SuiteConfig {
    /// Public objects API.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.restful-api.dev";

    /// Reads the optional results directory from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set to non-unicode data.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(RESULTS_DIR_VAR) {
            Ok(value) => Ok(Self::from_lookup(|_| Some(value.clone()))),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                var: RESULTS_DIR_VAR,
            }),
        }
    }

    /// Builds a config from an arbitrary variable lookup. Blank values
    /// count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let results_dir = lookup(RESULTS_DIR_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            results_dir,
            ..Self::default()
        }
    }

    /// Points the suite at another server (builder pattern).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the results directory (builder pattern).
    #[must_use]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = Some(dir.into());
        self
    }

    /// Base URL requests are built from.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Directory for Allure results, if reporting is enabled.
    #[must_use]
    pub fn results_dir(&self) -> Option<&Path> {
        self.results_dir.as_deref()
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            results_dir: None,
        }
    }
}
