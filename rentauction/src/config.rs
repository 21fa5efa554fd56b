//! Application configuration management.
//!
//! Settings are layered from default values, an optional configuration file,
//! and environment variables, in increasing order of precedence.

use rent_solver::Precision;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// How amounts are rounded in the report
    #[serde(default)]
    pub report: Precision,

    /// Behaviour of the interactive session
    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// Settings for the interactive session
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Clear the screen between bidders, so nobody sees the previous bids
    pub clear_screen: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { clear_screen: true }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file, if given
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `RENT_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Show prices to the whole dollar
    /// export RENT_REPORT__PRICE_DECIMALS=0
    ///
    /// # Keep the previous bidder's screen visible (e.g. when recording a session)
    /// export RENT_TERMINAL__CLEAR_SCREEN=false
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps RENT_REPORT__PRICE_DECIMALS to report.price_decimals
        config = config.add_source(
            config::Environment::with_prefix("RENT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
