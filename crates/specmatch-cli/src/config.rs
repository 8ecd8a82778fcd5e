//! CLI configuration file
//!
//! ```toml
//! [scopes]
//! ingress = ["^spec\\.rules(\\.|$)", "^spec\\.tls(\\.|$)"]
//!
//! [[unordered]]
//! path = "^spec\\.ports$"
//! key = "name"
//!
//! [[unordered]]
//! type_name = "VolumeMount"
//! key = "mountPath"
//! ```

use serde::Deserialize;
use specmatch_core::errors::{ExError, ExErrorKind};
use specmatch_core::scope;
use specmatch_core::snapshot::FlattenOptions;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Named pattern lists; shadow built-in presets of the same name
    #[serde(default)]
    pub scopes: BTreeMap<String, Vec<String>>,
    /// Extra order-insensitive list rules, added after the `EnvVar` default
    #[serde(default)]
    pub unordered: Vec<UnorderedRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnorderedRule {
    pub type_name: Option<String>,
    pub path: Option<String>,
    pub key: String,
}

impl CliConfig {
    /// Load `path`, or the empty configuration when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ExError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_path(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::parse(&text).map_err(|e| e.with_path(path.display().to_string()))
    }

    pub fn parse(text: &str) -> Result<Self, ExError> {
        let config: CliConfig = toml::from_str(text).map_err(|e| invalid(e.to_string()))?;
        for rule in &config.unordered {
            if rule.type_name.is_some() == rule.path.is_some() {
                return Err(invalid(format!(
                    "unordered rule for key `{}` needs exactly one of `type_name` or `path`",
                    rule.key
                )));
            }
        }
        Ok(config)
    }

    /// Default flatten options extended with the configured list rules.
    pub fn flatten_options(&self) -> Result<FlattenOptions, ExError> {
        let mut options = FlattenOptions::default();
        for rule in &self.unordered {
            options = match (&rule.type_name, &rule.path) {
                (Some(type_name), _) => options.unordered_type(type_name.as_str(), rule.key.as_str()),
                (None, Some(pattern)) => options.unordered_path(pattern, rule.key.as_str())?,
                (None, None) => options,
            };
        }
        Ok(options)
    }

    /// Patterns of the scope called `name`, configured scopes first.
    pub fn scope_patterns(&self, name: &str) -> Result<Vec<String>, ExError> {
        if let Some(patterns) = self.scopes.get(name) {
            return Ok(patterns.clone());
        }
        Ok(scope::lookup(name)?
            .iter()
            .map(|p| p.to_string())
            .collect())
    }
}

fn invalid(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_config")
        .with_message(message)
}
