//! Configuration for the estimating engine.
//!
//! Everything here is loaded once at process start and passed into the
//! core explicitly; no module holds mutable global state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::extraction::RuleSet;
use crate::models::PricingSource;

/// Default service port.
pub const DEFAULT_PORT: u16 = 8787;

/// Default per-request timeout for outbound pricing fetches. An unbounded
/// fetch would stall the whole source chain, so one is always imposed.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Environment variable holding the fallback pricing source list.
pub const PRICING_SOURCE_URLS: &str = "PRICING_SOURCE_URLS";

/// Environment variable overriding the service port.
pub const PORT_VAR: &str = "ESTIMARK_PORT";

/// Errors loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rules file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Runtime settings consumed by the core.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Fallback pricing sources, used when a request omits its own list.
    pub pricing_sources: Vec<PricingSource>,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pricing_sources: Vec::new(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Build settings from the process environment.
    pub fn from_env() -> Self {
        let pricing_sources = std::env::var(PRICING_SOURCE_URLS)
            .map(|raw| parse_source_list(&raw))
            .unwrap_or_default();

        let port = std::env::var(PORT_VAR)
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Settings {
            pricing_sources,
            port,
            ..Settings::default()
        }
    }
}

/// Parse a JSON array of `{source_name, source_url}` entries.
///
/// Unparseable or non-array values degrade to an empty list; a broken
/// environment variable should surface later as "no sources configured",
/// not crash startup.
pub fn parse_source_list(raw: &str) -> Vec<PricingSource> {
    match serde_json::from_str::<Vec<PricingSource>>(raw) {
        Ok(sources) => sources,
        Err(error) => {
            tracing::warn!(%error, "ignoring unparseable {PRICING_SOURCE_URLS}");
            Vec::new()
        }
    }
}

/// Load the trade rule table: a TOML file when a path is given, otherwise
/// the built-in table.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet, ConfigError> {
    let Some(path) = path else {
        return Ok(RuleSet::builtin());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    RuleSet::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_source_list() {
        let raw = r#"[{"source_name": "acme", "source_url": "https://acme.test/p"}]"#;
        let sources = parse_source_list(raw);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].source_name.as_deref(), Some("acme"));
        assert_eq!(sources[0].source_url.as_deref(), Some("https://acme.test/p"));
    }

    #[test]
    fn test_parse_source_list_tolerates_garbage() {
        assert!(parse_source_list("not json").is_empty());
        assert!(parse_source_list("{\"a\": 1}").is_empty());
        assert!(parse_source_list("[]").is_empty());
    }

    #[test]
    fn test_load_rules_defaults_to_builtin() {
        let rules = load_rules(None).unwrap();
        assert_eq!(rules.len(), 6);
    }

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[rules]]
            task_key = "roof_patch"
            trade = "roofing"
            action = "Patch roof"
            object = "damaged shingles"
            keywords = ["shingle"]
            "#
        )
        .unwrap();

        let rules = load_rules(Some(file.path())).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.rules()[0].missing_fields.is_empty());
    }

    #[test]
    fn test_load_rules_missing_file() {
        let error = load_rules(Some(Path::new("/nonexistent/rules.toml"))).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }
}
