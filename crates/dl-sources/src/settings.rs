//! Shared connector configuration and declarative option validation.
//!
//! Every connector shares the same settings shape: an enabled flag, a request
//! timeout, and a flat string map of connector-specific options. Each
//! connector declares its options as a [`FieldSpec`] list and resolves them
//! through one validation path instead of hand-rolling checks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::SourceError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration common to every source, as written in the config file.
///
/// Keys other than `enabled` and `timeout_secs` are collected into `options`
/// and interpreted per connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, flatten)]
    pub options: HashMap<String, String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            options: HashMap::new(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// What kind of value an option holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Credential material; never echoed back in output.
    Secret,
    /// Must start with `http://` or `https://`.
    Url,
}

/// Whether an option must be present, and what it falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    Default(&'static str),
}

/// One declared connector option.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
}

/// Options after validation, with defaults filled in.
#[derive(Debug)]
pub struct ResolvedOptions<'a> {
    source: &'a str,
    values: HashMap<&'static str, String>,
}

impl ResolvedOptions<'_> {
    /// Value of a required or defaulted field.
    pub fn required(&self, name: &'static str) -> Result<String, SourceError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::MissingOption {
                source_name: self.source.to_string(),
                option: name,
            })
    }

    #[must_use]
    pub fn optional(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Validates `settings.options` against `specs` and fills in defaults.
///
/// Unknown keys are logged and ignored rather than rejected, so adding an
/// option in config before upgrading is harmless.
pub fn resolve_options<'a>(
    source: &'a str,
    settings: &SourceSettings,
    specs: &[FieldSpec],
) -> Result<ResolvedOptions<'a>, SourceError> {
    for key in settings.options.keys() {
        if !specs.iter().any(|spec| spec.name == key) {
            tracing::warn!(source = %source, option = %key, "ignoring unknown option");
        }
    }

    let mut values = HashMap::new();
    for spec in specs {
        match settings.options.get(spec.name) {
            Some(value) => {
                validate_value(source, spec, value)?;
                values.insert(spec.name, value.clone());
            }
            None => match spec.requirement {
                Requirement::Required => {
                    return Err(SourceError::MissingOption {
                        source_name: source.to_string(),
                        option: spec.name,
                    });
                }
                Requirement::Default(default) => {
                    values.insert(spec.name, default.to_string());
                }
                Requirement::Optional => {}
            },
        }
    }

    Ok(ResolvedOptions { source, values })
}

fn validate_value(source: &str, spec: &FieldSpec, value: &str) -> Result<(), SourceError> {
    if value.trim().is_empty() {
        return Err(SourceError::InvalidOption {
            source_name: source.to_string(),
            option: spec.name,
            reason: "must not be empty".to_string(),
        });
    }
    if spec.kind == FieldKind::Url
        && !(value.starts_with("http://") || value.starts_with("https://"))
    {
        return Err(SourceError::InvalidOption {
            source_name: source.to_string(),
            option: spec.name,
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[FieldSpec] = &[
        FieldSpec {
            name: "username",
            kind: FieldKind::Text,
            requirement: Requirement::Required,
        },
        FieldSpec {
            name: "token",
            kind: FieldKind::Secret,
            requirement: Requirement::Optional,
        },
        FieldSpec {
            name: "api_url",
            kind: FieldKind::Url,
            requirement: Requirement::Default("https://api.example.com"),
        },
    ];

    fn settings(pairs: &[(&str, &str)]) -> SourceSettings {
        SourceSettings {
            options: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..SourceSettings::default()
        }
    }

    #[test]
    fn defaults_deserialize_from_an_empty_table() {
        let parsed: SourceSettings = serde_json::from_str("{}").unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.timeout_secs, 30);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn extra_keys_flatten_into_options() {
        let parsed: SourceSettings =
            serde_json::from_str(r#"{"enabled": false, "username": "alice"}"#).unwrap();
        assert!(!parsed.enabled);
        assert_eq!(parsed.options.get("username").map(String::as_str), Some("alice"));
    }

    #[test]
    fn missing_required_option_errors() {
        let err = resolve_options("example", &settings(&[]), SPECS).unwrap_err();
        assert_eq!(err.to_string(), "example: missing required option `username`");
    }

    #[test]
    fn empty_values_are_rejected() {
        let err =
            resolve_options("example", &settings(&[("username", "  ")]), SPECS).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn url_fields_must_look_like_urls() {
        let err = resolve_options(
            "example",
            &settings(&[("username", "alice"), ("api_url", "ftp://example.com")]),
            SPECS,
        )
        .unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn defaults_fill_in_and_explicit_values_win() {
        let resolved = resolve_options("example", &settings(&[("username", "alice")]), SPECS)
            .unwrap();
        assert_eq!(resolved.required("api_url").unwrap(), "https://api.example.com");
        assert_eq!(resolved.required("username").unwrap(), "alice");
        assert!(resolved.optional("token").is_none());

        let resolved = resolve_options(
            "example",
            &settings(&[("username", "alice"), ("api_url", "https://ghe.internal")]),
            SPECS,
        )
        .unwrap();
        assert_eq!(resolved.required("api_url").unwrap(), "https://ghe.internal");
    }

    #[test]
    fn unknown_options_are_tolerated() {
        let resolved = resolve_options(
            "example",
            &settings(&[("username", "alice"), ("tokne", "oops")]),
            SPECS,
        );
        assert!(resolved.is_ok());
    }
}
