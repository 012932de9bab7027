//! Helpers for reading typed settings from the environment.
//!
//! Each config struct exposes `from_lookup` taking a key lookup function so
//! tests can supply values without mutating the process environment.

use std::fmt::Display;
use std::str::FromStr;

/// A setting was present but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{key} has invalid value '{value}': {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Read `key`, falling back to `default` when it is unset or empty.
pub fn string_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse `key`, falling back to `default` when it is unset or empty.
pub fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

/// Read and parse `key`; unset or empty yields `None`.
pub fn parse_opt<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|e: T::Err| ConfigError {
            key,
            value: v.clone(),
            reason: e.to_string(),
        }),
    }
}
