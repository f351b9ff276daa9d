//! Configuration helpers for reading settings from the environment

use std::str::FromStr;
use thiserror::Error;

/// A configuration value was present but could not be used
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

/// Read an environment variable, treating blank values as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional raw value into `T`
///
/// `None` stays `None`; a value that fails to parse is reported against `key`.
pub fn parse_var<T>(key: &str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value.parse::<T>().map_err(|e| ConfigError {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_missing() {
        let parsed: Option<u64> = parse_var("TIMEOUT", None).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_parse_var_valid() {
        let parsed: Option<u64> = parse_var("TIMEOUT", Some("45".to_string())).unwrap();
        assert_eq!(parsed, Some(45));
    }

    #[test]
    fn test_parse_var_invalid() {
        let err = parse_var::<u64>("TIMEOUT", Some("soon".to_string())).unwrap_err();
        assert_eq!(err.key, "TIMEOUT");
        assert_eq!(err.value, "soon");
        assert!(err.to_string().starts_with("Invalid value 'soon' for TIMEOUT"));
    }

    #[test]
    fn test_env_var_unset() {
        assert_eq!(env_var("AGENT_UTILS_TEST_SURELY_UNSET_VARIABLE"), None);
    }
}
