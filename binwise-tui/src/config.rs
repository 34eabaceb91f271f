//! Runtime settings read from the environment.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow, bail};
use binwise_core::{DEFAULT_MIN_CONFIDENCE, RegionCode};
use binwise_provider_gemini::DEFAULT_MODEL;
use binwise_regions::DEFAULT_REGION;
use tracing::{debug, info};

const LOG_FILE_VAR: &str = "BINWISE_LOG_FILE";

pub(crate) struct Config {
    /// Default region, pinned first in the region list.
    pub region: RegionCode,
    pub min_confidence: f32,
    pub gemini_model: String,
    pub gemini_api_key: Option<String>,
    pub feed: Option<PathBuf>,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let region: String = try_load("BINWISE_REGION", DEFAULT_REGION)?;
        let min_confidence = try_load("BINWISE_MIN_CONFIDENCE", &DEFAULT_MIN_CONFIDENCE.to_string())?;
        check_confidence(min_confidence)?;

        Ok(Self {
            region: RegionCode::from(region),
            min_confidence,
            gemini_model: try_load("BINWISE_GEMINI_MODEL", DEFAULT_MODEL)?,
            gemini_api_key: optional("GEMINI_API_KEY"),
            feed: optional("BINWISE_FEED").map(PathBuf::from),
        })
    }
}

/// Log destination, read before logging is set up.
pub(crate) fn log_file() -> Option<PathBuf> {
    optional(LOG_FILE_VAR).map(PathBuf::from)
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn optional(key: &str) -> Option<String> {
    let value = var(key);
    if value.is_none() {
        debug!("{key} not set");
    }
    value
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    parse_value(key, var(key), default)
}

fn parse_value<T: FromStr>(key: &str, value: Option<String>, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = value.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });
    raw.trim()
        .parse()
        .map_err(|err| anyhow!("Invalid {key} value {raw:?}: {err}"))
}

fn check_confidence(threshold: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!("BINWISE_MIN_CONFIDENCE must be between 0 and 1, got {threshold}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_used_when_unset() {
        let threshold: f32 =
            parse_value("BINWISE_MIN_CONFIDENCE", None, "0.8").expect("default parses");
        assert!((threshold - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn value_wins_over_default() {
        let model: String =
            parse_value("BINWISE_GEMINI_MODEL", Some(" gemini-pro ".to_owned()), DEFAULT_MODEL)
                .expect("parses");
        assert_eq!(model, "gemini-pro");
    }

    #[test]
    fn garbage_is_an_error_naming_the_variable() {
        let err = parse_value::<f32>("BINWISE_MIN_CONFIDENCE", Some("high".to_owned()), "0.8")
            .expect_err("not a number");
        assert!(err.to_string().contains("BINWISE_MIN_CONFIDENCE"));
    }

    #[test]
    fn confidence_must_be_a_probability() {
        assert!(check_confidence(0.0).is_ok());
        assert!(check_confidence(1.0).is_ok());
        assert!(check_confidence(1.5).is_err());
        assert!(check_confidence(-0.1).is_err());
    }
}
