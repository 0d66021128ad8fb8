use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::errors::CvError;
use crate::layout::badge::{BadgeRows, BadgeWidth};

pub const DEFAULT_OUTPUT: &str = "Ubaid_Bin_Waris_CV.pdf";

/// Generator configuration loaded from environment variables.
/// Every variable is optional; with none set the built-in CV is regenerated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Content document to render. `None` renders the built-in content.
    pub content_path: Option<PathBuf>,
    /// Base directory that photo and icon paths are resolved against.
    pub resource_dir: PathBuf,
    pub output_path: PathBuf,
    pub badge_rows: BadgeRows,
    pub badge_width: BadgeWidth,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_path: None,
            resource_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            badge_rows: BadgeRows::default(),
            badge_width: BadgeWidth::default(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config::from_lookup(|key| std::env::var(key).ok())
            .context("Invalid generator configuration")
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            content_path: lookup("CV_CONTENT").map(PathBuf::from),
            resource_dir: lookup("CV_RESOURCE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.resource_dir),
            output_path: lookup("CV_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            badge_rows: match lookup("CV_BADGE_ROWS") {
                Some(v) => parse_badge_rows(&v)?,
                None => defaults.badge_rows,
            },
            badge_width: match lookup("CV_BADGE_WIDTH") {
                Some(v) => parse_badge_width(&v)?,
                None => defaults.badge_width,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_badge_rows(value: &str) -> Result<BadgeRows, CvError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "wrap" => Ok(BadgeRows::Wrap),
        "pairs" => Ok(BadgeRows::Pairs),
        other => Err(CvError::Config(format!(
            "CV_BADGE_ROWS must be 'wrap' or 'pairs', got '{other}'"
        ))),
    }
}

fn parse_badge_width(value: &str) -> Result<BadgeWidth, CvError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "measured" => Ok(BadgeWidth::Measured),
        "estimated" => Ok(BadgeWidth::Estimated),
        other => Err(CvError::Config(format!(
            "CV_BADGE_WIDTH must be 'measured' or 'estimated', got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(config.content_path.is_none());
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.resource_dir, PathBuf::from("."));
        assert_eq!(config.badge_rows, BadgeRows::Wrap);
        assert_eq!(config.badge_width, BadgeWidth::Measured);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("CV_CONTENT", "me.json"),
            ("CV_OUTPUT", "out/cv.pdf"),
            ("CV_RESOURCE_DIR", "assets"),
            ("CV_BADGE_ROWS", "Pairs"),
            ("CV_BADGE_WIDTH", "estimated"),
        ]))
        .unwrap();
        assert_eq!(config.content_path, Some(PathBuf::from("me.json")));
        assert_eq!(config.output_path, PathBuf::from("out/cv.pdf"));
        assert_eq!(config.resource_dir, PathBuf::from("assets"));
        assert_eq!(config.badge_rows, BadgeRows::Pairs);
        assert_eq!(config.badge_width, BadgeWidth::Estimated);
    }

    #[test]
    fn test_invalid_badge_mode_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("CV_BADGE_ROWS", "triples")])).unwrap_err();
        assert!(
            matches!(err, CvError::Config(ref msg) if msg.contains("triples")),
            "unexpected error: {err}"
        );
    }
}
