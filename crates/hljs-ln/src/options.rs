//! Caller configuration and per-block option resolution.
//!
//! Option values are never an error: anything that is not a usable value falls back to its
//! default.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Per-element attribute overriding the first line number of one block.
pub const START_FROM_ATTR_NAME: &str = "data-ln-start-from";

/// Default first line number.
pub const DEFAULT_START_FROM: i64 = 1;

/// Largest usable first line number in either direction (`2^53 - 1`). Anything beyond is not
/// exactly representable as a float and is treated as unusable.
pub const MAX_START_FROM: i64 = (1 << 53) - 1;

/// Caller-supplied configuration.
///
/// Deserializes from camelCase keys:
///
/// ```
/// let config: hljs_ln::LineNumbersConfig =
///     serde_json::from_str(r#"{ "singleLine": true, "startFrom": 10 }"#).unwrap();
/// assert!(config.single_line);
/// assert_eq!(config.start_from, Some(10.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineNumbersConfig {
    /// Number blocks even when they contain a single line.
    #[serde(deserialize_with = "lenient_bool")]
    pub single_line: bool,
    /// First line number; only finite values are used.
    #[serde(deserialize_with = "lenient_number")]
    pub start_from: Option<f64>,
}

impl LineNumbersConfig {
    /// Builder-style setter for [`LineNumbersConfig::single_line`].
    pub fn with_single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    /// Builder-style setter for [`LineNumbersConfig::start_from`].
    pub fn with_start_from(mut self, start_from: f64) -> Self {
        self.start_from = Some(start_from);
        self
    }
}

/// Options for rendering one block, after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Line number of the first row.
    pub start_from: i64,
    /// Render a table even for a single line.
    pub single_line: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            start_from: DEFAULT_START_FROM,
            single_line: false,
        }
    }
}

impl RenderOptions {
    /// Resolve options for one block.
    ///
    /// `start_from` comes from the element override (the value of
    /// [`START_FROM_ATTR_NAME`]) when it parses to a usable number, else from the config when it
    /// is usable, else [`DEFAULT_START_FROM`]. A number is usable when it is finite and within
    /// `±`[`MAX_START_FROM`]. Fractions are truncated toward zero.
    pub fn resolve(element_override: Option<&str>, config: &LineNumbersConfig) -> Self {
        let from_element = element_override.and_then(|value| {
            let parsed = parse_start_from(value);
            if parsed.is_none() {
                tracing::debug!(
                    value,
                    attribute = START_FROM_ATTR_NAME,
                    "ignoring unusable start line override"
                );
            }
            parsed
        });
        let from_config = config.start_from.and_then(finite_to_line);

        Self {
            start_from: from_element
                .or(from_config)
                .unwrap_or(DEFAULT_START_FROM),
            single_line: config.single_line,
        }
    }
}

/// Parse a textual start line number.
///
/// Returns `None` unless it is a finite number within `±`[`MAX_START_FROM`].
pub fn parse_start_from(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().and_then(finite_to_line)
}

fn finite_to_line(value: f64) -> Option<i64> {
    let line = value.trunc();
    (line.is_finite() && line.abs() <= MAX_START_FROM as f64).then_some(line as i64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberLike::deserialize(deserializer)? {
        NumberLike::Number(n) => Some(n),
        NumberLike::Text(text) => text.trim().parse::<f64>().ok(),
        NumberLike::Other(_) => None,
    }
    .filter(|n| n.is_finite()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Other(IgnoredAny),
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(
        BoolLike::deserialize(deserializer)?,
        BoolLike::Bool(true)
    ))
}
