use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::SitemapError;

/// Default size ceiling: 10MB with a 5KB safety room for the closing tags.
pub const DEFAULT_MAX_SIZE: usize = (10 * 1024 * 1024) - 5120;

/// Options applied to one sitemap render.
///
/// The configuration is a plain value: each [`Sitemap`](crate::core::sitemap::Sitemap)
/// owns its own copy and nothing is shared between renders.
///
/// | Key          | Field        | Default                  |
/// |--------------|--------------|--------------------------|
/// | `DEBUG`      | `debug`      | `false`                  |
/// | `MAX_SIZE`   | `max_size`   | [`DEFAULT_MAX_SIZE`]     |
/// | `PRETTY`     | `pretty`     | `true`                   |
/// | `UTC_OFFSET` | `utc_offset` | none (naive datetimes)   |
///
/// # Examples
///
/// ```
/// use sitemap_ext::core::config::SitemapConfig;
///
/// let config = SitemapConfig::default().debug(true).pretty(false);
/// assert!(config.debug);
/// assert!(!config.pretty);
///
/// let config = SitemapConfig::from_json(r#"{"DEBUG": true, "MAX_SIZE": 0}"#).unwrap();
/// assert_eq!(config.max_size, 0);
/// assert!(config.pretty);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct SitemapConfig {
    /// Validation failures abort the render instead of being logged.
    pub debug: bool,
    /// Maximum number of serialized entry bytes before rendering stops.
    pub max_size: usize,
    /// Indent the output document.
    pub pretty: bool,
    /// Offset (seconds east of UTC) stamped on naive datetimes.
    pub utc_offset: Option<i32>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_size: DEFAULT_MAX_SIZE,
            pretty: true,
            utc_offset: None,
        }
    }
}

impl SitemapConfig {
    /// Parses a configuration from a JSON object, missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SitemapError> {
        let config: SitemapConfig = serde_json::from_str(json)
            .map_err(|e| SitemapError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.time_zone_checked()?;
        Ok(config)
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn time_zone(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset.local_minus_utc());
        self
    }

    /// The offset stamped on naive datetimes, if any.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset.and_then(FixedOffset::east_opt)
    }

    fn time_zone_checked(&self) -> Result<(), SitemapError> {
        match self.utc_offset {
            Some(seconds) if FixedOffset::east_opt(seconds).is_none() => Err(SitemapError::Config(
                format!("UTC offset {} out of range", seconds),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_protocol_limits() {
        let config = SitemapConfig::default();
        assert!(!config.debug);
        assert!(config.pretty);
        assert_eq!(config.max_size, 10_485_760 - 5_120);
        assert_eq!(config.offset(), None);
    }

    #[test]
    fn config_reads_screaming_keys() {
        let config =
            SitemapConfig::from_json(r#"{"DEBUG": true, "MAX_SIZE": 12, "PRETTY": false}"#)
                .unwrap();
        assert_eq!(config, SitemapConfig::default().debug(true).max_size(12).pretty(false));
    }

    #[test]
    fn config_rejects_bad_offset() {
        let result = SitemapConfig::from_json(r#"{"UTC_OFFSET": 999999}"#);
        match result {
            Err(SitemapError::Config(message)) => assert!(message.contains("999999")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn config_rejects_malformed_json() {
        assert!(SitemapConfig::from_json("{DEBUG").is_err());
    }

    #[test]
    fn time_zone_round_trips_through_seconds() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let config = SitemapConfig::default().time_zone(offset);
        assert_eq!(config.utc_offset, Some(-18000));
        assert_eq!(config.offset(), Some(offset));
    }
}
