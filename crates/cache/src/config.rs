use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 50 * 1024 * 1024;
pub const DEFAULT_EVICTION_TARGET_RATIO: f64 = 0.8;

const HOUR: Duration = Duration::from_secs(60 * 60);

/// Budget and TTLs shared by the three pools of a [`crate::CacheManager`]
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Combined budget across all pools
    pub max_total_bytes: u64,
    pub repository_ttl: Duration,
    pub analysis_ttl: Duration,
    pub description_ttl: Duration,
    /// Fraction of `max_total_bytes` that eviction shrinks down to
    pub eviction_target_ratio: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
            repository_ttl: HOUR * 24,
            analysis_ttl: HOUR * 12,
            description_ttl: HOUR * 48,
            eviction_target_ratio: DEFAULT_EVICTION_TARGET_RATIO,
        }
    }
}

impl CacheConfig {
    /// Defaults overlaid with `REPOLENS_*` environment variables.
    ///
    /// Empty or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok();
        Self {
            max_total_bytes: parse_u64(
                var("REPOLENS_CACHE_MAX_BYTES").as_deref(),
                defaults.max_total_bytes,
            )
            .max(1),
            repository_ttl: parse_hours(
                var("REPOLENS_REPOSITORY_TTL_HOURS").as_deref(),
                defaults.repository_ttl,
            ),
            analysis_ttl: parse_hours(
                var("REPOLENS_ANALYSIS_TTL_HOURS").as_deref(),
                defaults.analysis_ttl,
            ),
            description_ttl: parse_hours(
                var("REPOLENS_DESCRIPTION_TTL_HOURS").as_deref(),
                defaults.description_ttl,
            ),
            eviction_target_ratio: defaults.eviction_target_ratio,
        }
    }

    pub fn with_max_total_bytes(mut self, max_total_bytes: u64) -> Self {
        self.max_total_bytes = max_total_bytes;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_total_bytes == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        let ratio = self.eviction_target_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::InvalidEvictionRatio(ratio));
        }
        Ok(())
    }

    /// Combined size eviction shrinks down to
    pub fn eviction_target_bytes(&self) -> u64 {
        let ratio = self.eviction_target_ratio.clamp(0.0, 1.0);
        (self.max_total_bytes as f64 * ratio).floor() as u64
    }
}

fn parse_u64(raw: Option<&str>, default_value: u64) -> u64 {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_value)
}

fn parse_hours(raw: Option<&str>, default_value: Duration) -> Duration {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|h| h.is_finite() && *h >= 0.0)
        .and_then(|h| Duration::try_from_secs_f64(h * 3600.0).ok())
        .unwrap_or(default_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.max_total_bytes, 52_428_800);
        assert_eq!(cfg.repository_ttl, Duration::from_secs(86_400));
        assert_eq!(cfg.analysis_ttl, Duration::from_secs(43_200));
        assert_eq!(cfg.description_ttl, Duration::from_secs(172_800));
        assert_eq!(cfg.eviction_target_bytes(), 41_943_040);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_u64_falls_back_on_bad_input() {
        assert_eq!(parse_u64(None, 7), 7);
        assert_eq!(parse_u64(Some("  "), 7), 7);
        assert_eq!(parse_u64(Some("-3"), 7), 7);
        assert_eq!(parse_u64(Some(" 1024 "), 7), 1024);
    }

    #[test]
    fn parse_hours_accepts_fractions_and_zero() {
        let fallback = Duration::from_secs(1);
        assert_eq!(parse_hours(Some("0"), fallback), Duration::ZERO);
        assert_eq!(parse_hours(Some("0.5"), fallback), Duration::from_secs(1800));
        assert_eq!(parse_hours(Some("soon"), fallback), fallback);
        assert_eq!(parse_hours(Some("-1"), fallback), fallback);
        assert_eq!(parse_hours(Some("1e20"), fallback), fallback);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = CacheConfig::default().with_max_total_bytes(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroBudget));

        let cfg = CacheConfig {
            eviction_target_ratio: 1.5,
            ..CacheConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidEvictionRatio(1.5)));

        let cfg = CacheConfig {
            eviction_target_ratio: 0.0,
            ..CacheConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
