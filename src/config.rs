// Keywarden — Process-level configuration
//
// Defaults for the profile name, region, skew pad, and session TTL come from
// the environment. A record's own values always win over these; the engine
// only falls back here for fields the record leaves unset.

use std::time::Duration;

use thiserror::Error;

/// Profile acted on when neither `--profile` nor `AWS_PROFILE` is set.
pub const DEFAULT_PROFILE: &str = "default";

/// Region used for identity-provider calls when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Safety margin subtracted from an expiration when judging freshness.
pub const DEFAULT_SKEW_PAD: Duration = Duration::from_secs(120);

/// Requested lifetime of a delegated session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration in {var}: {source}")]
    InvalidDuration {
        var: &'static str,
        source: humantime::DurationError,
    },
}

/// Process-level defaults, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile: String,
    pub region: String,
    pub skew_pad: Duration,
    pub session_ttl: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `AWS_PROFILE` and `AWS_REGION` follow the usual AWS tooling
    /// conventions; `KEYWARDEN_SKEW_PAD` and `KEYWARDEN_SESSION_TTL` take
    /// humantime strings such as "90s", "2m", or "1h30m".
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            profile: env_or("AWS_PROFILE", DEFAULT_PROFILE),
            region: env_or("AWS_REGION", DEFAULT_REGION),
            skew_pad: env_duration("KEYWARDEN_SKEW_PAD", DEFAULT_SKEW_PAD)?,
            session_ttl: env_duration("KEYWARDEN_SESSION_TTL", DEFAULT_SESSION_TTL)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            region: DEFAULT_REGION.to_string(),
            skew_pad: DEFAULT_SKEW_PAD,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_duration(var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => parse_duration(var, raw.trim()),
        _ => Ok(default),
    }
}

fn parse_duration(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw).map_err(|source| ConfigError::InvalidDuration { var, source })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.profile, "default");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.skew_pad, Duration::from_secs(120));
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_duration_accepts_humantime_forms() {
        assert_eq!(
            parse_duration("KEYWARDEN_SKEW_PAD", "90s").unwrap(),
            Duration::from_secs(90)
        );
        assert_eq!(
            parse_duration("KEYWARDEN_SESSION_TTL", "2m").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            parse_duration("KEYWARDEN_SESSION_TTL", "1h 30m").unwrap(),
            Duration::from_secs(5400)
        );
    }

    #[test]
    fn test_parse_duration_rejects_garbage_and_names_the_variable() {
        let err = parse_duration("KEYWARDEN_SKEW_PAD", "soon").unwrap_err();
        assert!(
            err.to_string().contains("KEYWARDEN_SKEW_PAD"),
            "error must name the offending variable: {err}"
        );
    }
}
