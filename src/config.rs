//! Configuration types.

use std::time::Duration;

use tracing::warn;

/// Quiz server configuration.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// HTTP/WebSocket listen port.
    pub port: u16,
    /// Delay between a single-select answer and the automatic step change.
    pub advance_delay: Duration,
    /// Broadcast channel capacity for wizard events, per session.
    pub event_capacity: usize,
    /// Idle time after which an unsubmitted session is discarded.
    pub session_ttl: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            advance_delay: Duration::from_millis(400),
            event_capacity: 256,
            session_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl QuizConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `QUIZ_PORT`
    /// - `QUIZ_ADVANCE_DELAY_MS`
    /// - `QUIZ_EVENT_CAPACITY`
    /// - `QUIZ_SESSION_TTL_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env_parse("QUIZ_PORT").unwrap_or(defaults.port);
        let advance_delay = env_parse::<u64>("QUIZ_ADVANCE_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.advance_delay);
        let event_capacity = env_parse::<usize>("QUIZ_EVENT_CAPACITY")
            .filter(|&n| n > 0)
            .unwrap_or(defaults.event_capacity);
        let session_ttl = env_parse::<u64>("QUIZ_SESSION_TTL_SECS")
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_ttl);

        Self {
            port,
            advance_delay,
            event_capacity,
            session_ttl,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
