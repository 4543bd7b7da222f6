use chrono::Utc;
use chrono_tz::Tz;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::config::ConfigError;

/// Timestamps rendered in a fixed IANA zone (`LOG_TZ`, default UTC).
#[derive(Debug, Clone, Copy)]
struct ZonedTime(Tz);

impl FormatTime for ZonedTime {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now().with_timezone(&self.0);
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f %Z"))
    }
}

fn parse_log_tz(raw: Option<String>) -> Result<Tz, ConfigError> {
    match raw {
        Some(name) if !name.trim().is_empty() => name
            .trim()
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(name)),
        _ => Ok(Tz::UTC),
    }
}

pub fn init_logging() -> Result<(), ConfigError> {
    let timer = ZonedTime(parse_log_tz(std::env::var("LOG_TZ").ok())?);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));

    let console_layer = fmt::layer()
        .with_timer(timer)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let log_to_file = std::env::var("LOG_TO_FILE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if log_to_file {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
        let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "stock-lookup.log");

        let file_layer = fmt::layer()
            .with_timer(timer)
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_tz_defaults_to_utc() {
        assert_eq!(parse_log_tz(None).unwrap(), Tz::UTC);
        assert_eq!(parse_log_tz(Some(" ".into())).unwrap(), Tz::UTC);
    }

    #[test]
    fn log_tz_accepts_iana_names_only() {
        assert_eq!(
            parse_log_tz(Some("America/New_York".into())).unwrap(),
            chrono_tz::America::New_York
        );
        assert!(matches!(
            parse_log_tz(Some("Mars/Olympus".into())),
            Err(ConfigError::InvalidTimezone(_))
        ));
    }
}
