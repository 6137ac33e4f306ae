use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

/// Target of the per-candidate scoring events.
const SCORING_TARGET: &str = "coparent_match::matching";

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { value: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value, .. } => {
                write!(f, "log filter '{value}' is not a valid directive list")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "global subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// scoring tracing is layered on top of either.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => build_filter(&directives, config)?,
        _ => build_filter(&config.log_level, config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.trace_scoring)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

fn build_filter(directives: &str, config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let invalid = |source| TelemetryError::InvalidFilter {
        value: directives.to_string(),
        source,
    };

    let mut filter = EnvFilter::try_new(directives).map_err(invalid)?;
    if config.trace_scoring {
        let scoring: Directive = format!("{SCORING_TARGET}=debug").parse().map_err(invalid)?;
        filter = filter.add_directive(scoring);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(trace_scoring: bool) -> TelemetryConfig {
        TelemetryConfig {
            log_level: "warn".to_string(),
            trace_scoring,
        }
    }

    #[test]
    fn accepts_directive_lists() {
        assert!(build_filter("info,coparent_match=debug", &config(false)).is_ok());
    }

    #[test]
    fn scoring_trace_adds_matching_directive() {
        let filter = build_filter("warn", &config(true)).expect("filter builds");
        assert!(filter.to_string().contains("coparent_match::matching=debug"));

        let filter = build_filter("warn", &config(false)).expect("filter builds");
        assert!(!filter.to_string().contains("coparent_match::matching"));
    }

    #[test]
    fn reports_the_rejected_filter() {
        let err = build_filter("coparent_match=loud", &config(false)).expect_err("invalid level");
        assert!(err.to_string().contains("coparent_match=loud"));
    }
}
