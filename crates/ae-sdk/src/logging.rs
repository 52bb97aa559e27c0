//! Tracing subscriber setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::SdkError;

/// Install a global `fmt` subscriber
///
/// `RUST_LOG` takes precedence over `level`. Fails when a global
/// subscriber is already set.
pub fn init_logging(level: &str) -> Result<(), SdkError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| SdkError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging("debug");
        let second = init_logging("debug");
        assert!(matches!(second, Err(SdkError::Logging(_))));
    }
}
