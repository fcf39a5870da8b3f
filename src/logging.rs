//! Tracing subscriber setup for hosts that do not install their own

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> String {
    if debug {
        "info,prisma_provider=debug".to_string()
    } else {
        "info".to_string()
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`
///
/// With `debug` set and no `RUST_LOG`, this crate logs at debug level so
/// provider results show up. Does nothing if a subscriber is already set.
pub fn init_tracing(debug: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter(debug)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "info");
        assert_eq!(default_filter(true), "info,prisma_provider=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(true);
        init_tracing(false);
        tracing::debug!("still running");
    }
}
