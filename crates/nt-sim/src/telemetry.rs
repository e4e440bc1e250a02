//! Diagnostic output for hosts and tests.

use tracing_subscriber::EnvFilter;

/// Install a formatted `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Safe to call
/// more than once; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("tracing initialized twice without panicking");
    }
}
