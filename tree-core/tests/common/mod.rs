use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TEST_SETUP: Once = Once::new();

/// Installs a stderr subscriber once per test binary; `RUST_LOG` overrides
/// the default `debug` filter.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );
        if subscriber.try_init().is_err() {
            eprintln!("tracing subscriber already set");
        }
    });
}
