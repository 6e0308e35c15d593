//! Application entry point for the fractal tree viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod painter;
mod viewer;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use viewer::Viewer;

/// Logs to stderr; `RUST_LOG` overrides the default `info` filter.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    setup_logging();
    tracing::info!("starting fractal tree viewer");

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Fractal Tree",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
