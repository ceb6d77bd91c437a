use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr subscriber
///
/// `RUST_LOG` takes precedence over the `debug` flag.
pub fn init_logger(json_mode: bool, debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("px4_params=debug,px4_param_scraper=debug")
        } else {
            EnvFilter::new("px4_params=info,px4_param_scraper=info")
        }
    });

    if json_mode {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
