use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins when set; otherwise this crate logs at info, or debug
/// with `--verbose` (dependencies stay at info).
fn site_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,station_web=debug"
    } else {
        "warn,station_web=info"
    }
}

/// Compact human-readable lines for terminal runs.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(site_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .without_time()
                .compact(),
        )
        .init();
}

/// JSON lines, for hosts that ship logs to a collector.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(site_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(directives.parse::<EnvFilter>().is_ok(), "{}", directives);
        }
        assert!(default_directives(true).contains("station_web=debug"));
    }
}
