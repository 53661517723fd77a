use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is unset. `--verbose` wins over the
/// configured level; a bare level such as `warn` applies to this crate only.
pub fn fallback_directive(verbose: bool, log_level: Option<&str>) -> String {
    match log_level.map(str::trim).filter(|l| !l.is_empty()) {
        _ if verbose => "major_mnemonic=debug,info".to_string(),
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("major_mnemonic={}", level.to_lowercase()),
        None => "major_mnemonic=info".to_string(),
    }
}

fn default_filter(verbose: bool, log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose, log_level)))
}

pub fn init_cli_logger(verbose: bool, log_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for runs whose logs are collected by another tool.
pub fn init_json_logger(verbose: bool, log_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_directive() {
        assert_eq!(fallback_directive(false, None), "major_mnemonic=info");
        assert_eq!(fallback_directive(false, Some("DEBUG")), "major_mnemonic=debug");
        assert_eq!(
            fallback_directive(false, Some("major_mnemonic=trace,warn")),
            "major_mnemonic=trace,warn"
        );
        assert_eq!(fallback_directive(false, Some("  ")), "major_mnemonic=info");
        assert_eq!(fallback_directive(true, Some("warn")), "major_mnemonic=debug,info");
    }
}
