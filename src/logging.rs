//! Log filter shared by the binaries. The library only emits events.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set and non-empty; otherwise `debug` with
/// `verbose`, `info` without.
pub fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ if verbose => "debug".to_string(),
        _ => "info".to_string(),
    }
}

pub fn env_filter(verbose: bool) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::new(filter_directive(verbose, rust_log.as_deref()))
}
