use std::env;

/// Installs the stderr logger. `RUST_LOG` defaults to `info`.
pub fn init() {
    let filters = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = env_logger::Builder::new()
        .parse_filters(&filters)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}
