use env_logger::Env;

/// Respects RUST_LOG if set, otherwise `info` (or `debug` with --debug)
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
