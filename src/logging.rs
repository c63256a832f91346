//! Logger setup shared by both binaries.
//!
//! Logs go to stderr so stdout carries only the token or the push outcome.
//! Default filter is `warn`; set `RUST_LOG=debug` to see request details.

/// Initializes `env_logger`. Safe to call more than once.
pub fn init() {
    // try_init: a second call (e.g. from tests) is a no-op, not a panic
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .format_timestamp_secs()
        .try_init();
}
