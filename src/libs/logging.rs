//! Tracing subscriber set-up.
//!
//! Logging is only installed in debug mode, where the message macros route
//! through `tracing` as well. `RUST_LOG` wins when set; otherwise debug mode
//! logs this crate at `debug` and everything else at `warn`.

use super::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn,duetask=debug";

pub fn init() {
    if !is_debug_mode() {
        return;
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::new(DEFAULT_DIRECTIVES),
    };

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
