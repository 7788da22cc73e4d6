//! Tracing subscribers, compiled in with the `trace` feature.
//!
//! Without the feature both functions are no-ops, so callers do not need
//! their own `cfg`.

#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

#[cfg(feature = "trace")]
fn env_filter(default: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
}

/// JSON lines to `<log_dir>/morph-trace.jsonl`, for long-running hosts.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, "morph-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard); // flushed for the life of the process

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(env_filter("morph_engine=debug,morph_core=debug"))
            .init();
    });
}

/// Human-readable events on stderr, for command-line tools.
#[cfg(feature = "trace")]
pub fn init_stderr_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(env_filter("warn"))
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}

#[cfg(not(feature = "trace"))]
pub fn init_stderr_tracing() {}
