/*!
 * Harness Observability
 * Tracing setup and a drop-timed span for stress runs
 */

use std::time::Instant;
use tracing::{debug, span, Level, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing for harness runs
///
/// Honors `RUST_LOG` (default level: info). Safe to call repeatedly;
/// only the first caller installs the subscriber, so every test or
/// bench entry point can call it unconditionally.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .compact(),
        )
        .try_init();
}

/// Span covering one stress run, logging its duration on drop
pub struct RunSpan {
    _span: Span,
    start: Instant,
}

impl RunSpan {
    pub fn new(scenario: &str, discipline: &'static str, workers: usize) -> Self {
        let span = span!(
            Level::DEBUG,
            "stress_run",
            scenario = scenario,
            discipline = discipline,
            workers = workers,
        );

        {
            let _entered = span.enter();
            debug!(workers, discipline, "run started");
        }

        Self {
            _span: span,
            start: Instant::now(),
        }
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let _entered = self._span.enter();
        debug!(
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "run completed"
        );
    }
}
