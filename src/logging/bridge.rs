//! `tracing` integration
//!
//! Routes `tracing` events into the shared sink so code instrumented with
//! `tracing` lands in the same daily file as `NamedLogger` output.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use super::level::Level;
use super::record::{CallSite, LogRecord};
use super::sink::SharedSink;
use crate::error::{LogError, SinkKind};

/// Target prefix of this crate's own events, which must not re-enter the sink
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Layer dispatching every event to a `SharedSink`.
///
/// The event target is used as the logger name, `TRACE` is folded into
/// `DEBUG`, and extra fields are appended to the message as `key=value`.
pub struct SinkLayer {
    sink: Arc<SharedSink>,
}

impl SinkLayer {
    pub fn new(sink: Arc<SharedSink>) -> Self {
        Self { sink }
    }
}

impl<S: Subscriber> Layer<S> for SinkLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if is_own_target(meta.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let call_site = CallSite {
            file: meta.file(),
            function: None,
            line: meta.line(),
        };
        let record = LogRecord::new(
            Level::from(*meta.level()),
            meta.target(),
            &visitor.message,
            call_site,
        );

        // tracing has no channel to hand a write failure back to the emitter
        if let Err(e) = self.sink.dispatch_record(&record) {
            report_dispatch_failure(&mut io::stderr().lock(), meta.target(), &e);
        }
    }
}

/// Report a record the layer could not write
fn report_dispatch_failure(out: &mut impl Write, target: &str, err: &LogError) {
    let _ = writeln!(
        out,
        "{OWN_TARGET}: failed to log event from {target}: {err}: {}",
        err.io_error()
    );
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .map_or(false, |rest| rest.is_empty() || rest.starts_with("::"))
}

/// Collects the `message` field plus any other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            if self.message.is_empty() {
                let _ = write!(self.message, "{value:?}");
            } else {
                self.message = format!("{value:?} {}", self.message);
            }
        } else {
            if !self.message.is_empty() {
                self.message.push(' ');
            }
            let _ = write!(self.message, "{}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &format_args!("{value}"));
    }
}

/// Install the sink as the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG` when set, `default_filter` otherwise.
pub fn install_global(sink: Arc<SharedSink>, default_filter: &str) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(SinkLayer::new(sink))
        .try_init()
}
