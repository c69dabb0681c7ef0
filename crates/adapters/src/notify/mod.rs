mod stderr_sink;
mod tracing_sink;

pub use stderr_sink::StderrNotificationSink;
pub use tracing_sink::TracingNotificationSink;
