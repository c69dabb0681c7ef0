use domain::common::entity::Notice;
use ports::secondary::notification_sink::NotificationSink;

/// Degraded fallback sink: a blocking synchronous notice on stderr, for
/// contexts where no richer channel is available. Cannot fail.
pub struct StderrNotificationSink;

impl NotificationSink for StderrNotificationSink {
    fn notify(&self, message: &str, severity: Notice) {
        eprintln!("[{severity}] {message}");
    }
}
