use domain::common::entity::Notice;
use ports::secondary::notification_sink::NotificationSink;

/// Notification sink that emits structured log events, the default for
/// the console where there is no toast element to show.
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, message: &str, severity: Notice) {
        match severity {
            Notice::Error => tracing::error!(toast = true, "{message}"),
            Notice::Warning => tracing::warn!(toast = true, "{message}"),
            Notice::Success | Notice::Info => tracing::info!(toast = true, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_never_fails_for_any_severity() {
        let sink = TracingNotificationSink;
        for severity in [Notice::Success, Notice::Error, Notice::Warning, Notice::Info] {
            sink.notify("message", severity);
        }
    }

    #[test]
    fn sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingNotificationSink>();
    }
}
