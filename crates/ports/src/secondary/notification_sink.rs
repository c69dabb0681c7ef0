use domain::common::entity::Notice;

/// Transient user-facing message channel (toast). Decoupled from the
/// views; anything may post to it.
///
/// Implementations must never fail: a sink that cannot display falls back
/// to a blocking synchronous notice rather than erroring.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Notice);
}
