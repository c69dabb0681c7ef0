/// Wall-clock source, injected so relative timestamps, "today" stats and
/// debounce windows are testable.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}
