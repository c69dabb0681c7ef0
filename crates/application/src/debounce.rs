/// Clock-driven debounce window, used to bound re-render frequency for
/// table search. Correctness never depends on it: the projector is cheap
/// and pure, this only spaces out the work.
#[derive(Debug)]
pub struct Debouncer {
    window_ms: u64,
    deadline_ms: Option<u64>,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline_ms: None,
        }
    }

    /// Record an input event; the action fires once the window has passed
    /// without another trigger.
    pub fn trigger(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms + self.window_ms);
    }

    /// True exactly once per quiet window: when the deadline has passed,
    /// it is consumed and the caller should act.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn reset(&mut self) {
        self.deadline_ms = None;
    }
}
