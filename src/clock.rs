/// Elapsed animation time, measured from the first frame.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    start: Option<f64>,
    last: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the first call. Never negative, never goes backwards.
    pub fn elapsed(&mut self, now_secs: f64) -> f32 {
        let start = *self.start.get_or_insert(now_secs);
        let t = (now_secs - start).max(0.0) as f32;
        self.last = self.last.max(t);
        self.last
    }
}
