use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Turns wall-clock instants into simulation tick lengths.
///
/// Each [`tick`](FrameClock::tick) returns the milliseconds since the
/// previous one, capped at `max_step` so a suspended terminal does not
/// fast-forward the pet through minutes of hunger at once. The clock also
/// keeps a sliding window of tick instants for the HUD's rate readout.
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    max_step: Duration,
    window: Duration,
    recent: VecDeque<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), Duration::from_secs(1))
    }
}

impl FrameClock {
    pub fn new(max_step: Duration, window: Duration) -> Self {
        Self {
            last: None,
            max_step,
            window,
            recent: VecDeque::new(),
        }
    }

    /// Record a tick at `now` and return the elapsed milliseconds to feed the
    /// simulation. The first tick returns 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last).min(self.max_step),
            None => Duration::ZERO,
        };
        self.last = Some(now);

        self.recent.push_back(now);
        while let Some(&front) = self.recent.front() {
            if now.saturating_duration_since(front) > self.window {
                self.recent.pop_front();
            } else {
                break;
            }
        }

        elapsed.as_secs_f32() * 1000.0
    }

    /// Ticks per second over the window; 0 until two ticks have been seen.
    pub fn tps(&self) -> f64 {
        if self.recent.len() < 2 {
            return 0.0;
        }
        self.recent.len() as f64 / self.window.as_secs_f64()
    }
}
