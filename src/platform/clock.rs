//! Frame timing
//!
//! Turns host timestamps (milliseconds, e.g. `requestAnimationFrame` or
//! `performance.now()`) into the elapsed seconds fed to `tick`.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, capped at `MAX_FRAME_DT`.
    ///
    /// The first call returns 0. A timestamp earlier than the previous one
    /// also returns 0 and becomes the new reference.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);

        if dt > MAX_FRAME_DT {
            log::debug!("Frame gap {:.3}s capped to {}s", dt, MAX_FRAME_DT);
            MAX_FRAME_DT
        } else {
            dt
        }
    }

    /// Forget the reference time (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
