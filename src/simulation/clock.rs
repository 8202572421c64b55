//! Frame scheduling outside of a windowing loop.
//!
//! `FrameClock` measures the gap between successive frames. `run_headless`
//! drives a scenario at a fixed cadence: back-to-back with a simulated delta,
//! or paced against the wall clock with a sleep per frame.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::scenario::Scenario;
use super::states::{NVec2, Viewport};

/// Measured delta time between frames.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call; 0 on the first frame.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = self
            .last
            .map(|prev| now.duration_since(prev).as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        self.last = Some(now);
        self.frames += 1;
        delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// How a headless run spaces its frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    /// Every frame reports exactly `frame_ms`, no waiting
    Simulated { frame_ms: f64 },
    /// Sleep to roughly `frame_ms` per frame and feed the measured delta
    Realtime { frame_ms: f64 },
}

/// Tick `scenario` for `frames` frames and return final node positions.
pub fn run_headless(scenario: &mut Scenario, frames: u64, cadence: Cadence, viewport: Viewport) -> Vec<(String, NVec2)> {
    info!(frames, ?cadence, width = viewport.width, height = viewport.height, "headless run");

    let mut clock = FrameClock::new();
    let mut sim_time = 0.0;

    for frame in 0..frames {
        let delta_ms = match cadence {
            Cadence::Simulated { frame_ms } => frame_ms,
            Cadence::Realtime { frame_ms } => {
                let delta = clock.tick();
                thread::sleep(Duration::from_secs_f64(frame_ms.max(0.0) / 1000.0));
                delta
            }
        };
        sim_time += delta_ms / 1000.0;
        scenario.tick(delta_ms, Some(viewport));

        if frame % 120 == 0 {
            let placed = scenario.companion_positions(sim_time).iter().flatten().count();
            debug!(frame, t = scenario.engine.system.t, companions = placed, "headless progress");
        }
    }

    scenario.store.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert!(clock.tick() >= 0.0);
        assert_eq!(clock.frames(), 2);
    }
}
