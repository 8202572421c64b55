//! Physical constants and frame limits for the layout simulation
//!
//! `Parameters` holds runtime settings:
//! - anchor stiffness and repulsion range/gain,
//! - per-frame velocity damping,
//! - boundary padding and bounce restitution,
//! - frame delta cap and the viewport used before one is measured

use super::states::Viewport;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub k_anchor: f64, // spring stiffness toward the target
    pub min_dist: f64, // repulsion cutoff distance (px)
    pub repulsion_gain: f64, // force per px of overlap
    pub damping: f64, // velocity multiplier applied every frame
    pub padding: f64, // distance kept from each viewport edge (px)
    pub restitution: f64, // velocity factor on an edge hit (negative flips)
    pub max_frame_ms: f64, // frame delta cap
    pub fallback_viewport: Viewport, // used while no measurement exists
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            k_anchor: 0.8,
            min_dist: 350.0,
            repulsion_gain: 8.0,
            damping: 0.9,
            padding: 100.0,
            restitution: -0.5,
            max_frame_ms: 50.0,
            fallback_viewport: Viewport::new(1000.0, 800.0),
        }
    }
}

impl Parameters {
    /// Clamp a raw frame delta (ms) and convert it to seconds.
    pub fn frame_dt(&self, delta_ms: f64) -> f64 {
        if delta_ms.is_nan() {
            return 0.0;
        }
        delta_ms.clamp(0.0, self.max_frame_ms) / 1000.0
    }
}
