//! Per-frame time integration for the layout system
//!
//! Provides a damped semi-implicit Euler step driven by a `ForceSet` and
//! `Parameters`, plus the boundary clamp applied after each move

use super::states::{System, NVec2, PhysicsBody, Viewport};
use super::forces::ForceSet;
use super::params::Parameters;

/// Advance every body by `dt` seconds.
///
/// All forces are evaluated from the same snapshot of positions before any
/// body moves, so body order never biases the result. Then, per body:
///   v' = (v + f dt) * damping
///   x' = x + v' dt
/// followed by [`clamp_to_bounds`]
pub fn damped_step(sys: &mut System, forces: &ForceSet, params: &Parameters, viewport: Viewport, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    // f[i] for every body at the current positions
    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(&*sys, &mut f);

    for (b, f) in sys.bodies.iter_mut().zip(f.iter()) {
        b.v = (b.v + *f * dt) * params.damping;
        b.x += b.v * dt;
        clamp_to_bounds(b, viewport, params.padding, params.restitution);
    }

    sys.t += dt;
}

/// Keep a body inside `[padding, dim - padding]` on both axes.
/// An axis that was outside is pinned to the edge and its velocity
/// component is multiplied by `restitution` (negative => bounce)
///
/// If the viewport is narrower than `2 * padding` the two edges cross:
/// both checks fire, the body ends on the far edge and the velocity is
/// scaled twice
pub fn clamp_to_bounds(b: &mut PhysicsBody, viewport: Viewport, padding: f64, restitution: f64) {
    let limits = [(padding, viewport.width - padding), (padding, viewport.height - padding)];

    for (axis, (lo, hi)) in limits.into_iter().enumerate() {
        if b.x[axis] < lo {
            b.x[axis] = lo;
            b.v[axis] *= restitution;
        }
        if b.x[axis] > hi {
            b.x[axis] = hi;
            b.v[axis] *= restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, y: f64, vx: f64, vy: f64) -> PhysicsBody {
        PhysicsBody {
            id: "b".to_string(),
            x: NVec2::new(x, y),
            v: NVec2::new(vx, vy),
        }
    }

    const VIEW: Viewport = Viewport { width: 1000.0, height: 800.0 };

    #[test]
    fn inside_is_untouched() {
        let mut b = body(500.0, 400.0, 3.0, -2.0);
        clamp_to_bounds(&mut b, VIEW, 100.0, -0.5);
        assert_eq!(b.x, NVec2::new(500.0, 400.0));
        assert_eq!(b.v, NVec2::new(3.0, -2.0));
    }

    #[test]
    fn edge_itself_counts_as_inside() {
        let mut b = body(100.0, 700.0, -1.0, 1.0);
        clamp_to_bounds(&mut b, VIEW, 100.0, -0.5);
        assert_eq!(b.x, NVec2::new(100.0, 700.0));
        assert_eq!(b.v, NVec2::new(-1.0, 1.0));
    }

    #[test]
    fn outside_is_pinned_and_bounced() {
        let mut b = body(40.0, 790.0, -10.0, 6.0);
        clamp_to_bounds(&mut b, VIEW, 100.0, -0.5);
        assert_eq!(b.x, NVec2::new(100.0, 700.0));
        assert_eq!(b.v, NVec2::new(5.0, -3.0));
    }

    #[test]
    fn crossed_edges_pin_to_far_edge() {
        // width 150 with padding 100: lo = 100, hi = 50
        let narrow = Viewport { width: 150.0, height: 800.0 };
        let mut b = body(80.0, 400.0, 10.0, 0.0);
        clamp_to_bounds(&mut b, narrow, 100.0, -0.5);
        assert_eq!(b.x, NVec2::new(50.0, 400.0));
        assert_eq!(b.v, NVec2::new(2.5, 0.0));
    }

    #[test]
    fn only_offending_axis_bounces() {
        let mut b = body(950.0, 300.0, 8.0, 8.0);
        clamp_to_bounds(&mut b, VIEW, 100.0, -0.5);
        assert_eq!(b.x, NVec2::new(900.0, 300.0));
        assert_eq!(b.v, NVec2::new(-4.0, 8.0));
    }
}
