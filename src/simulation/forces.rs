//! Force contributors for the layout engine
//!
//! Defines the `ForceTerm` trait, the `ForceSet` that sums terms per body,
//! and the two forces the layout uses: an anchor spring and short-range
//! pairwise repulsion

use crate::simulation::states::{System, NVec2};

/// Collection of force terms (anchor, repulsion, ...)
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into a single net force per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute net forces for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - `sys` is only read, so every term sees the same prior-tick positions
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(sys, out);
        }
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceTerm {
    fn force(&self, sys: &System, out: &mut [NVec2]);
}

/// Linear spring pulling each body toward its anchor target
/// f = (target - x) * k
pub struct AnchorForce {
    pub k: f64, // stiffness
}

impl ForceTerm for AnchorForce {
    fn force(&self, sys: &System, out: &mut [NVec2]) {
        for ((b, target), f) in sys.bodies.iter().zip(sys.anchors.iter()).zip(out.iter_mut()) {
            *f += (target - b.x) * self.k;
        }
    }
}

/// Short-range repulsion between every pair closer than `min_dist`
/// Magnitude is `(min_dist - d) * gain`, directed away from the other body.
/// Coincident pairs (d == 0) have no direction and are skipped
pub struct Repulsion {
    pub min_dist: f64, // cutoff, no force at or beyond
    pub gain: f64, // force per px of overlap
}

impl Repulsion {
    /// Force on a body at `xi` due to a body at `xj`, zero outside range
    pub fn pair_force(&self, xi: NVec2, xj: NVec2) -> NVec2 {
        let r = xi - xj; // points from j to i, i.e. away from j
        let d = r.norm();
        if d <= 0.0 || d >= self.min_dist {
            return NVec2::zeros();
        }
        r * ((self.min_dist - d) * self.gain / d)
    }
}

impl ForceTerm for Repulsion {
    fn force(&self, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // Each unordered pair once; j gets the equal and opposite push
        for i in 0..n {
            let xi = sys.bodies[i].x;
            for j in (i + 1)..n {
                let f = self.pair_force(xi, sys.bodies[j].x);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::PhysicsBody;

    fn system(points: &[(f64, f64)], anchor: NVec2) -> System {
        System {
            bodies: points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| PhysicsBody::at_rest(format!("b{i}"), NVec2::new(x, y)))
                .collect(),
            anchors: vec![anchor; points.len()],
            t: 0.0,
        }
    }

    #[test]
    fn anchor_points_at_target() {
        let sys = system(&[(0.0, 0.0)], NVec2::new(10.0, -5.0));
        let mut out = vec![NVec2::zeros(); 1];
        AnchorForce { k: 0.8 }.force(&sys, &mut out);
        assert!((out[0] - NVec2::new(8.0, -4.0)).norm() < 1e-12);
    }

    #[test]
    fn repulsion_magnitude_is_linear_in_overlap() {
        let rep = Repulsion { min_dist: 350.0, gain: 8.0 };
        let f = rep.pair_force(NVec2::new(0.0, 0.0), NVec2::new(100.0, 0.0));
        assert!((f - NVec2::new(-2000.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn repulsion_cuts_off_at_min_dist() {
        let rep = Repulsion { min_dist: 350.0, gain: 8.0 };
        assert_eq!(rep.pair_force(NVec2::zeros(), NVec2::new(350.0, 0.0)), NVec2::zeros());
        assert_eq!(rep.pair_force(NVec2::zeros(), NVec2::new(0.0, 900.0)), NVec2::zeros());
    }

    #[test]
    fn coincident_pair_is_ignored() {
        let sys = system(&[(5.0, 5.0), (5.0, 5.0)], NVec2::zeros());
        let mut out = vec![NVec2::zeros(); 2];
        Repulsion { min_dist: 350.0, gain: 8.0 }.force(&sys, &mut out);
        assert!(out.iter().all(|f| f.iter().all(|c| c.is_finite())));
        assert_eq!(out[0], NVec2::zeros());
    }

    #[test]
    fn force_set_zeroes_buffer_before_summing() {
        let sys = system(&[(0.0, 0.0)], NVec2::new(1.0, 0.0));
        let set = ForceSet::new().with(AnchorForce { k: 1.0 });
        let mut out = vec![NVec2::new(100.0, 100.0)];
        set.accumulate_forces(&sys, &mut out);
        assert_eq!(out[0], NVec2::new(1.0, 0.0));
    }
}
