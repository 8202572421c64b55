//! Force simulation engine
//!
//! Owns the physics bodies and advances them once per frame: anchor springs
//! plus pairwise repulsion, damped integration, boundary clamping, then
//! publication into the `PositionStore`. Dragging a node suspends the whole
//! engine (see `interaction`)

use tracing::trace;

use super::forces::{AnchorForce, ForceSet, Repulsion};
use super::integrator::damped_step;
use super::params::Parameters;
use super::position::{PositionHandle, PositionStore};
use super::registry::LayoutRegistry;
use super::states::{NVec2, PhysicsBody, System, Viewport};

/// Which writer currently owns the shared positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Engine integrates and publishes every tick
    Running,
    /// A drag owns body `dragged`'s handle; ticks do nothing
    Suspended { dragged: usize },
}

pub struct Engine {
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    targets_pct: Vec<NVec2>, // normalized anchor per body
    pub(crate) handles: Vec<PositionHandle>, // body i -> store slot
    pub(crate) state: SimulationState,
}

impl Engine {
    /// Bodies start at rest on their targets, denormalized against `viewport`
    /// (or the fallback when none has been measured yet)
    pub fn build(registry: &LayoutRegistry, parameters: Parameters, viewport: Option<Viewport>) -> (Self, PositionStore) {
        let viewport = viewport.unwrap_or(parameters.fallback_viewport);
        let anchors = registry.targets(viewport);

        let bodies: Vec<PhysicsBody> = registry
            .nodes()
            .iter()
            .zip(anchors.iter())
            .map(|(n, &x)| PhysicsBody::at_rest(n.id.clone(), x))
            .collect();

        let store = PositionStore::from_bodies(&bodies);
        let handles = bodies
            .iter()
            .filter_map(|b| store.handle(&b.id))
            .collect();

        let forces = ForceSet::new()
            .with(AnchorForce { k: parameters.k_anchor })
            .with(Repulsion {
                min_dist: parameters.min_dist,
                gain: parameters.repulsion_gain,
            });

        let engine = Self {
            parameters,
            system: System { bodies, anchors, t: 0.0 },
            forces,
            targets_pct: registry.nodes().iter().map(|n| n.pct).collect(),
            handles,
            state: SimulationState::Running,
        };
        (engine, store)
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn bodies(&self) -> &[PhysicsBody] {
        &self.system.bodies
    }

    /// Advance one frame. Returns false when suspended (nothing moved).
    ///
    /// `delta_ms` is the measured frame gap; it is capped at
    /// `parameters.max_frame_ms` before use
    pub fn tick(&mut self, delta_ms: f64, viewport: Option<Viewport>, store: &mut PositionStore) -> bool {
        if let SimulationState::Suspended { dragged } = self.state {
            trace!(dragged, "tick skipped, engine suspended");
            return false;
        }

        let viewport = viewport.unwrap_or(self.parameters.fallback_viewport);
        let dt = self.parameters.frame_dt(delta_ms);

        // Targets follow the current viewport; bodies are never reset
        for (anchor, pct) in self.system.anchors.iter_mut().zip(self.targets_pct.iter()) {
            *anchor = viewport.denormalize(*pct);
        }

        damped_step(&mut self.system, &self.forces, &self.parameters, viewport, dt);
        self.publish(store);

        trace!(t = self.system.t, dt, "tick");
        true
    }

    fn publish(&self, store: &mut PositionStore) {
        for (b, &h) in self.system.bodies.iter().zip(self.handles.iter()) {
            store.publish(h, b.x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::registry::NodeItem;

    fn registry() -> LayoutRegistry {
        LayoutRegistry::new(
            vec![NodeItem::new("core", 50.0, 50.0), NodeItem::new("far", 10.0, 10.0)],
            "core",
        )
        .unwrap()
    }

    #[test]
    fn missing_viewport_uses_fallback() {
        let (engine, store) = Engine::build(&registry(), Parameters::default(), None);
        assert_eq!(engine.bodies()[0].x, NVec2::new(500.0, 400.0));
        assert_eq!(store.get_by_id("core"), Some(NVec2::new(500.0, 400.0)));
    }

    #[test]
    fn tick_keeps_store_in_sync() {
        let (mut engine, mut store) = Engine::build(&registry(), Parameters::default(), None);
        for _ in 0..20 {
            assert!(engine.tick(16.0, None, &mut store));
            for b in engine.bodies() {
                assert_eq!(store.get_by_id(&b.id), Some(b.x));
            }
        }
    }

    #[test]
    fn long_frame_gap_is_capped() {
        let reg = registry();
        let (mut capped, mut s1) = Engine::build(&reg, Parameters::default(), None);
        let (mut limit, mut s2) = Engine::build(&reg, Parameters::default(), None);
        let v = Some(Viewport::new(1200.0, 900.0));

        capped.tick(5_000.0, v, &mut s1);
        limit.tick(50.0, v, &mut s2);
        assert_eq!(capped.bodies()[1].x, limit.bodies()[1].x);
        assert!((capped.system.t - 0.05).abs() < 1e-12);
    }

    #[test]
    fn anchors_follow_viewport() {
        let (mut engine, mut store) = Engine::build(&registry(), Parameters::default(), None);
        engine.tick(16.0, Some(Viewport::new(2000.0, 1000.0)), &mut store);
        assert_eq!(engine.system.anchors[0], NVec2::new(1000.0, 500.0));
    }
}
