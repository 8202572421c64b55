//! Interaction controller: drag gestures over the engine.
//!
//! Starting a drag moves the engine into [`SimulationState::Suspended`]; from
//! then on the gesture writes the dragged node's handle directly through
//! [`Engine::drag_to`] and ticks are no-ops. Ending the drag copies the handle
//! back into the body, zeroes its velocity, and resumes the engine.

use nalgebra::Vector2;
use tracing::{debug, warn};

use super::engine::{Engine, SimulationState};
use super::position::PositionStore;

impl Engine {
    /// Suspend the simulation for a drag of `id`. Unknown ids are ignored.
    pub fn on_drag_start(&mut self, id: &str) -> bool {
        match self.system.index_of(id) {
            Some(dragged) => {
                debug!(id, "drag start, simulation suspended");
                self.state = SimulationState::Suspended { dragged };
                true
            }
            None => {
                warn!(id, "drag start on unknown node ignored");
                false
            }
        }
    }

    /// Pointer move during a drag. Only valid while suspended.
    pub fn drag_to(&self, store: &mut PositionStore, pos: Vector2<f64>) -> bool {
        match self.state {
            SimulationState::Suspended { dragged } => {
                store.publish(self.handles[dragged], pos);
                true
            }
            SimulationState::Running => false,
        }
    }

    /// Finish the drag: the body adopts wherever the handle was left, at rest.
    pub fn on_drag_end(&mut self, id: &str, store: &PositionStore) {
        let SimulationState::Suspended { dragged } = self.state else {
            warn!(id, "drag end without a drag in progress");
            return;
        };

        let body = &mut self.system.bodies[dragged];
        if body.id != id {
            warn!(id, dragging = %body.id, "drag end for a different node, releasing active drag");
        }
        body.x = store.get(self.handles[dragged]);
        body.v = Vector2::zeros();

        debug!(id = %body.id, x = body.x.x, y = body.x.y, "drag end, simulation resumed");
        self.state = SimulationState::Running;
    }
}
