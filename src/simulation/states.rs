//! Core state types for the layout simulation.
//!
//! - `Viewport`    pixel dimensions the layout is denormalized against
//! - `PhysicsBody` live position/velocity of one node (pixel space, y down)
//! - `System`      all bodies, their current anchor targets and elapsed time `t`

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a percentage position in [0,100] onto this viewport.
    pub fn denormalize(&self, pct: NVec2) -> NVec2 {
        NVec2::new(self.width * pct.x / 100.0, self.height * pct.y / 100.0)
    }
}

#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub id: String, // node identity
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

impl PhysicsBody {
    pub fn at_rest(id: impl Into<String>, x: NVec2) -> Self {
        Self {
            id: id.into(),
            x,
            v: NVec2::zeros(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<PhysicsBody>, // one per node, registry order
    pub anchors: Vec<NVec2>, // denormalized target per body, refreshed every tick
    pub t: f64, // simulated seconds
}

impl System {
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }
}
