pub mod states;
pub mod params;
pub mod registry;
pub mod position;
pub mod forces;
pub mod integrator;
pub mod engine;
pub mod interaction;
pub mod companion;
pub mod clock;
pub mod scenario;
