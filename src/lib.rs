pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{PhysicsBody, System, NVec2, Viewport};
pub use simulation::params::Parameters;
pub use simulation::registry::{LayoutRegistry, NodeItem, NodeKind, HighlightFilter};
pub use simulation::position::{PositionStore, PositionHandle, PositionWatcher};
pub use simulation::forces::{ForceSet, ForceTerm, AnchorForce, Repulsion};
pub use simulation::integrator::{damped_step, clamp_to_bounds};
pub use simulation::engine::{Engine, SimulationState};
pub use simulation::companion::{CompanionEntity, Interest, Direction, Wobble, pick_target};
pub use simulation::clock::{FrameClock, Cadence, run_headless};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ParametersConfig, ViewportConfig, NodeConfig, CompanionConfig};
pub use configuration::error::ConfigError;

pub use visualization::hive_vis2d::run_2d;

pub use benchmark::benchmark::bench_tick;
