use std::time::Instant;
use crate::configuration::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::registry::{LayoutRegistry, NodeItem};
use crate::simulation::states::Viewport;

/// Helper to build a layout of `n` nodes: one core plus a ring around it
fn make_ring_registry(n: usize) -> Result<LayoutRegistry, ConfigError> {
    let mut nodes = Vec::with_capacity(n);
    nodes.push(NodeItem::new("core", 50.0, 50.0));

    for i in 1..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let angle = i_f * 2.0 * std::f64::consts::PI / (n - 1) as f64;
        let ring = 20.0 + (i_f * 0.37).sin().abs() * 20.0;
        nodes.push(NodeItem::new(
            format!("n{i}"),
            50.0 + angle.cos() * ring,
            50.0 + angle.sin() * ring,
        ));
    }

    LayoutRegistry::new(nodes, "core")
}

/// Time one engine tick for layouts of growing size.
/// The registry is meant for tens of nodes; larger n shows the O(n^2) cost
pub fn bench_tick() -> Result<(), ConfigError> {
    let ns = [5, 10, 15, 30, 60, 120, 240, 480];
    let ticks = 200; // per size
    let viewport = Some(Viewport::new(1920.0, 1080.0));

    for n in ns {
        let registry = make_ring_registry(n)?;
        let (mut engine, mut store) = Engine::build(&registry, Parameters::default(), viewport);

        // Warm up
        engine.tick(16.0, viewport, &mut store);

        let t0 = Instant::now();
        for _ in 0..ticks {
            engine.tick(16.0, viewport, &mut store);
        }
        let per_tick = t0.elapsed().as_secs_f64() / ticks as f64;

        println!("N = {n:4}, tick = {:10.3} us", per_tick * 1.0e6);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_layout_stays_normalized() {
        let reg = make_ring_registry(12).unwrap();
        assert_eq!(reg.len(), 12);
        assert!(reg.nodes().iter().all(|n| (0.0..=100.0).contains(&n.pct.x) && (0.0..=100.0).contains(&n.pct.y)));
    }
}
