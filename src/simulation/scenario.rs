//! Build a fully-initialized layout scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - the layout registry (static node table)
//! - the engine (parameters, bodies at their targets, active force set)
//! - the position store the presentation layer reads
//! - the companions and their chosen targets
//!
//! The scenario is inserted into Bevy as a `Resource` and ticked once per
//! frame by the viewer, or by `clock::run_headless` without a window

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::configuration::config::{NodeConfig, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::companion::CompanionEntity;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::position::PositionStore;
use crate::simulation::registry::{LayoutRegistry, NodeItem};
use crate::simulation::states::{NVec2, Viewport};

/// Bevy resource representing a fully-initialized layout scenario
///
/// The engine is the only writer of `store` outside a drag; companions and
/// the renderer only read it
#[derive(Resource)]
pub struct Scenario {
    pub registry: LayoutRegistry,
    pub engine: Engine,
    pub store: PositionStore,
    pub companions: Vec<CompanionEntity>,
}

impl Scenario {
    /// `viewport` is the measured size if one is known; otherwise the
    /// configured viewport is used. The config is validated again here, so
    /// hand-built configs get the same checks as loaded ones
    pub fn build_scenario(cfg: ScenarioConfig, viewport: Option<Viewport>) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Nodes: map `NodeConfig` -> registry `NodeItem`
        let nodes: Vec<NodeItem> = cfg.nodes.into_iter().map(|nc: NodeConfig| NodeItem {
            title: if nc.title.is_empty() { nc.id.clone() } else { nc.title },
            id: nc.id,
            subtitle: nc.subtitle,
            content: nc.content,
            tags: nc.tags,
            pct: NVec2::new(nc.x, nc.y),
            color: nc.color,
            kind: nc.kind,
            project_link: nc.project_link,
            source_link: nc.github_link,
        }).collect();
        let registry = LayoutRegistry::new(nodes, cfg.core)?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            k_anchor: p_cfg.k_anchor,
            min_dist: p_cfg.min_dist,
            repulsion_gain: p_cfg.repulsion_gain,
            damping: p_cfg.damping,
            padding: p_cfg.padding,
            restitution: p_cfg.restitution,
            max_frame_ms: p_cfg.max_frame_ms,
            fallback_viewport: Viewport::new(cfg.viewport.width, cfg.viewport.height),
        };

        let (engine, store) = Engine::build(&registry, parameters, viewport);

        // Companions: targets are chosen once, here
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let companions: Vec<CompanionEntity> = cfg.companions.into_iter().filter_map(|cc| {
            let Some(mut c) = CompanionEntity::new(cc.id.clone(), cc.interest, &registry, &mut rng) else {
                warn!(id = %cc.id, "companion has no node to visit, dropped");
                return None;
            };
            c.label = cc.label;
            c.description = cc.description;
            c.personality = cc.personality;
            Some(c)
        }).collect();

        info!(
            nodes = registry.len(),
            companions = companions.len(),
            core = registry.core_id(),
            "scenario built"
        );

        Ok(Self {
            registry,
            engine,
            store,
            companions,
        })
    }

    /// One frame: physics (unless a drag holds it), then companion travel.
    /// Returns whether the engine integrated this frame
    pub fn tick(&mut self, delta_ms: f64, viewport: Option<Viewport>) -> bool {
        let stepped = self.engine.tick(delta_ms, viewport, &mut self.store);
        for c in self.companions.iter_mut() {
            c.advance();
        }
        stepped
    }

    /// Where each companion should be drawn at `time` seconds; `None`
    /// entries are skipped this frame
    pub fn companion_positions(&self, time: f64) -> Vec<Option<NVec2>> {
        self.companions.iter().map(|c| c.position(&self.store, time)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
core: c
nodes:
  - { id: c, x: 50, y: 50, type: philosophy }
  - { id: a, x: 20, y: 30, type: project }
"#;

    fn config() -> ScenarioConfig {
        ScenarioConfig::from_yaml_str(YAML).unwrap()
    }

    #[test]
    fn valid_config_builds() {
        let s = Scenario::build_scenario(config(), None).unwrap();
        assert_eq!(s.registry.len(), 2);
        assert_eq!(s.store.len(), 2);
    }

    #[test]
    fn unknown_core_is_rejected() {
        let mut cfg = config();
        cfg.core = "zz".to_string();
        assert!(matches!(
            Scenario::build_scenario(cfg, None),
            Err(ConfigError::MissingCore(id)) if id == "zz"
        ));
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        let mut cfg = config();
        cfg.nodes[1].x = 500.0;
        assert!(matches!(
            Scenario::build_scenario(cfg, None),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut cfg = config();
        let mut dup = cfg.nodes[1].clone();
        dup.x = 80.0;
        cfg.nodes.push(dup);
        assert!(matches!(
            Scenario::build_scenario(cfg, None),
            Err(ConfigError::DuplicateNode(id)) if id == "a"
        ));
    }
}
