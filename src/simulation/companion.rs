//! Companion motion: decorative entities that shuttle between the core node
//! and one related node.
//!
//! A companion has no forces or velocity. Its position is a function of a
//! progress value in [0,1], the live positions of its two endpoints in the
//! `PositionStore`, and wall time (for the wobble).

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::position::PositionStore;
use super::registry::{LayoutRegistry, NodeItem, NodeKind};
use super::states::NVec2;

/// What a companion is drawn to; decides its target node and speed.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Frontend,
    Backend,
    Logic,
    Debug,
    Growth,
    Collab,
}

impl Interest {
    /// Tags that make a node a candidate target.
    pub fn target_tags(self) -> &'static [&'static str] {
        match self {
            Interest::Frontend => &["Frontend", "React", "CSS Engine"],
            Interest::Backend => &["Architecture", "Design Patterns"],
            Interest::Logic => &["DSA", "Learning"],
            Interest::Debug => &["Engineering"],
            Interest::Growth => &["Learning"],
            Interest::Collab => &["Ethics"],
        }
    }

    /// Progress advanced per frame.
    pub fn speed(self) -> f64 {
        match self {
            Interest::Frontend => 0.002,
            Interest::Backend => 0.0015,
            Interest::Logic => 0.0025,
            Interest::Debug => 0.002,
            Interest::Growth => 0.001,
            Interest::Collab => 0.0018,
        }
    }

    /// Whether `node` is emphasized while this interest is focused.
    pub fn highlights(self, node: &NodeItem) -> bool {
        match self {
            Interest::Frontend => node.has_any_tag(&["Frontend", "React", "CSS Engine"]),
            Interest::Backend => node.has_any_tag(&["Architecture", "Design Patterns"]),
            Interest::Logic => node.has_any_tag(&["DSA", "Learning", "Architecture"]),
            Interest::Growth => node.kind == NodeKind::Experiment,
            Interest::Debug | Interest::Collab => true,
        }
    }
}

/// First non-core node whose tags meet the interest, else a uniformly
/// random non-core node. `None` only when the registry has no such node.
pub fn pick_target<'a, R>(interest: Interest, registry: &'a LayoutRegistry, rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    let wanted = interest.target_tags();
    if let Some(hit) = registry.satellites().find(|n| n.has_any_tag(wanted)) {
        return Some(hit.id.as_str());
    }
    let candidates: Vec<&NodeItem> = registry.satellites().collect();
    candidates.choose(rng).copied().map(|n| n.id.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outbound, // toward the target
    Inbound,  // back to the core
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Outbound => 1.0,
            Direction::Inbound => -1.0,
        }
    }
}

/// Sideways drift added to the straight core-target path.
/// Scaled by sin(pi * progress) so it vanishes at both endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Wobble {
    pub freq_x: f64,
    pub freq_y: f64,
    pub phase_per_progress: f64,
    pub amplitude: f64, // px at mid-path
}

impl Default for Wobble {
    fn default() -> Self {
        Self {
            freq_x: 2.0,
            freq_y: 3.0,
            phase_per_progress: 10.0,
            amplitude: 20.0,
        }
    }
}

impl Wobble {
    pub fn offset(&self, time: f64, progress: f64) -> NVec2 {
        let envelope = self.amplitude * (progress * PI).sin();
        let phase = progress * self.phase_per_progress;
        NVec2::new(
            (time * self.freq_x + phase).sin() * envelope,
            (time * self.freq_y + phase).cos() * envelope,
        )
    }
}

#[derive(Debug, Clone)]
pub struct CompanionEntity {
    pub id: String,
    pub label: String,
    pub description: String,
    pub personality: String,
    pub interest: Interest,
    pub core_id: String,
    pub target_id: String, // fixed for the entity's lifetime
    pub wobble: Wobble,
    speed: f64,
    progress: f64,
    direction: Direction,
}

impl CompanionEntity {
    /// Starts at the core heading out. `None` if there is nothing to visit.
    pub fn new<R>(id: impl Into<String>, interest: Interest, registry: &LayoutRegistry, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        let target_id = pick_target(interest, registry, rng)?.to_string();
        Some(Self {
            id: id.into(),
            label: String::new(),
            description: String::new(),
            personality: String::new(),
            interest,
            core_id: registry.core_id().to_string(),
            target_id,
            wobble: Wobble::default(),
            speed: interest.speed(),
            progress: 0.0,
            direction: Direction::Outbound,
        })
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// One frame of travel. Turns around on reaching either endpoint;
    /// progress is clamped so it lands on 0 and 1 exactly.
    pub fn advance(&mut self) {
        if self.progress >= 1.0 {
            self.direction = Direction::Inbound;
        } else if self.progress <= 0.0 {
            self.direction = Direction::Outbound;
        }
        self.progress = (self.progress + self.speed * self.direction.sign()).clamp(0.0, 1.0);
    }

    /// Current position from the live endpoints. `None` if either endpoint
    /// is missing from the store; the caller skips the entity for the frame.
    pub fn position(&self, store: &PositionStore, time: f64) -> Option<NVec2> {
        let core = store.get_by_id(&self.core_id)?;
        let target = store.get_by_id(&self.target_id)?;
        let p = self.progress;
        Some(core + (target - core) * p + self.wobble.offset(time, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::registry::NodeItem;
    use crate::simulation::states::PhysicsBody;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry() -> LayoutRegistry {
        LayoutRegistry::new(
            vec![
                NodeItem::new("n0", 50.0, 50.0).with_tags(["Learning"]),
                NodeItem::new("n1", 30.0, 30.0).with_tags(["Architecture"]),
                NodeItem::new("n3", 80.0, 60.0).with_tags(["DSA"]),
                NodeItem::new("n4", 20.0, 60.0).with_tags(["Learning"]),
            ],
            "n0",
        )
        .unwrap()
    }

    #[test]
    fn first_tag_match_wins_and_core_is_excluded() {
        let reg = registry();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_target(Interest::Backend, &reg, &mut rng), Some("n1"));
        assert_eq!(pick_target(Interest::Logic, &reg, &mut rng), Some("n3"));
        assert_eq!(pick_target(Interest::Growth, &reg, &mut rng), Some("n4"));
    }

    #[test]
    fn fallback_is_seeded_and_never_core() {
        let reg = registry();
        let a: Vec<_> = (0..20)
            .map(|s| pick_target(Interest::Collab, &reg, &mut StdRng::seed_from_u64(s)))
            .collect();
        let b: Vec<_> = (0..20)
            .map(|s| pick_target(Interest::Collab, &reg, &mut StdRng::seed_from_u64(s)))
            .collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|t| t.is_some() && *t != Some("n0")));
    }

    #[test]
    fn core_only_registry_has_no_target() {
        let reg = LayoutRegistry::new(vec![NodeItem::new("n0", 50.0, 50.0)], "n0").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(CompanionEntity::new("b1", Interest::Debug, &reg, &mut rng).is_none());
    }

    #[test]
    fn wobble_vanishes_at_endpoints() {
        let w = Wobble::default();
        for t in [0.0, 1.3, 7.9] {
            assert!(w.offset(t, 0.0).norm() < 1e-9);
            assert!(w.offset(t, 1.0).norm() < 1e-9);
        }
        assert!(w.offset(0.4, 0.5).norm() > 1.0);
    }

    #[test]
    fn position_interpolates_live_endpoints() {
        let reg = registry();
        let mut c = CompanionEntity::new("b", Interest::Backend, &reg, &mut StdRng::seed_from_u64(0)).unwrap();
        c.wobble.amplitude = 0.0;
        for _ in 0..250 {
            c.advance();
        }
        let store = PositionStore::from_bodies(&[
            PhysicsBody::at_rest("n0", NVec2::new(0.0, 0.0)),
            PhysicsBody::at_rest("n1", NVec2::new(200.0, 100.0)),
        ]);
        let p = c.position(&store, 0.0).unwrap();
        let expected = NVec2::new(200.0, 100.0) * c.progress();
        assert!((p - expected).norm() < 1e-9);
    }

    #[test]
    fn missing_endpoint_skips_frame() {
        let reg = registry();
        let c = CompanionEntity::new("b", Interest::Backend, &reg, &mut StdRng::seed_from_u64(0)).unwrap();
        let store = PositionStore::from_bodies(&[PhysicsBody::at_rest("n0", NVec2::zeros())]);
        assert!(c.position(&store, 0.0).is_none());
    }
}
