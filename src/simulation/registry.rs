//! Layout registry: the static table of nodes the simulation anchors to.
//!
//! Every node carries a normalized target position (percent of the viewport),
//! display metadata and tags. Nothing here changes after the scenario is built;
//! the engine and the companions only read from it.

use std::collections::HashSet;

use serde::Deserialize;

use crate::configuration::error::ConfigError;
use super::companion::Interest;
use super::states::{NVec2, Viewport};

/// Radius of the core node when drawn (px).
pub const CORE_RADIUS: f64 = 140.0;
/// Radius of every other node when drawn (px).
pub const NODE_RADIUS: f64 = 110.0;

/// Category a node belongs to, used for sidebar-style grouping and highlighting.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Project,
    Philosophy,
    Goal,
    Experiment,
}

impl NodeKind {
    /// Order of the category keys 1-4 in the viewer.
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Project,
        NodeKind::Experiment,
        NodeKind::Philosophy,
        NodeKind::Goal,
    ];
}

#[derive(Debug, Clone)]
pub struct NodeItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub tags: Vec<String>,
    pub pct: NVec2, // normalized target, each axis in [0,100]
    pub color: String, // "#RRGGBB"
    pub kind: NodeKind,
    pub project_link: Option<String>,
    pub source_link: Option<String>,
}

impl NodeItem {
    /// Bare node with only identity and target; metadata left empty.
    pub fn new(id: impl Into<String>, x_pct: f64, y_pct: f64) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            subtitle: String::new(),
            content: String::new(),
            tags: Vec::new(),
            pct: NVec2::new(x_pct, y_pct),
            color: "#FFFFFF".to_string(),
            kind: NodeKind::Philosophy,
            project_link: None,
            source_link: None,
        }
    }

    /// Builder: set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set kind
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn has_any_tag(&self, wanted: &[&str]) -> bool {
        self.tags.iter().any(|t| wanted.contains(&t.as_str()))
    }
}

/// Which nodes the presentation layer should draw at full strength.
///
/// Both selections can be active at once; a category wins over an interest.
/// With neither set every node is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightFilter {
    pub category: Option<NodeKind>,
    pub interest: Option<Interest>,
}

impl HighlightFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(kind: NodeKind) -> Self {
        Self { category: Some(kind), interest: None }
    }

    pub fn interest(interest: Interest) -> Self {
        Self { category: None, interest: Some(interest) }
    }

    pub fn matches(&self, node: &NodeItem) -> bool {
        match (self.category, self.interest) {
            (Some(kind), _) => node.kind == kind,
            (None, Some(interest)) => interest.highlights(node),
            (None, None) => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    nodes: Vec<NodeItem>,
    core_id: String,
}

impl LayoutRegistry {
    /// Node ids must be unique: each one owns exactly one store slot.
    pub fn new(nodes: Vec<NodeItem>, core_id: impl Into<String>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        if let Some(dup) = nodes.iter().find(|n| !seen.insert(n.id.as_str())) {
            return Err(ConfigError::DuplicateNode(dup.id.clone()));
        }
        Ok(Self {
            nodes,
            core_id: core_id.into(),
        })
    }

    pub fn nodes(&self) -> &[NodeItem] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn core_id(&self) -> &str {
        &self.core_id
    }

    pub fn get(&self, id: &str) -> Option<&NodeItem> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Every node except the core, in registry order.
    pub fn satellites(&self) -> impl Iterator<Item = &NodeItem> {
        self.nodes.iter().filter(move |n| n.id != self.core_id)
    }

    pub fn denormalize(&self, index: usize, viewport: Viewport) -> Option<NVec2> {
        self.nodes.get(index).map(|n| viewport.denormalize(n.pct))
    }

    /// Pixel targets for every node, registry order.
    pub fn targets(&self, viewport: Viewport) -> Vec<NVec2> {
        self.nodes.iter().map(|n| viewport.denormalize(n.pct)).collect()
    }

    pub fn display_radius(&self, id: &str) -> f64 {
        if id == self.core_id {
            CORE_RADIUS
        } else {
            NODE_RADIUS
        }
    }

    /// Ids of the nodes matching `filter`, registry order.
    pub fn highlighted(&self, filter: HighlightFilter) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| filter.matches(n))
            .map(|n| n.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LayoutRegistry {
        LayoutRegistry::new(
            vec![
                NodeItem::new("n0", 50.0, 50.0),
                NodeItem::new("n1", 30.0, 30.0)
                    .with_tags(["Systems", "Architecture"])
                    .with_kind(NodeKind::Philosophy),
                NodeItem::new("n4", 20.0, 60.0)
                    .with_tags(["Experiments", "Learning"])
                    .with_kind(NodeKind::Experiment),
                NodeItem::new("n6", 60.0, 80.0)
                    .with_tags(["Async", "API"])
                    .with_kind(NodeKind::Project),
            ],
            "n0",
        )
        .unwrap()
    }

    #[test]
    fn center_target_lands_mid_viewport() {
        let p = registry().denormalize(0, Viewport::new(1000.0, 800.0)).unwrap();
        assert_eq!(p, NVec2::new(500.0, 400.0));
    }

    #[test]
    fn satellites_skip_core() {
        let r = registry();
        let ids: Vec<_> = r.satellites().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["n1", "n4", "n6"]);
    }

    #[test]
    fn category_highlight_matches_kind() {
        let r = registry();
        assert_eq!(r.highlighted(HighlightFilter::category(NodeKind::Project)), ["n6"]);
        assert_eq!(r.highlighted(HighlightFilter::all()).len(), 4);
    }

    #[test]
    fn interest_highlight_uses_tags() {
        let r = registry();
        assert_eq!(r.highlighted(HighlightFilter::interest(Interest::Logic)), ["n1", "n4"]);
        assert_eq!(r.highlighted(HighlightFilter::interest(Interest::Growth)), ["n4"]);
        assert_eq!(r.highlighted(HighlightFilter::interest(Interest::Debug)).len(), 4);
    }

    #[test]
    fn category_wins_over_interest() {
        let r = registry();
        let both = HighlightFilter {
            category: Some(NodeKind::Project),
            interest: Some(Interest::Logic),
        };
        assert_eq!(r.highlighted(both), ["n6"]);

        // dropping the category falls back to the interest
        let interest_only = HighlightFilter { category: None, ..both };
        assert_eq!(r.highlighted(interest_only), ["n1", "n4"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = LayoutRegistry::new(
            vec![
                NodeItem::new("c", 50.0, 50.0),
                NodeItem::new("x", 20.0, 20.0),
                NodeItem::new("x", 80.0, 80.0),
            ],
            "c",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateNode(id) if id == "x"));
    }

    #[test]
    fn core_is_drawn_larger() {
        let r = registry();
        assert!(r.display_radius("n0") > r.display_radius("n1"));
    }
}
