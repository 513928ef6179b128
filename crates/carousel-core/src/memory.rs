#![forbid(unsafe_code)]

//! Headless [`NodeHost`] that keeps nodes in a map.
//!
//! Used by native tests and by anything that wants to inspect carousel
//! output without a DOM.

use std::collections::BTreeMap;

use crate::host::NodeHost;
use crate::layout::SlotStyle;
use crate::window::Lane;

/// Stable identifier of one in-memory node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryNodeId(u64);

impl MemoryNodeId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Last state written to an in-memory node.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    pub id: MemoryNodeId,
    pub lane: Lane,
    pub label: String,
    pub style: SlotStyle,
    /// Number of times the node was restyled after creation.
    pub restyles: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryHostError {
    /// The handle does not refer to a live node.
    UnknownNode(MemoryNodeId),
    /// Node creation was switched off with [`MemoryHost::reject_creates`].
    CreateRejected(Lane),
    /// Restyling was switched off with [`MemoryHost::reject_restyles`].
    RestyleRejected(Lane),
    /// Removal was switched off with [`MemoryHost::reject_removes`].
    RemoveRejected(Lane),
}

impl core::fmt::Display for MemoryHostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node #{}", id.0),
            Self::CreateRejected(lane) => write!(f, "node creation rejected for {lane}"),
            Self::RestyleRejected(lane) => write!(f, "node restyle rejected for {lane}"),
            Self::RemoveRejected(lane) => write!(f, "node removal rejected for {lane}"),
        }
    }
}

impl std::error::Error for MemoryHostError {}

/// In-memory node host.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nav_available: bool,
    gallery_available: bool,
    reject_creates: bool,
    reject_restyles: Option<Lane>,
    reject_removes: bool,
    nodes: BTreeMap<MemoryNodeId, MemoryNode>,
    prepared: Vec<(Lane, Option<f64>)>,
    next_id: u64,
    created_total: u64,
    removed_total: u64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Host with both lane containers present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nav_available: true,
            gallery_available: true,
            reject_creates: false,
            reject_restyles: None,
            reject_removes: false,
            nodes: BTreeMap::new(),
            prepared: Vec::new(),
            next_id: 1,
            created_total: 0,
            removed_total: 0,
        }
    }

    /// Host whose container for `lane` is missing.
    #[must_use]
    pub fn without_lane(lane: Lane) -> Self {
        let mut host = Self::new();
        match lane {
            Lane::Nav => host.nav_available = false,
            Lane::Gallery => host.gallery_available = false,
        }
        host
    }

    /// Make every subsequent `create_node` fail.
    pub fn reject_creates(&mut self, reject: bool) {
        self.reject_creates = reject;
    }

    /// Make every subsequent `restyle_node` on nodes of `lane` fail; `None`
    /// restores normal behavior.
    pub fn reject_restyles(&mut self, lane: Option<Lane>) {
        self.reject_restyles = lane;
    }

    /// Make every subsequent `remove_node` fail, leaving the node live.
    pub fn reject_removes(&mut self, reject: bool) {
        self.reject_removes = reject;
    }

    #[must_use]
    pub fn node(&self, id: MemoryNodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    /// Live nodes of `lane`, ordered by offset.
    #[must_use]
    pub fn nodes(&self, lane: Lane) -> Vec<&MemoryNode> {
        let mut nodes: Vec<_> = self.nodes.values().filter(|node| node.lane == lane).collect();
        nodes.sort_by_key(|node| node.style.offset);
        nodes
    }

    /// Number of live nodes in `lane`.
    #[must_use]
    pub fn len(&self, lane: Lane) -> usize {
        self.nodes.values().filter(|node| node.lane == lane).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lanes prepared so far, with the viewport height each requested.
    #[must_use]
    pub fn prepared_lanes(&self) -> &[(Lane, Option<f64>)] {
        &self.prepared
    }

    #[must_use]
    pub const fn created_total(&self) -> u64 {
        self.created_total
    }

    #[must_use]
    pub const fn removed_total(&self) -> u64 {
        self.removed_total
    }
}

impl NodeHost for MemoryHost {
    type Node = MemoryNodeId;
    type Error = MemoryHostError;

    fn lane_available(&self, lane: Lane) -> bool {
        match lane {
            Lane::Nav => self.nav_available,
            Lane::Gallery => self.gallery_available,
        }
    }

    fn prepare_lane(&mut self, lane: Lane, viewport_height: Option<f64>) -> Result<(), Self::Error> {
        self.nodes.retain(|_, node| node.lane != lane);
        self.prepared.push((lane, viewport_height));
        Ok(())
    }

    fn create_node(
        &mut self,
        lane: Lane,
        label: &str,
        style: SlotStyle,
    ) -> Result<Self::Node, Self::Error> {
        if self.reject_creates {
            return Err(MemoryHostError::CreateRejected(lane));
        }
        let id = MemoryNodeId(self.next_id);
        self.next_id += 1;
        self.created_total += 1;
        self.nodes.insert(id, MemoryNode {
            id,
            lane,
            label: label.to_owned(),
            style,
            restyles: 0,
        });
        Ok(id)
    }

    fn restyle_node(&mut self, node: &Self::Node, style: SlotStyle) -> Result<(), Self::Error> {
        let entry = self
            .nodes
            .get_mut(node)
            .ok_or(MemoryHostError::UnknownNode(*node))?;
        if self.reject_restyles == Some(entry.lane) {
            return Err(MemoryHostError::RestyleRejected(entry.lane));
        }
        entry.style = style;
        entry.restyles += 1;
        Ok(())
    }

    fn remove_node(&mut self, node: &Self::Node) -> Result<(), Self::Error> {
        let lane = self
            .nodes
            .get(node)
            .map(|entry| entry.lane)
            .ok_or(MemoryHostError::UnknownNode(*node))?;
        if self.reject_removes {
            return Err(MemoryHostError::RemoveRejected(lane));
        }
        self.nodes.remove(node);
        self.removed_total += 1;
        Ok(())
    }
}
