#![forbid(unsafe_code)]

//! The seam between carousel logic and whatever renders its nodes.

use crate::layout::SlotStyle;
use crate::window::Lane;

/// Renders and owns the concrete nodes of both lanes.
///
/// The carousel holds the handles returned by [`NodeHost::create_node`] and
/// hands them back for restyling and removal; a host never has to search
/// for its own nodes.
pub trait NodeHost {
    /// Handle to one rendered node.
    type Node;
    /// Host failure, reported to the carousel as text.
    type Error: core::fmt::Display;

    /// Whether the container for `lane` exists. Unavailable lanes are never
    /// populated.
    fn lane_available(&self, lane: Lane) -> bool;

    /// Reset the lane container before the first node is created.
    fn prepare_lane(&mut self, lane: Lane, viewport_height: Option<f64>) -> Result<(), Self::Error> {
        let _ = (lane, viewport_height);
        Ok(())
    }

    /// Create a node showing `label` and attach it to the lane container.
    fn create_node(
        &mut self,
        lane: Lane,
        label: &str,
        style: SlotStyle,
    ) -> Result<Self::Node, Self::Error>;

    /// Apply a new style to an existing node.
    fn restyle_node(&mut self, node: &Self::Node, style: SlotStyle) -> Result<(), Self::Error>;

    /// Detach a node. On failure the carousel keeps the handle and retries
    /// on a later pass.
    fn remove_node(&mut self, node: &Self::Node) -> Result<(), Self::Error>;
}
