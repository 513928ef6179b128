#![forbid(unsafe_code)]

//! Fixed-size sliding windows of rendered nodes.
//!
//! A [`LaneWindow`] owns the handles of every node it created. A scroll step
//! is split in two phases so the host can animate between them:
//!
//! 1. [`LaneWindow::shift`] moves every node one offset against the step
//!    direction and restyles it. The window temporarily holds one node
//!    outside its bounds (the one sliding out).
//! 2. [`LaneWindow::settle`] removes nodes outside the bounds and creates the
//!    node entering at the leading edge, restoring a contiguous window.
//!
//! Slots are kept sorted by offset, so inspection never needs to sort.

use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::CarouselError;
use crate::host::NodeHost;
use crate::layout::SlotLayout;
use crate::ring::{Cursor, Direction, Ring};

/// One of the two node sets the carousel manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Project-name list.
    Nav,
    /// Image strip.
    Gallery,
}

impl Lane {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nav => "nav",
            Self::Gallery => "gallery",
        }
    }
}

impl core::fmt::Display for Lane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest number of offsets a lane window may cover.
pub const MAX_WINDOW_LEN: usize = 64;

/// Inclusive range of relative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowBounds {
    pub min: i32,
    pub max: i32,
}

impl WindowBounds {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Bounds a window can be built from: ordered, containing offset 0 and
    /// no longer than [`MAX_WINDOW_LEN`].
    #[must_use]
    pub fn is_window(self) -> bool {
        self.min <= 0 && 0 <= self.max && self.len() <= MAX_WINDOW_LEN
    }

    #[must_use]
    pub const fn contains(self, offset: i32) -> bool {
        self.min <= offset && offset <= self.max
    }

    /// Number of offsets covered (0 for inverted bounds).
    #[must_use]
    pub fn len(self) -> usize {
        if self.min > self.max {
            0
        } else {
            usize::try_from(i64::from(self.max) - i64::from(self.min) + 1).unwrap_or(usize::MAX)
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Offset a new node enters at after a step in `direction`.
    #[must_use]
    pub const fn entry_edge(self, direction: Direction) -> i32 {
        match direction {
            Direction::Forward => self.max,
            Direction::Backward => self.min,
        }
    }

    #[must_use]
    pub const fn offsets(self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

#[derive(Debug)]
struct Slot<N> {
    offset: i32,
    label: String,
    node: N,
}

/// Node counts touched by one settle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LaneSettle {
    pub removed: usize,
    pub created: usize,
}

/// The owned node set of one lane.
#[derive(Debug)]
pub struct LaneWindow<N> {
    lane: Lane,
    bounds: WindowBounds,
    slots: Vec<Slot<N>>,
}

impl<N> LaneWindow<N> {
    /// Prepare the lane container and create one node per offset in
    /// `bounds`, labelled relative to `cursor`.
    pub fn populate<H, L>(
        host: &mut H,
        lane: Lane,
        bounds: WindowBounds,
        ring: &Ring<String>,
        cursor: Cursor,
        layout: &L,
    ) -> Result<Self, CarouselError>
    where
        H: NodeHost<Node = N>,
        L: SlotLayout,
    {
        if !bounds.is_window() {
            return Err(CarouselError::InvalidBounds {
                lane,
                min: bounds.min,
                max: bounds.max,
            });
        }
        host.prepare_lane(lane, layout.viewport_height())
            .map_err(|err| CarouselError::host(lane, &err))?;
        let mut window = Self {
            lane,
            bounds,
            slots: Vec::with_capacity(bounds.len() + 1),
        };
        for offset in bounds.offsets() {
            window.create_at(host, offset, ring, cursor, layout)?;
        }
        trace!(
            target: "carousel::window",
            lane = lane.as_str(),
            nodes = window.slots.len(),
            "populated lane"
        );
        Ok(window)
    }

    /// Move every node one offset against `direction` and restyle it.
    ///
    /// Offsets always move, so the window stays in step with the cursor even
    /// when a restyle fails; the first host error is returned after every
    /// node was attempted.
    pub fn shift<H, L>(
        &mut self,
        host: &mut H,
        direction: Direction,
        layout: &L,
    ) -> Result<(), CarouselError>
    where
        H: NodeHost<Node = N>,
        L: SlotLayout,
    {
        let lane = self.lane;
        let delta = direction.sign();
        let mut failure = None;
        for slot in &mut self.slots {
            slot.offset -= delta;
            if let Err(err) = host.restyle_node(&slot.node, layout.style(slot.offset)) {
                failure.get_or_insert(CarouselError::host(lane, &err));
            }
        }
        failure.map_or(Ok(()), Err)
    }

    /// Drop nodes that slid out of bounds and refill the vacated edge.
    ///
    /// A node the host fails to remove stays owned by the window, so a later
    /// settle retries it once it has slid further out.
    pub fn settle<H, L>(
        &mut self,
        host: &mut H,
        direction: Direction,
        ring: &Ring<String>,
        cursor: Cursor,
        layout: &L,
    ) -> Result<LaneSettle, CarouselError>
    where
        H: NodeHost<Node = N>,
        L: SlotLayout,
    {
        let bounds = self.bounds;
        let (kept, expired): (Vec<_>, Vec<_>) = core::mem::take(&mut self.slots)
            .into_iter()
            .partition(|slot| bounds.contains(slot.offset));
        self.slots = kept;

        let mut report = LaneSettle::default();
        let mut failure = None;
        for slot in expired {
            match host.remove_node(&slot.node) {
                Ok(()) => report.removed += 1,
                Err(err) => {
                    failure.get_or_insert(CarouselError::host(self.lane, &err));
                    self.insert_slot(slot);
                }
            }
        }

        // Normally exactly one offset is vacant: the entry edge. Walking
        // inward from it also repairs holes left by an earlier host failure.
        let edge = bounds.entry_edge(direction);
        let inward = direction.reversed().sign();
        let mut offset = edge;
        while bounds.contains(offset) {
            if !self.occupied(offset) {
                if let Err(err) = self.create_at(host, offset, ring, cursor, layout) {
                    failure.get_or_insert(err);
                    break;
                }
                report.created += 1;
            }
            offset += inward;
        }

        trace!(
            target: "carousel::window",
            lane = self.lane.as_str(),
            direction = direction.as_str(),
            removed = report.removed,
            created = report.created,
            "settled lane"
        );
        failure.map_or(Ok(report), Err)
    }

    /// Remove every node. Nodes the host fails to remove stay owned so the
    /// call can be retried.
    pub fn clear<H>(&mut self, host: &mut H) -> Result<usize, CarouselError>
    where
        H: NodeHost<Node = N>,
    {
        let mut removed = 0;
        let mut failure = None;
        for slot in core::mem::take(&mut self.slots) {
            match host.remove_node(&slot.node) {
                Ok(()) => removed += 1,
                Err(err) => {
                    failure.get_or_insert(CarouselError::host(self.lane, &err));
                    self.slots.push(slot);
                }
            }
        }
        failure.map_or(Ok(removed), Err)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Offsets of every owned node, ascending.
    #[must_use]
    pub fn offsets(&self) -> Vec<i32> {
        self.slots.iter().map(|slot| slot.offset).collect()
    }

    /// Labels of every owned node, ordered by offset.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.label.as_str()).collect()
    }

    /// Handle of the node at `offset`, if one exists.
    #[must_use]
    pub fn node_at(&self, offset: i32) -> Option<&N> {
        self.slots
            .iter()
            .find(|slot| slot.offset == offset)
            .map(|slot| &slot.node)
    }

    fn occupied(&self, offset: i32) -> bool {
        self.slots
            .binary_search_by_key(&offset, |slot| slot.offset)
            .is_ok()
    }

    fn create_at<H, L>(
        &mut self,
        host: &mut H,
        offset: i32,
        ring: &Ring<String>,
        cursor: Cursor,
        layout: &L,
    ) -> Result<(), CarouselError>
    where
        H: NodeHost<Node = N>,
        L: SlotLayout,
    {
        let label = ring.around(cursor, offset).clone();
        let node = host
            .create_node(self.lane, &label, layout.style(offset))
            .map_err(|err| CarouselError::host(self.lane, &err))?;
        self.insert_slot(Slot { offset, label, node });
        Ok(())
    }

    fn insert_slot(&mut self, slot: Slot<N>) {
        let at = self.slots.partition_point(|kept| kept.offset < slot.offset);
        self.slots.insert(at, slot);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Lane, LaneSettle, LaneWindow, MAX_WINDOW_LEN, WindowBounds};
    use crate::config::{GalleryConfig, NavConfig};
    use crate::error::CarouselError;
    use crate::layout::{GalleryLayout, NavLayout};
    use crate::memory::{MemoryHost, MemoryNodeId};
    use crate::ring::{Cursor, Direction, Ring};

    fn projects() -> Ring<String> {
        Ring::new(
            ["BLUEFORCE", "GOLDFISH", "CISCO", "SAP", "SCOPESTYLE"]
                .map(String::from)
                .to_vec(),
        )
        .expect("non-empty")
    }

    fn nav_window(host: &mut MemoryHost, cursor: Cursor) -> LaneWindow<MemoryNodeId> {
        LaneWindow::populate(
            host,
            Lane::Nav,
            WindowBounds::new(-4, 4),
            &projects(),
            cursor,
            &NavLayout::new(&NavConfig::default()),
        )
        .expect("populate nav")
    }

    #[test]
    fn bounds_helpers() {
        let bounds = WindowBounds::new(-2, 6);
        assert_eq!(bounds.len(), 9);
        assert!(bounds.is_window());
        assert!(!WindowBounds::new(1, 3).is_window());
        assert!(WindowBounds::new(3, 1).is_empty());
        assert_eq!(bounds.entry_edge(Direction::Forward), 6);
        assert_eq!(bounds.entry_edge(Direction::Backward), -2);
    }

    #[test]
    fn oversized_bounds_are_not_a_window() {
        let huge = WindowBounds::new(i32::MIN, i32::MAX);
        assert!(huge.len() > MAX_WINDOW_LEN);
        assert!(!huge.is_empty());
        assert!(!huge.is_window());
        assert!(WindowBounds::new(-32, 31).is_window());
        assert!(!WindowBounds::new(-32, 32).is_window());

        let mut host = MemoryHost::new();
        let err = LaneWindow::populate(
            &mut host,
            Lane::Nav,
            huge,
            &projects(),
            Cursor::new(0, 5).expect("cursor"),
            &NavLayout::new(&NavConfig::default()),
        )
        .expect_err("oversized window must be rejected");
        assert_eq!(
            err,
            CarouselError::InvalidBounds {
                lane: Lane::Nav,
                min: i32::MIN,
                max: i32::MAX,
            }
        );
        assert!(host.is_empty());
        assert!(host.prepared_lanes().is_empty());
    }

    #[test]
    fn failed_restyle_still_moves_every_offset() {
        let mut host = MemoryHost::new();
        let layout = NavLayout::new(&NavConfig::default());
        let mut window = nav_window(&mut host, Cursor::new(2, 5).expect("cursor"));
        host.reject_restyles(Some(Lane::Nav));
        assert!(window.shift(&mut host, Direction::Backward, &layout).is_err());
        assert_eq!(window.offsets(), (-3..=5).collect::<Vec<_>>());
    }

    #[test]
    fn failed_removal_keeps_the_node_for_retry() {
        let mut host = MemoryHost::new();
        let layout = NavLayout::new(&NavConfig::default());
        let ring = projects();
        let mut cursor = Cursor::new(2, 5).expect("cursor");
        let mut window = nav_window(&mut host, cursor);

        cursor.shift(Direction::Forward);
        window.shift(&mut host, Direction::Forward, &layout).expect("shift");
        host.reject_removes(true);
        assert!(
            window
                .settle(&mut host, Direction::Forward, &ring, cursor, &layout)
                .is_err()
        );
        assert_eq!(window.offsets(), (-5..=4).collect::<Vec<_>>());
        assert_eq!(host.len(Lane::Nav), 10);

        host.reject_removes(false);
        cursor.shift(Direction::Forward);
        window.shift(&mut host, Direction::Forward, &layout).expect("shift");
        let report = window
            .settle(&mut host, Direction::Forward, &ring, cursor, &layout)
            .expect("settle");
        assert_eq!(report, LaneSettle { removed: 2, created: 1 });
        assert_eq!(window.offsets(), (-4..=4).collect::<Vec<_>>());
        assert_eq!(host.len(Lane::Nav), 9);
    }

    #[test]
    fn populate_labels_relative_to_cursor() {
        let mut host = MemoryHost::new();
        let window = nav_window(&mut host, Cursor::new(2, 5).expect("cursor"));
        assert_eq!(window.offsets(), (-4..=4).collect::<Vec<_>>());
        assert_eq!(
            window.labels(),
            vec![
                "SAP",
                "SCOPESTYLE",
                "BLUEFORCE",
                "GOLDFISH",
                "CISCO",
                "SAP",
                "SCOPESTYLE",
                "BLUEFORCE",
                "GOLDFISH",
            ]
        );
        assert_eq!(host.prepared_lanes(), &[(Lane::Nav, Some(170.0))]);
    }

    #[test]
    fn shift_leaves_one_node_out_of_bounds_until_settle() {
        let mut host = MemoryHost::new();
        let layout = NavLayout::new(&NavConfig::default());
        let mut cursor = Cursor::new(2, 5).expect("cursor");
        let mut window = nav_window(&mut host, cursor);

        cursor.shift(Direction::Forward);
        window
            .shift(&mut host, Direction::Forward, &layout)
            .expect("shift");
        assert_eq!(window.offsets(), (-5..=3).collect::<Vec<_>>());
        assert_eq!(window.len(), 9);

        let report = window
            .settle(&mut host, Direction::Forward, &projects(), cursor, &layout)
            .expect("settle");
        assert_eq!(report, LaneSettle { removed: 1, created: 1 });
        assert_eq!(window.offsets(), (-4..=4).collect::<Vec<_>>());
        assert_eq!(window.labels()[4], "SAP");
        assert_eq!(window.labels()[8], "CISCO");
        assert_eq!(host.len(Lane::Nav), 9);
    }

    #[test]
    fn backward_settle_refills_the_top_edge() {
        let mut host = MemoryHost::new();
        let config = GalleryConfig::default();
        let layout = GalleryLayout::new(&config);
        let images = Ring::new((1..=5).map(|i| format!("project-image-{i}")).collect())
            .expect("non-empty");
        let mut cursor = Cursor::new(0, 5).expect("cursor");
        let mut window = LaneWindow::populate(
            &mut host,
            Lane::Gallery,
            config.window,
            &images,
            cursor,
            &layout,
        )
        .expect("populate gallery");

        cursor.shift(Direction::Backward);
        window
            .shift(&mut host, Direction::Backward, &layout)
            .expect("shift");
        window
            .settle(&mut host, Direction::Backward, &images, cursor, &layout)
            .expect("settle");

        assert_eq!(window.offsets(), (-2..=6).collect::<Vec<_>>());
        let top = window.node_at(-2).expect("top node");
        assert_eq!(host.node(*top).expect("live node").label, "project-image-3");
        assert_eq!(host.node(*top).expect("live node").style.opacity, 1.0);
    }

    #[test]
    fn clear_removes_everything() {
        let mut host = MemoryHost::new();
        let mut window = nav_window(&mut host, Cursor::new(0, 5).expect("cursor"));
        assert_eq!(window.clear(&mut host).expect("clear"), 9);
        assert!(window.is_empty());
        assert_eq!(host.len(Lane::Nav), 0);
    }
}
