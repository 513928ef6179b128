#![forbid(unsafe_code)]

//! The scroll controller tying rings, windows, wheel shaping and timing
//! together.
//!
//! # State machine
//!
//! ```text
//!            qualifying wheel / scroll()
//!   Idle ───────────────────────────────▶ Animating { direction, settle_at }
//!    ▲                                         │
//!    └──────── settle() / clock ≥ settle_at ───┘
//! ```
//!
//! A step moves both cursors and shifts both lane windows immediately; the
//! settle pass that trims and refills the windows runs once the transition
//! delay has elapsed. Steps requested while animating are ignored, so at
//! most one transition is ever in flight and cursors can never drift from
//! the nodes on screen.

use core::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::clock::{DeterministicClock, duration_from_ms};
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::host::NodeHost;
use crate::layout::{GalleryLayout, NavLayout};
use crate::ring::{Cursor, Direction, Ring};
use crate::wheel::WheelAccumulator;
use crate::window::{Lane, LaneSettle, LaneWindow};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A step was applied; its settle pass is due at `settle_at`.
    Animating {
        direction: Direction,
        settle_at: Duration,
    },
}

/// Why a step request did not start a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Another transition has not settled yet.
    Animating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Started {
        direction: Direction,
        settle_at: Duration,
    },
    Ignored(IgnoredReason),
}

impl StepOutcome {
    #[must_use]
    pub const fn started(self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Result of feeding one wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// The delta was absorbed below the threshold (or was not finite).
    Accumulating,
    /// The threshold was crossed and a step was requested.
    Stepped(StepOutcome),
}

/// Summary of one completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettleReport {
    pub direction: Direction,
    pub nav: LaneSettle,
    pub gallery: LaneSettle,
}

/// Serializable view of the controller, for host inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub project_index: usize,
    pub image_index: usize,
    pub focused_project: String,
    pub focused_image: String,
    pub animating: bool,
    pub nav_offsets: Option<Vec<i32>>,
    pub gallery_offsets: Option<Vec<i32>>,
    pub wheel_accumulated: f64,
    pub steps_started: u64,
    pub steps_ignored: u64,
}

/// Lockstep carousel over a [`NodeHost`].
pub struct Carousel<H: NodeHost> {
    host: H,
    projects: Ring<String>,
    images: Ring<String>,
    project_cursor: Cursor,
    image_cursor: Cursor,
    nav_layout: NavLayout,
    gallery_layout: GalleryLayout,
    /// `None` when the host has no container for the lane.
    nav: Option<LaneWindow<H::Node>>,
    gallery: Option<LaneWindow<H::Node>>,
    wheel: WheelAccumulator,
    clock: DeterministicClock,
    settle_delay: Duration,
    phase: Phase,
    steps_started: u64,
    steps_ignored: u64,
}

impl<H: NodeHost> Carousel<H> {
    /// Validate `config`, then populate every lane `host` has a container
    /// for.
    pub fn mount(config: CarouselConfig, mut host: H) -> Result<Self, CarouselError> {
        config.validate()?;
        let CarouselConfig {
            projects,
            images,
            initial_project_index,
            initial_image_index,
            nav,
            gallery,
            wheel_threshold,
            settle_delay_ms,
        } = config;

        let project_cursor = cursor_for(Lane::Nav, initial_project_index, projects.len())?;
        let image_cursor = cursor_for(Lane::Gallery, initial_image_index, images.len())?;
        let projects = Ring::new(projects).ok_or(CarouselError::EmptyList { lane: Lane::Nav })?;
        let images = Ring::new(images).ok_or(CarouselError::EmptyList {
            lane: Lane::Gallery,
        })?;
        let nav_layout = NavLayout::new(&nav);
        let gallery_layout = GalleryLayout::new(&gallery);

        let nav_window = if host.lane_available(Lane::Nav) {
            Some(LaneWindow::populate(
                &mut host,
                Lane::Nav,
                nav.window,
                &projects,
                project_cursor,
                &nav_layout,
            )?)
        } else {
            debug!(
                target: "carousel::controller",
                lane = "nav",
                "lane container missing; lane disabled"
            );
            None
        };
        let gallery_window = if host.lane_available(Lane::Gallery) {
            Some(LaneWindow::populate(
                &mut host,
                Lane::Gallery,
                gallery.window,
                &images,
                image_cursor,
                &gallery_layout,
            )?)
        } else {
            debug!(
                target: "carousel::controller",
                lane = "gallery",
                "lane container missing; lane disabled"
            );
            None
        };

        debug!(
            target: "carousel::controller",
            projects = projects.len(),
            images = images.len(),
            project_index = project_cursor.index(),
            image_index = image_cursor.index(),
            "carousel mounted"
        );

        Ok(Self {
            host,
            projects,
            images,
            project_cursor,
            image_cursor,
            nav_layout,
            gallery_layout,
            nav: nav_window,
            gallery: gallery_window,
            wheel: WheelAccumulator::new(wheel_threshold),
            clock: DeterministicClock::new(),
            settle_delay: Duration::from_millis(settle_delay_ms),
            phase: Phase::Idle,
            steps_started: 0,
            steps_ignored: 0,
        })
    }

    /// Feed one wheel delta (CSS `deltaY`).
    ///
    /// The accumulator resets whenever the threshold is crossed, even if the
    /// resulting step is ignored because a transition is in flight.
    pub fn on_wheel(&mut self, delta_y: f64) -> Result<WheelOutcome, CarouselError> {
        match self.wheel.push(delta_y) {
            None => Ok(WheelOutcome::Accumulating),
            Some(direction) => self.scroll(direction).map(WheelOutcome::Stepped),
        }
    }

    /// Request one step in `direction`.
    pub fn scroll(&mut self, direction: Direction) -> Result<StepOutcome, CarouselError> {
        if let Phase::Animating { .. } = self.phase {
            self.steps_ignored += 1;
            trace!(
                target: "carousel::controller",
                direction = direction.as_str(),
                "step ignored while animating"
            );
            return Ok(StepOutcome::Ignored(IgnoredReason::Animating));
        }

        self.project_cursor.shift(direction);
        self.image_cursor.shift(direction);
        let settle_at = self.clock.now().saturating_add(self.settle_delay);
        self.phase = Phase::Animating {
            direction,
            settle_at,
        };
        self.steps_started += 1;
        debug!(
            target: "carousel::controller",
            direction = direction.as_str(),
            project_index = self.project_cursor.index(),
            image_index = self.image_cursor.index(),
            focused = self.focused_project(),
            "step started"
        );

        let shifted = self.shift_lanes(direction);
        if let Err(err) = &shifted {
            warn!(target: "carousel::controller", error = %err, "lane shift failed");
        }
        shifted.map(|()| StepOutcome::Started {
            direction,
            settle_at,
        })
    }

    /// Complete the in-flight transition, if any.
    ///
    /// The controller is back to [`Phase::Idle`] before any node is touched,
    /// so a host failure here cannot block later steps.
    pub fn settle(&mut self) -> Result<Option<SettleReport>, CarouselError> {
        let Phase::Animating { direction, .. } = self.phase else {
            return Ok(None);
        };
        self.phase = Phase::Idle;

        let nav = match self.nav.as_mut() {
            Some(window) => window.settle(
                &mut self.host,
                direction,
                &self.projects,
                self.project_cursor,
                &self.nav_layout,
            ),
            None => Ok(LaneSettle::default()),
        };
        let gallery = match self.gallery.as_mut() {
            Some(window) => window.settle(
                &mut self.host,
                direction,
                &self.images,
                self.image_cursor,
                &self.gallery_layout,
            ),
            None => Ok(LaneSettle::default()),
        };
        let report = SettleReport {
            direction,
            nav: nav.inspect_err(|err| {
                warn!(target: "carousel::controller", error = %err, "nav settle failed");
            })?,
            gallery: gallery.inspect_err(|err| {
                warn!(target: "carousel::controller", error = %err, "gallery settle failed");
            })?,
        };
        trace!(
            target: "carousel::controller",
            direction = direction.as_str(),
            "step settled"
        );
        Ok(Some(report))
    }

    /// Advance the deterministic clock, settling a transition that falls due.
    pub fn advance_time(&mut self, dt: Duration) -> Result<Option<SettleReport>, CarouselError> {
        self.clock.advance(dt);
        self.settle_if_due()
    }

    /// [`Self::advance_time`] from host milliseconds; NaN, infinite and
    /// non-positive values leave the clock untouched.
    pub fn advance_time_ms(&mut self, dt_ms: f64) -> Result<Option<SettleReport>, CarouselError> {
        match duration_from_ms(dt_ms) {
            Some(dt) => self.advance_time(dt),
            None => Ok(None),
        }
    }

    /// Move the deterministic clock to absolute time `now`.
    pub fn set_time(&mut self, now: Duration) -> Result<Option<SettleReport>, CarouselError> {
        self.clock.set(now);
        self.settle_if_due()
    }

    /// Remove every managed node in place and disable both lanes.
    ///
    /// Any in-flight transition is dropped. Cursors keep their values, so
    /// later steps still rotate them. Returns the number of nodes removed.
    /// A lane whose nodes the host fails to remove stays enabled with the
    /// remaining nodes, so the call can be retried.
    pub fn detach(&mut self) -> Result<usize, CarouselError> {
        self.phase = Phase::Idle;
        self.wheel.reset();
        let mut removed = 0;
        let mut failure = None;
        for lane in [&mut self.nav, &mut self.gallery] {
            let Some(window) = lane.as_mut() else {
                continue;
            };
            match window.clear(&mut self.host) {
                Ok(count) => {
                    removed += count;
                    *lane = None;
                }
                Err(err) => {
                    warn!(target: "carousel::controller", error = %err, "lane detach failed");
                    failure.get_or_insert(err);
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }
        debug!(target: "carousel::controller", removed, "carousel detached");
        Ok(removed)
    }

    /// Remove every managed node and hand the host back.
    pub fn unmount(mut self) -> Result<H, CarouselError> {
        self.detach()?;
        Ok(self.host)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    #[must_use]
    pub const fn project_index(&self) -> usize {
        self.project_cursor.index()
    }

    #[must_use]
    pub const fn image_index(&self) -> usize {
        self.image_cursor.index()
    }

    #[must_use]
    pub fn focused_project(&self) -> &str {
        self.projects.around(self.project_cursor, 0)
    }

    #[must_use]
    pub fn focused_image(&self) -> &str {
        self.images.around(self.image_cursor, 0)
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// The window of `lane`, or `None` if the lane is disabled.
    #[must_use]
    pub fn window(&self, lane: Lane) -> Option<&LaneWindow<H::Node>> {
        match lane {
            Lane::Nav => self.nav.as_ref(),
            Lane::Gallery => self.gallery.as_ref(),
        }
    }

    /// Offsets of `lane`'s nodes, ascending; `None` if the lane is disabled.
    #[must_use]
    pub fn offsets(&self, lane: Lane) -> Option<Vec<i32>> {
        self.window(lane).map(LaneWindow::offsets)
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Nodes owned by the carousel must not be removed
    /// behind its back.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            project_index: self.project_index(),
            image_index: self.image_index(),
            focused_project: self.focused_project().to_owned(),
            focused_image: self.focused_image().to_owned(),
            animating: self.is_animating(),
            nav_offsets: self.offsets(Lane::Nav),
            gallery_offsets: self.offsets(Lane::Gallery),
            wheel_accumulated: self.wheel.accumulated(),
            steps_started: self.steps_started,
            steps_ignored: self.steps_ignored,
        }
    }

    /// Shift both lanes even if one fails, so neither drifts from its cursor.
    fn shift_lanes(&mut self, direction: Direction) -> Result<(), CarouselError> {
        let nav = match self.nav.as_mut() {
            Some(window) => window.shift(&mut self.host, direction, &self.nav_layout),
            None => Ok(()),
        };
        let gallery = match self.gallery.as_mut() {
            Some(window) => window.shift(&mut self.host, direction, &self.gallery_layout),
            None => Ok(()),
        };
        nav.and(gallery)
    }

    fn settle_if_due(&mut self) -> Result<Option<SettleReport>, CarouselError> {
        match self.phase {
            Phase::Animating { settle_at, .. } if self.clock.now() >= settle_at => self.settle(),
            _ => Ok(None),
        }
    }
}

fn cursor_for(lane: Lane, index: usize, len: usize) -> Result<Cursor, CarouselError> {
    Cursor::new(index, len).ok_or(if len == 0 {
        CarouselError::EmptyList { lane }
    } else {
        CarouselError::CursorOutOfRange { lane, index, len }
    })
}
