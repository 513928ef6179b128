#![forbid(unsafe_code)]

//! Core: index rotation and window recycling for a lockstep carousel.
//!
//! # Role
//! `carousel-core` is the platform-independent half of the carousel. It owns
//! two circular lists (project names and image identifiers), a cursor into
//! each, and a fixed-size window of rendered nodes per list. Wheel input is
//! shaped into discrete steps; every step moves both cursors together and
//! recycles nodes at the window edges.
//!
//! # Design goals
//! - **Host-driven**: nodes are created, restyled and removed through the
//!   [`NodeHost`] trait. The browser binding implements it over DOM
//!   elements; [`memory::MemoryHost`] implements it headlessly.
//! - **Deterministic time**: the settle pass that follows each step is
//!   driven by an explicit clock or by the host's own timer, never by wall
//!   time read from inside the crate.
//! - **Owned node sets**: windows hold direct handles to their nodes, so no
//!   step ever has to query the host for what it rendered.
//!
//! # Example
//!
//! ```
//! use carousel_core::{Carousel, CarouselConfig, Direction, Lane};
//! use carousel_core::memory::MemoryHost;
//!
//! let mut carousel = Carousel::mount(CarouselConfig::default(), MemoryHost::new())?;
//! assert_eq!(carousel.focused_project(), "CISCO");
//!
//! carousel.scroll(Direction::Forward)?;
//! carousel.settle()?;
//! assert_eq!(carousel.focused_project(), "SAP");
//! assert_eq!(carousel.host().len(Lane::Nav), 9);
//! # Ok::<(), carousel_core::CarouselError>(())
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod layout;
pub mod memory;
pub mod ring;
pub mod wheel;
pub mod window;

pub use config::{CarouselConfig, GalleryConfig, NavConfig};
pub use controller::{
    Carousel, CarouselSnapshot, IgnoredReason, Phase, SettleReport, StepOutcome, WheelOutcome,
};
pub use error::CarouselError;
pub use host::NodeHost;
pub use layout::{GalleryLayout, NavLayout, SlotLayout, SlotStyle};
pub use ring::{Cursor, Direction, Ring};
pub use window::{Lane, LaneSettle, LaneWindow, WindowBounds};
