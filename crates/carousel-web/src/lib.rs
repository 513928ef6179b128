#![forbid(unsafe_code)]

//! Browser binding for the lockstep carousel.
//!
//! This crate provides [`InfiniteScroll`], a `wasm-bindgen`-exported struct
//! that mounts a `carousel_core::Carousel` over two page containers, turns
//! window wheel events into steps, and schedules each settle pass with
//! `setTimeout`.
//!
//! ```js
//! import init, { InfiniteScroll } from "./carousel_web.js";
//! await init();
//! const carousel = new InfiniteScroll();
//! carousel.scroll(1);
//! console.log(carousel.focusedProject);
//! carousel.dispose();
//! ```

pub mod markup;
pub mod timer;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomError, DomHost};
#[cfg(target_arch = "wasm32")]
pub use wasm::InfiniteScroll;
