//! Optional host-facing hooks live here.
//!
//! Observers and date markers read engine state but never mutate core paths.

pub mod markers;
pub mod observer;

pub use markers::{DateMarker, marker_primitives, today_marker};
pub use observer::{HoverEvent, TimelineObserver};
