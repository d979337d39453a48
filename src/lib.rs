//! gantt-rs: license-expiration timeline engine.
//!
//! Items are plotted by end date against a value axis. One view transform is
//! shared by pointer gestures and two overview selectors, kept consistent by
//! an explicit synchronization state machine. Visible items are culled and
//! drawn either as retained vector shapes or as raster dots, chosen by a
//! level-of-detail selector from the zoom factor.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{GanttError, GanttResult};
