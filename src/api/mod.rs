mod axis_frame_builder;
mod data_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod input_controller;
mod layout;
mod marker_controller;
mod observer_registry;
mod render_coordinator;
mod session;
mod snapshot;
mod sync_coordinator;
mod time_axis_labels;
mod view_controller;

pub use axis_frame_builder::{
    AxisFrameInput, VALUE_TICK_TARGET, build_axis_frame, build_overview_frame, time_grid_lines,
    value_ticks,
};
pub use data_controller::LaneMode;
pub use engine::TimelineEngine;
pub use engine_config::{ChartMargins, InitialView, OverviewConfig, TimelineEngineConfig};
pub use layout::TimelineLayout;
pub use session::TimelineSession;
pub use snapshot::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1};
pub use time_axis_labels::{
    TICK_COARSENING_ZOOM, TimeAxisLabeler, TimeLabelForm, period_band_level, tick_level,
};
