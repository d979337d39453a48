pub mod culling;
pub mod granularity;
pub mod item;
pub mod lanes;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod time_scale;
pub mod transform;
pub mod types;
pub mod value_scale;

pub use culling::{CullingConfig, VisibilityCuller, VisibleSet};
pub use granularity::{
    GranularityLevel, period_floor, period_starts, period_step, quarter_of, resolve_granularity,
    resolve_granularity_for_days,
};
pub use item::{
    DEFAULT_WARNING_THRESHOLD_DAYS, ItemId, ItemSet, ItemStatus, LicenseRecord,
    RecordIngestOptions, TimelineItem, VerticalPosition,
};
pub use lanes::{CompanyLanes, pack_intervals, pack_item_lanes};
pub use projection::ViewProjection;
pub use scale::LinearScale;
pub use time_scale::{TimeScale, TimeScaleTuning};
pub use transform::{AxisTransform, TransformOrigin, TransformState, ZoomBounds};
pub use types::{PixelPoint, PlotArea, Viewport, ViewportExtent};
pub use value_scale::ValueScale;
