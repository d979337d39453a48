use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Viewport};
use crate::error::{GanttError, GanttResult};

use super::{ChartMargins, OverviewConfig};

/// Surface regions derived from the viewport, margins and overview sizes.
///
/// The time track sits below the plot's tick band and spans the plot width;
/// the value track sits left of the plot's value labels and spans its height.
/// Track pixels along each axis equal base-scale pixels of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub time_track: PlotArea,
    pub value_track: PlotArea,
}

impl TimelineLayout {
    pub fn compute(
        viewport: Viewport,
        margins: ChartMargins,
        overview: OverviewConfig,
    ) -> GanttResult<Self> {
        if !viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let plot_width = viewport.width_px() - margins.left - margins.right;
        let plot_height = viewport.height_px()
            - margins.top
            - margins.bottom
            - overview.time_brush_height
            - overview.axis_band_height;
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let plot = PlotArea::new(margins.left, margins.top, plot_width, plot_height);
        let time_track = PlotArea::new(
            plot.left,
            plot.bottom() + overview.axis_band_height,
            plot_width,
            overview.time_brush_height,
        );
        let value_track = PlotArea::new(
            (plot.left - overview.value_axis_gap - overview.value_brush_width).max(0.0),
            plot.top,
            overview.value_brush_width,
            plot_height,
        );

        Ok(Self {
            viewport,
            plot,
            time_track,
            value_track,
        })
    }
}
