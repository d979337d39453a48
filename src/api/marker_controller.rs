use crate::error::{GanttError, GanttResult};
use crate::extensions::DateMarker;
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Adds a host-defined date marker with unique id.
    pub fn add_marker(&mut self, marker: DateMarker) -> GanttResult<()> {
        marker.validate()?;
        if self.core.markers.iter().any(|entry| entry.id == marker.id) {
            return Err(GanttError::InvalidData(format!(
                "marker with id `{}` is already registered",
                marker.id
            )));
        }
        self.core.markers.push(marker);
        Ok(())
    }

    /// Removes a marker by id. Returns `true` when removed.
    pub fn remove_marker(&mut self, marker_id: &str) -> bool {
        let before = self.core.markers.len();
        self.core.markers.retain(|marker| marker.id != marker_id);
        self.core.markers.len() != before
    }

    #[must_use]
    pub fn markers(&self) -> &[DateMarker] {
        &self.core.markers
    }
}
