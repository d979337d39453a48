use crate::core::TimelineItem;
use crate::error::{GanttError, GanttResult};
use crate::extensions::{HoverEvent, TimelineObserver};
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn TimelineObserver>) -> GanttResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(GanttError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self
            .core
            .observers
            .iter()
            .any(|entry| entry.id() == observer_id)
        {
            return Err(GanttError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.core.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .core
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.core.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.core.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.core
            .observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    pub(super) fn emit_hover(&mut self, event: &HoverEvent) {
        for observer in &mut self.core.observers {
            observer.on_item_hover(event);
        }
    }

    pub(super) fn emit_select(&mut self, item: &TimelineItem) {
        for observer in &mut self.core.observers {
            observer.on_item_select(item);
        }
    }

    /// Notifies observers of the current extent after a viewport change.
    pub(super) fn emit_viewport_change(&mut self) -> GanttResult<()> {
        if self.core.observers.is_empty() {
            return Ok(());
        }
        let extent = self.core.session.extent()?;
        for observer in &mut self.core.observers {
            observer.on_viewport_change(extent);
        }
        Ok(())
    }
}
