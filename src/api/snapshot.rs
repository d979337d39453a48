use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{GranularityLevel, ItemStatus, TransformState, ViewportExtent};
use crate::error::{GanttError, GanttResult};
use crate::interaction::SyncPhase;
use crate::render::{RenderStrategy, Renderer};

use super::{TimelineEngine, TimelineLayout};

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view state used by diagnostics and regression tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub layout: TimelineLayout,
    pub extent: ViewportExtent,
    pub transform: TransformState,
    pub granularity: GranularityLevel,
    pub lod: RenderStrategy,
    pub active_layer: RenderStrategy,
    pub item_count: usize,
    pub visible_count: usize,
    /// Item count per status, in `Active`, `Renewal`, `Expired` order.
    pub status_counts: IndexMap<ItemStatus, usize>,
    pub sync_phase: SyncPhase,
    pub completed_passes: u64,
    pub dropped_echoes: u64,
    pub time_selection: Option<(f64, f64)>,
    pub value_selection: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            GanttError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(GanttError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Builds a deterministic snapshot of the current view.
    pub fn snapshot(&self) -> GanttResult<EngineSnapshot> {
        let session = &self.core.session;
        let mut status_counts: IndexMap<ItemStatus, usize> = [
            ItemStatus::Active,
            ItemStatus::Renewal,
            ItemStatus::Expired,
        ]
        .into_iter()
        .map(|status| (status, 0))
        .collect();
        for item in session.items().items() {
            *status_counts.entry(item.status).or_insert(0) += 1;
        }

        Ok(EngineSnapshot {
            layout: session.layout(),
            extent: session.extent()?,
            transform: session.transform(),
            granularity: session.granularity(),
            lod: session.lod_strategy(),
            active_layer: self.core.surface.active(),
            item_count: session.items().len(),
            visible_count: session.visible().len(),
            status_counts,
            sync_phase: session.sync_phase(),
            completed_passes: session.completed_passes(),
            dropped_echoes: session.dropped_echoes(),
            time_selection: session.time_brush().selection(),
            value_selection: session.value_brush().selection(),
        })
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> GanttResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
