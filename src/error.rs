use thiserror::Error;

use crate::interaction::SyncPhase;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("synchronization pass refused: {requested:?} requested while {active:?} is active")]
    SyncConflict {
        active: SyncPhase,
        requested: SyncPhase,
    },
}
