use thiserror::Error;

use crate::config::MAX_MASSES_PER_ROW;

/// Caller programming errors surfaced by the engine API.
///
/// These are rejected rather than silently clamped so that UI misuse shows
/// up during development instead of as quietly wrong physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("active mass count {value} is outside [1, {MAX_MASSES_PER_ROW}]")]
    MassCountOutOfRange { value: usize },

    #[error("mass index is not a draggable interior mass")]
    MassIndexOutOfRange,

    #[error("mode index is outside the modal storage")]
    ModeIndexOutOfRange,

    #[error("cannot change the active mass count while a mass is being dragged")]
    TopologyLockedWhileDragging,

    #[error("a mass is already being dragged")]
    AlreadyDragging,

    #[error("no mass is currently being dragged")]
    NoMassBeingDragged,
}
